use once_cell::sync::Lazy;
use std::collections::HashSet;
use std::fmt;
use thiserror::Error;

/// Default upper bound on the number of characters a single text may have
pub const DEFAULT_MAX_TEXT_LEN: usize = 20_000;

/// Errors raised by a tagger backend
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TagError {
    #[error("tagger failure: {0}")]
    Backend(String),
}

/// Noun and adjective phrases found in one text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaggedPhrases {
    pub nouns: Vec<String>,
    pub adjectives: Vec<String>,
}

/// Part-of-speech tagging and stop-word filtering capability
///
/// The recommendation engine only depends on this trait, so any tagger
/// (rule based, statistical, or a fixed fake in tests) can be plugged in.
pub trait Tagger: fmt::Debug + Send + Sync {
    /// Phrases tagged as nouns, in text order
    fn tag_nouns(&self, text: &str) -> Result<Vec<String>, TagError>;

    /// Phrases tagged as adjectives, in text order
    fn tag_adjectives(&self, text: &str) -> Result<Vec<String>, TagError>;

    /// Drop stop-words, keeping the order of the remaining tokens
    fn remove_stopwords(&self, tokens: Vec<String>) -> Vec<String>;

    /// Nouns and adjectives in one call. Implementations that analyse the
    /// text once for both should override this.
    fn tag(&self, text: &str) -> Result<TaggedPhrases, TagError> {
        Ok(TaggedPhrases {
            nouns: self.tag_nouns(text)?,
            adjectives: self.tag_adjectives(text)?,
        })
    }
}

/// Coarse part of speech assigned by [`RuleTagger`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pos {
    Noun,
    Adjective,
    Verb,
    Adverb,
    Determiner,
    Pronoun,
    Preposition,
    Conjunction,
    Auxiliary,
    Value,
    /// `-ed` / `-ing` form, resolved from context
    Participle,
}

/// A token with its tag and whether a sentence ends after it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedToken {
    pub word: String,
    pub pos: Pos,
    pub sentence_end: bool,
}

/// Lexicon and suffix based English tagger
#[derive(Debug, Clone)]
pub struct RuleTagger {
    max_text_len: usize,
}

impl Default for RuleTagger {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_TEXT_LEN)
    }
}

impl RuleTagger {
    pub fn new(max_text_len: usize) -> Self {
        Self { max_text_len }
    }

    /// Tokenize and tag `text`
    ///
    /// Only the first `max_text_len` characters are read. Control characters
    /// count as whitespace.
    pub fn analyze(&self, text: &str) -> Vec<TaggedToken> {
        let text = match text.char_indices().nth(self.max_text_len) {
            Some((end, _)) => {
                tracing::debug!(
                    "Truncating text to {} characters before tagging",
                    self.max_text_len
                );
                &text[..end]
            }
            None => text,
        };

        let mut tokens: Vec<TaggedToken> = tokenize(text)
            .into_iter()
            .map(|(word, sentence_end)| {
                let pos = lexical_pos(&word);
                TaggedToken {
                    word,
                    pos,
                    sentence_end,
                }
            })
            .collect();

        resolve_context(&mut tokens);

        tokens
    }

    fn phrases(tokens: &[TaggedToken]) -> TaggedPhrases {
        let mut phrases = TaggedPhrases::default();
        let mut run: Vec<&str> = Vec::new();

        for token in tokens {
            match token.pos {
                Pos::Noun => run.push(&token.word),
                Pos::Adjective => phrases.adjectives.push(token.word.clone()),
                _ => {}
            }

            // Noun phrases never span a non-noun or a sentence boundary
            if (token.pos != Pos::Noun || token.sentence_end) && !run.is_empty() {
                phrases.nouns.push(run.join(" "));
                run.clear();
            }
        }
        if !run.is_empty() {
            phrases.nouns.push(run.join(" "));
        }

        phrases
    }
}

impl Tagger for RuleTagger {
    fn tag_nouns(&self, text: &str) -> Result<Vec<String>, TagError> {
        Ok(self.tag(text)?.nouns)
    }

    fn tag_adjectives(&self, text: &str) -> Result<Vec<String>, TagError> {
        Ok(self.tag(text)?.adjectives)
    }

    fn remove_stopwords(&self, tokens: Vec<String>) -> Vec<String> {
        tokens
            .into_iter()
            .filter(|token| !is_stopword(token))
            .collect()
    }

    fn tag(&self, text: &str) -> Result<TaggedPhrases, TagError> {
        Ok(Self::phrases(&self.analyze(text)))
    }
}

/// Whether `word` is on the English stop-word list
pub fn is_stopword(word: &str) -> bool {
    STOPWORDS.contains(word)
}

/// Split text into words, remembering where sentences end.
///
/// Word-internal `.`, `+`, `#`, `-` and `'` are kept so that `node.js`,
/// `c++`, `c#` and `full-stack` stay single words.
fn tokenize(text: &str) -> Vec<(String, bool)> {
    let mut out: Vec<(String, bool)> = Vec::new();

    for raw in text.split(|c: char| c.is_whitespace() || c.is_control() || SEPARATORS.contains(&c)) {
        if raw.is_empty() {
            continue;
        }

        let sentence_end = raw.ends_with(['.', '!', '?']);
        let word = clean_word(raw);

        if word.is_empty() {
            if sentence_end {
                if let Some(last) = out.last_mut() {
                    last.1 = true;
                }
            }
            continue;
        }

        out.push((word.to_string(), sentence_end));
    }

    out
}

const SEPARATORS: &[char] = &[
    ',', ';', ':', '(', ')', '[', ']', '{', '}', '"', '/', '|', '<', '>', '*', '=',
];

fn clean_word(raw: &str) -> &str {
    let trimmed = raw.trim_end_matches(|c: char| !(c.is_alphanumeric() || c == '+' || c == '#'));

    // A single leading dot survives when it prefixes a name, as in ".net"
    let start = trimmed
        .char_indices()
        .find(|&(i, c)| {
            c.is_alphanumeric()
                || (c == '.'
                    && trimmed[i + 1..]
                        .chars()
                        .next()
                        .map_or(false, char::is_alphanumeric))
        })
        .map(|(i, _)| i);

    match start {
        Some(i) => &trimmed[i..],
        None => "",
    }
}

/// Tag a word in isolation
fn lexical_pos(word: &str) -> Pos {
    if word.starts_with(|c: char| c.is_ascii_digit()) && !word.chars().any(char::is_alphabetic) {
        return Pos::Value;
    }
    if DETERMINERS.contains(word) {
        return Pos::Determiner;
    }
    if PRONOUNS.contains(word) {
        return Pos::Pronoun;
    }
    if AUXILIARIES.contains(word) {
        return Pos::Auxiliary;
    }
    if PREPOSITIONS.contains(word) {
        return Pos::Preposition;
    }
    if CONJUNCTIONS.contains(word) {
        return Pos::Conjunction;
    }
    if ADVERBS.contains(word) {
        return Pos::Adverb;
    }
    if ADJECTIVES.contains(word) {
        return Pos::Adjective;
    }
    if NOUNS.contains(word) {
        return Pos::Noun;
    }
    if VERBS.contains(word) || third_person_verb(word) {
        return Pos::Verb;
    }
    if is_participle(word) {
        return Pos::Participle;
    }
    if word.len() > 4 && word.ends_with("ly") {
        return Pos::Adverb;
    }
    if NOUN_SUFFIXES.iter().any(|s| word.len() > s.len() + 2 && word.ends_with(s)) {
        return Pos::Noun;
    }
    if ADJECTIVE_SUFFIXES
        .iter()
        .any(|s| word.len() > s.len() + 2 && word.ends_with(s))
    {
        return Pos::Adjective;
    }
    Pos::Noun
}

fn third_person_verb(word: &str) -> bool {
    word.len() > 3
        && word
            .strip_suffix('s')
            .map_or(false, |stem| VERBS.contains(stem) && !stem.ends_with('s'))
}

fn is_participle(word: &str) -> bool {
    (word.len() > 5 && word.ends_with("ing")) || (word.len() > 4 && word.ends_with("ed"))
}

/// Second pass: settle ambiguous words from their neighbours
fn resolve_context(tokens: &mut [TaggedToken]) {
    let initial: Vec<Pos> = tokens.iter().map(|t| t.pos).collect();

    for i in 0..tokens.len() {
        let prev = if i == 0 || tokens[i - 1].sentence_end {
            None
        } else {
            Some(tokens[i - 1].pos)
        };
        let next = if tokens[i].sentence_end {
            None
        } else {
            initial.get(i + 1).copied()
        };

        tokens[i].pos = match tokens[i].pos {
            Pos::Participle => resolve_participle(&tokens[i].word, prev, next),
            // "the build", "a senior lead", "my work"
            Pos::Verb if matches!(prev, Some(Pos::Determiner | Pos::Adjective)) => Pos::Noun,
            // "loves design", "with code"
            Pos::Verb if matches!(prev, Some(Pos::Verb | Pos::Preposition))
                && !is_infinitive_marker(tokens, i) =>
            {
                Pos::Noun
            }
            pos => pos,
        };
    }
}

fn is_infinitive_marker(tokens: &[TaggedToken], i: usize) -> bool {
    i > 0 && tokens[i - 1].word == "to"
}

fn resolve_participle(word: &str, prev: Option<Pos>, next: Option<Pos>) -> Pos {
    let past = word.ends_with("ed");
    let before_noun = matches!(next, Some(Pos::Noun | Pos::Adjective | Pos::Participle));

    if before_noun {
        return Pos::Adjective;
    }
    match prev {
        Some(Pos::Determiner | Pos::Adjective) => {
            if past {
                Pos::Adjective
            } else {
                Pos::Noun
            }
        }
        Some(Pos::Auxiliary | Pos::Adverb) if past => Pos::Adjective,
        Some(Pos::Preposition) if !past => Pos::Noun,
        _ => Pos::Verb,
    }
}

const NOUN_SUFFIXES: &[&str] = &[
    "tion", "sion", "ment", "ness", "ity", "ship", "ism", "ist", "ance", "ence", "er", "or",
];

const ADJECTIVE_SUFFIXES: &[&str] = &[
    "ous", "ful", "ive", "able", "ible", "ic", "less", "ish", "al",
];

fn word_set(words: &'static [&'static str]) -> HashSet<&'static str> {
    words.iter().copied().collect()
}

static DETERMINERS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    word_set(&[
        "a", "an", "the", "this", "that", "these", "those", "each", "every", "some", "any", "no",
        "all", "both", "either", "neither", "another", "such", "what", "which", "whose", "my",
        "your", "his", "her", "its", "our", "their", "much", "many", "few", "several", "own",
    ])
});

static PRONOUNS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    word_set(&[
        "i", "me", "you", "he", "him", "she", "it", "we", "us", "they", "them", "myself",
        "yourself", "himself", "herself", "itself", "ourselves", "themselves", "who", "whom",
        "mine", "yours", "hers", "ours", "theirs", "something", "anything", "nothing",
        "everything", "someone", "anyone", "everyone", "nobody", "i'm", "i've", "we're",
        "you're", "they're", "it's",
    ])
});

static AUXILIARIES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    word_set(&[
        "am", "is", "are", "was", "were", "be", "been", "being", "have", "has", "had", "having",
        "do", "does", "did", "will", "would", "shall", "should", "can", "could", "may", "might",
        "must", "don't", "doesn't", "didn't", "won't", "can't",
    ])
});

static PREPOSITIONS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    word_set(&[
        "about", "above", "across", "after", "against", "along", "among", "around", "at",
        "before", "behind", "below", "beneath", "beside", "between", "beyond", "by", "down",
        "during", "except", "for", "from", "in", "inside", "into", "near", "of", "off", "on",
        "onto", "out", "outside", "over", "past", "per", "since", "through", "throughout", "till",
        "to", "toward", "towards", "under", "until", "up", "upon", "via", "with", "within",
        "without",
    ])
});

static CONJUNCTIONS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    word_set(&[
        "and", "or", "but", "nor", "so", "yet", "because", "although", "though", "while",
        "whereas", "if", "unless", "whether", "than", "as", "&",
    ])
});

static ADVERBS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    word_set(&[
        "very", "really", "quite", "also", "just", "only", "not", "never", "always", "often",
        "sometimes", "usually", "already", "still", "even", "too", "here", "there", "now", "then",
        "well", "again", "soon", "almost", "rather", "currently", "mostly", "mainly", "highly",
        "especially", "how", "when", "where", "why",
    ])
});

static ADJECTIVES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    word_set(&[
        "good", "great", "new", "old", "big", "small", "large", "high", "low", "strong", "senior",
        "junior", "remote", "full", "young", "long", "short", "fast", "quick", "hard", "easy",
        "open", "free", "best", "better", "top", "key", "main", "modern", "clean", "solid", "deep",
        "broad", "simple", "complex", "agile", "scalable", "proficient", "efficient", "fluent",
        "excellent", "independent", "different", "competent", "confident", "intelligent",
        "diligent", "passionate", "accurate", "adequate", "appropriate", "private", "hybrid",
        "flexible", "responsible", "familiar", "eager", "keen", "curious", "friendly", "hands-on",
        "self-motivated", "detail-oriented", "cross-functional", "full-time", "part-time",
        "entry-level", "mid-level", "real-time", "first", "last", "next", "other", "same", "whole",
        "little", "early", "late", "recent", "current", "previous", "able", "ready", "happy",
        "fresh", "various", "multiple", "several", "robust", "secure", "reliable", "native",
    ])
});

/// Words whose suffix would otherwise mislead the rules
static NOUNS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    word_set(&[
        "proposal", "portal", "signal", "approval", "rental", "journal", "animal", "hospital",
        "capital", "interval", "terminal", "manual", "tutorial", "material", "arrival", "logic",
        "music", "topic", "traffic", "clinic", "fabric", "metric", "rubric", "mechanic", "critic",
        "arithmetic", "magic", "thing", "string", "spring", "ring", "king", "wing", "ceiling",
        "bed", "need", "seed", "speed", "feed", "shed", "red", "hundred", "family", "supply",
        "assembly", "anomaly", "italy", "backend", "frontend", "front-end", "back-end",
        "full-stack", "fullstack", "devops", "software", "hardware", "data", "experience",
        "engineering", "marketing", "testing", "programming", "computing", "learning",
        "networking", "accounting", "banking", "consulting", "training", "writing", "hosting",
        "design", "code", "project", "product", "team", "role", "job", "skill", "skills",
    ])
});

static VERBS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    word_set(&[
        "build", "develop", "create", "write", "deploy", "maintain", "manage", "lead", "help",
        "make", "use", "love", "enjoy", "want", "know", "seek", "join", "hire", "collaborate",
        "improve", "deliver", "ensure", "implement", "drive", "ship", "learn", "teach", "mentor",
        "run", "get", "go", "see", "think", "bring", "take", "give", "find", "look", "work",
        "specialize", "specialise", "focus", "like", "offer", "provide", "require", "grow",
        "scale", "integrate", "optimize", "optimise", "automate", "own", "architect", "support",
        "analyze", "analyse", "solve", "apply", "contribute", "communicate", "define",
    ])
});

/// English stop-word list
static STOPWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    word_set(&[
        "a", "about", "above", "after", "again", "against", "ain", "all", "am", "an", "and",
        "any", "are", "aren", "aren't", "as", "at", "be", "because", "been", "before", "being",
        "below", "between", "both", "but", "by", "can", "couldn", "couldn't", "d", "did", "didn",
        "didn't", "do", "does", "doesn", "doesn't", "doing", "don", "don't", "down", "during",
        "each", "few", "for", "from", "further", "had", "hadn", "hadn't", "has", "hasn",
        "hasn't", "have", "haven", "haven't", "having", "he", "her", "here", "hers", "herself",
        "him", "himself", "his", "how", "i", "if", "in", "into", "is", "isn", "isn't", "it",
        "it's", "its", "itself", "just", "ll", "m", "ma", "me", "mightn", "mightn't", "more",
        "most", "mustn", "mustn't", "my", "myself", "needn", "needn't", "no", "nor", "not",
        "now", "o", "of", "off", "on", "once", "only", "or", "other", "our", "ours", "ourselves",
        "out", "over", "own", "re", "s", "same", "shan", "shan't", "she", "she's", "should",
        "should've", "shouldn", "shouldn't", "so", "some", "such", "t", "than", "that",
        "that'll", "the", "their", "theirs", "them", "themselves", "then", "there", "these",
        "they", "this", "those", "through", "to", "too", "under", "until", "up", "ve", "very",
        "was", "wasn", "wasn't", "we", "were", "weren", "weren't", "what", "when", "where",
        "which", "while", "who", "whom", "why", "will", "with", "won", "won't", "wouldn",
        "wouldn't", "y", "you", "you'd", "you'll", "you're", "you've", "your", "yours",
        "yourself", "yourselves", "also", "etc", "via", "per",
    ])
});

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(text: &str) -> Vec<(String, Pos)> {
        RuleTagger::default()
            .analyze(text)
            .into_iter()
            .map(|t| (t.word, t.pos))
            .collect()
    }

    #[test]
    fn test_tokenize_keeps_tech_names() {
        let words: Vec<String> = tokenize("node.js, c++ and c#. (.net)")
            .into_iter()
            .map(|(w, _)| w)
            .collect();
        assert_eq!(words, vec!["node.js", "c++", "and", "c#", ".net"]);
    }

    #[test]
    fn test_tokenize_marks_sentence_ends() {
        let ends: Vec<bool> = tokenize("rust developer. loves music")
            .into_iter()
            .map(|(_, end)| end)
            .collect();
        assert_eq!(ends, vec![false, true, false, false]);
    }

    #[test]
    fn test_participle_before_noun_is_adjective() {
        let tagged = tags("experienced backend engineer");
        assert_eq!(tagged[0].1, Pos::Adjective);
        assert_eq!(tagged[1].1, Pos::Noun);
        assert_eq!(tagged[2].1, Pos::Noun);
    }

    #[test]
    fn test_verb_after_determiner_is_noun() {
        let tagged = tags("we lead the build");
        assert_eq!(tagged[1].1, Pos::Verb);
        assert_eq!(tagged[3].1, Pos::Noun);
    }

    #[test]
    fn test_numbers_are_values() {
        let tagged = tags("5 years");
        assert_eq!(tagged[0].1, Pos::Value);
        assert_eq!(tagged[1].1, Pos::Noun);
    }

    #[test]
    fn test_noun_phrases_are_runs() {
        let phrases = RuleTagger::default()
            .tag("experienced backend engineer with postgres skills")
            .unwrap();
        assert_eq!(phrases.nouns, vec!["backend engineer", "postgres skills"]);
        assert_eq!(phrases.adjectives, vec!["experienced"]);
    }

    #[test]
    fn test_noun_phrase_stops_at_sentence_end() {
        let phrases = RuleTagger::default().tag("rust developer. kubernetes").unwrap();
        assert_eq!(phrases.nouns, vec!["rust developer", "kubernetes"]);
    }

    #[test]
    fn test_detached_period_ends_previous_word() {
        assert_eq!(
            tokenize("rust . go"),
            vec![("rust".to_string(), true), ("go".to_string(), false)]
        );
    }

    #[test]
    fn test_control_characters_split_words() {
        let words: Vec<String> = RuleTagger::default()
            .analyze("frontend dev\u{1b}[0m\u{0}rust")
            .into_iter()
            .map(|t| t.word)
            .collect();
        assert_eq!(words, vec!["frontend", "dev", "0m", "rust"]);
    }

    #[test]
    fn test_long_text_is_truncated() {
        let words: Vec<String> = RuleTagger::new(13)
            .analyze("rust postgres docker kubernetes")
            .into_iter()
            .map(|t| t.word)
            .collect();
        assert_eq!(words, vec!["rust", "postgres"]);
    }

    #[test]
    fn test_whitespace_kinds() {
        assert_eq!(RuleTagger::default().analyze("line one\n\tline two\r\n").len(), 4);
    }

    #[test]
    fn test_remove_stopwords() {
        let tagger = RuleTagger::default();
        let kept = tagger.remove_stopwords(vec![
            "the".to_string(),
            "rust".to_string(),
            "and".to_string(),
            "go".to_string(),
        ]);
        assert_eq!(kept, vec!["rust", "go"]);
    }

    #[test]
    fn test_empty_text() {
        let phrases = RuleTagger::default().tag("").unwrap();
        assert!(phrases.nouns.is_empty());
        assert!(phrases.adjectives.is_empty());
    }
}
