use crate::core::tagger::{TagError, Tagger};
use std::collections::hash_set;
use std::collections::HashSet;

/// Set of normalized tags describing a job or a profile
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSet(HashSet<String>);

impl TagSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.0.contains(tag)
    }

    /// Returns `false` if the tag was already present
    pub fn insert(&mut self, tag: impl Into<String>) -> bool {
        self.0.insert(tag.into())
    }

    pub fn iter(&self) -> hash_set::Iter<'_, String> {
        self.0.iter()
    }

    /// Number of tags present in both sets
    pub fn intersection_count(&self, other: &TagSet) -> usize {
        let (small, large) = if self.len() <= other.len() {
            (self, other)
        } else {
            (other, self)
        };
        small.iter().filter(|tag| large.contains(tag)).count()
    }
}

impl FromIterator<String> for TagSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> FromIterator<&'a str> for TagSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        Self(iter.into_iter().map(str::to_string).collect())
    }
}

impl Extend<String> for TagSet {
    fn extend<I: IntoIterator<Item = String>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl IntoIterator for TagSet {
    type Item = String;
    type IntoIter = hash_set::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Extract the tag set of a text and its declared skills
///
/// The text is lower-cased and tagged; noun and adjective phrases are split
/// into single words and stop-words are removed from each list separately.
/// Skills are added as given: no case folding, splitting or filtering.
pub fn extract_tags(
    tagger: &dyn Tagger,
    text: &str,
    skills: &[String],
) -> Result<TagSet, TagError> {
    let text = text.to_lowercase();
    let phrases = tagger.tag(&text)?;

    let nouns = tagger.remove_stopwords(split_phrases(phrases.nouns));
    let adjectives = tagger.remove_stopwords(split_phrases(phrases.adjectives));

    let mut tags: TagSet = nouns.into_iter().collect();
    tags.extend(adjectives);
    tags.extend(skills.iter().cloned());

    Ok(tags)
}

fn split_phrases(phrases: Vec<String>) -> Vec<String> {
    phrases
        .iter()
        .flat_map(|phrase| phrase.split_whitespace())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::tagger::{RuleTagger, TaggedPhrases};

    /// Tagger returning canned phrases, recording nothing
    #[derive(Debug)]
    struct CannedTagger {
        nouns: Vec<&'static str>,
        adjectives: Vec<&'static str>,
    }

    impl Tagger for CannedTagger {
        fn tag_nouns(&self, _text: &str) -> Result<Vec<String>, TagError> {
            Ok(self.nouns.iter().map(|s| s.to_string()).collect())
        }

        fn tag_adjectives(&self, _text: &str) -> Result<Vec<String>, TagError> {
            Ok(self.adjectives.iter().map(|s| s.to_string()).collect())
        }

        fn remove_stopwords(&self, tokens: Vec<String>) -> Vec<String> {
            tokens.into_iter().filter(|t| t != "the").collect()
        }
    }

    #[derive(Debug)]
    struct OfflineTagger;

    impl Tagger for OfflineTagger {
        fn tag_nouns(&self, _text: &str) -> Result<Vec<String>, TagError> {
            Err(TagError::Backend("offline".to_string()))
        }

        fn tag_adjectives(&self, _text: &str) -> Result<Vec<String>, TagError> {
            Ok(vec![])
        }

        fn remove_stopwords(&self, tokens: Vec<String>) -> Vec<String> {
            tokens
        }
    }

    fn skills(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_phrases_are_split_and_filtered() {
        let tagger = CannedTagger {
            nouns: vec!["the backend engineer", "rust"],
            adjectives: vec!["senior the"],
        };

        let tags = extract_tags(&tagger, "ignored", &[]).unwrap();

        assert_eq!(tags.len(), 4);
        for tag in ["backend", "engineer", "rust", "senior"] {
            assert!(tags.contains(tag), "missing {}", tag);
        }
        assert!(!tags.contains("the"));
    }

    #[test]
    fn test_skills_are_kept_verbatim() {
        let tagger = CannedTagger {
            nouns: vec![],
            adjectives: vec![],
        };

        let tags = extract_tags(&tagger, "", &skills(&["Node.js", "The", "Machine Learning"])).unwrap();

        assert!(tags.contains("Node.js"));
        assert!(tags.contains("The"));
        assert!(tags.contains("Machine Learning"));
        assert!(!tags.contains("node.js"));
    }

    #[test]
    fn test_empty_text_yields_only_skills() {
        let tags = extract_tags(&RuleTagger::default(), "", &skills(&["Go"])).unwrap();
        assert_eq!(tags, ["Go"].into_iter().collect::<TagSet>());

        let none = extract_tags(&RuleTagger::default(), "", &[]).unwrap();
        assert!(none.is_empty());
    }

    #[test]
    fn test_text_is_lower_cased() {
        let tags = extract_tags(&RuleTagger::default(), "Experienced Backend Engineer", &[]).unwrap();
        assert!(tags.contains("backend"));
        assert!(tags.contains("engineer"));
        assert!(tags.contains("experienced"));
        assert!(!tags.contains("Backend"));
    }

    #[test]
    fn test_duplicates_collapse() {
        let tags = extract_tags(
            &RuleTagger::default(),
            "backend engineer, backend engineer",
            &skills(&["backend"]),
        )
        .unwrap();
        assert_eq!(tags.len(), 2);
    }

    #[test]
    fn test_tagger_errors_propagate() {
        let err = extract_tags(&OfflineTagger, "rust", &[]).unwrap_err();
        assert_eq!(err, TagError::Backend("offline".to_string()));
    }

    #[test]
    fn test_default_tag_uses_both_methods() {
        let tagger = CannedTagger {
            nouns: vec!["api"],
            adjectives: vec!["fast"],
        };
        assert_eq!(
            tagger.tag("x").unwrap(),
            TaggedPhrases {
                nouns: vec!["api".to_string()],
                adjectives: vec!["fast".to_string()],
            }
        );
    }

    #[test]
    fn test_intersection_count() {
        let a: TagSet = ["rust", "go", "sql"].into_iter().collect();
        let b: TagSet = ["go", "sql", "react", "css"].into_iter().collect();
        assert_eq!(a.intersection_count(&b), 2);
        assert_eq!(b.intersection_count(&a), 2);
    }
}
