// Recommendation engine exports
pub mod ranker;
pub mod similarity;
pub mod tagger;
pub mod tags;

pub use ranker::{Ranker, RankError, DEFAULT_TOP_K};
pub use similarity::jaccard_similarity;
pub use tagger::{RuleTagger, TagError, TaggedPhrases, Tagger};
pub use tags::{extract_tags, TagSet};
