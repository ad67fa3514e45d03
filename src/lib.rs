//! Career Crafter - recruiter backend with freelancer recommendations
//!
//! The core of this library ranks freelancer profiles against a job posting
//! by the overlap of the tags extracted from their texts and skills.

pub mod config;
pub mod core;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use core::{extract_tags, jaccard_similarity, RankError, Ranker, RuleTagger, TagSet, Tagger};
pub use models::{Job, Profile, ScoredCandidate};
