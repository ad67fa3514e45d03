use crate::core::{
    similarity::jaccard_similarity,
    tagger::{RuleTagger, TagError, Tagger},
    tags::extract_tags,
};
use crate::models::{Job, Profile, ScoredCandidate};
use std::cmp::Ordering;
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

/// Number of profiles recommended per job unless configured otherwise
pub const DEFAULT_TOP_K: usize = 5;

/// Errors that abort a ranking run
#[derive(Debug, Error)]
pub enum RankError {
    #[error("failed to extract job tags: {0}")]
    JobTags(#[source] TagError),

    #[error("failed to extract tags for profile #{index} ({profile_id}): {source}")]
    ProfileTags {
        index: usize,
        profile_id: Uuid,
        #[source]
        source: TagError,
    },
}

/// Content-based recommender: ranks freelancer profiles against a job
///
/// # Pipeline
/// 1. Tag the job (description + title, plus its skills)
/// 2. Tag each profile (bio + about, plus its skills)
/// 3. Score each profile with Jaccard similarity against the job tags
/// 4. Stable sort by score (descending) and keep the top K
#[derive(Debug, Clone)]
pub struct Ranker {
    tagger: Arc<dyn Tagger>,
    top_k: usize,
}

impl Ranker {
    pub fn new(tagger: Arc<dyn Tagger>, top_k: usize) -> Self {
        Self { tagger, top_k }
    }

    pub fn with_default_tagger() -> Self {
        Self::new(Arc::new(RuleTagger::default()), DEFAULT_TOP_K)
    }

    pub fn top_k(&self) -> usize {
        self.top_k
    }

    /// Rank `profiles` against `job`
    ///
    /// Returns at most `top_k` scored copies of the input profiles, highest
    /// score first; profiles with equal scores keep their input order.
    /// No profiles or no job gives an empty result without tagging anything.
    /// A tagging failure on any profile fails the whole run.
    pub fn rank_profiles(
        &self,
        profiles: &[Profile],
        job: Option<&Job>,
    ) -> Result<Vec<ScoredCandidate>, RankError> {
        let job = match job {
            Some(job) if !profiles.is_empty() => job,
            _ => return Ok(Vec::new()),
        };

        let job_tags = extract_tags(self.tagger.as_ref(), &job.ranking_text(), &job.job_skills)
            .map_err(RankError::JobTags)?;

        let mut scored = Vec::with_capacity(profiles.len());
        for (index, profile) in profiles.iter().enumerate() {
            let profile_tags = extract_tags(
                self.tagger.as_ref(),
                &profile.ranking_text(),
                &profile.user_skills,
            )
            .map_err(|source| RankError::ProfileTags {
                index,
                profile_id: profile.id,
                source,
            })?;

            let score = jaccard_similarity(&job_tags, &profile_tags);
            tracing::trace!("Profile {} scored {:.2} for job {}", profile.id, score, job.job_id);

            scored.push(ScoredCandidate {
                profile: profile.clone(),
                score,
            });
        }

        // sort_by is stable, so ties keep input order
        scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        scored.truncate(self.top_k);

        tracing::debug!(
            "Ranked {} profiles for job {}, returning {}",
            profiles.len(),
            job.job_id,
            scored.len()
        );

        Ok(scored)
    }
}

impl Default for Ranker {
    fn default() -> Self {
        Self::with_default_tagger()
    }
}
