use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::models::ScoredCandidate;
use crate::routes::AppState;
use crate::services::{CacheError, CacheKey};
use actix_web::{web, HttpResponse};
use uuid::Uuid;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/myjobs", web::get().to(my_jobs))
        .route("/similarProfiles/{jobId}", web::get().to(similar_profiles));
}

/// GET /home/myjobs
async fn my_jobs(user: AuthUser, state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let jobs = state.postgres.job_summaries(user.claims().id).await?;
    Ok(HttpResponse::Ok().json(jobs))
}

/// GET /home/similarProfiles/{jobId}
///
/// Ranks every freelancer profile against one of the caller's jobs and
/// returns the best matches with their score.
async fn similar_profiles(
    user: AuthUser,
    state: web::Data<AppState>,
    job_id: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let job_id = job_id.into_inner();

    let job = state
        .postgres
        .find_job(job_id, user.claims().id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Job Not Found".to_string()))?;

    // Profile edits change the version, so stale rankings are never served
    let cache_key = match &state.cache {
        Some(_) => Some(CacheKey::recommendations(
            job.id,
            &state.postgres.profiles_version().await?,
        )),
        None => None,
    };
    if let (Some(cache), Some(cache_key)) = (&state.cache, &cache_key) {
        match cache.get::<Vec<ScoredCandidate>>(cache_key).await {
            Ok(cached) => {
                tracing::debug!("Serving cached recommendations for job {}", job.job_id);
                return Ok(HttpResponse::Ok().json(cached));
            }
            Err(CacheError::CacheMiss(_)) => {}
            Err(e) => tracing::warn!("Cache lookup failed for job {}: {}", job.job_id, e),
        }
    }

    let profiles = state.postgres.list_profiles().await?;
    let candidates = profiles.len();

    let ranker = state.ranker.clone();
    let ranked = web::block(move || ranker.rank_profiles(&profiles, Some(&job))).await??;

    tracing::info!(
        "Recommending {} of {} profiles for job {}",
        ranked.len(),
        candidates,
        job_id
    );

    if let (Some(cache), Some(cache_key)) = (&state.cache, &cache_key) {
        if let Err(e) = cache.set(cache_key, &ranked).await {
            tracing::warn!("Failed to cache recommendations for job {}: {}", job_id, e);
        }
    }

    Ok(HttpResponse::Ok().json(ranked))
}
