use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::models::{JobRequest, MessageResponse};
use crate::routes::AppState;
use crate::services::CacheKey;
use actix_web::{web, HttpResponse};
use validator::Validate;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/add", web::post().to(add_job))
        .route("/myjobs", web::get().to(my_jobs))
        .route("/delete/{jobId}", web::delete().to(delete_job));
}

/// POST /job/add
///
/// The job gets the next numeric id, is dated now and owned by the caller.
async fn add_job(
    user: AuthUser,
    state: web::Data<AppState>,
    req: web::Json<JobRequest>,
) -> Result<HttpResponse, ApiError> {
    req.validate()?;

    let job = state.postgres.create_job(&req, user.claims().id).await?;
    tracing::info!("Job {} added by {}", job.job_id, user.claims().username);

    Ok(HttpResponse::Ok().json(job))
}

/// GET /job/myjobs
async fn my_jobs(user: AuthUser, state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let jobs = state.postgres.jobs_by_owner(user.claims().id).await?;
    Ok(HttpResponse::Ok().json(jobs))
}

/// DELETE /job/delete/{jobId}
async fn delete_job(
    user: AuthUser,
    state: web::Data<AppState>,
    job_id: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let job_id = job_id.into_inner();

    let deleted = state
        .postgres
        .delete_job(job_id, user.claims().id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Job Not Found".to_string()))?;

    if let Some(cache) = &state.cache {
        let invalidated = match state.postgres.profiles_version().await {
            Ok(version) => cache
                .delete(&CacheKey::recommendations(deleted, &version))
                .await
                .map_err(|e| e.to_string()),
            Err(e) => Err(e.to_string()),
        };
        if let Err(e) = invalidated {
            tracing::warn!("Failed to invalidate recommendations for job {}: {}", job_id, e);
        }
    }

    tracing::info!("Job {} deleted by {}", job_id, user.claims().username);
    Ok(HttpResponse::Ok().json(MessageResponse::new("Job Deleted")))
}
