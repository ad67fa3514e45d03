// Route exports
pub mod auth;
pub mod hire;
pub mod home;
pub mod job;
pub mod profile;

use crate::core::Ranker;
use crate::error::ApiError;
use crate::models::HealthResponse;
use crate::services::{CacheManager, MailClient, PasswordHasher, PostgresClient, TokenService};
use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub postgres: Arc<PostgresClient>,
    /// Recommendations are computed on every request when absent
    pub cache: Option<Arc<CacheManager>>,
    pub mailer: Arc<MailClient>,
    pub tokens: Arc<TokenService>,
    pub hasher: PasswordHasher,
    pub ranker: Ranker,
}

impl AppState {
    /// Hash a password on the blocking thread pool
    pub async fn hash_password(&self, password: &str) -> Result<String, ApiError> {
        let hasher = self.hasher;
        let password = password.to_owned();
        Ok(web::block(move || hasher.hash(&password)).await??)
    }

    /// Check a password against its stored hash on the blocking thread pool
    pub async fn verify_password(&self, password: &str, hashed: &str) -> Result<bool, ApiError> {
        let hasher = self.hasher;
        let (password, hashed) = (password.to_owned(), hashed.to_owned());
        Ok(web::block(move || hasher.verify(&password, &hashed)).await??)
    }
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .service(web::scope("/auth").configure(auth::configure))
        .service(web::scope("/job").configure(job::configure))
        .service(web::scope("/hire").configure(hire::configure))
        .service(web::scope("/home").configure(home::configure))
        .service(web::scope("/profile").configure(profile::configure));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let pg_healthy = state.postgres.health_check().await.unwrap_or(false);

    let status = if pg_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}
