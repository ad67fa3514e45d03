use crate::core::RankError;
use crate::models::ErrorResponse;
use crate::services::{MailError, PasswordError, PostgresError, TokenError};
use actix_web::{error, http::StatusCode, HttpRequest, HttpResponse};
use thiserror::Error;

pub const DATABASE_ERROR: &str = "Error occured at Database";
pub const SERVER_ERROR: &str = "Error occured at Server";
pub const PASSWORDS_DO_NOT_MATCH: &str = "Passwords do not match";
pub const USERNAME_TAKEN: &str = "User with username already exists";
pub const EMAIL_TAKEN: &str = "User with email already exists";
pub const INVALID_OTP: &str = "Invalid OTP";
pub const INVALID_CREDENTIALS: &str = "Invalid Credentials";
pub const EMAIL_NOT_VERIFIED: &str = "User email not verified";
pub const UNAUTHORIZED_ACCESS: &str = "Unauthorized Access";

/// Errors returned by HTTP handlers
///
/// Client errors carry the message shown to the caller. Internal errors are
/// logged and answered with a fixed message.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Invalid JSON: {0}")]
    InvalidJson(String),

    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Database error: {0}")]
    Database(#[from] PostgresError),

    #[error("Mail error: {0}")]
    Mail(#[from] MailError),

    #[error("Token error: {0}")]
    Token(#[from] TokenError),

    #[error("Password error: {0}")]
    Password(#[from] PasswordError),

    #[error("Ranking error: {0}")]
    Ranking(#[from] RankError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Unauthorized(message.into())
    }

    fn label(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "bad_request",
            ApiError::Unauthorized(_) => "unauthorized",
            ApiError::NotFound(_) => "not_found",
            ApiError::InvalidJson(_) => "invalid_json",
            ApiError::InvalidQuery(_) => "invalid_query",
            ApiError::Database(_) => "database_error",
            ApiError::Mail(_)
            | ApiError::Token(_)
            | ApiError::Password(_)
            | ApiError::Ranking(_)
            | ApiError::Internal(_) => "server_error",
        }
    }

    /// Message safe to show to clients
    fn public_message(&self) -> String {
        match self {
            ApiError::BadRequest(msg) | ApiError::Unauthorized(msg) | ApiError::NotFound(msg) => {
                msg.clone()
            }
            ApiError::InvalidJson(_) | ApiError::InvalidQuery(_) => self.to_string(),
            ApiError::Database(_) => DATABASE_ERROR.to_string(),
            _ => SERVER_ERROR.to_string(),
        }
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        ApiError::BadRequest(errors.to_string())
    }
}

impl From<error::BlockingError> for ApiError {
    fn from(err: error::BlockingError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl error::ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) | ApiError::InvalidJson(_) | ApiError::InvalidQuery(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("{}", self);
        }

        HttpResponse::build(status).json(ErrorResponse {
            error: self.label().to_string(),
            message: self.public_message(),
            status_code: status.as_u16(),
        })
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    ApiError::InvalidJson(err.to_string()).into()
}

/// Handle query payload errors
pub fn handle_query_payload_error(err: error::QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    ApiError::InvalidQuery(err.to_string()).into()
}

/// Handle malformed path segments such as a non-numeric job id
pub fn handle_path_error(err: error::PathError, req: &HttpRequest) -> actix_web::Error {
    tracing::info!("Path error on {}: {}", req.path(), err);
    ApiError::BadRequest(format!("Invalid path: {}", err)).into()
}
