use crate::error::{ApiError, UNAUTHORIZED_ACCESS};
use crate::models::UserStatus;
use crate::routes::AppState;
use crate::services::Claims;
use actix_web::{dev::Payload, http::header, web, FromRequest, HttpRequest};
use std::future::{ready, Ready};

const INVALID_TOKEN: &str = "Invalid Token";

/// Caller of a guarded route, taken from a `Bearer` session token
///
/// Extraction fails with 401 when the token is missing, invalid or expired,
/// or when the account is blocked, unverified or not a recruiter.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    pub fn claims(&self) -> &Claims {
        &self.0
    }
}

impl FromRequest for AuthUser {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}

fn authenticate(req: &HttpRequest) -> Result<AuthUser, ApiError> {
    let state = req
        .app_data::<web::Data<AppState>>()
        .ok_or_else(|| ApiError::Internal("application state not configured".to_string()))?;

    let token = bearer_token(req).ok_or_else(|| ApiError::unauthorized(INVALID_TOKEN))?;

    let claims = state.tokens.verify(token).map_err(|e| {
        tracing::debug!("Rejected token on {}: {}", req.path(), e);
        ApiError::unauthorized(INVALID_TOKEN)
    })?;

    check_access(claims).map(AuthUser)
}

fn bearer_token(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .filter(|token| !token.is_empty())
}

/// Only verified recruiters (and admins) may use guarded routes
pub fn check_access(claims: Claims) -> Result<Claims, ApiError> {
    match claims.status() {
        Some(UserStatus::Blocked) => Err(ApiError::unauthorized(UNAUTHORIZED_ACCESS)),
        _ if !claims.is_recruiter => Err(ApiError::unauthorized(UNAUTHORIZED_ACCESS)),
        Some(UserStatus::Unverified) => Err(ApiError::unauthorized("Recruiter not verified")),
        Some(UserStatus::Verified) | Some(UserStatus::Admin) => Ok(claims),
        None => Err(ApiError::unauthorized(INVALID_TOKEN)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn claims(status: i16, is_recruiter: bool) -> Claims {
        Claims {
            id: Uuid::new_v4(),
            email: "rec@example.com".to_string(),
            username: "recruiter_1".to_string(),
            user_status: status,
            is_recruiter,
            login_time: String::new(),
            exp: 0,
        }
    }

    fn message(result: Result<Claims, ApiError>) -> String {
        match result {
            Err(ApiError::Unauthorized(msg)) => msg,
            other => panic!("expected unauthorized, got {:?}", other),
        }
    }

    #[test]
    fn test_verified_recruiter_allowed() {
        assert!(check_access(claims(1, true)).is_ok());
        assert!(check_access(claims(2, true)).is_ok());
    }

    #[test]
    fn test_blocked_and_freelancers_rejected() {
        assert_eq!(message(check_access(claims(0, true))), UNAUTHORIZED_ACCESS);
        assert_eq!(message(check_access(claims(1, false))), UNAUTHORIZED_ACCESS);
        assert_eq!(message(check_access(claims(-1, false))), UNAUTHORIZED_ACCESS);
    }

    #[test]
    fn test_unverified_recruiter_rejected() {
        assert_eq!(message(check_access(claims(-1, true))), "Recruiter not verified");
    }

    #[test]
    fn test_unknown_status_rejected() {
        assert_eq!(message(check_access(claims(7, true))), INVALID_TOKEN);
    }

    #[test]
    fn test_bearer_token() {
        let req = actix_web::test::TestRequest::default()
            .insert_header((header::AUTHORIZATION, "Bearer abc.def"))
            .to_http_request();
        assert_eq!(bearer_token(&req), Some("abc.def"));

        let req = actix_web::test::TestRequest::default()
            .insert_header((header::AUTHORIZATION, "Basic abc"))
            .to_http_request();
        assert_eq!(bearer_token(&req), None);
    }
}
