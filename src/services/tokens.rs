use crate::models::{User, UserStatus};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur when issuing or checking session tokens
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),
}

/// Session token payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    /// Raw status code, so tokens carrying an unknown status can be refused
    pub user_status: i16,
    pub is_recruiter: bool,
    pub login_time: String,
    pub exp: u64,
}

impl Claims {
    pub fn status(&self) -> Option<UserStatus> {
        UserStatus::try_from(self.user_status).ok()
    }
}

/// Issues and verifies HS256 session tokens
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    lifetime_secs: u64,
}

impl fmt::Debug for TokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenService")
            .field("lifetime_secs", &self.lifetime_secs)
            .finish_non_exhaustive()
    }
}

impl TokenService {
    pub fn new(secret: &str, lifetime_secs: u64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            lifetime_secs,
        }
    }

    /// Issue a token for a user that just logged in
    pub fn issue(&self, user: &User) -> Result<String, TokenError> {
        let now = chrono::Utc::now();
        let claims = Claims {
            id: user.id,
            email: user.email.clone(),
            username: user.username.clone(),
            user_status: user.user_status.into(),
            is_recruiter: user.is_recruiter,
            login_time: now.to_rfc2822(),
            exp: now.timestamp().max(0) as u64 + self.lifetime_secs,
        };

        self.encode(&claims)
    }

    pub fn encode(&self, claims: &Claims) -> Result<String, TokenError> {
        Ok(encode(&Header::new(Algorithm::HS256), claims, &self.encoding)?)
    }

    /// Check signature and expiry, returning the claims
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let validation = Validation::new(Algorithm::HS256);
        Ok(decode::<Claims>(token, &self.decoding, &validation)?.claims)
    }
}
