use rand::{distributions::Alphanumeric, Rng};
use thiserror::Error;

// Mirrors bcrypt's cost bounds, which the crate does not export
const MIN_COST: u32 = 4;
const MAX_COST: u32 = 31;

/// Errors that can occur when hashing or checking passwords
#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("Bcrypt error: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),

    #[error("Unsupported cost: {0} (expected 4..=31)")]
    UnsupportedCost(u32),
}

/// bcrypt password hasher
///
/// The cost is stored inside every hash, so hashes made with an older
/// `SALT_ROUNDS` keep verifying after the setting changes. Both operations
/// are CPU bound; request handlers run them on the blocking pool.
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Result<Self, PasswordError> {
        if !(MIN_COST..=MAX_COST).contains(&cost) {
            return Err(PasswordError::UnsupportedCost(cost));
        }
        Ok(Self { cost })
    }

    /// Hash a plain password with a fresh random salt
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        Ok(bcrypt::hash(password, self.cost)?)
    }

    /// Check a plain password against a stored hash
    pub fn verify(&self, password: &str, hashed: &str) -> Result<bool, PasswordError> {
        Ok(bcrypt::verify(password, hashed)?)
    }
}

/// Random alphanumeric string, used for one-time passwords and chat rooms
pub fn random_string(len: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}
