// Service exports
pub mod cache;
pub mod mailer;
pub mod password;
pub mod postgres;
pub mod tokens;

pub use cache::{CacheError, CacheKey, CacheManager};
pub use mailer::{MailClient, MailError};
pub use password::{random_string, PasswordError, PasswordHasher};
pub use postgres::{NewUser, PostgresClient, PostgresError};
pub use tokens::{Claims, TokenError, TokenService};
