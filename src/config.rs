use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    #[serde(default)]
    pub cache: CacheSettings,
    pub auth: AuthSettings,
    pub mail: MailSettings,
    #[serde(default)]
    pub recommend: RecommendSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
    /// Base URL of the web client, used in links sent by mail
    #[serde(default = "default_frontend_url")]
    pub frontend_url: String,
    /// Public base URL of this service, used in verification links
    #[serde(default = "default_public_url")]
    pub public_url: String,
}

fn default_frontend_url() -> String { "http://localhost:3000".to_string() }
fn default_public_url() -> String { "http://localhost:8080".to_string() }

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: Option<u32>,
    pub min_connections: Option<u32>,
    pub acquire_timeout_secs: Option<u64>,
    pub idle_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CacheSettings {
    /// Recommendations are not cached when unset
    pub redis_url: Option<String>,
    pub ttl_secs: Option<u64>,
    pub l1_cache_size: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthSettings {
    pub secret_key: String,
    /// Token lifetime in seconds
    #[serde(default = "default_jwt_timeout")]
    pub jwt_timeout_secs: u64,
    /// bcrypt cost factor
    #[serde(default = "default_salt_rounds")]
    pub salt_rounds: u32,
}

fn default_jwt_timeout() -> u64 { 3600 }
fn default_salt_rounds() -> u32 { 10 }

#[derive(Debug, Clone, Deserialize)]
pub struct MailSettings {
    /// HTTP endpoint of the mail relay
    pub endpoint: String,
    pub api_key: String,
    /// Sender address
    pub from: String,
    #[serde(default = "default_mail_timeout")]
    pub timeout_secs: u64,
}

fn default_mail_timeout() -> u64 { 30 }

#[derive(Debug, Clone, Deserialize)]
pub struct RecommendSettings {
    #[serde(default = "default_top_k")]
    pub top_k: usize,
    #[serde(default = "default_max_text_len")]
    pub max_text_len: usize,
}

impl Default for RecommendSettings {
    fn default() -> Self {
        Self {
            top_k: default_top_k(),
            max_text_len: default_max_text_len(),
        }
    }
}

fn default_top_k() -> usize { crate::core::DEFAULT_TOP_K }
fn default_max_text_len() -> usize { crate::core::tagger::DEFAULT_MAX_TEXT_LEN }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with CRAFTER_)
    /// 5. Well-known variables such as DATABASE_URL and SECRET_KEY
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., CRAFTER__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("CRAFTER")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        apply_env_overrides(settings, |name| std::env::var(name).ok())?.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("CRAFTER")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

/// Well-known environment variables and the config keys they override
const ENV_OVERRIDES: &[(&str, &str)] = &[
    ("DATABASE_URL", "database.url"),
    ("REDIS_URL", "cache.redis_url"),
    ("SECRET_KEY", "auth.secret_key"),
    ("JWT_TIMEOUT", "auth.jwt_timeout_secs"),
    ("SALT_ROUNDS", "auth.salt_rounds"),
    ("MAIL_ENDPOINT", "mail.endpoint"),
    ("MAIL_API_KEY", "mail.api_key"),
    ("MAIL_FROM", "mail.from"),
    ("PORT", "server.port"),
    ("FRONTEND_URL", "server.frontend_url"),
];

fn apply_env_overrides<F>(settings: Config, lookup: F) -> Result<Config, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut builder = Config::builder().add_source(settings);

    for &(var, key) in ENV_OVERRIDES {
        if let Some(value) = lookup(var) {
            builder = builder.set_override(key, value)?;
        }
    }

    builder.build()
}
