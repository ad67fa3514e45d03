use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use career_crafter::config::Settings;
use career_crafter::core::{Ranker, RuleTagger};
use career_crafter::error::{handle_json_payload_error, handle_path_error, handle_query_payload_error};
use career_crafter::routes::{self, AppState};
use career_crafter::services::{CacheManager, MailClient, PasswordHasher, PostgresClient, TokenService};
use std::io::{Error, ErrorKind};
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

fn startup_error(what: &str, e: impl std::fmt::Display) -> Error {
    error!("{}: {}", what, e);
    Error::new(ErrorKind::Other, format!("{}: {}", what, e))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = Settings::load();

    // Initialize logging; RUST_LOG wins over LOG_LEVEL, which wins over the config file
    let (config_level, config_format) = match &settings {
        Ok(s) => (s.logging.level.clone(), s.logging.format.clone()),
        Err(_) => ("info".to_string(), "json".to_string()),
    };
    let log_level = std::env::var("LOG_LEVEL").unwrap_or(config_level);
    let log_format = std::env::var("LOG_FORMAT").unwrap_or(config_format);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_level));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if log_format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }

    info!("Starting Career Crafter service...");

    let settings = settings.map_err(|e| startup_error("Failed to load configuration", e))?;
    info!("Configuration loaded successfully");

    let postgres = Arc::new(
        PostgresClient::from_settings(&settings.database)
            .await
            .map_err(|e| startup_error("Failed to connect to PostgreSQL", e))?,
    );
    info!(
        "PostgreSQL client initialized (max: {} connections)",
        settings.database.max_connections.unwrap_or(10)
    );

    // Cache is optional; recommendations are recomputed on every request without it
    let cache_ttl = settings.cache.ttl_secs.unwrap_or(300);
    let l1_cache_size = settings.cache.l1_cache_size.unwrap_or(1000);

    let cache = match &settings.cache.redis_url {
        Some(url) => match CacheManager::new(url, l1_cache_size, cache_ttl).await {
            Ok(c) => {
                info!("Cache manager initialized (L1: {} entries, TTL: {}s)", l1_cache_size, cache_ttl);
                Some(Arc::new(c))
            }
            Err(e) => {
                warn!("Failed to connect to Redis ({}), running without cache", e);
                None
            }
        },
        None => {
            info!("No Redis URL configured, running without cache");
            None
        }
    };

    let mailer = Arc::new(
        MailClient::new(&settings.mail, &settings.server)
            .map_err(|e| startup_error("Failed to create mail client", e))?,
    );

    let hasher = PasswordHasher::new(settings.auth.salt_rounds)
        .map_err(|e| startup_error("Invalid password hashing cost", e))?;
    let tokens = Arc::new(TokenService::new(
        &settings.auth.secret_key,
        settings.auth.jwt_timeout_secs,
    ));

    let ranker = Ranker::new(
        Arc::new(RuleTagger::new(settings.recommend.max_text_len)),
        settings.recommend.top_k,
    );
    info!("Ranker initialized (top {})", ranker.top_k());

    let app_state = AppState {
        postgres,
        cache,
        mailer,
        tokens,
        hasher,
        ranker,
    };

    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
            .app_data(web::PathConfig::default().error_handler(handle_path_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
