use anyhow::{Context, Result};
use std::env;

// ============================================================================
// Configuration Constants
// ============================================================================

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 10;

// Collaborator service addresses for local development
const DEFAULT_NEWS_SERVICE_URL: &str = "http://localhost:8082";
const DEFAULT_COMMENTS_SERVICE_URL: &str = "http://localhost:8081";
const DEFAULT_CENSOR_SERVICE_URL: &str = "http://localhost:8083";

/// Gateway configuration, loaded from the environment with local-development
/// defaults.
#[derive(Clone, Debug)]
pub struct Config {
    /// Port the gateway listens on
    pub port: u16,
    /// Base URL of the news storage service
    pub news_service_url: String,
    /// Base URL of the comment storage service
    pub comments_service_url: String,
    /// Base URL of the content moderation service
    pub censor_service_url: String,
    /// Deadline applied to every outbound collaborator call, in seconds
    pub upstream_timeout_secs: u64,
    /// Log filter passed to tracing-subscriber
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let port = match env::var("PORT") {
            Ok(value) => value.parse::<u16>().context("PORT must be a valid port")?,
            Err(_) => DEFAULT_PORT,
        };

        let upstream_timeout_secs = match env::var("UPSTREAM_TIMEOUT_SECS") {
            Ok(value) => value
                .parse::<u64>()
                .context("UPSTREAM_TIMEOUT_SECS must be a positive integer")?,
            Err(_) => DEFAULT_UPSTREAM_TIMEOUT_SECS,
        };

        Ok(Self {
            port,
            news_service_url: env::var("NEWS_SERVICE_URL")
                .unwrap_or_else(|_| DEFAULT_NEWS_SERVICE_URL.to_string()),
            comments_service_url: env::var("COMMENTS_SERVICE_URL")
                .unwrap_or_else(|_| DEFAULT_COMMENTS_SERVICE_URL.to_string()),
            censor_service_url: env::var("CENSOR_SERVICE_URL")
                .unwrap_or_else(|_| DEFAULT_CENSOR_SERVICE_URL.to_string()),
            upstream_timeout_secs,
            rust_log: env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}
