use std::net::IpAddr;

use classhopper_core::moderation::{parse_banned_words, DEFAULT_BANNED_WORDS};
use classhopper_events::delivery::EmailConfig;

use crate::auth::jwt::JwtConfig;

/// Default public-submission quota per client address.
pub const DEFAULT_RATE_LIMIT_PER_MINUTE: u32 = 10;

/// Server configuration loaded from environment variables.
///
/// All fields except the secrets have defaults suitable for local
/// development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Key for the HMAC digests of client address and user agent.
    pub hash_salt: String,
    /// Lowercased words refused in public registrations.
    pub banned_words: Vec<String>,
    /// Public submissions allowed per client address per minute.
    pub rate_limit_per_minute: u32,
    /// Reverse proxies whose forwarding headers are believed.
    pub trusted_proxies: Vec<IpAddr>,
    pub jwt: JwtConfig,
    /// `None` disables submission notices.
    pub email: Option<EmailConfig>,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default                 |
    /// |-------------------------|-------------------------|
    /// | `HOST`                  | `0.0.0.0`               |
    /// | `PORT`                  | `3000`                  |
    /// | `CORS_ORIGINS`          | `http://localhost:3000` |
    /// | `REQUEST_TIMEOUT_SECS`  | `30`                    |
    /// | `HASH_SALT`             | required                |
    /// | `BANNED_WORDS`          | `spam,test,fake`        |
    /// | `RATE_LIMIT_PER_MINUTE` | `10`                    |
    /// | `TRUSTED_PROXIES`       | empty                   |
    ///
    /// JWT and SMTP settings are read by [`JwtConfig::from_env`] and
    /// [`EmailConfig::from_env`].
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let hash_salt =
            std::env::var("HASH_SALT").expect("HASH_SALT must be set in the environment");
        assert!(!hash_salt.is_empty(), "HASH_SALT must not be empty");

        let banned_words = match std::env::var("BANNED_WORDS") {
            Ok(raw) => parse_banned_words(&raw),
            Err(_) => DEFAULT_BANNED_WORDS.iter().map(|w| w.to_string()).collect(),
        };

        let rate_limit_per_minute: u32 = std::env::var("RATE_LIMIT_PER_MINUTE")
            .unwrap_or_else(|_| DEFAULT_RATE_LIMIT_PER_MINUTE.to_string())
            .parse()
            .expect("RATE_LIMIT_PER_MINUTE must be a valid u32");
        assert!(rate_limit_per_minute > 0, "RATE_LIMIT_PER_MINUTE must be positive");

        let trusted_proxies = std::env::var("TRUSTED_PROXIES")
            .map(|raw| parse_trusted_proxies(&raw))
            .unwrap_or_default();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            hash_salt,
            banned_words,
            rate_limit_per_minute,
            trusted_proxies,
            jwt: JwtConfig::from_env(),
            email: EmailConfig::from_env(),
        }
    }
}

/// Parse a comma-separated list of proxy addresses.
///
/// Panics on an entry that is not an IP address.
pub fn parse_trusted_proxies(raw: &str) -> Vec<IpAddr> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse()
                .unwrap_or_else(|_| panic!("TRUSTED_PROXIES entry '{s}' is not an IP address"))
        })
        .collect()
}
