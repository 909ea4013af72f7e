//! Server settings read from the process environment.
//!
//! | Variable | Default | Meaning |
//! |---|---|---|
//! | `API_HOST` | `0.0.0.0` | bind address |
//! | `API_PORT` | `3000` | listen port |
//! | `DATABASE_URL` | required | PostgreSQL connection string |
//! | `LOG_LEVEL` | `info` | `trace`, `debug`, `info`, `warn` or `error` |
//! | `API_CORS_ORIGINS` | unset | comma-separated origins allowed by CORS |
//! | `API_REQUEST_TIMEOUT_SECONDS` | `30` | per-request deadline |
//! | `SLOT_MIDNIGHT_POLICY` | `reject` | `reject` or `roll_over` |

use clinic_core::slot::MidnightPolicy;
use eyre::{Result, WrapErr};
use std::env;
use tracing::Level;

const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// Settings for one clinic API process.
///
/// ```no_run
/// use clinic_api::config::ApiConfig;
///
/// # fn main() -> eyre::Result<()> {
/// let config = ApiConfig::from_env()?;
/// println!("listening on {} with {} slots", config.server_addr(), config.midnight_policy);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub log_level: Level,
    /// `None` leaves CORS permissive.
    pub cors_origins: Option<Vec<String>>,
    /// Seconds before an in-flight request is cancelled.
    pub request_timeout: u64,
    /// Handed to the `SlotBuilder` shared by every request.
    pub midnight_policy: MidnightPolicy,
}

fn env_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

impl ApiConfig {
    /// Fails when `DATABASE_URL` is missing, `API_PORT` is not a port
    /// number, or `SLOT_MIDNIGHT_POLICY` names no known policy. An
    /// unparseable timeout falls back to the default.
    pub fn from_env() -> Result<Self> {
        let port = env_or("API_PORT", "3000")
            .parse()
            .wrap_err("Invalid API_PORT value")?;
        let database_url =
            env::var("DATABASE_URL").wrap_err("DATABASE_URL environment variable must be set")?;
        let midnight_policy = env_or("SLOT_MIDNIGHT_POLICY", "reject")
            .parse::<MidnightPolicy>()
            .wrap_err("Invalid SLOT_MIDNIGHT_POLICY value")?;

        let cors_origins = env::var("API_CORS_ORIGINS").ok().map(|origins| {
            origins
                .split(',')
                .map(str::trim)
                .filter(|origin| !origin.is_empty())
                .map(str::to_string)
                .collect()
        });

        Ok(Self {
            host: env_or("API_HOST", "0.0.0.0"),
            port,
            database_url,
            log_level: parse_log_level(&env_or("LOG_LEVEL", "info")),
            cors_origins,
            request_timeout: env_or("API_REQUEST_TIMEOUT_SECONDS", "")
                .parse()
                .unwrap_or(DEFAULT_TIMEOUT_SECONDS),
            midnight_policy,
        })
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Unknown names fall back to `INFO`.
pub fn parse_log_level(value: &str) -> Level {
    match value.trim().to_ascii_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" | "warning" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}
