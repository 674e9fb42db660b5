// ABOUTME: Configuration loading and validation for the tickler server.
// ABOUTME: Reads environment variables for bind address, backing store, key prefix, record TTL, and request budget.

use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("TICKLER_BIND is not a valid socket address: {0}")]
    InvalidBind(String),

    #[error("TICKLER_BACKEND must be 'redis' or 'memory', got: {0}")]
    InvalidBackend(String),

    #[error("{name} must be a positive whole number of seconds, got: {value}")]
    InvalidSeconds { name: &'static str, value: String },
}

/// Which backing store to run against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    Redis,
    /// In-process store; contents vanish on restart.
    Memory,
}

impl FromStr for BackendKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "redis" => Ok(BackendKind::Redis),
            "memory" => Ok(BackendKind::Memory),
            _ => Err(ConfigError::InvalidBackend(s.to_string())),
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendKind::Redis => f.write_str("redis"),
            BackendKind::Memory => f.write_str("memory"),
        }
    }
}

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct TicklerConfig {
    pub bind: SocketAddr,
    pub backend: BackendKind,
    pub redis_url: String,
    pub key_prefix: String,
    pub record_ttl: Duration,
    pub request_budget: Duration,
}

impl TicklerConfig {
    /// Load configuration from environment variables with sensible defaults.
    ///
    /// Environment variables:
    /// - TICKLER_BIND: socket address to bind (default: 127.0.0.1:3000)
    /// - TICKLER_BACKEND: `redis` or `memory` (default: redis)
    /// - REDIS_URL: backing store endpoint (default: redis://127.0.0.1:6379)
    /// - TICKLER_KEY_PREFIX: prefix for every backing key (default: empty)
    /// - TICKLER_RECORD_TTL_SECS: record lifetime (default: 10800, three hours)
    /// - TICKLER_REQUEST_BUDGET_SECS: wall-clock budget per call (default: 60)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as `from_env`, reading variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.is_empty());

        let bind_str = var("TICKLER_BIND").unwrap_or_else(|| "127.0.0.1:3000".to_string());
        let bind: SocketAddr = bind_str
            .parse()
            .map_err(|_| ConfigError::InvalidBind(bind_str))?;

        let backend = match var("TICKLER_BACKEND") {
            Some(v) => v.parse()?,
            None => BackendKind::Redis,
        };

        let redis_url =
            var("REDIS_URL").unwrap_or_else(|| "redis://127.0.0.1:6379".to_string());

        let key_prefix = var("TICKLER_KEY_PREFIX").unwrap_or_default();

        let record_ttl = seconds(
            "TICKLER_RECORD_TTL_SECS",
            var("TICKLER_RECORD_TTL_SECS"),
            tickler_store::DEFAULT_RECORD_TTL,
        )?;

        let request_budget = seconds(
            "TICKLER_REQUEST_BUDGET_SECS",
            var("TICKLER_REQUEST_BUDGET_SECS"),
            Duration::from_secs(60),
        )?;

        Ok(Self {
            bind,
            backend,
            redis_url,
            key_prefix,
            record_ttl,
            request_budget,
        })
    }
}

fn seconds(
    name: &'static str,
    value: Option<String>,
    default: Duration,
) -> Result<Duration, ConfigError> {
    let Some(value) = value else {
        return Ok(default);
    };
    match value.parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::InvalidSeconds { name, value }),
    }
}
