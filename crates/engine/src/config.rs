//! Configuration loaded from environment variables.

use std::env;
use std::time::Duration;

use anyhow::{Context, Result};

/// Engine configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// PostgreSQL connection URL.
    pub database_url: String,

    /// Maximum database connections in pool (default: 10).
    pub database_max_connections: u32,

    /// Table-statistics estimates below this value are treated as
    /// untrustworthy and replaced with an exact count (default: 1000).
    /// A heuristic tied to dataset scale, so it stays configurable.
    pub estimate_sanity_threshold: i64,

    /// Deadline for the table-statistics lookup in milliseconds
    /// (default: 250). A hung lookup must not block the exact-count
    /// fallback.
    pub statistics_timeout_ms: u64,

    /// Page size applied when the caller supplies none (default: 20).
    pub default_page_size: u32,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let database_url =
            env::var("DATABASE_URL").context("DATABASE_URL environment variable is required")?;

        let database_max_connections = env::var("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "10".to_string())
            .parse()
            .context("DATABASE_MAX_CONNECTIONS must be a valid u32")?;

        let estimate_sanity_threshold = env::var("ESTIMATE_SANITY_THRESHOLD")
            .unwrap_or_else(|_| "1000".to_string())
            .parse()
            .context("ESTIMATE_SANITY_THRESHOLD must be a valid i64")?;

        let statistics_timeout_ms = env::var("STATISTICS_TIMEOUT_MS")
            .unwrap_or_else(|_| "250".to_string())
            .parse()
            .context("STATISTICS_TIMEOUT_MS must be a valid u64")?;

        let default_page_size = env::var("DEFAULT_PAGE_SIZE")
            .unwrap_or_else(|_| "20".to_string())
            .parse()
            .context("DEFAULT_PAGE_SIZE must be a valid u32")?;

        Ok(Self {
            database_url,
            database_max_connections,
            estimate_sanity_threshold,
            statistics_timeout_ms,
            default_page_size,
        })
    }

    /// Statistics-lookup deadline as a [`Duration`].
    pub fn statistics_timeout(&self) -> Duration {
        Duration::from_millis(self.statistics_timeout_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: String::new(),
            database_max_connections: 10,
            estimate_sanity_threshold: 1000,
            statistics_timeout_ms: 250,
            default_page_size: 20,
        }
    }
}
