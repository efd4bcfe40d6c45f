//! Server configuration management.
//!
//! Consolidates all environment variable reads and provides validated configuration.

use std::net::SocketAddr;
use tiktok_arena::{
    contest::MIN_CONTEST_ENTRIES,
    db::DatabaseConfig,
    tournament::{DEFAULT_MAX_TOURNAMENT_SIZE, DEFAULT_MIN_TOURNAMENT_SIZE, TournamentLimits},
};

pub const DEFAULT_DATABASE_URL: &str = "postgres://postgres@localhost/tiktok_arena";

/// Complete server configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Server bind address
    pub bind: SocketAddr,
    /// Database configuration
    pub database: DatabaseConfig,
    /// Prometheus exporter address, disabled when unset
    pub metrics_bind: Option<SocketAddr>,
    /// Accepted tournament sizes
    pub limits: TournamentLimits,
    /// Create missing tables on startup
    pub ensure_schema: bool,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// CLI overrides win over the environment, which wins over defaults.
    ///
    /// # Errors
    ///
    /// Returns error if an address variable is set but cannot be parsed
    pub fn from_env(
        bind_override: Option<SocketAddr>,
        database_url_override: Option<String>,
        metrics_bind_override: Option<SocketAddr>,
    ) -> Result<Self, ConfigError> {
        let bind = match bind_override {
            Some(bind) => bind,
            None => parse_addr_env("SERVER_BIND")?.unwrap_or(default_bind()),
        };

        let metrics_bind = match metrics_bind_override {
            Some(addr) => Some(addr),
            None => parse_addr_env("METRICS_BIND")?,
        };

        let database_url = database_url_override
            .or_else(|| std::env::var("DATABASE_URL").ok())
            .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

        let database = DatabaseConfig {
            database_url,
            max_connections: parse_env_or("DB_MAX_CONNECTIONS", 20),
            min_connections: parse_env_or("DB_MIN_CONNECTIONS", 2),
            connection_timeout_secs: parse_env_or("DB_CONNECTION_TIMEOUT_SECS", 5),
            idle_timeout_secs: parse_env_or("DB_IDLE_TIMEOUT_SECS", 300),
            max_lifetime_secs: parse_env_or("DB_MAX_LIFETIME_SECS", 1800),
        };

        let limits = TournamentLimits::new(
            parse_env_or("TOURNAMENT_MIN_SIZE", DEFAULT_MIN_TOURNAMENT_SIZE),
            parse_env_or("TOURNAMENT_MAX_SIZE", DEFAULT_MAX_TOURNAMENT_SIZE),
        );

        Ok(ServerConfig {
            bind,
            database,
            metrics_bind,
            limits,
            ensure_schema: parse_env_or("DB_ENSURE_SCHEMA", true),
        })
    }

    /// Validate configuration after loading
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database.max_connections == 0 {
            return Err(ConfigError::Invalid {
                var: "DB_MAX_CONNECTIONS".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        if self.database.min_connections > self.database.max_connections {
            return Err(ConfigError::Invalid {
                var: "DB_MIN_CONNECTIONS".to_string(),
                reason: format!(
                    "Cannot exceed max connections ({})",
                    self.database.max_connections
                ),
            });
        }

        // A bracket needs at least two tiktoks
        if self.limits.min_size < MIN_CONTEST_ENTRIES {
            return Err(ConfigError::Invalid {
                var: "TOURNAMENT_MIN_SIZE".to_string(),
                reason: format!("Must be at least {}", MIN_CONTEST_ENTRIES),
            });
        }

        if self.limits.max_size < self.limits.min_size {
            return Err(ConfigError::Invalid {
                var: "TOURNAMENT_MAX_SIZE".to_string(),
                reason: format!(
                    "Must be at least the minimum size ({})",
                    self.limits.min_size
                ),
            });
        }

        Ok(())
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration for {var}: {reason}")]
    Invalid { var: String, reason: String },
}

fn default_bind() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 8000))
}

fn parse_addr_env(key: &str) -> Result<Option<SocketAddr>, ConfigError> {
    match std::env::var(key) {
        Ok(value) => value.parse().map(Some).map_err(|_| ConfigError::Invalid {
            var: key.to_string(),
            reason: format!("'{}' is not a valid IP:PORT address", value),
        }),
        Err(_) => Ok(None),
    }
}

/// Helper to parse environment variable with default fallback
fn parse_env_or<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
