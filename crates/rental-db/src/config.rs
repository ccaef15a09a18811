//! Database configuration.
//!
//! Built in code with the `DbConfig` builder, or loaded from environment
//! variables with fallback to defaults:
//!
//! | Variable                    | Default           |
//! |-----------------------------|-------------------|
//! | `RENTAL_DATABASE_PATH`      | `./rental.db`     |
//! | `RENTAL_DB_MAX_CONNECTIONS` | `5`               |
//! | `RENTAL_DB_BUSY_TIMEOUT_MS` | `5000`            |
//! | `RENTAL_TXN_TIMEOUT_MS`     | `10000`           |

use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Database configuration.
///
/// ## Example
/// ```rust,ignore
/// let config = DbConfig::new("/path/to/rental.db")
///     .max_connections(5)
///     .busy_timeout(Duration::from_secs(2));
/// ```
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// Path to the SQLite database file, or `:memory:`.
    pub database_path: PathBuf,

    /// Maximum number of connections in the pool.
    /// Default: 5
    pub max_connections: u32,

    /// Minimum number of connections to keep alive.
    /// Default: 1
    pub min_connections: u32,

    /// How long to wait for a pooled connection.
    /// Default: 30 seconds
    pub connect_timeout: Duration,

    /// Idle timeout before closing a connection.
    /// Default: 10 minutes
    pub idle_timeout: Duration,

    /// How long a statement waits on another writer's lock (SQLite
    /// `busy_timeout`) before failing with a retryable error.
    /// Default: 5 seconds
    pub busy_timeout: Duration,

    /// Upper bound on a whole booking or return transaction.
    /// Default: 10 seconds
    pub transaction_timeout: Duration,

    /// Whether to run migrations on connect.
    /// Default: true
    pub run_migrations: bool,
}

impl DbConfig {
    /// Creates a new database configuration with the given path.
    ///
    /// The file is created if it doesn't exist.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DbConfig {
            database_path: path.into(),
            max_connections: 5,
            min_connections: 1,
            connect_timeout: Duration::from_secs(30),
            idle_timeout: Duration::from_secs(600),
            busy_timeout: Duration::from_secs(5),
            transaction_timeout: Duration::from_secs(10),
            run_migrations: true,
        }
    }

    /// Sets the maximum number of connections.
    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    /// Sets the minimum number of connections.
    pub fn min_connections(mut self, min: u32) -> Self {
        self.min_connections = min;
        self
    }

    /// Sets the connection acquire timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Sets the SQLite lock wait.
    pub fn busy_timeout(mut self, timeout: Duration) -> Self {
        self.busy_timeout = timeout;
        self
    }

    /// Sets the per-transaction bound.
    pub fn transaction_timeout(mut self, timeout: Duration) -> Self {
        self.transaction_timeout = timeout;
        self
    }

    /// Sets whether to run migrations on connect.
    pub fn run_migrations(mut self, run: bool) -> Self {
        self.run_migrations = run;
        self
    }

    /// Creates an in-memory database configuration (for testing).
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let db = Database::new(DbConfig::in_memory()).await?;
    /// // Database is isolated, perfect for tests
    /// ```
    pub fn in_memory() -> Self {
        DbConfig {
            database_path: PathBuf::from(":memory:"),
            max_connections: 1, // In-memory requires single connection
            min_connections: 1,
            connect_timeout: Duration::from_secs(5),
            idle_timeout: Duration::from_secs(60),
            busy_timeout: Duration::from_secs(5),
            transaction_timeout: Duration::from_secs(10),
            run_migrations: true,
        }
    }

    /// Whether this config points at a private in-memory database.
    pub fn is_in_memory(&self) -> bool {
        self.database_path.as_os_str() == ":memory:"
    }

    /// Loads configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let path = env::var("RENTAL_DATABASE_PATH").unwrap_or_else(|_| "./rental.db".to_string());
        if path.trim().is_empty() {
            return Err(ConfigError::MissingRequired("RENTAL_DATABASE_PATH".to_string()));
        }

        let mut config = DbConfig::new(path);

        if let Some(max) = parse_var::<u32>("RENTAL_DB_MAX_CONNECTIONS")? {
            if max == 0 {
                return Err(ConfigError::InvalidValue("RENTAL_DB_MAX_CONNECTIONS".to_string()));
            }
            let min = config.min_connections.min(max);
            config = config.max_connections(max).min_connections(min);
        }

        if let Some(ms) = parse_var::<u64>("RENTAL_DB_BUSY_TIMEOUT_MS")? {
            config = config.busy_timeout(Duration::from_millis(ms));
        }

        if let Some(ms) = parse_var::<u64>("RENTAL_TXN_TIMEOUT_MS")? {
            if ms == 0 {
                return Err(ConfigError::InvalidValue("RENTAL_TXN_TIMEOUT_MS".to_string()));
            }
            config = config.transaction_timeout(Duration::from_millis(ms));
        }

        Ok(config)
    }
}

/// Reads an optional variable, failing only if it is set but unparseable.
fn parse_var<T: std::str::FromStr>(name: &str) -> Result<Option<T>, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue(name.to_string())),
        Err(_) => Ok(None),
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = DbConfig::new("/tmp/test.db")
            .max_connections(10)
            .min_connections(2)
            .busy_timeout(Duration::from_millis(250));

        assert_eq!(config.max_connections, 10);
        assert_eq!(config.min_connections, 2);
        assert_eq!(config.busy_timeout, Duration::from_millis(250));
        assert!(!config.is_in_memory());
        assert!(DbConfig::in_memory().is_in_memory());
    }

    // Single test so parallel tests never race on the same variables.
    #[test]
    fn test_from_env() {
        env::set_var("RENTAL_DATABASE_PATH", "/tmp/rental-env.db");
        env::set_var("RENTAL_DB_MAX_CONNECTIONS", "3");
        env::set_var("RENTAL_TXN_TIMEOUT_MS", "1500");
        env::remove_var("RENTAL_DB_BUSY_TIMEOUT_MS");

        let config = DbConfig::from_env().unwrap();
        assert_eq!(config.database_path, PathBuf::from("/tmp/rental-env.db"));
        assert_eq!(config.max_connections, 3);
        assert_eq!(config.min_connections, 1);
        assert_eq!(config.transaction_timeout, Duration::from_millis(1500));
        assert_eq!(config.busy_timeout, Duration::from_secs(5));

        env::set_var("RENTAL_DB_MAX_CONNECTIONS", "0");
        assert!(matches!(
            DbConfig::from_env(),
            Err(ConfigError::InvalidValue(ref v)) if v == "RENTAL_DB_MAX_CONNECTIONS"
        ));

        env::set_var("RENTAL_DB_MAX_CONNECTIONS", "lots");
        assert!(matches!(
            DbConfig::from_env(),
            Err(ConfigError::InvalidValue(ref v)) if v == "RENTAL_DB_MAX_CONNECTIONS"
        ));

        env::remove_var("RENTAL_DATABASE_PATH");
        env::remove_var("RENTAL_DB_MAX_CONNECTIONS");
        env::remove_var("RENTAL_TXN_TIMEOUT_MS");
    }
}
