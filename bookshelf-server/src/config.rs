//! Environment-driven server configuration.
//!
//! Configuration is read once at startup and passed down explicitly; nothing
//! reads the process environment after boot.

use thiserror::Error;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_DATABASE: &str = "bookshelf";

/// Configuration errors surfaced at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The `PORT` variable is present but not a valid port number.
    #[error("invalid PORT value: {0}")]
    InvalidPort(String),
}

/// Deployment environment, controlling how much error detail leaves the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    /// Raw error text is included in 500 responses.
    Development,
    /// Error details stay in the logs.
    Production,
}

impl Environment {
    pub fn is_development(self) -> bool {
        matches!(self, Environment::Development)
    }

    /// Anything other than the literal "development" is treated as production,
    /// including an unset variable.
    fn parse(value: Option<&str>) -> Self {
        match value {
            Some("development") => Environment::Development,
            _ => Environment::Production,
        }
    }
}

/// Server configuration assembled from environment variables.
///
/// - `PORT` - listen port (default 3000)
/// - `MONGODB_URI` - connection string; when absent the server falls back to
///   the in-memory store
/// - `MONGODB_DATABASE` - database name (default "bookshelf")
/// - `APP_ENV` - "development" enables raw error exposure in 500 responses
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub mongodb_uri: Option<String>,
    pub database: String,
    pub environment: Environment,
}

impl Config {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = match lookup("PORT") {
            Some(raw) => raw
                .parse()
                .map_err(|_| ConfigError::InvalidPort(raw))?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            port,
            mongodb_uri: lookup("MONGODB_URI").filter(|uri| !uri.is_empty()),
            database: lookup("MONGODB_DATABASE").unwrap_or_else(|| DEFAULT_DATABASE.to_string()),
            environment: Environment::parse(lookup("APP_ENV").as_deref()),
        })
    }
}
