//! Errors raised while loading or checking startup configuration.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not read configuration: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// A loaded value that the server refuses to start with.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Server port must be non-zero")]
    InvalidPort,

    #[error("Invalid bind host: {0}")]
    InvalidHost(String),

    #[error("Request timeout must be between 1 and 300 seconds")]
    InvalidTimeout,

    #[error("Database URL must use the postgres:// or postgresql:// scheme")]
    InvalidDatabaseUrl,

    #[error("Pool size must be between 1 and 100, got {0}")]
    InvalidPoolSize(u32),

    #[error("CORS origin '{0}' cannot be used with credentialed requests")]
    WildcardCorsOrigin(String),

    #[error("Session TTL must be between 1 second and 365 days")]
    InvalidSessionTtl,

    #[error("Session cookies must be marked secure in production")]
    InsecureCookiesInProduction,
}
