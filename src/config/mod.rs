//! Startup configuration.
//!
//! Values come from the process environment (and a `.env` file, when one is
//! present) under the `MEET_ASSIST` prefix, with `__` between path segments:
//!
//! | Variable                               | Field                       |
//! |----------------------------------------|-----------------------------|
//! | `MEET_ASSIST__DATABASE__URL`           | `database.url` (required)   |
//! | `MEET_ASSIST__SERVER__PORT`            | `server.port`               |
//! | `MEET_ASSIST__SERVER__CORS_ORIGINS`    | `server.cors_origins`       |
//! | `MEET_ASSIST__AUTH__SESSION_TTL_SECS`  | `auth.session_ttl_secs`     |
//! | `MEET_ASSIST__AUTH__SESSION_COOKIE`    | `auth.session_cookie`       |
//!
//! [`AppConfig::validate`] runs before anything is built from the values, so
//! the router and stores can take them as given.

mod auth;
mod database;
mod error;
mod server;

pub use auth::{AuthConfig, MAX_SESSION_TTL_SECS};
pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

const ENV_PREFIX: &str = "MEET_ASSIST";

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    pub database: DatabaseConfig,

    #[serde(default)]
    pub auth: AuthConfig,
}

impl AppConfig {
    /// Reads `.env` if present, then the `MEET_ASSIST__*` variables.
    ///
    /// # Errors
    ///
    /// - `ConfigError::LoadError` if `DATABASE__URL` is missing or a value
    ///   does not parse
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix(ENV_PREFIX)
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// # Errors
    ///
    /// - the first `ValidationError` found, checking server, then database,
    ///   then session settings
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.database.validate()?;
        self.auth.validate(&self.server.environment)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Env vars are process-global
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: [&str; 5] = [
        "MEET_ASSIST__DATABASE__URL",
        "MEET_ASSIST__SERVER__ENVIRONMENT",
        "MEET_ASSIST__SERVER__CORS_ORIGINS",
        "MEET_ASSIST__AUTH__SESSION_TTL_SECS",
        "MEET_ASSIST__AUTH__SECURE_COOKIES",
    ];

    /// Loads with `vars` set on top of a database URL, then clears them.
    fn load_with(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
        env::set_var(VARS[0], "postgresql://meet@localhost/meet_assist");
        for (key, value) in vars {
            env::set_var(key, value);
        }
        let result = AppConfig::load();
        for key in VARS {
            env::remove_var(key);
        }
        result
    }

    #[test]
    fn database_url_alone_is_a_valid_development_config() {
        let config = load_with(&[]).unwrap();

        assert!(config.validate().is_ok());
        assert_eq!(config.server.environment, Environment::Development);
        assert_eq!(config.auth.session_cookie, "meet_assist.session_token");
    }

    #[test]
    fn oversized_session_ttl_fails_validation() {
        let config = load_with(&[("MEET_ASSIST__AUTH__SESSION_TTL_SECS", "10000000000000")]).unwrap();

        assert_eq!(config.auth.session_ttl_secs, 10_000_000_000_000);
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidSessionTtl)
        ));
    }

    #[test]
    fn production_requires_secure_cookies() {
        let insecure = load_with(&[("MEET_ASSIST__SERVER__ENVIRONMENT", "production")]).unwrap();
        let secure = load_with(&[
            ("MEET_ASSIST__SERVER__ENVIRONMENT", "production"),
            ("MEET_ASSIST__AUTH__SECURE_COOKIES", "true"),
        ])
        .unwrap();

        assert!(matches!(
            insecure.validate(),
            Err(ValidationError::InsecureCookiesInProduction)
        ));
        assert!(secure.validate().is_ok());
    }

    #[test]
    fn wildcard_cors_from_environment_fails_validation() {
        let config = load_with(&[("MEET_ASSIST__SERVER__CORS_ORIGINS", "*")]).unwrap();

        assert!(matches!(
            config.validate(),
            Err(ValidationError::WildcardCorsOrigin(_))
        ));
    }
}
