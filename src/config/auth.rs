//! Session authentication configuration

use serde::Deserialize;

use super::error::ValidationError;
use super::server::Environment;

/// Longest session lifetime accepted from configuration (365 days).
pub const MAX_SESSION_TTL_SECS: u64 = 365 * 24 * 60 * 60;

/// Session authentication configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Lifetime of newly issued sessions in seconds
    #[serde(default = "default_session_ttl")]
    pub session_ttl_secs: u64,

    /// Name of the cookie that may carry the session token
    #[serde(default = "default_session_cookie")]
    pub session_cookie: String,

    /// Whether session cookies are issued with the `Secure` attribute
    #[serde(default)]
    pub secure_cookies: bool,
}

impl AuthConfig {
    /// Validate authentication configuration
    ///
    /// In production, session cookies must be secure.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        if self.session_ttl_secs == 0 || self.session_ttl_secs > MAX_SESSION_TTL_SECS {
            return Err(ValidationError::InvalidSessionTtl);
        }
        if self.session_cookie.trim().is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__SESSION_COOKIE"));
        }
        if *environment == Environment::Production && !self.secure_cookies {
            return Err(ValidationError::InsecureCookiesInProduction);
        }
        Ok(())
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_ttl_secs: default_session_ttl(),
            session_cookie: default_session_cookie(),
            secure_cookies: false,
        }
    }
}

fn default_session_ttl() -> u64 {
    7 * 24 * 60 * 60
}

fn default_session_cookie() -> String {
    "meet_assist.session_token".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_config_defaults() {
        let config = AuthConfig::default();
        assert_eq!(config.session_ttl_secs, 604_800);
        assert_eq!(config.session_cookie, "meet_assist.session_token");
        assert!(!config.secure_cookies);
    }

    #[test]
    fn test_validation_zero_ttl() {
        let config = AuthConfig {
            session_ttl_secs: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(&Environment::Development),
            Err(ValidationError::InvalidSessionTtl)
        ));
    }

    #[test]
    fn test_validation_rejects_ttl_beyond_a_year() {
        for session_ttl_secs in [MAX_SESSION_TTL_SECS + 1, 10_000_000_000_000, u64::MAX] {
            let config = AuthConfig {
                session_ttl_secs,
                ..Default::default()
            };
            assert!(matches!(
                config.validate(&Environment::Development),
                Err(ValidationError::InvalidSessionTtl)
            ));
        }

        let longest = AuthConfig {
            session_ttl_secs: MAX_SESSION_TTL_SECS,
            ..Default::default()
        };
        assert!(longest.validate(&Environment::Development).is_ok());
    }

    #[test]
    fn test_validation_blank_cookie_name() {
        let config = AuthConfig {
            session_cookie: "  ".to_string(),
            ..Default::default()
        };
        assert!(config.validate(&Environment::Development).is_err());
    }

    #[test]
    fn test_validation_production_requires_secure_cookies() {
        let config = AuthConfig::default();
        // Allowed in development
        assert!(config.validate(&Environment::Development).is_ok());
        // Rejected in production
        assert!(config.validate(&Environment::Production).is_err());

        let secure = AuthConfig {
            secure_cookies: true,
            ..Default::default()
        };
        assert!(secure.validate(&Environment::Production).is_ok());
    }
}
