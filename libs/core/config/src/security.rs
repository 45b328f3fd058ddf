use crate::{ConfigError, FromEnv, env_parse};
use std::time::Duration;

/// Security-related settings injected at startup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SecurityConfig {
    /// Lifetime of issued access tokens
    pub token_expiration: Duration,
}

impl FromEnv for SecurityConfig {
    /// - SECURITY_TOKEN_EXPIRATION_SECS: defaults to 3600
    fn from_env() -> Result<Self, ConfigError> {
        let secs: u64 = env_parse("SECURITY_TOKEN_EXPIRATION_SECS", "3600")?;
        if secs == 0 {
            return Err(ConfigError::ParseError {
                key: "SECURITY_TOKEN_EXPIRATION_SECS".to_string(),
                details: "must be greater than zero".to_string(),
            });
        }

        Ok(Self {
            token_expiration: Duration::from_secs(secs),
        })
    }
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            token_expiration: Duration::from_secs(3600),
        }
    }
}
