use core_config::{ConfigError, FromEnv, env_or_default};

use crate::Locale;

/// Locale settings for the localization layer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct I18nConfig {
    pub default_locale: Locale,
    /// Locales a client may select. Empty means any well-formed tag.
    pub supported_locales: Vec<Locale>,
}

impl FromEnv for I18nConfig {
    /// - DEFAULT_LOCALE: defaults to en-US
    /// - SUPPORTED_LOCALES: comma separated, defaults to en-US,pt-BR,es-MX
    fn from_env() -> Result<Self, ConfigError> {
        let default_locale = parse_locale("DEFAULT_LOCALE", &env_or_default("DEFAULT_LOCALE", "en-US"))?;

        let supported_locales = env_or_default("SUPPORTED_LOCALES", "en-US,pt-BR,es-MX")
            .split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(|tag| parse_locale("SUPPORTED_LOCALES", tag))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            default_locale,
            supported_locales,
        })
    }
}

impl Default for I18nConfig {
    fn default() -> Self {
        Self {
            default_locale: Locale::default(),
            supported_locales: vec![
                Locale::new("en", Some("US")),
                Locale::new("pt", Some("BR")),
                Locale::new("es", Some("MX")),
            ],
        }
    }
}

fn parse_locale(key: &str, tag: &str) -> Result<Locale, ConfigError> {
    tag.parse().map_err(|e: crate::I18nError| ConfigError::ParseError {
        key: key.to_string(),
        details: e.to_string(),
    })
}
