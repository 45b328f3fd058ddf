//! Locale resolution and localized message lookup.
//!
//! [`I18n`] bundles a [`LocaleResolver`] and a [`MessageService`] so HTTP
//! layers can go from an `Accept-Language` header to a localized string in
//! two calls.

pub mod config;
pub mod locale;
pub mod messages;
pub mod resolver;

pub use config::I18nConfig;
pub use locale::Locale;
pub use messages::{MessageKey, MessageService};
pub use resolver::LocaleResolver;

use core_config::ConfigError;
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum I18nError {
    #[error("Invalid locale tag: '{0}'")]
    InvalidLocale(String),

    #[error("Message bundle '{bundle}' is not a JSON object of strings: {source}")]
    MalformedBundle {
        bundle: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Message bundle '{bundle}' defines unknown key '{key}'")]
    UnknownKey { bundle: String, key: String },

    #[error("Message key {key} has no translation for default locale {locale}")]
    MissingKey { key: MessageKey, locale: Locale },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Shared, immutable localization state.
#[derive(Debug, Clone)]
pub struct I18n {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    resolver: LocaleResolver,
    messages: MessageService,
}

impl I18n {
    pub fn new(resolver: LocaleResolver, messages: MessageService) -> Self {
        Self {
            inner: Arc::new(Inner { resolver, messages }),
        }
    }

    /// Builds resolver and embedded bundles from configuration.
    pub fn from_config(config: &I18nConfig) -> Result<Self, I18nError> {
        let resolver = LocaleResolver::new(config.default_locale.clone())
            .with_supported(config.supported_locales.clone());
        let messages = MessageService::embedded(config.default_locale.clone())?;

        Ok(Self::new(resolver, messages))
    }

    pub fn resolve(&self, accept_language: Option<&str>) -> Locale {
        self.inner.resolver.resolve(accept_language)
    }

    pub fn message(&self, key: MessageKey, locale: &Locale) -> &str {
        self.inner.messages.message(key, locale)
    }

    /// Resolves the header and looks up `key` in one step.
    pub fn localize(&self, key: MessageKey, accept_language: Option<&str>) -> (Locale, &str) {
        let locale = self.resolve(accept_language);
        let message = self.message(key, &locale);
        (locale, message)
    }

    pub fn default_locale(&self) -> &Locale {
        self.inner.resolver.default_locale()
    }
}
