use std::collections::HashMap;
use std::str::FromStr;
use strum::{Display, EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

use crate::{I18nError, Locale};

/// Bundles compiled into the binary. `en` is the base bundle.
const EMBEDDED_BUNDLES: &[(&str, &str)] = &[
    ("en", include_str!("../locales/en.json")),
    ("pt_BR", include_str!("../locales/pt_BR.json")),
    ("es", include_str!("../locales/es.json")),
];

/// Keys of localizable messages. The serialized form is the key used in the
/// bundle files.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, IntoStaticStr,
)]
pub enum MessageKey {
    #[strum(serialize = "HTTP_4XX_400_BAD_REQUEST")]
    BadRequest,
    #[strum(serialize = "HTTP_4XX_400_VALIDATION_ERROR")]
    ValidationError,
    #[strum(serialize = "HTTP_4XX_404_NOT_FOUND")]
    NotFound,
    #[strum(serialize = "HTTP_4XX_409_CONFLICT")]
    Conflict,
    #[strum(serialize = "HTTP_5XX_500_INTERNAL_SERVER_ERROR")]
    InternalServerError,
    #[strum(serialize = "HTTP_5XX_503_SERVICE_UNAVAILABLE")]
    ServiceUnavailable,
}

impl MessageKey {
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

type Bundle = HashMap<MessageKey, String>;

/// Looks up localized messages with resource-bundle fallback:
/// `language_REGION` → `language` → default `language_REGION` → default `language`.
#[derive(Debug, Clone)]
pub struct MessageService {
    default_locale: Locale,
    bundles: HashMap<String, Bundle>,
}

impl MessageService {
    /// Loads the bundles shipped with the crate.
    pub fn embedded(default_locale: Locale) -> Result<Self, I18nError> {
        Self::from_sources(default_locale, EMBEDDED_BUNDLES.iter().copied())
    }

    /// Builds the service from `(bundle name, JSON object)` pairs.
    ///
    /// Fails when a bundle is malformed, names an unknown key, or when any key
    /// cannot be resolved for the default locale.
    pub fn from_sources<'a>(
        default_locale: Locale,
        sources: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Result<Self, I18nError> {
        let bundles = sources
            .into_iter()
            .map(|(name, json)| parse_bundle(name, json).map(|bundle| (name.to_string(), bundle)))
            .collect::<Result<HashMap<_, _>, _>>()?;

        let service = Self {
            default_locale,
            bundles,
        };
        service.ensure_complete()?;

        tracing::debug!(
            default_locale = %service.default_locale,
            bundles = service.bundles.len(),
            "Message bundles loaded"
        );
        Ok(service)
    }

    pub fn default_locale(&self) -> &Locale {
        &self.default_locale
    }

    /// Localized message for `key` in `locale`.
    pub fn message(&self, key: MessageKey, locale: &Locale) -> &str {
        // every key resolves through the default chain, checked in from_sources
        self.lookup(key, locale).unwrap_or_else(|| key.as_str())
    }

    fn lookup(&self, key: MessageKey, locale: &Locale) -> Option<&str> {
        self.candidates(locale)
            .iter()
            .find_map(|name| self.bundles.get(name).and_then(|bundle| bundle.get(&key)))
            .map(String::as_str)
    }

    fn candidates(&self, locale: &Locale) -> [String; 4] {
        [
            locale.to_string(),
            locale.language_only().to_string(),
            self.default_locale.to_string(),
            self.default_locale.language_only().to_string(),
        ]
    }

    fn ensure_complete(&self) -> Result<(), I18nError> {
        match MessageKey::iter().find(|key| self.lookup(*key, &self.default_locale).is_none()) {
            Some(key) => Err(I18nError::MissingKey {
                key,
                locale: self.default_locale.clone(),
            }),
            None => Ok(()),
        }
    }
}

fn parse_bundle(name: &str, json: &str) -> Result<Bundle, I18nError> {
    let raw: HashMap<String, String> =
        serde_json::from_str(json).map_err(|source| I18nError::MalformedBundle {
            bundle: name.to_string(),
            source,
        })?;

    raw.into_iter()
        .map(|(key, message)| {
            MessageKey::from_str(&key)
                .map(|key| (key, message))
                .map_err(|_| I18nError::UnknownKey {
                    bundle: name.to_string(),
                    key,
                })
        })
        .collect()
}
