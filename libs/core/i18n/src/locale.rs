use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use crate::I18nError;

/// BCP 47-ish tag: language, optional script (ignored), optional region, then
/// any number of extra subtags (ignored). `_` is accepted as a separator too.
static LANGUAGE_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<language>[A-Za-z]{2,3})(?:[-_][A-Za-z]{4})?(?:[-_](?P<region>[A-Za-z]{2}|[0-9]{3}))?(?:[-_][A-Za-z0-9]{1,8})*$",
    )
    .unwrap()
});

/// A language with an optional region, e.g. `pt_BR` or `es`.
///
/// Displayed in bundle form (`pt_BR`); [`Locale::language_tag`] gives the
/// HTTP form (`pt-BR`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locale {
    language: String,
    region: Option<String>,
}

impl Locale {
    pub fn new(language: &str, region: Option<&str>) -> Self {
        Self {
            language: language.to_ascii_lowercase(),
            region: region.map(str::to_ascii_uppercase),
        }
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    /// The same locale without its region (`pt_BR` → `pt`).
    pub fn language_only(&self) -> Locale {
        Self {
            language: self.language.clone(),
            region: None,
        }
    }

    /// Hyphenated form used in `Accept-Language` / `Content-Language`.
    pub fn language_tag(&self) -> String {
        match &self.region {
            Some(region) => format!("{}-{}", self.language, region),
            None => self.language.clone(),
        }
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::new("en", Some("US"))
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.region {
            Some(region) => write!(f, "{}_{}", self.language, region),
            None => write!(f, "{}", self.language),
        }
    }
}

impl FromStr for Locale {
    type Err = I18nError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        let tag = tag.trim();
        let captures = LANGUAGE_TAG
            .captures(tag)
            .ok_or_else(|| I18nError::InvalidLocale(tag.to_string()))?;

        let language = &captures["language"];
        let region = captures.name("region").map(|m| m.as_str());

        Ok(Self::new(language, region))
    }
}
