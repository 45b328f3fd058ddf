use crate::Locale;

/// Maps an `Accept-Language` header value to a [`Locale`].
///
/// Only the first entry of the header is considered; quality values are not
/// negotiated. Anything that cannot be used resolves to the default locale.
#[derive(Debug, Clone)]
pub struct LocaleResolver {
    default_locale: Locale,
    supported: Vec<Locale>,
}

impl LocaleResolver {
    pub fn new(default_locale: Locale) -> Self {
        Self {
            default_locale,
            supported: Vec::new(),
        }
    }

    /// Restricts resolution to `supported`. An empty list accepts any
    /// well-formed tag.
    pub fn with_supported(mut self, supported: Vec<Locale>) -> Self {
        self.supported = supported;
        self
    }

    pub fn default_locale(&self) -> &Locale {
        &self.default_locale
    }

    pub fn resolve(&self, accept_language: Option<&str>) -> Locale {
        let Some(tag) = accept_language.and_then(first_tag) else {
            return self.default_locale.clone();
        };

        match tag.parse::<Locale>() {
            Ok(locale) if self.is_supported(&locale) => locale,
            Ok(locale) => {
                tracing::debug!(%locale, "Unsupported locale requested, using default");
                self.default_locale.clone()
            }
            Err(_) => self.default_locale.clone(),
        }
    }

    fn is_supported(&self, locale: &Locale) -> bool {
        self.supported.is_empty() || self.supported.contains(locale)
    }
}

/// First language range of the header with its parameters stripped.
fn first_tag(header: &str) -> Option<&str> {
    let tag = header.split(',').next()?.split(';').next()?.trim();
    (!tag.is_empty() && tag != "*").then_some(tag)
}
