//! Configuration types for metadata validation.

/// Which input list feeds the `languages` field.
///
/// Dataset cards have historically fed `language_creators` to the language
/// tag rule and stored those values as the record's `languages`, without ever
/// rejecting a card over them. That reading is kept as the default so existing
/// cards keep their verdicts; [`LanguageSource::Languages`] checks the
/// `languages` list itself and reports failures.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[non_exhaustive]
pub enum LanguageSource {
    /// Store the `language_creators` values as `languages`. The language tag
    /// check only logs; it never fails the card. The supplied `languages` list
    /// is discarded.
    #[default]
    LanguageCreators,
    /// Validate and store the supplied `languages` list.
    Languages,
}

/// Core validation config.
#[derive(Debug, Clone, Default)]
#[non_exhaustive]
pub struct ValidationConfig {
    /// Input list checked against the language tag rule.
    pub language_source: LanguageSource,
}

impl ValidationConfig {
    /// Config with the given language source.
    #[must_use]
    pub fn with_language_source(mut self, language_source: LanguageSource) -> Self {
        self.language_source = language_source;
        self
    }
}
