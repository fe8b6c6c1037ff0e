use std::time::SystemTime;

use crate::LanguageCode;

/// One user action asking for a translation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRequest {
    text: String,
    source_lang: LanguageCode,
    target_lang: LanguageCode,
}

impl TranslationRequest {
    pub fn new(
        text: impl Into<String>,
        source_lang: impl Into<LanguageCode>,
        target_lang: impl Into<LanguageCode>,
    ) -> Self {
        Self {
            text: text.into(),
            source_lang: source_lang.into(),
            target_lang: target_lang.into(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn source_lang(&self) -> &str {
        &self.source_lang
    }

    pub fn target_lang(&self) -> &str {
        &self.target_lang
    }

    /// Same languages, reversed direction, translating `text`
    pub fn reversed(&self, text: impl Into<String>) -> Self {
        Self::new(text, self.target_lang.clone(), self.source_lang.clone())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TranslationResult {
    /// Input text, trimmed
    pub original_text: String,
    /// May be empty when the endpoint had nothing to say
    pub translated_text: String,
    pub source_lang: LanguageCode,
    pub target_lang: LanguageCode,
    /// Language the endpoint reports it detected, if any
    pub detected_source_lang: Option<LanguageCode>,
    pub timestamp: SystemTime,
}
