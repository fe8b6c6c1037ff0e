pub mod error;
pub mod google;
pub mod languages;
pub mod request;
pub mod response;
pub mod retry;

pub use error::{ErrorKind, TranslationError};
pub use google::GoogleTranslator;
pub use languages::{AUTO, LANGUAGES, Language, LanguagePair};
pub use request::{TranslationRequest, TranslationResult};
pub use retry::Retrying;

pub type LanguageCode = String;

/// Translation provider interface
#[async_trait::async_trait]
pub trait Translator: Send + Sync {
    /// Translate `request.text` from source to target language.
    ///
    /// Every failure comes back as a [`TranslationError`]; implementations never panic on
    /// bad input or bad responses.
    async fn translate(
        &self,
        request: &TranslationRequest,
    ) -> Result<TranslationResult, TranslationError>;

    /// Languages offered to the user
    fn supported_languages(&self) -> &'static [Language] {
        LANGUAGES
    }

    /// Provider metadata
    fn metadata(&self) -> ProviderMetadata;
}

#[derive(Debug, Clone)]
pub struct ProviderMetadata {
    pub name: String,
    pub requires_api_key: bool,
    pub free_tier_available: bool,
}
