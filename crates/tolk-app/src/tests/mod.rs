mod event_loop_tests;

use std::collections::HashMap;
use std::time::{Duration, SystemTime};

use async_trait::async_trait;
use tolk_translator::{
    ErrorKind, ProviderMetadata, TranslationError, TranslationRequest, TranslationResult,
    Translator,
};

/// Wraps text in angle brackets after a per-text delay. "fail" fails with a network error.
pub(crate) struct BracketTranslator {
    delays: HashMap<String, Duration>,
}

impl BracketTranslator {
    pub(crate) fn new() -> Self {
        Self {
            delays: HashMap::new(),
        }
    }

    pub(crate) fn with_delay(mut self, text: &str, delay: Duration) -> Self {
        self.delays.insert(text.to_string(), delay);
        self
    }
}

#[async_trait]
impl Translator for BracketTranslator {
    async fn translate(
        &self,
        request: &TranslationRequest,
    ) -> Result<TranslationResult, TranslationError> {
        let delay = self
            .delays
            .get(request.text())
            .copied()
            .unwrap_or(Duration::from_millis(100));
        tokio::time::sleep(delay).await;

        if request.text() == "fail" {
            return Err(TranslationError::new(ErrorKind::Network, "connection refused"));
        }

        Ok(TranslationResult {
            original_text: request.text().to_string(),
            translated_text: format!("<{}>", request.text()),
            source_lang: request.source_lang().to_string(),
            target_lang: request.target_lang().to_string(),
            detected_source_lang: None,
            timestamp: SystemTime::now(),
        })
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "Brackets".to_string(),
            requires_api_key: false,
            free_tier_available: true,
        }
    }
}
