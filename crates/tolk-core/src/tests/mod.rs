
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, SystemTime};

use async_trait::async_trait;
use tolk_translator::{
    ProviderMetadata, TranslationError, TranslationRequest, TranslationResult, Translator,
};

/// Translator with per-text delays that records every call it receives
pub(crate) struct ScriptedTranslator {
    delays: HashMap<String, Duration>,
    default_delay: Duration,
    calls: AtomicUsize,
    seen: Mutex<Vec<String>>,
}

impl ScriptedTranslator {
    pub(crate) fn new(default_delay: Duration) -> Self {
        Self {
            delays: HashMap::new(),
            default_delay,
            calls: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn with_delay(mut self, text: &str, delay: Duration) -> Self {
        self.delays.insert(text.to_string(), delay);
        self
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn seen(&self) -> Vec<String> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl Translator for ScriptedTranslator {
    async fn translate(
        &self,
        request: &TranslationRequest,
    ) -> Result<TranslationResult, TranslationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().unwrap().push(request.text().to_string());

        let delay = self
            .delays
            .get(request.text())
            .copied()
            .unwrap_or(self.default_delay);
        tokio::time::sleep(delay).await;

        let text = request.text().trim();
        match text {
            "" => Err(TranslationError::empty_input("text is empty")),
            "panic" => panic!("translator exploded"),
            "silence" => Ok(result(request, "")),
            _ => Ok(result(request, &format!("<{text}>"))),
        }
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "scripted".to_string(),
            requires_api_key: false,
            free_tier_available: true,
        }
    }
}

fn result(request: &TranslationRequest, translated: &str) -> TranslationResult {
    TranslationResult {
        original_text: request.text().trim().to_string(),
        translated_text: translated.to_string(),
        source_lang: request.source_lang().to_string(),
        target_lang: request.target_lang().to_string(),
        detected_source_lang: None,
        timestamp: SystemTime::now(),
    }
}
