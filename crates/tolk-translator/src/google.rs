use std::time::SystemTime;

use async_trait::async_trait;
use reqwest::Url;
use tolk_config::translator::TranslatorConfig;

use crate::error::{ErrorKind, TranslationError};
use crate::request::{TranslationRequest, TranslationResult};
use crate::response::parse_response;
use crate::{ProviderMetadata, Translator};

/// Client for the public `translate_a/single` endpoint
#[derive(Clone)]
pub struct GoogleTranslator {
    client: reqwest::Client,
    endpoint: String,
    client_tag: String,
    max_chars: usize,
}

impl GoogleTranslator {
    pub fn new(config: &TranslatorConfig) -> Result<Self, TranslationError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| TranslationError::internal(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            client_tag: config.client_tag.clone(),
            max_chars: config.max_chars,
        })
    }

    /// Full request URL, every parameter form-urlencoded as UTF-8
    pub fn build_url(&self, text: &str, from: &str, to: &str) -> Result<Url, TranslationError> {
        Url::parse_with_params(
            &self.endpoint,
            &[
                ("client", self.client_tag.as_str()),
                ("sl", from),
                ("tl", to),
                ("dt", "t"),
                ("q", text),
            ],
        )
        .map_err(|e| {
            TranslationError::internal(format!("invalid endpoint '{}': {e}", self.endpoint))
        })
    }

    /// Trimmed text, or the reason no request should be sent
    fn validate<'a>(&self, request: &'a TranslationRequest) -> Result<&'a str, TranslationError> {
        let text = request.text().trim();
        if text.is_empty() {
            return Err(TranslationError::empty_input("text is empty"));
        }
        if request.source_lang().trim().is_empty() {
            return Err(TranslationError::empty_input("source language is empty"));
        }
        if request.target_lang().trim().is_empty() {
            return Err(TranslationError::empty_input("target language is empty"));
        }

        let chars = text.chars().count();
        if chars > self.max_chars {
            return Err(TranslationError::new(
                ErrorKind::TooLong,
                format!("{chars} characters, limit is {}", self.max_chars),
            ));
        }

        Ok(text)
    }
}

#[async_trait]
impl Translator for GoogleTranslator {
    async fn translate(
        &self,
        request: &TranslationRequest,
    ) -> Result<TranslationResult, TranslationError> {
        let text = self.validate(request)?;
        let url = self.build_url(text, request.source_lang(), request.target_lang())?;

        tracing::debug!(
            "Translating {} chars: {} -> {}",
            text.chars().count(),
            request.source_lang(),
            request.target_lang()
        );

        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("Translation endpoint answered {status}");
            return Err(TranslationError::new(ErrorKind::Http, format!("HTTP {status}")));
        }

        let body = response.text().await?;
        let parsed = parse_response(&body)?;

        Ok(TranslationResult {
            original_text: text.to_string(),
            translated_text: parsed.text,
            source_lang: request.source_lang().to_string(),
            target_lang: request.target_lang().to_string(),
            detected_source_lang: parsed.detected_source_lang,
            timestamp: SystemTime::now(),
        })
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "Google Translate (web)".to_string(),
            requires_api_key: false,
            free_tier_available: true,
        }
    }
}
