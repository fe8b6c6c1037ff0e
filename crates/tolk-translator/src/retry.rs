use std::time::Duration;

use async_trait::async_trait;
use tolk_config::translator::TranslatorConfig;

use crate::error::TranslationError;
use crate::request::{TranslationRequest, TranslationResult};
use crate::{ProviderMetadata, Translator};

/// Retries network and timeout failures with exponential backoff
pub struct Retrying<T> {
    inner: T,
    max_retries: u32,
    backoff: Duration,
}

impl<T: Translator> Retrying<T> {
    pub fn new(inner: T, max_retries: u32, backoff: Duration) -> Self {
        Self {
            inner,
            max_retries,
            backoff,
        }
    }

    pub fn from_config(inner: T, config: &TranslatorConfig) -> Self {
        Self::new(inner, config.max_retries, config.retry_backoff())
    }

    pub fn inner(&self) -> &T {
        &self.inner
    }
}

#[async_trait]
impl<T: Translator> Translator for Retrying<T> {
    async fn translate(
        &self,
        request: &TranslationRequest,
    ) -> Result<TranslationResult, TranslationError> {
        let mut attempt = 0;
        let mut delay = self.backoff;

        loop {
            match self.inner.translate(request).await {
                Err(e) if e.is_retryable() && attempt < self.max_retries => {
                    attempt += 1;
                    tracing::warn!(
                        "Translation attempt {attempt}/{} failed ({e}), retrying in {delay:?}",
                        self.max_retries
                    );
                    tokio::time::sleep(delay).await;
                    delay = delay.saturating_mul(2);
                }
                outcome => return outcome,
            }
        }
    }

    fn metadata(&self) -> ProviderMetadata {
        self.inner.metadata()
    }
}
