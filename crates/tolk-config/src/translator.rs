use std::time::Duration;

use serde::{Deserialize, Serialize};

fn default_endpoint() -> String {
    "https://translate.googleapis.com/translate_a/single".to_string()
}

fn default_client_tag() -> String {
    "gtx".to_string()
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36".to_string()
}

fn default_timeout_ms() -> u64 {
    10_000
}

fn default_source_lang() -> String {
    "en".to_string()
}

fn default_target_lang() -> String {
    "si".to_string()
}

fn default_max_chars() -> usize {
    5000
}

fn default_retry_backoff_ms() -> u64 {
    500
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct TranslatorConfig {
    /// Endpoint the query string is appended to
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Value of the `client` query parameter
    #[serde(default = "default_client_tag")]
    pub client_tag: String,
    /// The public endpoint rejects default client user agents
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    #[serde(default = "default_source_lang")]
    pub source_lang: String,
    #[serde(default = "default_target_lang")]
    pub target_lang: String,
    /// Longest input accepted, in characters
    #[serde(default = "default_max_chars")]
    pub max_chars: usize,
    /// Retries for network and timeout failures, 0 disables
    #[serde(default)]
    pub max_retries: u32,
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,
}

impl TranslatorConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn retry_backoff(&self) -> Duration {
        Duration::from_millis(self.retry_backoff_ms)
    }
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            client_tag: default_client_tag(),
            user_agent: default_user_agent(),
            timeout_ms: default_timeout_ms(),
            source_lang: default_source_lang(),
            target_lang: default_target_lang(),
            max_chars: default_max_chars(),
            max_retries: 0,
            retry_backoff_ms: default_retry_backoff_ms(),
        }
    }
}
