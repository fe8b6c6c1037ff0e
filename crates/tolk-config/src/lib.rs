use std::env;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use self::coordinator::CoordinatorConfig;
use self::speech::SpeechConfig;
use self::translator::TranslatorConfig;
use self::ui::UiConfig;

pub mod coordinator;
pub mod speech;
pub mod translator;
pub mod ui;

pub use speech::SpeechMode;

#[derive(Debug, Default, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    pub translator: TranslatorConfig,
    pub coordinator: CoordinatorConfig,
    pub speech: SpeechConfig,
    pub ui: UiConfig,
}

fn env_parse<T: FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

impl Config {
    /// Defaults with environment overrides applied
    pub fn new() -> Self {
        let mut config = Config::default();
        config.apply_env();
        config
    }

    /// Override fields from `TOLK_*` environment variables, ignoring unparsable values
    pub fn apply_env(&mut self) {
        if let Ok(endpoint) = env::var("TOLK_ENDPOINT") {
            self.translator.endpoint = endpoint;
        }
        if let Some(timeout_ms) = env_parse("TOLK_TIMEOUT_MS") {
            self.translator.timeout_ms = timeout_ms;
        }
        if let Ok(lang) = env::var("TOLK_SOURCE_LANG") {
            self.translator.source_lang = lang;
        }
        if let Ok(lang) = env::var("TOLK_TARGET_LANG") {
            self.translator.target_lang = lang;
        }
        if let Some(retries) = env_parse("TOLK_MAX_RETRIES") {
            self.translator.max_retries = retries;
        }
        if let Some(debounce_ms) = env_parse("TOLK_DEBOUNCE_MS") {
            self.coordinator.debounce_ms = debounce_ms;
        }
        if let Some(mode) = env_parse::<SpeechMode>("TOLK_SPEECH_MODE") {
            self.speech.mode = mode;
        }
    }
}
