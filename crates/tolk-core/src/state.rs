use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use tokio::sync::RwLock;
use tolk_config::Config;
use tolk_translator::LanguagePair;

/// Settings shared between the app's tasks
pub struct AppState {
    pub config: Arc<RwLock<Config>>,
    pub languages: RwLock<LanguagePair>,
    /// Translate as the user types
    pub live: AtomicBool,
    pub auto_listening: AtomicBool,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let languages = LanguagePair::new(
            config.translator.source_lang.clone(),
            config.translator.target_lang.clone(),
        );
        let live = config.ui.live;

        Self {
            config: Arc::new(RwLock::new(config)),
            languages: RwLock::new(languages),
            live: AtomicBool::new(live),
            auto_listening: AtomicBool::new(false),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
