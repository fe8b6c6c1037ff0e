use std::time::Duration;

use serde::{Deserialize, Serialize};

fn default_debounce_ms() -> u64 {
    800
}

fn default_cancel_superseded() -> bool {
    true
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct CoordinatorConfig {
    /// Quiet window for typing-triggered translation
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    /// Abort superseded in-flight calls instead of letting them finish
    #[serde(default = "default_cancel_superseded")]
    pub cancel_superseded: bool,
}

impl CoordinatorConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            cancel_superseded: default_cancel_superseded(),
        }
    }
}
