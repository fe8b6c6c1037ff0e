use serde::{Deserialize, Serialize};

fn default_history_capacity() -> usize {
    100
}

fn default_live() -> bool {
    false
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct UiConfig {
    #[serde(default = "default_history_capacity")]
    pub history_capacity: usize,
    /// Start with translate-as-you-type enabled
    #[serde(default = "default_live")]
    pub live: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            history_capacity: default_history_capacity(),
            live: default_live(),
        }
    }
}
