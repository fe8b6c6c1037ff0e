use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SpeechMode {
    Off,
    /// Type what was said into a prompt
    #[default]
    Manual,
    /// Hand off to the OS voice recorder, then type the transcription
    Recorder,
}

impl std::str::FromStr for SpeechMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "off" | "none" => Ok(Self::Off),
            "manual" | "prompt" => Ok(Self::Manual),
            "recorder" => Ok(Self::Recorder),
            other => Err(format!("unknown speech mode: {other}")),
        }
    }
}

fn default_listen_interval_ms() -> u64 {
    2000
}

fn default_recorder_delay_ms() -> u64 {
    3000
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct SpeechConfig {
    pub mode: SpeechMode,
    /// Pause between utterances while auto-listening
    #[serde(default = "default_listen_interval_ms")]
    pub listen_interval_ms: u64,
    /// Wait after opening the recorder before asking for the transcription
    #[serde(default = "default_recorder_delay_ms")]
    pub recorder_delay_ms: u64,
}

impl SpeechConfig {
    pub fn listen_interval(&self) -> Duration {
        Duration::from_millis(self.listen_interval_ms)
    }

    pub fn recorder_delay(&self) -> Duration {
        Duration::from_millis(self.recorder_delay_ms)
    }
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            mode: SpeechMode::default(),
            listen_interval_ms: default_listen_interval_ms(),
            recorder_delay_ms: default_recorder_delay_ms(),
        }
    }
}
