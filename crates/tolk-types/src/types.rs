use serde::{Deserialize, Serialize};

/// Events the app sends to the UI thread for display
#[derive(Debug, Clone)]
pub enum UiEvent {
    ShowTranslation(DisplayTranslation),
    ShowError(DisplayError),
    /// Echo of input received from a non-keyboard source
    RawTextInput {
        text: String,
        source: TextSource,
    },
    ShowHistory(Vec<DisplayTranslation>),
    Languages {
        description: String,
    },
    Prompt(String),
    Status(StatusLine),
    Info(String),
    Close,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextSource {
    Typed,
    Live,
    ManualVoice,
    AutoVoice,
    Recorder,
    /// Picked from the phrase catalog
    Phrase,
}

impl TextSource {
    pub fn label(self) -> &'static str {
        match self {
            TextSource::Typed => "Text",
            TextSource::Live => "Live",
            TextSource::ManualVoice => "Manual Voice",
            TextSource::AutoVoice => "Auto Voice",
            TextSource::Recorder => "Recorded Voice",
            TextSource::Phrase => "Quick Phrase",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DisplayTranslation {
    pub source: TextSource,
    pub original: String,
    pub translated: String,
    pub from_lang: String,
    pub to_lang: String,
    pub detected_lang: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DisplayError {
    pub source: TextSource,
    pub kind: String,
    pub detail: String,
    pub hint: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Ready,
    Busy,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatusLine {
    pub level: StatusLevel,
    pub message: String,
}

impl StatusLine {
    pub fn new(level: StatusLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }
}
