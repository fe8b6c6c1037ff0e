use tolk_types::{DisplayTranslation, StatusLine};

/// What the UI thread has on screen
#[derive(Default)]
pub struct UiState {
    pub last_translation: Option<DisplayTranslation>,
    pub status: Option<StatusLine>,
}

impl UiState {
    pub fn new() -> Self {
        Self::default()
    }
}
