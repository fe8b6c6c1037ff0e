use std::collections::HashMap;
use std::sync::Arc;

use kanal::AsyncSender;
use tokio::sync::oneshot;
use tokio_util::sync::CancellationToken;
use tolk_core::speech::{SpeechInputSource, TextPrompt, select_source};
use tolk_core::state::AppState;
use tolk_core::{Coordinator, PendingRequestToken, SlotId, SlotMode, TranslationHistory};
use tolk_translator::{TranslationRequest, Translator};
use tolk_types::{StatusLevel, StatusLine, TextSource, UiEvent};

use crate::events::AppEvent;
use crate::prompt::ChannelPrompt;

/// Everything the event loop owns
///
/// Lives on the event loop task only. Background work reports back through `app_tx`
/// or the coordinator's event channel.
pub struct Session {
    pub state: Arc<AppState>,
    pub coordinator: Coordinator,
    /// The text box: only the newest input is shown
    pub input_slot: SlotId,
    /// The conversation log: every utterance gets its translation
    pub voice_slot: SlotId,
    pub input_source: TextSource,
    pub voice_sources: HashMap<PendingRequestToken, TextSource>,
    pub history: TranslationHistory,
    pub speech: Arc<dyn SpeechInputSource>,
    pub prompt_reply: Option<oneshot::Sender<Option<String>>>,
    pub auto_listen: Option<CancellationToken>,
    pub cancel: CancellationToken,
    pub app_tx: AsyncSender<AppEvent>,
    pub ui_tx: AsyncSender<UiEvent>,
}

impl Session {
    pub async fn new(
        state: Arc<AppState>,
        translator: Arc<dyn Translator>,
        app_tx: AsyncSender<AppEvent>,
        ui_tx: AsyncSender<UiEvent>,
        cancel: CancellationToken,
    ) -> Self {
        let (coordinator_config, speech_config, history_capacity) = {
            let config = state.config.read().await;
            (
                config.coordinator.clone(),
                config.speech.clone(),
                config.ui.history_capacity,
            )
        };

        let prompt: Arc<dyn TextPrompt> = Arc::new(ChannelPrompt::new(app_tx.clone()));
        let speech = select_source(&speech_config, prompt, None);
        tracing::info!("Speech input: {:?}", speech.kind());

        let mut coordinator = Coordinator::new(translator, &coordinator_config);
        let input_slot = coordinator.open_slot(SlotMode::Latest);
        let voice_slot = coordinator.open_slot(SlotMode::Every);

        Self {
            state,
            coordinator,
            input_slot,
            voice_slot,
            input_source: TextSource::Typed,
            voice_sources: HashMap::new(),
            history: TranslationHistory::new(history_capacity),
            speech,
            prompt_reply: None,
            auto_listen: None,
            cancel,
            app_tx,
            ui_tx,
        }
    }

    /// Request for `text` with the currently selected languages
    pub async fn request(&self, text: impl Into<String>) -> TranslationRequest {
        let languages = self.state.languages.read().await;
        TranslationRequest::new(text, languages.source.clone(), languages.target.clone())
    }

    pub async fn show(&self, event: UiEvent) {
        if let Err(e) = self.ui_tx.send(event).await {
            tracing::warn!("UI gone, dropping event: {e}");
        }
    }

    pub async fn status(&self, level: StatusLevel, message: impl Into<String>) {
        self.show(UiEvent::Status(StatusLine::new(level, message))).await;
    }

    pub async fn info(&self, message: impl Into<String>) {
        self.show(UiEvent::Info(message.into())).await;
    }

    pub async fn show_languages(&self) {
        let description = self.state.languages.read().await.describe();
        self.show(UiEvent::Languages { description }).await;
    }
}
