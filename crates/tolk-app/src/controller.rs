use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender, Sender};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tolk_core::state::AppState;
use tolk_translator::Translator;
use tolk_types::UiEvent;

use crate::events::{AppEvent, event_loop};
use crate::io::read_stdin;

/// Centralized channel management
pub struct ChannelSet {
    /// stdin, speech tasks and prompts into the event loop
    pub to_app: (Sender<AppEvent>, AsyncReceiver<AppEvent>),
}

impl ChannelSet {
    pub fn new() -> Self {
        let (tx, rx) = kanal::bounded(64);
        Self {
            to_app: (tx, rx.to_async()),
        }
    }

    pub fn app_sender(&self) -> AsyncSender<AppEvent> {
        self.to_app.0.clone().to_async()
    }
}

impl Default for ChannelSet {
    fn default() -> Self {
        Self::new()
    }
}

/// Application controller for task spawning and lifecycle
pub struct AppController {
    channels: ChannelSet,
    state: Arc<AppState>,
    cancel_token: CancellationToken,
}

impl AppController {
    pub fn new(state: Arc<AppState>) -> Self {
        Self {
            channels: ChannelSet::new(),
            state,
            cancel_token: CancellationToken::new(),
        }
    }

    pub fn spawn_tasks(
        &self,
        translator: Arc<dyn Translator>,
        ui_tx: AsyncSender<UiEvent>,
    ) -> JoinSet<anyhow::Result<()>> {
        let mut tasks = JoinSet::new();

        tasks.spawn(event_loop(
            self.state.clone(),
            translator,
            self.channels.to_app.1.clone(),
            self.channels.app_sender(),
            ui_tx,
            self.cancel_token.child_token(),
        ));

        tasks
    }

    /// Blocking stdin reads get their own thread so shutdown never waits on the terminal
    pub fn spawn_stdin_reader(&self) -> std::io::Result<()> {
        let tx = self.channels.to_app.0.clone();
        let cancel = self.cancel_token.child_token();

        std::thread::Builder::new()
            .name("tolk-stdin".to_string())
            .spawn(move || read_stdin(std::io::stdin().lock(), tx, cancel))?;
        Ok(())
    }

    pub fn shutdown(&self) {
        self.cancel_token.cancel();
    }
}
