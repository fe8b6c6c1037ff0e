use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use tokio::sync::oneshot;
use tokio_util::sync::CancellationToken;
use tolk_core::state::AppState;
use tolk_translator::Translator;
use tolk_types::{StatusLevel, TextSource, UiEvent};

use crate::session::Session;

pub mod commands;
pub mod delivery;
pub mod text_input;
pub mod voice_input;

use commands::{handle_command, parse_command};
use delivery::handle_delivery;
use text_input::handle_text_input;
use voice_input::{handle_heard, stop_auto_listen};

/// Input reaching the event loop from stdin and background tasks
#[derive(Debug)]
pub enum AppEvent {
    Line(String),
    /// stdin reached end of file
    InputClosed,
    /// Text from a speech source, ready to translate
    Heard {
        text: String,
        source: TextSource,
    },
    SpeechFailed(String),
    AutoListenFailed(String),
    /// A speech source wants the next input line
    Prompt {
        message: String,
        reply: oneshot::Sender<Option<String>>,
    },
}

const GREETING: &str = "Type text to translate, or :help for commands";

/// App's main loop. Owns the coordinator, so every delivery is applied here.
pub async fn event_loop(
    state: Arc<AppState>,
    translator: Arc<dyn Translator>,
    app_rx: AsyncReceiver<AppEvent>,
    app_tx: AsyncSender<AppEvent>,
    ui_tx: AsyncSender<UiEvent>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let mut session = Session::new(state, translator, app_tx, ui_tx, cancel.child_token()).await;
    let completions = session.coordinator.events();

    session.info(GREETING).await;
    session.show_languages().await;
    session.status(StatusLevel::Ready, "Ready").await;

    if session.state.live.load(std::sync::atomic::Ordering::Relaxed) {
        session.info("Live translation is on").await;
    }

    tracing::info!("Event loop started");
    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            event = app_rx.recv() => {
                if !handle_events(&mut session, event?).await? {
                    break;
                }
            }
            event = completions.recv() => {
                if let Some(delivery) = session.coordinator.handle(event?) {
                    handle_delivery(&mut session, delivery).await;
                }
            }
        }
    }

    stop_auto_listen(&mut session);
    tracing::info!("Event loop stopped");
    Ok(())
}

/// Returns `Ok(false)` when the app should quit
pub async fn handle_events(session: &mut Session, event: AppEvent) -> anyhow::Result<bool> {
    match event {
        AppEvent::Line(line) => {
            if line.trim() == ":cancel" {
                if !answer_prompt(session, None) {
                    session.info("Nothing to cancel").await;
                }
                return Ok(true);
            }

            // Commands always run, closing any open prompt unanswered
            match parse_command(&line) {
                Ok(Some(command)) => {
                    answer_prompt(session, None);
                    return handle_command(session, command).await;
                }
                Ok(None) if session.prompt_reply.is_some() => {
                    answer_prompt(session, Some(line));
                }
                Ok(None) => handle_text_input(session, line).await,
                Err(message) => session.info(message).await,
            }
        }
        AppEvent::InputClosed => {
            tracing::info!("End of input");
            return Ok(false);
        }
        AppEvent::Heard { text, source } => handle_heard(session, text, source).await,
        AppEvent::SpeechFailed(message) => {
            tracing::warn!("Speech input failed: {message}");
            session.status(StatusLevel::Warning, message).await;
        }
        AppEvent::AutoListenFailed(message) => {
            tracing::warn!("Auto listening stopped: {message}");
            stop_auto_listen(session);
            session
                .status(StatusLevel::Warning, format!("Auto listening stopped: {message}"))
                .await;
        }
        AppEvent::Prompt { message, reply } => {
            if let Some(previous) = session.prompt_reply.replace(reply) {
                if previous.send(None).is_err() {
                    tracing::debug!("Replaced prompt was already abandoned");
                }
            }
            session.show(UiEvent::Prompt(message)).await;
        }
    }

    Ok(true)
}

/// Hand `answer` to the open prompt. Returns false when none was open.
fn answer_prompt(session: &mut Session, answer: Option<String>) -> bool {
    match session.prompt_reply.take() {
        Some(reply) => {
            if reply.send(answer).is_err() {
                tracing::debug!("Prompt was abandoned before it was answered");
            }
            true
        }
        None => false,
    }
}
