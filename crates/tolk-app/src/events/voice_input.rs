use std::sync::Arc;
use std::sync::atomic::Ordering;

use kanal::AsyncSender;
use tolk_core::speech::{SpeechError, listen_continuously};
use tolk_types::{StatusLevel, TextSource, UiEvent};

use crate::events::AppEvent;
use crate::session::Session;

/// Listen once in the background. Whatever is heard comes back as [`AppEvent::Heard`].
pub async fn handle_voice_trigger(session: &mut Session) {
    if !session.speech.is_available() {
        session
            .status(StatusLevel::Warning, "Speech input is not available")
            .await;
        return;
    }

    let source = Arc::clone(&session.speech);
    let language = session.state.languages.read().await.source.clone();
    let tx = session.app_tx.clone();

    tracing::debug!("Listening once with {:?}", source.kind());
    tokio::spawn(async move {
        let event = match source.listen(&language).await {
            Ok(Some(text)) => AppEvent::Heard {
                text,
                source: source.text_source(),
            },
            Ok(None) => {
                tracing::debug!("Nothing heard");
                return;
            }
            Err(e) => AppEvent::SpeechFailed(e.to_string()),
        };

        if let Err(e) = tx.send(event).await {
            tracing::error!("Failed to send speech result to app: {e}");
        }
    });
}

/// Keep listening until `:auto off`, translating each utterance
pub async fn start_auto_listen(session: &mut Session) {
    if session.auto_listen.is_some() {
        session.info("Auto listening is already on").await;
        return;
    }
    if !session.speech.is_available() {
        session
            .status(StatusLevel::Warning, "Speech input is not available")
            .await;
        return;
    }

    let interval = session.state.config.read().await.speech.listen_interval();
    let language = session.state.languages.read().await.source.clone();
    let source = Arc::clone(&session.speech);
    let cancel = session.cancel.child_token();
    let tx = session.app_tx.clone();

    session.auto_listen = Some(cancel.clone());
    session.state.auto_listening.store(true, Ordering::Relaxed);
    tracing::info!("Auto listening every {interval:?}");

    tokio::spawn(async move {
        let heard_tx = tx.clone();
        let result = listen_continuously(source, language, interval, cancel, move |text| {
            let tx = heard_tx.clone();
            tokio::spawn(async move {
                let event = AppEvent::Heard {
                    text,
                    source: TextSource::AutoVoice,
                };
                if let Err(e) = tx.send(event).await {
                    tracing::error!("Failed to send heard text to app: {e}");
                }
            });
        })
        .await;

        report_auto_listen_end(&tx, result).await;
    });

    session
        .status(StatusLevel::Busy, "Auto listening, :auto off to stop")
        .await;
}

/// Tell the app why auto listening ended, if it failed
async fn report_auto_listen_end(tx: &AsyncSender<AppEvent>, result: Result<(), SpeechError>) {
    let Err(e) = result else {
        return;
    };
    tracing::debug!("Auto listening failed: {e}");
    if let Err(send_err) = tx.send(AppEvent::AutoListenFailed(e.to_string())).await {
        tracing::error!("Failed to send auto listen failure to app: {send_err}");
    }
}

/// Returns whether auto listening was running
pub fn stop_auto_listen(session: &mut Session) -> bool {
    session.state.auto_listening.store(false, Ordering::Relaxed);
    match session.auto_listen.take() {
        Some(cancel) => {
            cancel.cancel();
            tracing::info!("Auto listening stopped");
            true
        }
        None => false,
    }
}

/// Echo what was heard, then translate it on the conversation slot
pub async fn handle_heard(session: &mut Session, text: String, source: TextSource) {
    session
        .show(UiEvent::RawTextInput {
            text: text.clone(),
            source,
        })
        .await;

    let request = session.request(text).await;
    let token = session.coordinator.submit(session.voice_slot, request);
    session.voice_sources.insert(token, source);
    session.status(StatusLevel::Busy, "Translating...").await;
}
