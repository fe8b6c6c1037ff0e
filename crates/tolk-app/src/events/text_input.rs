use std::sync::atomic::Ordering;

use tolk_types::{StatusLevel, TextSource};

use crate::session::Session;

/// Typed lines go to the latest-wins input slot, debounced in live mode
pub async fn handle_text_input(session: &mut Session, text: String) {
    let live = session.state.live.load(Ordering::Relaxed);

    if text.trim().is_empty() {
        if live {
            // An emptied box clears the output and cancels what was on its way
            session.coordinator.clear(session.input_slot);
            session.status(StatusLevel::Ready, "Ready").await;
        } else {
            session
                .status(StatusLevel::Warning, "Please enter text to translate")
                .await;
        }
        return;
    }

    tracing::debug!("Text input: {} chars", text.chars().count());
    let request = session.request(text).await;

    if live {
        session.input_source = TextSource::Live;
        session.coordinator.submit_debounced(session.input_slot, request);
    } else {
        session.input_source = TextSource::Typed;
        session.coordinator.submit(session.input_slot, request);
    }
    session.status(StatusLevel::Busy, "Translating...").await;
}
