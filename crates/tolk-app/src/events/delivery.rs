use tolk_core::Delivery;
use tolk_translator::TranslationResult;
use tolk_types::{DisplayError, DisplayTranslation, StatusLevel, TextSource, UiEvent};

use crate::session::Session;

pub fn display_translation(source: TextSource, result: &TranslationResult) -> DisplayTranslation {
    DisplayTranslation {
        source,
        original: result.original_text.clone(),
        translated: result.translated_text.clone(),
        from_lang: result.source_lang.clone(),
        to_lang: result.target_lang.clone(),
        detected_lang: result.detected_source_lang.clone(),
    }
}

/// Show a delivery the coordinator still wants, and keep successes in history
pub async fn handle_delivery(session: &mut Session, delivery: Delivery) {
    let source = if delivery.token.slot() == session.voice_slot {
        session
            .voice_sources
            .remove(&delivery.token)
            .unwrap_or(TextSource::ManualVoice)
    } else {
        session.input_source
    };

    match delivery.outcome {
        Ok(result) => {
            let display = display_translation(source, &result);
            session.history.record(source, result);
            session.show(UiEvent::ShowTranslation(display)).await;
            session.status(StatusLevel::Ready, "Ready").await;
        }
        Err(error) => {
            tracing::warn!("Translation of {:?} failed: {error}", delivery.request.text());
            session
                .show(UiEvent::ShowError(DisplayError {
                    source,
                    kind: error.kind.label().to_string(),
                    detail: error.detail.clone(),
                    hint: error.hint().to_string(),
                }))
                .await;
            session.status(StatusLevel::Error, "Translation failed").await;
        }
    }
}
