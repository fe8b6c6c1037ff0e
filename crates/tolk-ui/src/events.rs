use std::io::{self, Write};

use tolk_types::{DisplayError, DisplayTranslation, StatusLevel, TextSource, UiEvent};

use crate::state::UiState;

/// Render one event. Returns `Ok(false)` when the UI should close.
pub fn handle_events<W: Write>(
    event: UiEvent,
    out: &mut W,
    state: &mut UiState,
) -> io::Result<bool> {
    match event {
        UiEvent::ShowTranslation(translation) => {
            write_translation(out, &translation)?;
            state.last_translation = Some(translation);
        }
        UiEvent::ShowError(error) => write_error(out, &error)?,
        UiEvent::RawTextInput { text, source } => {
            let verb = match source {
                TextSource::Phrase => "picked",
                _ => "heard",
            };
            writeln!(out, "[{}] {verb}: {}", source.label(), text)?;
        }
        UiEvent::ShowHistory(entries) => {
            if entries.is_empty() {
                writeln!(out, "History is empty")?;
            }
            for (i, entry) in entries.iter().enumerate() {
                writeln!(
                    out,
                    "{:>3}. [{}] {} -> {}: {} => {}",
                    i + 1,
                    entry.source.label(),
                    entry.from_lang,
                    entry.to_lang,
                    entry.original,
                    display_text(&entry.translated)
                )?;
            }
        }
        UiEvent::Languages { description } => writeln!(out, "Languages: {description}")?,
        UiEvent::Prompt(message) => {
            write!(out, "? {message} ")?;
        }
        UiEvent::Status(status) => {
            if state.status.as_ref() != Some(&status) {
                let marker = match status.level {
                    StatusLevel::Ready => "*",
                    StatusLevel::Busy => "~",
                    StatusLevel::Warning => "!",
                    StatusLevel::Error => "x",
                };
                writeln!(out, "{marker} {}", status.message)?;
                state.status = Some(status);
            }
        }
        UiEvent::Info(message) => writeln!(out, "{message}")?,
        UiEvent::Close => {
            out.flush()?;
            return Ok(false);
        }
    }

    out.flush()?;
    Ok(true)
}

fn display_text(text: &str) -> &str {
    if text.is_empty() {
        "(empty translation)"
    } else {
        text
    }
}

fn write_translation<W: Write>(out: &mut W, t: &DisplayTranslation) -> io::Result<()> {
    write!(out, "[{}] {} -> {}", t.source.label(), t.from_lang, t.to_lang)?;
    if let Some(detected) = &t.detected_lang
        && *detected != t.from_lang
    {
        write!(out, " (detected {detected})")?;
    }
    writeln!(out)?;
    writeln!(out, "  {}", t.original)?;
    writeln!(out, "  => {}", display_text(&t.translated))
}

fn write_error<W: Write>(out: &mut W, e: &DisplayError) -> io::Result<()> {
    writeln!(out, "[{}] translation failed ({}): {}", e.source.label(), e.kind, e.detail)?;
    writeln!(out, "  {}", e.hint)
}

#[cfg(test)]
mod tests {
    use tolk_types::StatusLine;

    use super::*;

    fn render(events: Vec<UiEvent>) -> (String, UiState) {
        let mut out = Vec::new();
        let mut state = UiState::new();
        for event in events {
            handle_events(event, &mut out, &mut state).unwrap();
        }
        (String::from_utf8(out).unwrap(), state)
    }

    fn translation(translated: &str) -> DisplayTranslation {
        DisplayTranslation {
            source: TextSource::Typed,
            original: "Hello".to_string(),
            translated: translated.to_string(),
            from_lang: "auto".to_string(),
            to_lang: "fr".to_string(),
            detected_lang: Some("en".to_string()),
        }
    }

    #[test]
    fn empty_translation_is_not_shown_as_blank() {
        let (text, state) = render(vec![UiEvent::ShowTranslation(translation(""))]);
        assert!(text.contains("=> (empty translation)"));
        assert!(text.contains("(detected en)"));
        assert!(state.last_translation.is_some());
    }

    #[test]
    fn errors_are_flagged_with_hint() {
        let (text, state) = render(vec![UiEvent::ShowError(DisplayError {
            source: TextSource::ManualVoice,
            kind: "timeout".to_string(),
            detail: "operation timed out".to_string(),
            hint: "The service is slow, try again".to_string(),
        })]);

        assert!(text.starts_with("[Manual Voice] translation failed (timeout)"));
        assert!(text.contains("try again"));
        assert!(state.last_translation.is_none());
    }

    #[test]
    fn repeated_status_is_printed_once() {
        let ready = StatusLine::new(StatusLevel::Ready, "Ready");
        let (text, _) = render(vec![
            UiEvent::Status(ready.clone()),
            UiEvent::Status(ready),
            UiEvent::Status(StatusLine::new(StatusLevel::Busy, "Translating...")),
        ]);
        assert_eq!(text, "* Ready\n~ Translating...\n");
    }

    #[test]
    fn picked_phrases_are_not_reported_as_heard() {
        let (text, _) = render(vec![UiEvent::RawTextInput {
            text: "Turn left".to_string(),
            source: TextSource::Phrase,
        }]);
        assert_eq!(text, "[Quick Phrase] picked: Turn left\n");
    }

    #[test]
    fn close_stops_rendering() {
        let mut out = Vec::new();
        let mut state = UiState::new();
        assert!(!handle_events(UiEvent::Close, &mut out, &mut state).unwrap());
    }
}
