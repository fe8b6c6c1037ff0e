use std::sync::atomic::Ordering;

use tolk_core::phrases;
use tolk_translator::languages::find_language;
use tolk_translator::{AUTO, LANGUAGES};
use tolk_types::{StatusLevel, TextSource, UiEvent};

use crate::events::delivery::display_translation;
use crate::events::voice_input::{
    handle_heard, handle_voice_trigger, start_auto_listen, stop_auto_listen,
};
use crate::session::Session;

pub const HELP: &str = "\
Commands:
  :from <lang>    source language (code, name, or auto)
  :to <lang>      target language
  :swap           swap source and target
  :live on|off    translate while typing
  :voice          speak one phrase
  :auto on|off    keep listening and translating
  :history        show past translations
  :phrases [cat]  list ready-made phrases
  :phrase <n>     translate phrase number n
  :clear          forget history and pending translations
  :langs          list languages
  :help           show this help
  :quit           exit
Anything else is translated.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    From(String),
    To(String),
    Swap,
    Live(bool),
    Voice,
    Auto(bool),
    History,
    Phrases(Option<String>),
    Phrase(usize),
    Clear,
    Languages,
    Help,
    Quit,
}

fn required(arg: &str, usage: &str) -> Result<String, String> {
    if arg.is_empty() {
        Err(format!("Usage: {usage}"))
    } else {
        Ok(arg.to_string())
    }
}

fn toggle(arg: &str, usage: &str) -> Result<bool, String> {
    match arg.to_ascii_lowercase().as_str() {
        "on" | "true" | "yes" | "1" => Ok(true),
        "off" | "false" | "no" | "0" => Ok(false),
        _ => Err(format!("Usage: {usage}")),
    }
}

/// `Ok(None)` for lines that are not commands
pub fn parse_command(line: &str) -> Result<Option<Command>, String> {
    let Some(rest) = line.trim().strip_prefix(':') else {
        return Ok(None);
    };

    let mut parts = rest.split_whitespace();
    let name = parts.next().unwrap_or_default().to_ascii_lowercase();
    let arg = parts.collect::<Vec<_>>().join(" ");

    let command = match name.as_str() {
        "from" => Command::From(required(&arg, ":from <lang>")?),
        "to" => Command::To(required(&arg, ":to <lang>")?),
        "swap" => Command::Swap,
        "live" => Command::Live(toggle(&arg, ":live on|off")?),
        "voice" | "v" => Command::Voice,
        "auto" => Command::Auto(toggle(&arg, ":auto on|off")?),
        "history" | "h" => Command::History,
        "phrases" => Command::Phrases((!arg.is_empty()).then_some(arg)),
        "phrase" | "p" => Command::Phrase(
            arg.parse()
                .map_err(|_| "Usage: :phrase <number>, see :phrases".to_string())?,
        ),
        "clear" => Command::Clear,
        "langs" | "languages" => Command::Languages,
        "help" | "?" => Command::Help,
        "quit" | "q" | "exit" => Command::Quit,
        other => return Err(format!("Unknown command :{other}, try :help")),
    };

    Ok(Some(command))
}

/// Language code for a user query. `auto` is only a valid source.
pub fn resolve_language(query: &str, allow_auto: bool) -> Option<String> {
    if query.trim().eq_ignore_ascii_case(AUTO) {
        return allow_auto.then(|| AUTO.to_string());
    }
    find_language(query).map(|l| l.code.to_string())
}

/// Returns `Ok(false)` on `:quit`
pub async fn handle_command(session: &mut Session, command: Command) -> anyhow::Result<bool> {
    tracing::debug!("Command: {command:?}");

    match command {
        Command::From(query) => match resolve_language(&query, true) {
            Some(code) => {
                session.state.languages.write().await.source = code;
                session.show_languages().await;
            }
            None => session.info(format!("Unknown language: {query}")).await,
        },
        Command::To(query) => match resolve_language(&query, false) {
            Some(code) => {
                session.state.languages.write().await.target = code;
                session.show_languages().await;
            }
            None => session.info(format!("Not a target language: {query}")).await,
        },
        Command::Swap => {
            let swapped = session.state.languages.write().await.swap();
            if !swapped {
                session
                    .status(StatusLevel::Warning, "Pick a source language before swapping")
                    .await;
                return Ok(true);
            }
            session.show_languages().await;

            // Like swapping the two text boxes: the last output becomes the new input
            if session.state.live.load(Ordering::Relaxed)
                && let Some(latest) = session.history.latest()
                && !latest.result.translated_text.is_empty()
            {
                let text = latest.result.translated_text.clone();
                let request = session.request(text).await;
                session.coordinator.submit_debounced(session.input_slot, request);
            }
        }
        Command::Live(on) => {
            session.state.live.store(on, Ordering::Relaxed);
            let debounce_ms = session.state.config.read().await.coordinator.debounce_ms;
            if on {
                session
                    .info(format!("Live translation on ({debounce_ms} ms after you stop typing)"))
                    .await;
            } else {
                session.info("Live translation off").await;
            }
        }
        Command::Voice => handle_voice_trigger(session).await,
        Command::Auto(true) => start_auto_listen(session).await,
        Command::Auto(false) => {
            if stop_auto_listen(session) {
                session.status(StatusLevel::Ready, "Auto listening off").await;
            } else {
                session.info("Auto listening is not on").await;
            }
        }
        Command::History => {
            let entries = session
                .history
                .entries()
                .map(|e| display_translation(e.source, &e.result))
                .collect();
            session.show(UiEvent::ShowHistory(entries)).await;
        }
        Command::Phrases(None) => session.info(phrases::describe(None)).await,
        Command::Phrases(Some(query)) => match phrases::find_category(&query) {
            Some(category) => session.info(phrases::describe(Some(category))).await,
            None => {
                let names: Vec<_> = phrases::PHRASES.iter().map(|c| c.name).collect();
                session
                    .info(format!(
                        "No phrase category matches {query:?}. Categories: {}",
                        names.join(", ")
                    ))
                    .await;
            }
        },
        Command::Phrase(number) => match phrases::phrase(number) {
            // Picked phrases join the conversation log, like something said aloud
            Some(text) => handle_heard(session, text.to_string(), TextSource::Phrase).await,
            None => session.info(format!("No phrase {number}, see :phrases")).await,
        },
        Command::Clear => {
            session.coordinator.clear(session.input_slot);
            session.coordinator.clear(session.voice_slot);
            session.voice_sources.clear();
            session.history.clear();
            session.status(StatusLevel::Ready, "Cleared").await;
        }
        Command::Languages => {
            let list = LANGUAGES
                .iter()
                .map(|l| format!("  {:<6}{}", l.code, l.name))
                .collect::<Vec<_>>()
                .join("\n");
            session.info(format!("  {AUTO:<6}Detect language (source only)\n{list}")).await;
        }
        Command::Help => session.info(HELP).await,
        Command::Quit => return Ok(false),
    }

    Ok(true)
}
