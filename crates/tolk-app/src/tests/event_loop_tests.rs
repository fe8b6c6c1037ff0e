use std::sync::Arc;
use std::time::Duration;

use kanal::{AsyncReceiver, AsyncSender};
use tokio::task::JoinHandle;
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;
use tolk_config::{Config, SpeechMode};
use tolk_core::speech::ManualTextPrompt;
use tolk_core::state::AppState;
use tolk_translator::Translator;
use tolk_types::{DisplayTranslation, TextSource, UiEvent};

use super::BracketTranslator;
use crate::events::{AppEvent, event_loop};

struct Harness {
    app_tx: AsyncSender<AppEvent>,
    ui_rx: AsyncReceiver<UiEvent>,
    task: JoinHandle<anyhow::Result<()>>,
    cancel: CancellationToken,
}

impl Harness {
    fn start(config: Config, translator: BracketTranslator) -> Self {
        let state = Arc::new(AppState::new(config));
        let translator: Arc<dyn Translator> = Arc::new(translator);
        let (app_tx, app_rx) = kanal::unbounded_async();
        let (ui_tx, ui_rx) = kanal::unbounded_async();
        let cancel = CancellationToken::new();

        let task = tokio::spawn(event_loop(
            state,
            translator,
            app_rx,
            app_tx.clone(),
            ui_tx,
            cancel.clone(),
        ));

        Self {
            app_tx,
            ui_rx,
            task,
            cancel,
        }
    }

    async fn line(&self, text: &str) {
        self.app_tx
            .send(AppEvent::Line(text.to_string()))
            .await
            .unwrap();
    }

    /// Skip UI events until one matches
    async fn expect(&self, wanted: impl Fn(&UiEvent) -> bool) -> UiEvent {
        timeout(Duration::from_secs(10), async {
            loop {
                let event = self.ui_rx.recv().await.unwrap();
                if wanted(&event) {
                    return event;
                }
            }
        })
        .await
        .expect("expected UI event never arrived")
    }

    async fn translation(&self) -> DisplayTranslation {
        match self
            .expect(|e| matches!(e, UiEvent::ShowTranslation(_)))
            .await
        {
            UiEvent::ShowTranslation(t) => t,
            _ => unreachable!(),
        }
    }

    /// Translations shown within `window`
    async fn translations_within(&self, window: Duration) -> Vec<String> {
        let mut shown = Vec::new();
        let _ = timeout(window, async {
            while let Ok(event) = self.ui_rx.recv().await {
                if let UiEvent::ShowTranslation(t) = event {
                    shown.push(t.translated);
                }
            }
        })
        .await;
        shown
    }

    /// Every UI event shown within `window`
    async fn events_within(&self, window: Duration) -> Vec<UiEvent> {
        let mut shown = Vec::new();
        let _ = timeout(window, async {
            while let Ok(event) = self.ui_rx.recv().await {
                shown.push(event);
            }
        })
        .await;
        shown
    }

    async fn stop(self) {
        self.cancel.cancel();
        self.task.await.unwrap().unwrap();
    }
}

fn config() -> Config {
    let mut config = Config::default();
    config.translator.source_lang = "en".to_string();
    config.translator.target_lang = "fr".to_string();
    config
}

#[tokio::test(start_paused = true)]
async fn test_typed_line_is_translated_and_kept_in_history() {
    let app = Harness::start(config(), BracketTranslator::new());

    app.line("hello").await;
    let shown = app.translation().await;
    assert_eq!(shown.translated, "<hello>");
    assert_eq!(shown.source, TextSource::Typed);
    assert_eq!((shown.from_lang.as_str(), shown.to_lang.as_str()), ("en", "fr"));

    app.line(":history").await;
    match app.expect(|e| matches!(e, UiEvent::ShowHistory(_))).await {
        UiEvent::ShowHistory(entries) => {
            assert_eq!(entries.len(), 1);
            assert_eq!(entries[0].original, "hello");
        }
        _ => unreachable!(),
    }

    app.stop().await;
}

#[tokio::test(start_paused = true)]
async fn test_newer_line_hides_slower_older_one() {
    let translator = BracketTranslator::new()
        .with_delay("slow", Duration::from_secs(3))
        .with_delay("fast", Duration::from_millis(100));
    let app = Harness::start(config(), translator);

    app.line("slow").await;
    app.line("fast").await;

    assert_eq!(app.translations_within(Duration::from_secs(10)).await, ["<fast>"]);
    app.stop().await;
}

#[tokio::test(start_paused = true)]
async fn test_live_mode_translates_once_typing_pauses() {
    let mut config = config();
    config.ui.live = true;
    let app = Harness::start(config, BracketTranslator::new());

    for partial in ["h", "hel", "hello"] {
        app.line(partial).await;
        tokio::time::sleep(Duration::from_millis(100)).await;
    }

    let shown = app.translations_within(Duration::from_secs(5)).await;
    assert_eq!(shown, ["<hello>"]);
    app.stop().await;
}

#[tokio::test(start_paused = true)]
async fn test_failure_is_shown_as_error_not_translation() {
    let app = Harness::start(config(), BracketTranslator::new());

    app.line("fail").await;
    match app.expect(|e| matches!(e, UiEvent::ShowError(_))).await {
        UiEvent::ShowError(error) => {
            assert_eq!(error.kind, "network error");
            assert_eq!(error.detail, "connection refused");
            assert!(!error.hint.is_empty());
        }
        _ => unreachable!(),
    }

    app.stop().await;
}

#[tokio::test(start_paused = true)]
async fn test_voice_prompt_takes_next_line() {
    let mut config = config();
    config.speech.mode = SpeechMode::Manual;
    let app = Harness::start(config, BracketTranslator::new());

    app.line(":voice").await;
    match app.expect(|e| matches!(e, UiEvent::Prompt(_))).await {
        UiEvent::Prompt(message) => assert_eq!(message, ManualTextPrompt::MESSAGE),
        _ => unreachable!(),
    }

    app.line("vanakkam").await;
    let heard = app
        .expect(|e| matches!(e, UiEvent::RawTextInput { .. }))
        .await;
    assert!(matches!(
        heard,
        UiEvent::RawTextInput { ref text, source: TextSource::ManualVoice } if text == "vanakkam"
    ));

    let shown = app.translation().await;
    assert_eq!(shown.translated, "<vanakkam>");
    assert_eq!(shown.source, TextSource::ManualVoice);

    app.stop().await;
}

#[tokio::test(start_paused = true)]
async fn test_cancelled_prompt_translates_nothing() {
    let app = Harness::start(config(), BracketTranslator::new());

    app.line(":voice").await;
    app.expect(|e| matches!(e, UiEvent::Prompt(_))).await;
    app.line(":cancel").await;

    assert!(app.translations_within(Duration::from_secs(5)).await.is_empty());
    app.stop().await;
}

#[tokio::test(start_paused = true)]
async fn test_language_commands_change_requests() {
    let app = Harness::start(config(), BracketTranslator::new());

    app.line(":from auto").await;
    app.line(":to tamil").await;
    app.line(":swap").await;
    app.expect(|e| matches!(e, UiEvent::Status(s) if s.message.contains("before swapping")))
        .await;

    app.line("hello").await;
    let shown = app.translation().await;
    assert_eq!((shown.from_lang.as_str(), shown.to_lang.as_str()), ("auto", "ta"));

    app.stop().await;
}

#[tokio::test(start_paused = true)]
async fn test_quit_ends_event_loop() {
    let app = Harness::start(config(), BracketTranslator::new());

    app.line(":quit").await;
    timeout(Duration::from_secs(5), app.task)
        .await
        .expect("event loop did not stop")
        .unwrap()
        .unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_auto_off_closes_open_prompt() {
    let app = Harness::start(config(), BracketTranslator::new());

    app.line(":auto on").await;
    app.expect(|e| matches!(e, UiEvent::Prompt(_))).await;
    app.line(":auto off").await;
    app.expect(|e| matches!(e, UiEvent::Status(s) if s.message == "Auto listening off"))
        .await;

    let later = app.events_within(Duration::from_secs(10)).await;
    assert!(
        !later.iter().any(|e| matches!(
            e,
            UiEvent::Prompt(_) | UiEvent::RawTextInput { .. } | UiEvent::ShowTranslation(_)
        )),
        "still listening after :auto off: {later:?}"
    );

    app.stop().await;
}

#[tokio::test(start_paused = true)]
async fn test_quit_while_prompt_open_exits_without_translating() {
    let app = Harness::start(config(), BracketTranslator::new());

    app.line(":voice").await;
    app.expect(|e| matches!(e, UiEvent::Prompt(_))).await;
    app.line(":quit").await;

    // The UI channel closes once the event loop has gone
    assert!(app.translations_within(Duration::from_secs(5)).await.is_empty());
    timeout(Duration::from_secs(5), app.task)
        .await
        .expect("event loop did not stop")
        .unwrap()
        .unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_plain_line_still_answers_open_prompt() {
    let app = Harness::start(config(), BracketTranslator::new());

    app.line(":voice").await;
    app.expect(|e| matches!(e, UiEvent::Prompt(_))).await;
    app.line(":nonsense").await;
    app.expect(|e| matches!(e, UiEvent::Info(m) if m.contains("Unknown command"))).await;
    app.line("still here").await;

    let shown = app.translation().await;
    assert_eq!(shown.translated, "<still here>");
    assert_eq!(shown.source, TextSource::ManualVoice);
    app.stop().await;
}

#[tokio::test(start_paused = true)]
async fn test_picked_phrase_is_translated_on_conversation_log() {
    let app = Harness::start(config(), BracketTranslator::new());

    app.line(":phrases travel").await;
    app.expect(|e| matches!(e, UiEvent::Info(m) if m.contains("9. Where is the bathroom?")))
        .await;

    app.line(":phrase 999").await;
    app.expect(|e| matches!(e, UiEvent::Info(m) if m.starts_with("No phrase 999")))
        .await;

    app.line(":phrase 1").await;
    app.expect(|e| {
        matches!(e, UiEvent::RawTextInput { text, source: TextSource::Phrase } if text == "Hello")
    })
    .await;

    let shown = app.translation().await;
    assert_eq!(shown.translated, "<Hello>");
    assert_eq!(shown.source, TextSource::Phrase);

    app.stop().await;
}
