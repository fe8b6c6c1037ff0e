//! Speech input collaborators.
//!
//! None of these recognize audio themselves. They either ask the user to type what was
//! said, hand off to the OS voice recorder first, or defer to an external recognizer when
//! one is installed. Callers only see [`SpeechInputSource`].

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use tolk_config::SpeechMode;
use tolk_config::speech::SpeechConfig;
use tolk_types::TextSource;

#[derive(Debug, thiserror::Error)]
pub enum SpeechError {
    #[error("Speech input unavailable: {0}")]
    Unavailable(String),

    #[error("Speech recognition failed: {0}")]
    Recognition(String),

    #[error("Could not open voice recorder: {0}")]
    Launch(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeechSourceKind {
    Unavailable,
    ManualTextPrompt,
    VoiceRecorderHandoff,
    ThirdPartyRecognizer,
}

/// Asks the user for a line of text
#[async_trait]
pub trait TextPrompt: Send + Sync {
    /// `None` when the user cancels
    async fn ask(&self, message: &str) -> Option<String>;
}

/// External speech-to-text engine
#[async_trait]
pub trait Recognizer: Send + Sync {
    fn name(&self) -> &str;

    async fn recognize(&self, language: &str) -> Result<String, SpeechError>;
}

#[async_trait]
pub trait SpeechInputSource: Send + Sync {
    fn kind(&self) -> SpeechSourceKind;

    fn is_available(&self) -> bool {
        true
    }

    /// How text from this source is labelled
    fn text_source(&self) -> TextSource {
        TextSource::ManualVoice
    }

    /// One utterance. `Ok(None)` means nothing was said or the user cancelled.
    async fn listen(&self, language: &str) -> Result<Option<String>, SpeechError>;
}

fn non_blank(text: Option<String>) -> Option<String> {
    text.map(|t| t.trim().to_string()).filter(|t| !t.is_empty())
}

pub struct Unavailable;

#[async_trait]
impl SpeechInputSource for Unavailable {
    fn kind(&self) -> SpeechSourceKind {
        SpeechSourceKind::Unavailable
    }

    fn is_available(&self) -> bool {
        false
    }

    async fn listen(&self, _language: &str) -> Result<Option<String>, SpeechError> {
        Err(SpeechError::Unavailable("speech input is turned off".to_string()))
    }
}

pub struct ManualTextPrompt {
    prompt: Arc<dyn TextPrompt>,
}

impl ManualTextPrompt {
    pub const MESSAGE: &'static str = "Speak, then type what you said:";

    pub fn new(prompt: Arc<dyn TextPrompt>) -> Self {
        Self { prompt }
    }
}

#[async_trait]
impl SpeechInputSource for ManualTextPrompt {
    fn kind(&self) -> SpeechSourceKind {
        SpeechSourceKind::ManualTextPrompt
    }

    async fn listen(&self, _language: &str) -> Result<Option<String>, SpeechError> {
        Ok(non_blank(self.prompt.ask(Self::MESSAGE).await))
    }
}

/// Program plus arguments that opens a recorder
#[derive(Debug, Clone)]
pub struct Launcher {
    pub program: String,
    pub args: Vec<String>,
}

impl Launcher {
    pub fn new(program: impl Into<String>, args: &[&str]) -> Self {
        Self {
            program: program.into(),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }
}

/// Opens the OS voice recorder, then asks for the transcription
pub struct VoiceRecorderHandoff {
    prompt: Arc<dyn TextPrompt>,
    launchers: Vec<Launcher>,
    delay: Duration,
}

impl VoiceRecorderHandoff {
    pub const MESSAGE: &'static str = "Record your voice, listen to it, then type what you said:";

    pub fn new(prompt: Arc<dyn TextPrompt>, delay: Duration) -> Self {
        Self::with_launchers(prompt, Self::default_launchers(), delay)
    }

    pub fn with_launchers(
        prompt: Arc<dyn TextPrompt>,
        launchers: Vec<Launcher>,
        delay: Duration,
    ) -> Self {
        Self {
            prompt,
            launchers,
            delay,
        }
    }

    pub fn default_launchers() -> Vec<Launcher> {
        if cfg!(windows) {
            vec![
                Launcher::new("explorer.exe", &["ms-voicerecorder:"]),
                Launcher::new("SoundRecorder.exe", &[]),
            ]
        } else if cfg!(target_os = "macos") {
            vec![Launcher::new("open", &["-a", "Voice Memos"])]
        } else {
            vec![Launcher::new("gnome-sound-recorder", &[])]
        }
    }

    /// Start the first launcher that works, returning its program name
    pub fn launch(&self) -> Result<String, SpeechError> {
        let mut last_error = String::from("no launcher configured");

        for launcher in &self.launchers {
            match tokio::process::Command::new(&launcher.program)
                .args(&launcher.args)
                .spawn()
            {
                Ok(_child) => {
                    tracing::info!("Opened voice recorder via {}", launcher.program);
                    return Ok(launcher.program.clone());
                }
                Err(e) => {
                    tracing::debug!("Launcher {} failed: {e}", launcher.program);
                    last_error = format!("{}: {e}", launcher.program);
                }
            }
        }

        Err(SpeechError::Launch(last_error))
    }
}

#[async_trait]
impl SpeechInputSource for VoiceRecorderHandoff {
    fn kind(&self) -> SpeechSourceKind {
        SpeechSourceKind::VoiceRecorderHandoff
    }

    fn text_source(&self) -> TextSource {
        TextSource::Recorder
    }

    async fn listen(&self, _language: &str) -> Result<Option<String>, SpeechError> {
        match self.launch() {
            Ok(_) => tokio::time::sleep(self.delay).await,
            Err(e) => tracing::warn!("{e}, falling back to typed input"),
        }

        Ok(non_blank(self.prompt.ask(Self::MESSAGE).await))
    }
}

/// Defers to an external recognizer when one is installed
pub struct ThirdPartyRecognizer {
    recognizer: Option<Arc<dyn Recognizer>>,
}

impl ThirdPartyRecognizer {
    pub fn new(recognizer: Option<Arc<dyn Recognizer>>) -> Self {
        Self { recognizer }
    }
}

#[async_trait]
impl SpeechInputSource for ThirdPartyRecognizer {
    fn kind(&self) -> SpeechSourceKind {
        SpeechSourceKind::ThirdPartyRecognizer
    }

    fn is_available(&self) -> bool {
        self.recognizer.is_some()
    }

    fn text_source(&self) -> TextSource {
        TextSource::AutoVoice
    }

    async fn listen(&self, language: &str) -> Result<Option<String>, SpeechError> {
        let recognizer = self.recognizer.as_ref().ok_or_else(|| {
            SpeechError::Unavailable("no speech-to-text engine installed".to_string())
        })?;

        tracing::debug!("Listening with {} ({language})", recognizer.name());
        let text = recognizer.recognize(language).await?;
        Ok(non_blank(Some(text)))
    }
}

/// Pick a source by capability: an installed recognizer wins, then the configured mode
pub fn select_source(
    config: &SpeechConfig,
    prompt: Arc<dyn TextPrompt>,
    recognizer: Option<Arc<dyn Recognizer>>,
) -> Arc<dyn SpeechInputSource> {
    if let Some(recognizer) = recognizer {
        return Arc::new(ThirdPartyRecognizer::new(Some(recognizer)));
    }

    match config.mode {
        SpeechMode::Off => Arc::new(Unavailable),
        SpeechMode::Manual => Arc::new(ManualTextPrompt::new(prompt)),
        SpeechMode::Recorder => {
            Arc::new(VoiceRecorderHandoff::new(prompt, config.recorder_delay()))
        }
    }
}

/// Listen repeatedly, pausing `interval` before each utterance, until cancelled.
///
/// Stops with an error when the source becomes unavailable or fails.
pub async fn listen_continuously<F>(
    source: Arc<dyn SpeechInputSource>,
    language: String,
    interval: Duration,
    cancel: CancellationToken,
    mut on_text: F,
) -> Result<(), SpeechError>
where
    F: FnMut(String) + Send,
{
    loop {
        tokio::select! {
            _ = cancel.cancelled() => return Ok(()),
            _ = tokio::time::sleep(interval) => {}
        }

        let heard = tokio::select! {
            _ = cancel.cancelled() => return Ok(()),
            heard = source.listen(&language) => heard?,
        };

        if let Some(text) = heard {
            on_text(text);
        }
    }
}
