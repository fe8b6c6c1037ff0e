use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tokio::signal;
use tolk_config::SpeechMode;
use tolk_core::state::AppState;
use tolk_translator::{GoogleTranslator, Retrying, Translator};
use tolk_types::UiEvent;
use tolk_ui::UiBridge;
use tracing_subscriber::EnvFilter;

pub mod controller;
pub mod events;
pub mod io;
pub mod profile;
pub mod prompt;
pub mod session;

#[cfg(test)]
mod tests;

use self::controller::AppController;

#[derive(Debug, Parser)]
#[command(name = "tolk", version, about = "Translate typed or spoken text in the terminal")]
pub struct Args {
    /// JSON config file, defaults to ./tolk.json when present
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Source language code, or `auto`
    #[arg(long)]
    pub from: Option<String>,

    /// Target language code
    #[arg(long)]
    pub to: Option<String>,

    /// Translate as you type instead of per line
    #[arg(long)]
    pub live: bool,

    /// off, manual or recorder
    #[arg(long)]
    pub speech: Option<SpeechMode>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let args = Args::parse();
    let mut config = profile::load_config(args.config.as_deref())?;
    profile::apply_args(&mut config, &args);

    let translator: Arc<dyn Translator> = Arc::new(Retrying::from_config(
        GoogleTranslator::new(&config.translator).context("Failed to build HTTP client")?,
        &config.translator,
    ));

    let state = Arc::new(AppState::new(config));

    let (bridge, ui_handle) = UiBridge::new();
    let ui_thread = tolk_ui::spawn_ui_thread(ui_handle)?;

    let controller = AppController::new(Arc::clone(&state));
    controller.spawn_stdin_reader()?;
    let mut tasks = controller.spawn_tasks(translator, bridge.sender());

    tokio::select! {
        _ = signal::ctrl_c() => {
            tracing::info!("Shutdown requested");
        }
        Some(result) = tasks.join_next() => {
            match result {
                Ok(Ok(())) => tracing::info!("event loop finished"),
                Ok(Err(e)) => tracing::error!("event loop exited: {e:#}"),
                Err(e) => tracing::error!("event loop panicked: {e}"),
            }
        }
    }

    controller.shutdown();
    tasks.shutdown().await;

    bridge.send(UiEvent::Close).await;
    match ui_thread.join() {
        Ok(Ok(())) => {}
        Ok(Err(e)) => tracing::error!("UI thread failed: {e:#}"),
        Err(_) => tracing::error!("UI thread panicked"),
    }

    Ok(())
}

/// Logs go to stderr so they never mix into the translation output
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(atty::is(atty::Stream::Stderr));

    if std::env::var_os("TOLK_LOG_JSON").is_some() {
        builder.json().init();
    } else {
        builder.init();
    }
}
