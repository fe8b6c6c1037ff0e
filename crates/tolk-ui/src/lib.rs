use std::io::Write;
use std::thread::JoinHandle;

pub mod bridge;
pub mod events;
pub mod state;

pub use bridge::{UiBridge, UiBridgeHandle};

use self::events::handle_events;
use self::state::UiState;

/// Blocking render loop; returns when the app sends `Close` or drops the bridge
pub fn ui_loop<W: Write>(handle: UiBridgeHandle, mut out: W) -> anyhow::Result<()> {
    let mut state = UiState::new();

    while let Ok(event) = handle.to_ui_rx.recv() {
        if !handle_events(event, &mut out, &mut state)? {
            break;
        }
    }

    tracing::info!("UI loop finished");
    Ok(())
}

/// Run the terminal UI on its own thread
pub fn spawn_ui_thread(handle: UiBridgeHandle) -> std::io::Result<JoinHandle<anyhow::Result<()>>> {
    std::thread::Builder::new()
        .name("tolk-ui".to_string())
        .spawn(move || ui_loop(handle, std::io::stdout()))
}
