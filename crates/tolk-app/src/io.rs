use std::io::BufRead;

use kanal::Sender;
use tokio_util::sync::CancellationToken;

use crate::events::AppEvent;

/// Forward each input line to the event loop until end of input or shutdown
pub fn read_stdin<R: BufRead>(input: R, tx: Sender<AppEvent>, cancel: CancellationToken) {
    tracing::info!("Reading input lines");

    for line in input.lines() {
        if cancel.is_cancelled() {
            return;
        }

        match line {
            Ok(line) => {
                if tx.send(AppEvent::Line(line)).is_err() {
                    tracing::debug!("Event loop gone, input reader stopping");
                    return;
                }
            }
            Err(e) => {
                tracing::error!("Failed to read input: {e}");
                break;
            }
        }
    }

    if !cancel.is_cancelled() {
        if let Err(e) = tx.send(AppEvent::InputClosed) {
            tracing::debug!("App gone before end of input was reported: {e}");
        }
    }
    tracing::info!("Input reader stopping");
}
