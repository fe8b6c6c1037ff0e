use kanal::{AsyncSender, Receiver};
use tolk_types::UiEvent;

/// Bridge between the async app and the blocking UI thread
pub struct UiBridge {
    to_ui_tx: AsyncSender<UiEvent>,
}

pub struct UiBridgeHandle {
    pub to_ui_rx: Receiver<UiEvent>,
}

impl UiBridge {
    pub fn new() -> (Self, UiBridgeHandle) {
        let (to_ui_tx, to_ui_rx) = kanal::bounded(128);

        (
            UiBridge {
                to_ui_tx: to_ui_tx.to_async(),
            },
            UiBridgeHandle { to_ui_rx },
        )
    }

    pub fn sender(&self) -> AsyncSender<UiEvent> {
        self.to_ui_tx.clone()
    }

    /// False once the UI thread has gone away
    pub async fn send(&self, event: UiEvent) -> bool {
        self.to_ui_tx.send(event).await.is_ok()
    }
}
