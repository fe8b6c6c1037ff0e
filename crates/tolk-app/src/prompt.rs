use async_trait::async_trait;
use kanal::AsyncSender;
use tokio::sync::oneshot;
use tolk_core::speech::TextPrompt;

use crate::events::AppEvent;

/// Asks through the event loop: the next input line answers the prompt
pub struct ChannelPrompt {
    app_tx: AsyncSender<AppEvent>,
}

impl ChannelPrompt {
    pub fn new(app_tx: AsyncSender<AppEvent>) -> Self {
        Self { app_tx }
    }
}

#[async_trait]
impl TextPrompt for ChannelPrompt {
    async fn ask(&self, message: &str) -> Option<String> {
        let (reply, answer) = oneshot::channel();
        self.app_tx
            .send(AppEvent::Prompt {
                message: message.to_string(),
                reply,
            })
            .await
            .ok()?;

        answer.await.ok().flatten()
    }
}
