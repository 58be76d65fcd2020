use std::sync::Arc;

use crate::{
    domain::ChatId,
    engine::TriggerEngine,
    messaging::{
        port::MessagingPort,
        types::{StickerMessage, TextMessage},
    },
    Result,
};

/// The two callbacks the messenger adapter drives.
///
/// Each call sends at most one message. Send errors are returned so the caller
/// can log them; nothing is retried.
pub struct ShotCookBot {
    engine: TriggerEngine,
    messenger: Arc<dyn MessagingPort>,
}

impl ShotCookBot {
    pub fn new(engine: TriggerEngine, messenger: Arc<dyn MessagingPort>) -> Self {
        Self { engine, messenger }
    }

    pub fn engine(&self) -> &TriggerEngine {
        &self.engine
    }

    pub async fn on_text(&self, msg: TextMessage) -> Result<bool> {
        let reply = self.engine.on_text(&msg);
        self.send(msg.chat_id, reply).await
    }

    pub async fn on_sticker(&self, msg: StickerMessage) -> Result<bool> {
        let reply = self.engine.on_sticker(&msg);
        self.send(msg.chat_id, reply).await
    }

    /// Returns whether a reply was sent.
    async fn send(&self, chat_id: ChatId, reply: Option<String>) -> Result<bool> {
        let Some(reply) = reply else {
            return Ok(false);
        };
        self.messenger.send_text(chat_id, &reply).await?;
        Ok(true)
    }
}
