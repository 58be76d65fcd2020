//! Teloxide types -> core message models.

use teloxide::types::{Message, User};

use scb_core::{
    domain::{ChatId, Sender, StickerRef, UserId},
    messaging::types::{StickerMessage, TextMessage},
};

pub fn sender(user: &User) -> Sender {
    Sender {
        id: UserId(user.id.0 as i64),
        username: user.username.clone(),
        first_name: Some(user.first_name.clone()),
        last_name: user.last_name.clone(),
        is_bot: user.is_bot,
    }
}

/// `None` for messages without text or without a sender (channel posts).
pub fn text_message(msg: &Message) -> Option<TextMessage> {
    let user = msg.from()?;
    let text = msg.text()?;
    Some(TextMessage {
        chat_id: ChatId(msg.chat.id.0),
        sender: sender(user),
        text: text.to_string(),
    })
}

/// `None` only when the message carries no sticker; the sender may be missing.
pub fn sticker_message(msg: &Message) -> Option<StickerMessage> {
    let sticker = msg.sticker()?;
    Some(StickerMessage {
        chat_id: ChatId(msg.chat.id.0),
        sender: msg.from().map(sender),
        sticker: StickerRef::new(sticker.file.id.clone(), sticker.file.unique_id.clone()),
    })
}
