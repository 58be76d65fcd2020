use crate::domain::{ChatId, Sender, StickerRef};

#[derive(Clone, Debug)]
pub struct TextMessage {
    pub chat_id: ChatId,
    pub sender: Sender,
    pub text: String,
}

/// `sender` is `None` for anonymous admins and channel posts; the sticker is
/// still logged but never answered.
#[derive(Clone, Debug)]
pub struct StickerMessage {
    pub chat_id: ChatId,
    pub sender: Option<Sender>,
    pub sticker: StickerRef,
}
