//! Telegram update handlers.
//!
//! Each handler converts the teloxide message into a core model, hands it to
//! the bot and logs (then drops) any failure.

use std::sync::Arc;

use teloxide::{prelude::*, types::Message};

use crate::router::AppState;

mod sticker;
mod text;

pub async fn handle_message(msg: Message, state: Arc<AppState>) -> ResponseResult<()> {
    if msg.sticker().is_some() {
        return sticker::handle_sticker(msg, state).await;
    }

    if msg.text().is_some() {
        return text::handle_text(msg, state).await;
    }

    Ok(())
}
