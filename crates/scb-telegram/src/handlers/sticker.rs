use std::sync::Arc;

use teloxide::prelude::*;

use crate::convert::sticker_message;
use crate::router::AppState;

pub async fn handle_sticker(msg: Message, state: Arc<AppState>) -> ResponseResult<()> {
    let Some(event) = sticker_message(&msg) else {
        tracing::debug!(chat_id = msg.chat.id.0, "not a sticker, skipped");
        return Ok(());
    };

    let chat_id = event.chat_id.0;
    if let Err(e) = state.bot.on_sticker(event).await {
        tracing::warn!(chat_id, error = %e, "failed to send sticker reply");
    }
    Ok(())
}
