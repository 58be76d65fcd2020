use std::sync::Arc;

use teloxide::prelude::*;

use crate::convert::text_message;
use crate::router::AppState;

pub async fn handle_text(msg: Message, state: Arc<AppState>) -> ResponseResult<()> {
    let Some(event) = text_message(&msg) else {
        tracing::debug!(chat_id = msg.chat.id.0, "text message without sender, skipped");
        return Ok(());
    };

    let chat_id = event.chat_id.0;
    if let Err(e) = state.bot.on_text(event).await {
        tracing::warn!(chat_id, error = %e, "failed to send text reply");
    }
    Ok(())
}
