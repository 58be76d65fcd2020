/// Telegram user id (numeric).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct UserId(pub i64);

/// Telegram chat id (numeric).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ChatId(pub i64);

/// Telegram message id (numeric).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MessageId(pub i32);

/// A stable reference to a sent message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MessageRef {
    pub chat_id: ChatId,
    pub message_id: MessageId,
}

/// The two identifiers Telegram exposes for a sticker file.
///
/// `file_id` can change between bots and over time; `file_unique_id` is stable
/// but cannot be used to send the file.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct StickerRef {
    pub file_id: String,
    pub file_unique_id: String,
}

impl StickerRef {
    pub fn new(file_id: impl Into<String>, file_unique_id: impl Into<String>) -> Self {
        Self {
            file_id: file_id.into(),
            file_unique_id: file_unique_id.into(),
        }
    }
}

/// Name used when a user has neither a handle nor a usable name.
pub const FALLBACK_DISPLAY_NAME: &str = "Someone";

/// Identity of whoever sent an incoming message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sender {
    pub id: UserId,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub is_bot: bool,
}

impl Sender {
    pub fn new(id: i64) -> Self {
        Self {
            id: UserId(id),
            username: None,
            first_name: None,
            last_name: None,
            is_bot: false,
        }
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn with_name(mut self, first: impl Into<String>, last: Option<&str>) -> Self {
        self.first_name = Some(first.into());
        self.last_name = last.map(str::to_string);
        self
    }

    /// `@handle` when the user has one, else "first last", else [`FALLBACK_DISPLAY_NAME`].
    pub fn display_name(&self) -> String {
        if let Some(username) = self.username.as_deref().filter(|u| !u.is_empty()) {
            return format!("@{username}");
        }

        let name = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        if name.is_empty() {
            FALLBACK_DISPLAY_NAME.to_string()
        } else {
            name
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_prefers_handle() {
        let s = Sender::new(1)
            .with_username("chef")
            .with_name("Gordon", Some("Ramsay"));
        assert_eq!(s.display_name(), "@chef");
    }

    #[test]
    fn display_name_joins_first_and_last() {
        let s = Sender::new(1).with_name(" Gordon ", Some("Ramsay"));
        assert_eq!(s.display_name(), "Gordon Ramsay");

        let s = Sender::new(1).with_name("Gordon", None);
        assert_eq!(s.display_name(), "Gordon");
    }

    #[test]
    fn display_name_falls_back() {
        assert_eq!(Sender::new(1).display_name(), "Someone");
        assert_eq!(
            Sender::new(1).with_name("  ", Some("")).display_name(),
            "Someone"
        );
    }
}
