//! Matchers that turn an incoming message into a reply.

pub mod keyword;
pub mod mention;
pub mod sticker;

pub use keyword::KeywordTrigger;
pub use mention::MentionTally;
pub use sticker::{StickerAction, StickerRule, StickerRules, StickerSet};
