use crate::{
    config::Config,
    domain::ChatId,
    ledger::{TargetLookup, TypistEntry, TypistLedger},
    messaging::types::{StickerMessage, TextMessage},
    picker::{ReplyPicker, SeededPicker, ThreadRngPicker},
    replies,
    triggers::{KeywordTrigger, MentionTally, StickerAction, StickerRules},
    Result,
};

/// Decides the reply (if any) for each incoming message.
///
/// Owns all per-chat state; one engine per process, shared by reference.
pub struct TriggerEngine {
    ledger: TypistLedger,
    keyword: KeywordTrigger,
    stickers: StickerRules,
    tally: Option<MentionTally>,
    picker: Box<dyn ReplyPicker>,
}

impl TriggerEngine {
    pub fn new(
        ledger: TypistLedger,
        keyword: KeywordTrigger,
        stickers: StickerRules,
        picker: Box<dyn ReplyPicker>,
    ) -> Self {
        Self {
            ledger,
            keyword,
            stickers,
            tally: None,
            picker,
        }
    }

    pub fn with_tally(mut self, tally: MentionTally) -> Self {
        self.tally = Some(tally);
        self
    }

    pub fn from_config(cfg: &Config) -> Result<Self> {
        let picker: Box<dyn ReplyPicker> = match cfg.reply_seed {
            Some(seed) => Box::new(SeededPicker::new(seed)),
            None => Box::new(ThreadRngPicker),
        };
        let stickers = StickerRules::standard(
            cfg.rebuke_stickers.clone(),
            cfg.rebuke_text.clone(),
            cfg.shoot_stickers.clone(),
        );

        let engine = Self::new(
            TypistLedger::new(cfg.typist_history_limit),
            KeywordTrigger::cooking()?,
            stickers,
            picker,
        );
        match cfg.tally_keyword.as_deref() {
            Some(keyword) => Ok(engine.with_tally(MentionTally::new(keyword)?)),
            None => Ok(engine),
        }
    }

    pub fn ledger(&self) -> &TypistLedger {
        &self.ledger
    }

    pub fn tally(&self) -> Option<&MentionTally> {
        self.tally.as_ref()
    }

    /// Record the typist, then answer a keyword or a mention tally.
    pub fn on_text(&self, msg: &TextMessage) -> Option<String> {
        if msg.sender.is_bot {
            return None;
        }

        let entry = TypistEntry::new(msg.sender.id, msg.sender.display_name());
        if self.ledger.record(msg.chat_id, entry) {
            tracing::debug!(chat_id = msg.chat_id.0, user_id = msg.sender.id.0, "typist recorded");
        }

        if let Some(reply) = self.keyword.respond(&msg.text, self.picker.as_ref()) {
            return Some(reply.to_string());
        }

        self.tally_reply(msg.chat_id, &msg.text)
    }

    /// Every sticker is logged, so operators can read ids off the log for config.
    pub fn on_sticker(&self, msg: &StickerMessage) -> Option<String> {
        tracing::info!(
            chat_id = msg.chat_id.0,
            file_id = %msg.sticker.file_id,
            file_unique_id = %msg.sticker.file_unique_id,
            "sticker seen"
        );

        let Some(sender) = msg.sender.as_ref() else {
            tracing::debug!(chat_id = msg.chat_id.0, "sticker without sender, no reply");
            return None;
        };

        let rule = self.stickers.first_match(&msg.sticker)?;
        tracing::info!(chat_id = msg.chat_id.0, rule = %rule.name, "sticker rule matched");

        let reply = match &rule.action {
            StickerAction::FixedReply(text) => text.clone(),
            StickerAction::ShootMostRecentOther => {
                let shooter = sender.display_name();
                match self.ledger.find_target(msg.chat_id, sender.id) {
                    TargetLookup::NoHistory => replies::NO_TARGETS_YET.to_string(),
                    TargetLookup::NoOtherTypist => replies::nobody_else_to_shoot(&shooter),
                    TargetLookup::Found(target) => replies::shot(&shooter, &target.name),
                }
            }
        };
        Some(reply)
    }

    fn tally_reply(&self, chat_id: ChatId, text: &str) -> Option<String> {
        let totals = self.tally.as_ref()?.observe(chat_id, text);
        if totals.is_empty() {
            return None;
        }
        Some(
            totals
                .iter()
                .map(|(handle, total)| replies::tally_line(handle, *total))
                .collect::<Vec<_>>()
                .join("\n"),
        )
    }
}
