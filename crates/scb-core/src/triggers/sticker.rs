use std::collections::HashSet;

use crate::domain::StickerRef;

/// Built-in ids of the gun sticker.
pub const SHOOT_STICKER_FILE_IDS: &[&str] =
    &["CAACAgUAAxkBAAMCaLrKaM8M05mcNbW1hwzrRHWRyDIAAoACAALZkE0HXDbU1x9tb6o2BA"];
pub const SHOOT_STICKER_UNIQUE_IDS: &[&str] = &["AgADgAIAAtmQTQc"];

/// A sticker identity. Matching either identifier is enough.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StickerSet {
    pub file_ids: HashSet<String>,
    pub unique_ids: HashSet<String>,
}

impl StickerSet {
    pub fn new<I, J, S, T>(file_ids: I, unique_ids: J) -> Self
    where
        I: IntoIterator<Item = S>,
        J: IntoIterator<Item = T>,
        S: Into<String>,
        T: Into<String>,
    {
        Self {
            file_ids: file_ids.into_iter().map(Into::into).collect(),
            unique_ids: unique_ids.into_iter().map(Into::into).collect(),
        }
    }

    pub fn shooting_default() -> Self {
        Self::new(
            SHOOT_STICKER_FILE_IDS.iter().copied(),
            SHOOT_STICKER_UNIQUE_IDS.iter().copied(),
        )
    }

    pub fn is_empty(&self) -> bool {
        self.file_ids.is_empty() && self.unique_ids.is_empty()
    }

    pub fn matches(&self, sticker: &StickerRef) -> bool {
        self.file_ids.contains(&sticker.file_id) || self.unique_ids.contains(&sticker.file_unique_id)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StickerAction {
    FixedReply(String),
    /// Shoot the most recent typist other than the sender.
    ShootMostRecentOther,
}

#[derive(Clone, Debug)]
pub struct StickerRule {
    pub name: String,
    pub set: StickerSet,
    pub action: StickerAction,
}

impl StickerRule {
    pub fn new(name: impl Into<String>, set: StickerSet, action: StickerAction) -> Self {
        Self {
            name: name.into(),
            set,
            action,
        }
    }
}

/// Ordered sticker rules. The first matching rule wins.
#[derive(Clone, Debug, Default)]
pub struct StickerRules {
    rules: Vec<StickerRule>,
}

impl StickerRules {
    pub fn new(rules: Vec<StickerRule>) -> Self {
        Self { rules }
    }

    /// Rebuke rule first, then the shooting rule.
    pub fn standard(rebuke: StickerSet, rebuke_text: impl Into<String>, shoot: StickerSet) -> Self {
        Self::new(vec![
            StickerRule::new(
                "rebuke",
                rebuke,
                StickerAction::FixedReply(rebuke_text.into()),
            ),
            StickerRule::new("shoot", shoot, StickerAction::ShootMostRecentOther),
        ])
    }

    pub fn push(&mut self, rule: StickerRule) {
        self.rules.push(rule);
    }

    pub fn rules(&self) -> &[StickerRule] {
        &self.rules
    }

    pub fn first_match(&self, sticker: &StickerRef) -> Option<&StickerRule> {
        self.rules.iter().find(|r| r.set.matches(sticker))
    }
}
