use std::{
    collections::{HashMap, VecDeque},
    sync::{Mutex, PoisonError},
};

use crate::domain::{ChatId, UserId};

pub const DEFAULT_HISTORY_LIMIT: usize = 50;

/// One remembered typist: who they are and how to address them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypistEntry {
    pub user_id: UserId,
    pub name: String,
}

impl TypistEntry {
    pub fn new(user_id: UserId, name: impl Into<String>) -> Self {
        Self {
            user_id,
            name: name.into(),
        }
    }
}

/// Outcome of picking a shooting target.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TargetLookup {
    /// Nobody has typed in this chat yet.
    NoHistory,
    /// Only the shooter has typed.
    NoOtherTypist,
    Found(TypistEntry),
}

/// Per-chat bounded history of recent distinct typists, most recent last.
///
/// Consecutive messages from the same user collapse into one entry, so the
/// history never holds two adjacent entries with the same user id.
#[derive(Debug)]
pub struct TypistLedger {
    limit: usize,
    chats: Mutex<HashMap<ChatId, VecDeque<TypistEntry>>>,
}

impl Default for TypistLedger {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LIMIT)
    }
}

impl TypistLedger {
    /// A `limit` of zero is treated as one.
    pub fn new(limit: usize) -> Self {
        Self {
            limit: limit.max(1),
            chats: Mutex::new(HashMap::new()),
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Append `entry` unless the chat's last entry already belongs to the same
    /// user. Returns whether the history grew.
    pub fn record(&self, chat_id: ChatId, entry: TypistEntry) -> bool {
        let mut chats = self.chats.lock().unwrap_or_else(PoisonError::into_inner);
        let history = chats.entry(chat_id).or_default();

        if history.back().map(|last| last.user_id) == Some(entry.user_id) {
            return false;
        }

        history.push_back(entry);
        while history.len() > self.limit {
            history.pop_front();
        }
        true
    }

    /// The latest typist other than `exclude`, if any.
    pub fn most_recent_other(&self, chat_id: ChatId, exclude: UserId) -> Option<TypistEntry> {
        match self.find_target(chat_id, exclude) {
            TargetLookup::Found(entry) => Some(entry),
            TargetLookup::NoHistory | TargetLookup::NoOtherTypist => None,
        }
    }

    /// Scan from the most recent entry backwards for someone other than
    /// `shooter`, telling an empty chat apart from one where only the shooter
    /// has typed.
    pub fn find_target(&self, chat_id: ChatId, shooter: UserId) -> TargetLookup {
        let chats = self.chats.lock().unwrap_or_else(PoisonError::into_inner);
        let Some(history) = chats.get(&chat_id).filter(|h| !h.is_empty()) else {
            return TargetLookup::NoHistory;
        };

        match history.iter().rev().find(|e| e.user_id != shooter) {
            Some(entry) => TargetLookup::Found(entry.clone()),
            None => TargetLookup::NoOtherTypist,
        }
    }

    pub fn history(&self, chat_id: ChatId) -> Vec<TypistEntry> {
        let chats = self.chats.lock().unwrap_or_else(PoisonError::into_inner);
        chats
            .get(&chat_id)
            .map(|h| h.iter().cloned().collect())
            .unwrap_or_default()
    }
}
