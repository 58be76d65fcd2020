use std::{
    collections::HashMap,
    sync::{Mutex, PoisonError},
};

use regex::Regex;

use crate::{domain::ChatId, Error, Result};

/// Counts `@handle` mentions that appear together with a keyword.
///
/// Counts live for the process lifetime and are keyed per chat by the
/// lowercased handle. There is no cap or decay.
#[derive(Debug)]
pub struct MentionTally {
    keyword: Regex,
    mention: Regex,
    counts: Mutex<HashMap<ChatId, HashMap<String, u64>>>,
}

impl MentionTally {
    pub fn new(keyword: &str) -> Result<Self> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return Err(Error::Config("tally keyword must not be empty".to_string()));
        }
        let keyword = Regex::new(&format!(r"(?i)\b{}\b", regex::escape(keyword)))
            .map_err(|e| Error::Config(format!("invalid tally keyword: {e}")))?;
        // Telegram handles: 5-32 of [A-Za-z0-9_], not glued to a preceding word.
        let mention = Regex::new(r"(?:^|[^A-Za-z0-9_@])@([A-Za-z0-9_]{5,32})\b")
            .map_err(|e| Error::Config(format!("invalid mention pattern: {e}")))?;

        Ok(Self {
            keyword,
            mention,
            counts: Mutex::new(HashMap::new()),
        })
    }

    /// Distinct handles mentioned in `text`, in order of first appearance.
    pub fn mentions(&self, text: &str) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        for cap in self.mention.captures_iter(text) {
            let handle = &cap[1];
            if !out.iter().any(|h| h.eq_ignore_ascii_case(handle)) {
                out.push(handle.to_string());
            }
        }
        out
    }

    /// Increment every mentioned handle when the keyword is present.
    ///
    /// Returns `(handle, new_total)` pairs; empty when nothing was counted.
    pub fn observe(&self, chat_id: ChatId, text: &str) -> Vec<(String, u64)> {
        if !self.keyword.is_match(text) {
            return Vec::new();
        }
        let handles = self.mentions(text);
        if handles.is_empty() {
            return Vec::new();
        }

        let mut counts = self.counts.lock().unwrap_or_else(PoisonError::into_inner);
        let chat = counts.entry(chat_id).or_default();
        handles
            .into_iter()
            .map(|handle| {
                let n = chat.entry(handle.to_lowercase()).or_insert(0);
                *n = n.saturating_add(1);
                (format!("@{handle}"), *n)
            })
            .collect()
    }

    pub fn count(&self, chat_id: ChatId, handle: &str) -> u64 {
        let key = handle.trim_start_matches('@').to_lowercase();
        let counts = self.counts.lock().unwrap_or_else(PoisonError::into_inner);
        counts
            .get(&chat_id)
            .and_then(|c| c.get(&key))
            .copied()
            .unwrap_or(0)
    }
}
