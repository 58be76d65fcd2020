use regex::Regex;

use crate::{picker::ReplyPicker, replies::COOK_RESPONSES, Error, Result};

/// Case-insensitive whole-word pattern answered with a random canned reply.
#[derive(Clone, Debug)]
pub struct KeywordTrigger {
    pattern: Regex,
    responses: Vec<String>,
}

impl KeywordTrigger {
    /// `words` are matched as whole words, case-insensitively.
    pub fn new(words: &[&str], responses: Vec<String>) -> Result<Self> {
        if responses.is_empty() {
            return Err(Error::Config(
                "keyword trigger needs at least one response".to_string(),
            ));
        }
        let alternation = words
            .iter()
            .map(|w| regex::escape(w))
            .collect::<Vec<_>>()
            .join("|");
        let pattern = Regex::new(&format!(r"(?i)\b(?:{alternation})\b"))
            .map_err(|e| Error::Config(format!("invalid keyword pattern: {e}")))?;
        Ok(Self { pattern, responses })
    }

    /// The "cook" verb family with the kitchen jokes.
    pub fn cooking() -> Result<Self> {
        let responses = COOK_RESPONSES.iter().map(|s| s.to_string()).collect();
        Self::new(&["cook", "cooked", "cooks", "cooking"], responses)
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }

    pub fn respond(&self, text: &str, picker: &dyn ReplyPicker) -> Option<&str> {
        if !self.is_match(text) {
            return None;
        }
        let idx = picker.pick(self.responses.len()).min(self.responses.len() - 1);
        Some(self.responses[idx].as_str())
    }
}
