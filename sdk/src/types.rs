//! Message and option types exchanged with a memory service

use serde::{Deserialize, Serialize};
use std::fmt;

/// One entry of an interaction recorded as memory
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MemoryMessage {
    /// Role of the message sender
    pub role: MessageRole,

    /// Content of the message
    pub content: String,
}

impl MemoryMessage {
    /// Create a new user message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    /// Create a new assistant message
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }
}

/// Role of a message sender
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// User message
    User,

    /// Assistant message
    Assistant,
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageRole::User => write!(f, "user"),
            MessageRole::Assistant => write!(f, "assistant"),
        }
    }
}

/// Options for a memory search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOptions {
    /// Subject identifier the search is scoped to
    pub user_id: String,

    /// Maximum number of matches to return
    pub limit: usize,
}

impl SearchOptions {
    pub fn new(user_id: impl Into<String>, limit: usize) -> Self {
        Self {
            user_id: user_id.into(),
            limit,
        }
    }
}

/// Options for recording a memory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddOptions {
    /// Subject identifier the new memory belongs to
    pub user_id: String,
}

impl AddOptions {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
        }
    }
}

/// Result set of a memory search.
///
/// The match record shape belongs to the memory service, so the raw JSON is
/// kept. Servers answer either with a bare array or with an object holding a
/// `results` array; [`SearchResults::hits`] hides the difference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SearchResults(pub serde_json::Value);

impl SearchResults {
    /// Individual match records
    pub fn hits(&self) -> &[serde_json::Value] {
        match &self.0 {
            serde_json::Value::Array(items) => items,
            serde_json::Value::Object(map) => match map.get("results") {
                Some(serde_json::Value::Array(items)) => items,
                _ => &[],
            },
            _ => &[],
        }
    }

    /// Text of each match, taken from its `memory` field when present
    pub fn memory_texts(&self) -> Vec<String> {
        self.hits()
            .iter()
            .map(|hit| match hit.get("memory").and_then(|m| m.as_str()) {
                Some(text) => text.to_string(),
                None => hit.to_string(),
            })
            .collect()
    }
}

impl fmt::Display for SearchResults {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
