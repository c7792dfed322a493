//! Core types for Factbot — per-user dialogue state and reply affordances.
//!
//! A [`Session`] is the whole of what the bot remembers about one user:
//! where they are in the conversation and the facts they have shared.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

// ─────────────────────────────────────────────
// Dialogue state
// ─────────────────────────────────────────────

/// Where a user currently is in the conversation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DialogueState {
    /// Idle: waiting for the user to pick a category from the menu.
    #[default]
    Choosing,
    /// A category is selected; the next free text is its value.
    AwaitingValue,
    /// The user asked for a custom category; the next free text is its name.
    AwaitingCategoryName,
}

impl DialogueState {
    /// Short lowercase name, used in log fields.
    pub fn as_str(&self) -> &'static str {
        match self {
            DialogueState::Choosing => "choosing",
            DialogueState::AwaitingValue => "awaiting_value",
            DialogueState::AwaitingCategoryName => "awaiting_category_name",
        }
    }
}

impl std::fmt::Display for DialogueState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─────────────────────────────────────────────
// Session
// ─────────────────────────────────────────────

/// Mutable conversation state for a single user.
///
/// `facts` is a `BTreeMap` so every listing of known categories comes out
/// in the same (sorted) order.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Session {
    /// Session key, e.g. `"telegram:123456"`.
    pub key: String,
    pub state: DialogueState,
    /// category → value, both lowercase and trimmed.
    pub facts: BTreeMap<String, String>,
    /// Category being filled in. Set only while `state == AwaitingValue`.
    pub pending_category: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Session {
    /// Create a fresh session in the `Choosing` state with no facts.
    pub fn new(key: impl Into<String>) -> Self {
        let now = Utc::now();
        Session {
            key: key.into(),
            state: DialogueState::Choosing,
            facts: BTreeMap::new(),
            pending_category: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Stored value for `category`, treating an empty value as unknown.
    pub fn known_value(&self, category: &str) -> Option<&str> {
        self.facts
            .get(category)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    /// Known category names in listing order.
    pub fn categories(&self) -> Vec<&str> {
        self.facts.keys().map(String::as_str).collect()
    }

    /// Bump `updated_at` after a transition.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

// ─────────────────────────────────────────────
// Reply markup
// ─────────────────────────────────────────────

/// UI affordance attached to an outbound message.
///
/// Channels render `Menu` as quick-reply buttons where the surface supports
/// them (Telegram: a one-time reply keyboard) and ignore it otherwise.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "rows", rename_all = "snake_case")]
pub enum ReplyMarkup {
    /// Leave whatever the user currently sees untouched.
    #[default]
    None,
    /// Show quick replies, grouped in rows.
    Menu(Vec<Vec<String>>),
    /// Remove previously shown quick replies.
    RemoveMenu,
}

impl ReplyMarkup {
    /// All menu labels in display order. Empty for non-menu variants.
    pub fn labels(&self) -> Vec<&str> {
        match self {
            ReplyMarkup::Menu(rows) => rows.iter().flatten().map(String::as_str).collect(),
            _ => Vec::new(),
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, ReplyMarkup::None)
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
