//! Configuration schema.
//!
//! Hierarchy: `Config` → `ChannelsConfig` → `TelegramConfig`, plus `BusConfig`.
//!
//! JSON on disk uses **camelCase** keys; Rust uses snake_case.

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────
// Root Config
// ─────────────────────────────────────────────

/// Root configuration — loaded from `~/.factbot/config.json` + env vars.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    pub channels: ChannelsConfig,
    pub bus: BusConfig,
}

// ─────────────────────────────────────────────
// Channels
// ─────────────────────────────────────────────

/// All channel configurations.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChannelsConfig {
    #[serde(default)]
    pub telegram: TelegramConfig,
}

/// Telegram channel config.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TelegramConfig {
    /// Bot token from @BotFather. Empty = channel disabled.
    #[serde(default)]
    pub token: String,
    /// User IDs or usernames allowed to talk to the bot. Empty = everyone.
    #[serde(default)]
    pub allowed_users: Vec<String>,
}

impl TelegramConfig {
    /// Whether a bot token is configured.
    pub fn is_configured(&self) -> bool {
        !self.token.trim().is_empty()
    }
}

// ─────────────────────────────────────────────
// Bus
// ─────────────────────────────────────────────

/// Message bus sizing.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BusConfig {
    /// Buffered messages per direction.
    pub capacity: usize,
}

impl Default for BusConfig {
    fn default() -> Self {
        Self { capacity: 100 }
    }
}
