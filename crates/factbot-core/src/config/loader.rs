//! Config loader — reads `~/.factbot/config.json` and merges env vars.
//!
//! # Loading precedence
//! 1. Defaults (from `Config::default()`)
//! 2. JSON file at `~/.factbot/config.json`
//! 3. Environment variables (override JSON)

use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::schema::Config;

/// Conventional token variable, honoured alongside the namespaced one.
pub const TELEGRAM_TOKEN_ENV: &str = "TELEGRAM_BOT_TOKEN";

/// Default config file path.
pub fn get_config_path() -> PathBuf {
    crate::utils::get_data_path().join("config.json")
}

/// Load configuration from `path` (or the default path) + env vars.
///
/// Falls back to `Config::default()` if the file doesn't exist or can't be parsed.
pub fn load_config(path: Option<&Path>) -> Config {
    let config_path = path.map(PathBuf::from).unwrap_or_else(get_config_path);

    apply_env_overrides(load_config_from_path(&config_path))
}

/// Load config from a specific file path, without env overrides.
fn load_config_from_path(path: &Path) -> Config {
    if !path.exists() {
        info!("No config file found at {}, using defaults", path.display());
        return Config::default();
    }

    debug!("Loading config from {}", path.display());

    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            warn!("Failed to read config file {}: {}", path.display(), e);
            return Config::default();
        }
    };

    match serde_json::from_str(&content) {
        Ok(config) => config,
        Err(e) => {
            warn!("Failed to parse config {}: {}", path.display(), e);
            Config::default()
        }
    }
}

/// Save configuration to disk (pretty-printed JSON with camelCase keys).
pub fn save_config(config: &Config, path: Option<&Path>) -> std::io::Result<()> {
    let config_path = path.map(PathBuf::from).unwrap_or_else(get_config_path);

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(config).map_err(std::io::Error::other)?;

    std::fs::write(&config_path, json)?;
    debug!("Config saved to {}", config_path.display());
    Ok(())
}

/// Apply environment variable overrides on top of a loaded config.
///
/// Supported overrides:
/// - `FACTBOT_CHANNELS__TELEGRAM__TOKEN` → `channels.telegram.token`
/// - `TELEGRAM_BOT_TOKEN` → `channels.telegram.token` (lower precedence)
/// - `FACTBOT_CHANNELS__TELEGRAM__ALLOWED_USERS` → comma-separated allow-list
/// - `FACTBOT_BUS__CAPACITY` → `bus.capacity`
fn apply_env_overrides(mut config: Config) -> Config {
    if let Some(token) = non_empty_env(TELEGRAM_TOKEN_ENV) {
        config.channels.telegram.token = token;
    }
    if let Some(token) = non_empty_env("FACTBOT_CHANNELS__TELEGRAM__TOKEN") {
        config.channels.telegram.token = token;
    }
    if let Some(users) = non_empty_env("FACTBOT_CHANNELS__TELEGRAM__ALLOWED_USERS") {
        config.channels.telegram.allowed_users = users
            .split(',')
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .map(String::from)
            .collect();
    }
    if let Some(val) = non_empty_env("FACTBOT_BUS__CAPACITY") {
        match val.parse::<usize>() {
            Ok(n) => config.bus.capacity = n,
            Err(e) => warn!(value = %val, error = %e, "ignoring invalid FACTBOT_BUS__CAPACITY"),
        }
    }

    config
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
