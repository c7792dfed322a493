//! `factbot status` — show configuration status.

use std::path::Path;

use anyhow::Result;
use colored::Colorize;

use factbot_core::config::{get_config_path, load_config, Config};

/// Run the status command.
pub fn run(config_path: Option<&Path>) -> Result<()> {
    let path = config_path
        .map(Path::to_path_buf)
        .unwrap_or_else(get_config_path);
    let config = load_config(Some(path.as_path()));

    println!();
    println!("{}", "Factbot Status".cyan().bold());
    println!();

    println!(
        "  {:<18} {} {}",
        "Config:".bold(),
        path.display(),
        if path.exists() {
            "✓".green().to_string()
        } else {
            "(not found)".red().to_string()
        }
    );

    println!("  {:<18} {}", "Telegram:".bold(), telegram_status(&config));
    println!(
        "  {:<18} {}",
        "Telegram build:".bold(),
        if cfg!(feature = "telegram") {
            "✓ enabled".green().to_string()
        } else {
            "· rebuild with --features telegram".dimmed().to_string()
        }
    );
    println!(
        "  {:<18} {} messages per direction",
        "Bus:".bold(),
        config.bus.capacity
    );

    println!();

    Ok(())
}

/// One-line summary of the Telegram channel config.
fn telegram_status(config: &Config) -> String {
    let tg = &config.channels.telegram;
    if !tg.is_configured() {
        return "· token not set".to_string();
    }
    if tg.allowed_users.is_empty() {
        "token set, open to everyone".to_string()
    } else {
        format!("token set, {} allowed user(s)", tg.allowed_users.len())
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
