//! `factbot onboard` — initialize configuration.
//!
//! Creates the config file with defaults and the data directories the REPL
//! uses. Existing files are left alone.

use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;

use factbot_core::config::{get_config_path, save_config, Config};
use factbot_core::utils::get_data_path;

/// Run the onboard command.
pub fn run(config_path: Option<&Path>) -> Result<()> {
    println!();
    println!("{}", "Factbot — Setup".cyan().bold());
    println!();

    let path = config_path
        .map(Path::to_path_buf)
        .unwrap_or_else(get_config_path);

    if write_default_config(&path)? {
        println!("  {} created config at {}", "✓".green(), path.display());
    } else {
        println!(
            "  {} config already exists at {}",
            "✓".green(),
            path.display()
        );
    }

    let history_dir = get_data_path().join("history");
    std::fs::create_dir_all(&history_dir)
        .with_context(|| format!("failed to create {}", history_dir.display()))?;

    println!();
    println!(
        "{}",
        "  Setup complete! Add your Telegram bot token to the config, then run `factbot gateway`."
            .green()
    );
    println!("{}", "  Or try it locally with `factbot chat`.".dimmed());
    println!();

    Ok(())
}

/// Write a default config to `path` unless one exists. Returns whether it
/// wrote.
fn write_default_config(path: &Path) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    save_config(&Config::default(), Some(path))
        .with_context(|| format!("failed to write config to {}", path.display()))?;
    Ok(true)
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
