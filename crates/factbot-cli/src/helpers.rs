//! Shared CLI helpers — path expansion, reply printing, version banner.

use std::path::PathBuf;

use colored::Colorize;

use factbot_core::ReplyMarkup;
use factbot_dialogue::Reply;

/// Expand `~` at the start of a path to the user's home directory.
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs_next::home_dir() {
            return home.join(rest);
        }
    }
    if path == "~" {
        if let Some(home) = dirs_next::home_dir() {
            return home;
        }
    }
    PathBuf::from(path)
}

/// Print one bot reply, with its menu rendered as bracketed options.
pub fn print_reply(bot_name: &str, reply: &Reply) {
    println!();
    println!("{}", bot_name.cyan().bold());
    println!("{}", reply.text);
    if let Some(menu) = format_menu(&reply.markup) {
        println!("{}", menu.dimmed());
    }
    println!();
}

/// Render menu rows as `[Age] [Favourite colour]` lines.
fn format_menu(markup: &ReplyMarkup) -> Option<String> {
    match markup {
        ReplyMarkup::Menu(rows) => Some(
            rows.iter()
                .map(|row| {
                    row.iter()
                        .map(|label| format!("[{label}]"))
                        .collect::<Vec<_>>()
                        .join(" ")
                })
                .collect::<Vec<_>>()
                .join("\n"),
        ),
        ReplyMarkup::None | ReplyMarkup::RemoveMenu => None,
    }
}

/// Print the banner shown at startup.
pub fn print_banner() {
    let version = env!("CARGO_PKG_VERSION");
    println!();
    println!("{}  v{}", "Factbot".cyan().bold(), version.dimmed());
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
