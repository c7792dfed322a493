//! Interactive REPL — talk to the bot from the terminal.
//!
//! Uses `rustyline` for readline-style editing with persistent history.
//! Each input line goes straight to the dialogue engine under the session
//! `cli:<user>`; no channel or bus delivery is involved.

use std::sync::Arc;

use anyhow::Result;
use colored::Colorize;
use rustyline::config::Configurer;
use rustyline::history::DefaultHistory;
use rustyline::{DefaultEditor, Editor};
use tracing::debug;

use factbot_core::SessionStore;
use factbot_dialogue::{DialogueEngine, DialogueLoop};

use crate::helpers;

/// Local user id when `--user` is not given.
pub const DEFAULT_USER: &str = "local";

/// Exit commands (case-insensitive match).
const EXIT_COMMANDS: &[&str] = &["exit", "quit", "/exit", "/quit", ":q"];

/// Run the interactive REPL loop.
pub fn run(user: &str) -> Result<()> {
    let engine = DialogueEngine::new();
    let bot_name = engine.bot_name().to_string();
    let dialogue = DialogueLoop::direct(Arc::new(SessionStore::new()), engine);
    let session_key = session_key(user);

    helpers::print_banner();
    println!(
        "{}",
        "Type /start to begin, or \"exit\" to quit.".dimmed()
    );
    println!();

    let mut editor = create_editor()?;

    loop {
        let input = match editor.readline("You: ") {
            Ok(line) => line,
            Err(rustyline::error::ReadlineError::Interrupted) => {
                // Ctrl-C — exit cleanly
                break;
            }
            Err(rustyline::error::ReadlineError::Eof) => {
                // Ctrl-D — exit cleanly
                break;
            }
            Err(e) => {
                eprintln!("Input error: {e}");
                break;
            }
        };

        let text = match parse_line(&input) {
            Line::Skip => continue,
            Line::Exit => {
                println!("\nGoodbye!");
                break;
            }
            Line::Say(text) => text,
        };

        let _ = editor.add_history_entry(&input);

        debug!(session_key = %session_key, "processing input");
        for reply in dialogue.process_direct(&session_key, text) {
            helpers::print_reply(&bot_name, &reply);
        }
    }

    save_history(&mut editor);

    Ok(())
}

/// What one line typed at the prompt asks for.
#[derive(Debug, PartialEq, Eq)]
enum Line<'a> {
    /// Nothing typed.
    Skip,
    Exit,
    /// Sent to the bot exactly as typed.
    Say(&'a str),
}

fn parse_line(input: &str) -> Line<'_> {
    if input.is_empty() {
        Line::Skip
    } else if is_exit_command(input.trim()) {
        Line::Exit
    } else {
        Line::Say(input)
    }
}

/// Session key for a local user, namespaced like channel senders.
fn session_key(user: &str) -> String {
    format!("cli:{user}")
}

/// Create a rustyline editor with history.
fn create_editor() -> Result<Editor<(), DefaultHistory>> {
    let mut editor = DefaultEditor::new()?;
    editor.set_max_history_size(1000)?;

    let history_path = history_path();
    if history_path.exists() {
        let _ = editor.load_history(&history_path);
        debug!("loaded REPL history from {}", history_path.display());
    }

    Ok(editor)
}

/// Save history to disk.
fn save_history(editor: &mut Editor<(), DefaultHistory>) {
    let path = history_path();
    if let Some(parent) = path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    if let Err(e) = editor.save_history(&path) {
        debug!("failed to save history: {e}");
    }
}

/// Path to the history file.
fn history_path() -> std::path::PathBuf {
    factbot_core::utils::get_data_path()
        .join("history")
        .join("cli_history")
}

/// Check if input is an exit command.
fn is_exit_command(input: &str) -> bool {
    let lower = input.to_lowercase();
    EXIT_COMMANDS.contains(&lower.as_str())
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_commands() {
        assert!(is_exit_command("exit"));
        assert!(is_exit_command("EXIT"));
        assert!(is_exit_command("/quit"));
        assert!(is_exit_command(":q"));
        assert!(!is_exit_command("Done"));
        assert!(!is_exit_command("/start"));
        assert!(!is_exit_command(""));
    }

    #[test]
    fn history_path_under_data_dir() {
        let path = history_path();
        assert!(path.to_string_lossy().contains(".factbot"));
        assert!(path.to_string_lossy().contains("cli_history"));
    }

    #[test]
    fn lines_reach_the_bot_as_typed() {
        assert_eq!(parse_line(""), Line::Skip);
        assert_eq!(parse_line("exit"), Line::Exit);
        assert_eq!(parse_line("  quit "), Line::Exit);
        // Labels are exact-match, so trailing spaces must survive.
        assert_eq!(parse_line("Done "), Line::Say("Done "));
        assert_eq!(parse_line("   "), Line::Say("   "));
    }

    #[test]
    fn session_key_is_namespaced() {
        assert_eq!(session_key("local"), "cli:local");
        assert_eq!(session_key("alice"), "cli:alice");
    }
}
