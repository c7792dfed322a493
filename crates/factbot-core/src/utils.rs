//! Utility helpers — path resolution and string manipulation.

use std::path::PathBuf;

/// Get the Factbot data directory (e.g. `~/.factbot/`).
pub fn get_data_path() -> PathBuf {
    let home = home_dir().unwrap_or_else(|| PathBuf::from("."));
    home.join(".factbot")
}

/// Truncate a string to `max_len` characters, adding "..." if truncated.
/// Unicode-safe.
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", truncated)
    }
}

/// Lowercase and trim user input for storage as a category or value.
pub fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

fn home_dir() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(PathBuf::from)
        .or_else(|| std::env::var("USERPROFILE").ok().map(PathBuf::from))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_string() {
        assert_eq!(truncate_string("hello", 10), "hello");
    }

    #[test]
    fn test_truncate_long_string() {
        let result = truncate_string("hello world, this is a long string", 15);
        assert_eq!(result, "hello world,...");
    }

    #[test]
    fn test_truncate_unicode() {
        let result = truncate_string("こんにちは世界です", 5);
        assert_eq!(result, "こん...");
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("  Golang "), "golang");
        assert_eq!(normalize("Most Impressive Skill"), "most impressive skill");
        assert_eq!(normalize("\t\n"), "");
    }

    #[test]
    fn test_data_path_ends_with_factbot() {
        assert!(get_data_path().ends_with(".factbot"));
    }
}
