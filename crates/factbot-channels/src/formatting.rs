//! Outbound text helpers shared by channels.

/// Split a message into chunks of at most `max_len` bytes.
///
/// Prefers to break at the last newline before the limit; falls back to a
/// hard cut on a char boundary. Blank pieces between newlines are dropped,
/// since Telegram rejects empty messages.
pub fn split_message(text: &str, max_len: usize) -> Vec<String> {
    if text.len() <= max_len {
        return vec![text.to_string()];
    }

    let mut chunks = Vec::new();
    let mut remaining = text;

    while !remaining.is_empty() {
        if remaining.len() <= max_len {
            if !remaining.trim().is_empty() {
                chunks.push(remaining.to_string());
            }
            break;
        }

        let mut limit = max_len;
        while limit > 0 && !remaining.is_char_boundary(limit) {
            limit -= 1;
        }
        if limit == 0 {
            // max_len is narrower than the first char; emit it whole.
            limit = remaining.chars().next().map_or(remaining.len(), char::len_utf8);
        }

        // Try to split at a newline near the limit
        let split_at = remaining[..limit].rfind('\n').unwrap_or(limit);
        let (chunk, rest) = remaining.split_at(split_at);
        if !chunk.trim().is_empty() {
            chunks.push(chunk.to_string());
        }

        // Skip the newline character if we split there
        remaining = rest.strip_prefix('\n').unwrap_or(rest);
    }

    chunks
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_message_short() {
        let chunks = split_message("short", 4096);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0], "short");
    }

    #[test]
    fn test_split_message_at_newline() {
        let text = format!("{}\n{}", "a".repeat(50), "b".repeat(50));
        let chunks = split_message(&text, 60);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0], "a".repeat(50));
        assert_eq!(chunks[1], "b".repeat(50));
    }

    #[test]
    fn test_split_message_no_newline() {
        let text = "a".repeat(100);
        let chunks = split_message(&text, 60);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].len(), 60);
        assert_eq!(chunks[1].len(), 40);
    }

    #[test]
    fn test_split_message_skips_blank_lines() {
        let chunks = split_message("aaaa\n\nbbbbbbbbbb", 5);
        assert_eq!(chunks, vec!["aaaa", "bbbbb", "bbbbb"]);
    }

    #[test]
    fn test_split_message_multibyte() {
        // "é" is two bytes; a 5-byte limit must not cut one in half.
        let text = "éééééé";
        let chunks = split_message(text, 5);
        assert!(chunks.iter().all(|c| c.len() <= 5));
        assert_eq!(chunks.concat(), text);
    }

    #[test]
    fn test_split_message_empty() {
        let chunks = split_message("", 4096);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0], "");
    }
}
