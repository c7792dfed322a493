//! Fact list rendering.

use std::collections::BTreeMap;

/// Render facts as `"<category> - <value>"` lines wrapped in newlines.
///
/// The result always starts and ends with `'\n'`; an empty map renders as
/// exactly `"\n\n"`. Replies splice this between fixed sentences, so the
/// wrapping newlines are part of the message layout.
pub fn format_facts(facts: &BTreeMap<String, String>) -> String {
    if facts.is_empty() {
        return "\n\n".to_string();
    }

    let lines: Vec<String> = facts
        .iter()
        .map(|(category, value)| format!("{category} - {value}"))
        .collect();
    format!("\n{}\n", lines.join("\n"))
}
