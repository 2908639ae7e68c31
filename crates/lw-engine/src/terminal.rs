//! Terminal mode: shell-safe single-line output.

use crate::simple;
use lw_core::config::{EscapeTable, NewlinePolicy, ReformatConfig};

/// Escape every character from `set` using the dialect table in one pass.
/// Characters the table has no rule for take the dialect prefix. The pass
/// never rescans what it emits, so escaping is not applied twice.
pub fn escape_chars(text: &str, table: &EscapeTable, set: &[char]) -> String {
    let mut out = String::with_capacity(text.len() + text.len() / 4);
    for c in text.chars() {
        if set.contains(&c) {
            match table.lookup(c) {
                Some(escaped) => out.push_str(escaped),
                None => {
                    out.push(table.prefix);
                    out.push(c);
                }
            }
        } else {
            out.push(c);
        }
    }
    out
}

/// Escape shell-sensitive characters, then deal with line breaks. Escaping
/// runs first so the newline token's own characters are left alone.
pub fn apply(text: &str, config: &ReformatConfig) -> String {
    let table = config.escape_table();
    let escaped = escape_chars(text, &table, &config.escape_patterns);

    match config.newline_policy {
        NewlinePolicy::SpaceJoin => simple::apply(&escaped),
        NewlinePolicy::EscapeToken => {
            let normalized = escaped.replace("\r\n", "\n").replace('\r', "\n");
            let tokened = normalized.replace('\n', &table.newline_token);
            if config.trim_output {
                tokened.trim().to_string()
            } else {
                tokened
            }
        }
    }
}
