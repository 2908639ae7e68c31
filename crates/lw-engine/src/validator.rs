//! Advisory output validation. Issues here never block a result.

use lw_classify::TextContext;
use lw_core::config::{EscapeTable, ReformatConfig, WrapQuote};
use lw_core::types::ValidationIssue;

/// Count characters from `set` that are not escaped: not behind the
/// dialect prefix and not in a doubled-quote form the table defines.
pub fn count_unescaped(text: &str, table: &EscapeTable, set: &[char]) -> usize {
    let chars: Vec<char> = text.chars().collect();
    let mut count = 0;
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        if c == table.prefix {
            i += 2;
            continue;
        }
        if set.contains(&c) {
            let doubled = format!("{c}{c}");
            if table.lookup(c) == Some(doubled.as_str()) && chars.get(i + 1) == Some(&c) {
                i += 2;
                continue;
            }
            count += 1;
        }
        i += 1;
    }
    count
}

/// Peel the configured wrapper off the output, if present.
fn unwrapped<'a>(output: &'a str, config: &ReformatConfig) -> &'a str {
    if config.here_string {
        return output
            .strip_prefix("@\"\n")
            .and_then(|s| s.strip_suffix("\n\"@"))
            .unwrap_or(output);
    }
    let quote = match config.wrap_quote {
        WrapQuote::None => return output,
        WrapQuote::Double => '"',
        WrapQuote::Single => '\'',
        WrapQuote::Backtick => '`',
    };
    output
        .strip_prefix(quote)
        .and_then(|s| s.strip_suffix(quote))
        .unwrap_or(output)
}

/// Check the finished output against the config, reading shell intent
/// off the detected context. Usable on its own for live previews.
pub fn validate(output: &str, config: &ReformatConfig, context: &TextContext) -> Vec<ValidationIssue> {
    validate_with(output, config, context.is_shell_like())
}

/// Check with an explicit verdict on whether the output should arrive
/// fully escaped. The pipeline decides that from the mode as well.
pub fn validate_with(output: &str, config: &ReformatConfig, escape_expected: bool) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    if output.is_empty() {
        issues.push(ValidationIssue::warning("output is empty"));
        return issues;
    }

    let len = output.chars().count();
    if len > config.max_line_length {
        issues.push(
            ValidationIssue::warning(format!(
                "output is {len} characters, over the {} limit",
                config.max_line_length
            ))
            .with_suggestion("raise max_line_length or enable truncate_at_max"),
        );
    }

    let body = unwrapped(output, config);
    if !config.here_string && body.contains('\n') {
        issues.push(ValidationIssue::warning("output still contains line breaks"));
    }

    if escape_expected {
        let table = config.escape_table();
        let unescaped = count_unescaped(body, &table, &config.escape_patterns);
        if unescaped > 0 {
            issues.push(
                ValidationIssue::warning(format!(
                    "{unescaped} shell-sensitive characters are not escaped"
                ))
                .with_suggestion("protected spans keep their original text"),
            );
        }
    }

    issues
}
