//! Custom mode: the full user-steered transform chain.

use crate::protector::SpanVault;
use crate::{smart, terminal};
use lw_classify::TextContext;
use lw_core::config::{EscapeMode, ReformatConfig, WrapQuote};
use lw_core::error::LwError;
use lw_core::types::ValidationIssue;
use regex::Regex;

fn strip_indentation(text: &str) -> String {
    text.lines().map(|l| l.trim_start()).collect::<Vec<_>>().join("\n")
}

fn wrap_output(text: &str, config: &ReformatConfig) -> String {
    if config.here_string {
        return format!("@\"\n{text}\n\"@");
    }
    match config.wrap_quote {
        WrapQuote::None => text.to_string(),
        WrapQuote::Double => format!("\"{text}\""),
        WrapQuote::Single => format!("'{text}'"),
        WrapQuote::Backtick => format!("`{text}`"),
    }
}

/// Run the custom chain in its fixed order: indentation, tabs, structure
/// walk, escaping, user replacements, restore, trim, truncate, wrap.
/// Escaping precedes restore so protected spans come back untouched.
pub fn apply(
    text: &str,
    config: &ReformatConfig,
    context: &TextContext,
    vault: &mut SpanVault,
) -> (String, Vec<ValidationIssue>) {
    let mut issues = Vec::new();

    let mut work = text.to_string();
    if !config.preserve_indentation {
        work = strip_indentation(&work);
    }
    if config.tabs_to_spaces {
        work = work.replace('\t', "    ");
    }

    let mut out = smart::apply(&work, config, vault);

    let escape_on = match config.escape_special_chars {
        EscapeMode::On => true,
        EscapeMode::Auto => context.is_shell_like(),
        EscapeMode::Off => false,
    };
    if escape_on {
        out = terminal::escape_chars(&out, &config.escape_table(), &config.escape_patterns);
    }

    for rule in &config.replacements {
        match Regex::new(&rule.pattern) {
            Ok(re) => out = re.replace_all(&out, rule.replacement.as_str()).into_owned(),
            Err(_) => issues.push(
                ValidationIssue::warning(
                    LwError::InvalidPattern { pattern: rule.pattern.clone() }.to_string(),
                )
                .with_suggestion("fix or drop the replacement rule"),
            ),
        }
    }

    out = vault.restore(&out);

    if config.trim_output {
        out = out.trim().to_string();
    }
    if config.truncate_at_max && out.chars().count() > config.max_line_length {
        out = out.chars().take(config.max_line_length).collect();
        issues.push(ValidationIssue::info(format!(
            "output truncated to {} characters",
            config.max_line_length
        )));
    }
    out = wrap_output(&out, config);

    (out, issues)
}
