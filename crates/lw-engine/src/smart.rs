//! Smart mode: structure-aware flattening with separator tokens.

use crate::protector::{SpanKind, SpanVault};
use lw_core::config::{CompressionLevel, ReformatConfig};
use lw_core::patterns::{classify_line, LineKind, RE_MD_LINK, RE_SPACE_RUN, RE_WHITESPACE_RUN};

/// Collapse whitespace runs according to the configured level.
pub fn compress_whitespace(text: &str, level: CompressionLevel) -> String {
    match level {
        CompressionLevel::None => text.to_string(),
        CompressionLevel::Light => RE_SPACE_RUN.replace_all(text, " ").into_owned(),
        CompressionLevel::Balanced => RE_WHITESPACE_RUN.replace_all(text, " ").into_owned(),
        CompressionLevel::Aggressive => {
            RE_WHITESPACE_RUN.replace_all(text, " ").trim().to_string()
        }
    }
}

/// Collapse whitespace inside markdown links and images so they survive
/// the line walk in one piece.
fn collapse_link_whitespace(text: &str) -> String {
    RE_MD_LINK
        .replace_all(text, |caps: &regex::Captures| {
            RE_WHITESPACE_RUN.replace_all(&caps[0], " ").into_owned()
        })
        .into_owned()
}

/// Flatten `text` onto one line, marking structure as it goes: paragraph
/// breaks and headings get the paragraph separator, list items and
/// blockquotes the list separator, horizontal rules both sides, table rows
/// go to the vault untouched. A blank-line run before a list item or
/// blockquote is folded into the list separator rather than producing a
/// paragraph separator of its own.
pub fn apply(text: &str, config: &ReformatConfig, vault: &mut SpanVault) -> String {
    let work = if config.detect_markdown {
        collapse_link_whitespace(text)
    } else {
        text.to_string()
    };

    let mut pieces: Vec<String> = Vec::new();
    let mut pending_break = false;

    for line in work.lines() {
        let mut kind = classify_line(line);
        if !config.detect_markdown {
            kind = match kind {
                LineKind::Heading
                | LineKind::HorizontalRule
                | LineKind::TableRow
                | LineKind::Blockquote => LineKind::Text,
                other => other,
            };
        }

        match kind {
            LineKind::Blank => pending_break = true,
            LineKind::Heading => {
                pieces.push(config.paragraph_separator.clone());
                pieces.push(line.trim().to_string());
                pending_break = false;
            }
            LineKind::HorizontalRule => {
                pieces.push(config.paragraph_separator.clone());
                pieces.push(line.trim().to_string());
                pieces.push(config.paragraph_separator.clone());
                pending_break = false;
            }
            LineKind::TableRow => {
                if pending_break {
                    pieces.push(config.paragraph_separator.clone());
                }
                pieces.push(vault.stash(line.trim(), SpanKind::Table));
                pending_break = false;
            }
            LineKind::Blockquote | LineKind::ListItem => {
                pieces.push(config.list_separator.clone());
                pieces.push(line.trim().to_string());
                pending_break = false;
            }
            LineKind::Text => {
                if pending_break {
                    pieces.push(config.paragraph_separator.clone());
                }
                pieces.push(line.to_string());
                pending_break = false;
            }
        }
    }

    let joined = pieces.join(" ");
    let compressed = compress_whitespace(&joined, config.compression_level);
    if config.trim_output {
        compressed.trim().to_string()
    } else {
        compressed
    }
}
