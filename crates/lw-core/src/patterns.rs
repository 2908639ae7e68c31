//! Pattern library — precompiled recognizers for structural text features.

use regex::Regex;
use std::sync::LazyLock;

/// ATX heading: one to six leading '#' followed by text.
pub static RE_HEADING: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^#{1,6}\s+\S").unwrap());
/// Horizontal rule: three or more -, * or _ with optional spacing.
pub static RE_HORIZONTAL_RULE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*([-*_]\s*){3,}$").unwrap());
/// Pipe-delimited table row. A bare `||` is not a row.
pub static RE_TABLE_ROW: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\|.+\|$").unwrap());
/// Blockquote line.
pub static RE_BLOCKQUOTE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*>\s+").unwrap());
/// Fenced code block. An unterminated fence runs to end of input.
pub static RE_FENCED_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```.*?(?:```|\z)").unwrap());
/// Inline code span on a single line.
pub static RE_INLINE_CODE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`[^`\n]+`").unwrap());
/// Absolute http(s) URL, up to the first whitespace.
pub static RE_URL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"https?://\S+").unwrap());
/// Markdown link or image whose label may span lines.
pub static RE_MD_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(!?)\[([^\]]*)\]\(([^)]+)\)").unwrap());

/// Any run of line-break characters.
pub static RE_LINE_BREAKS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[\r\n]+").unwrap());
/// Any run of whitespace, newlines included.
pub static RE_WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());
/// Runs of spaces and tabs only.
pub static RE_SPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[ \t]+").unwrap());
/// Paragraph break: a blank line, stray spaces allowed.
pub static RE_PARAGRAPH_BREAK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n\s*\n").unwrap());

/// List-marker patterns in match order: numbered, bulleted, lettered.
pub static LIST_MARKERS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"^\s*\d+[.)\u{ff09}]\s+").unwrap(),
        Regex::new(r"^\s*[-*+\u{2022}]\s+").unwrap(),
        Regex::new(r"^\s*[A-Za-z][.)]\s+").unwrap(),
    ]
});

/// Characters that carry meaning when pasted at a shell prompt.
pub const SHELL_SENSITIVE: &[char] = &[
    '"', '\'', '`', '$', '|', '>', '<', '&', '(', ')', '{', '}', '[', ']', '#', ';',
];

/// Structural classification of a single line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Heading,
    HorizontalRule,
    TableRow,
    Blockquote,
    ListItem,
    Blank,
    Text,
}

/// Classify one line. Overlapping triggers resolve in a fixed order:
/// heading, rule, table row, blockquote, list item.
pub fn classify_line(line: &str) -> LineKind {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return LineKind::Blank;
    }
    if RE_HEADING.is_match(line) {
        return LineKind::Heading;
    }
    if RE_HORIZONTAL_RULE.is_match(line) {
        return LineKind::HorizontalRule;
    }
    if RE_TABLE_ROW.is_match(trimmed) {
        return LineKind::TableRow;
    }
    if RE_BLOCKQUOTE.is_match(line) {
        return LineKind::Blockquote;
    }
    if is_list_item(line) {
        return LineKind::ListItem;
    }
    LineKind::Text
}

/// True if the line starts with any known list marker.
pub fn is_list_item(line: &str) -> bool {
    LIST_MARKERS.iter().any(|re| re.is_match(line))
}

/// Count shell-sensitive characters, escaped or not.
pub fn count_shell_sensitive(text: &str) -> usize {
    text.chars().filter(|c| SHELL_SENSITIVE.contains(c)).count()
}
