//! Simple mode: line breaks become spaces, whitespace runs collapse.

use lw_core::patterns::{RE_LINE_BREAKS, RE_WHITESPACE_RUN};

/// Collapse the text onto one line. Total and idempotent: running the
/// output through again changes nothing.
pub fn apply(text: &str) -> String {
    let joined = RE_LINE_BREAKS.replace_all(text, " ");
    RE_WHITESPACE_RUN.replace_all(&joined, " ").trim().to_string()
}
