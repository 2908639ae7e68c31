//! Surface statistics for display alongside a result.

use crate::patterns::RE_PARAGRAPH_BREAK;
use serde::{Deserialize, Serialize};

/// Character, word, line and paragraph counts for a piece of text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextStats {
    pub characters: usize,
    pub characters_no_space: usize,
    pub words: usize,
    pub lines: usize,
    pub paragraphs: usize,
}

impl TextStats {
    /// Compute stats. Paragraphs are blank-line-delimited.
    pub fn of(text: &str) -> Self {
        if text.is_empty() {
            return Self::default();
        }
        Self {
            characters: text.chars().count(),
            characters_no_space: text.chars().filter(|c| !c.is_whitespace()).count(),
            words: text.split_whitespace().count(),
            lines: text.lines().count(),
            paragraphs: RE_PARAGRAPH_BREAK
                .split(text)
                .filter(|p| !p.trim().is_empty())
                .count(),
        }
    }
}
