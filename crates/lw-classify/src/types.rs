use serde::{Deserialize, Serialize};

/// Broad shape of a pasted text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContextKind {
    Plain,
    Code,
    Markdown,
    List,
    Terminal,
}

/// Classification verdict plus the evidence behind it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextContext {
    pub kind: ContextKind,
    /// Accumulated score, clamped to [0, 1]. Zero when nothing matched.
    pub confidence: f64,
    /// Names of the patterns that fired.
    pub features: Vec<String>,
}

impl TextContext {
    pub fn plain() -> Self {
        Self { kind: ContextKind::Plain, confidence: 0.0, features: Vec::new() }
    }

    /// True when escaping is advisable before pasting into a shell.
    pub fn is_shell_like(&self) -> bool {
        self.kind == ContextKind::Terminal
    }
}

/// Classifier tuning.
#[derive(Debug, Clone)]
pub struct ClassifyConfig {
    pub shell_patterns: Vec<(String, String)>, // (feature name, regex)
    pub code_patterns: Vec<(String, String)>,
    pub markdown_patterns: Vec<(String, String)>,
    pub list_patterns: Vec<(String, String)>,
    /// Characters whose density nudges the terminal score.
    pub special_chars: Vec<char>,
    pub shell_weight: f64,
    pub structure_weight: f64,
    pub density_weight: f64,
    pub density_cap: f64,
    /// Chars examined from the head of the input.
    pub sample_window: usize,
    /// Scores below this fall back to plain.
    pub min_confidence: f64,
}
