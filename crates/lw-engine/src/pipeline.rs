//! Reformatting pipeline — classify, protect, transform, validate.

use crate::protector::{protect, SpanVault};
use crate::{custom, simple, smart, terminal, validator};
use chrono::{DateTime, Utc};
use lw_classify::TextContext;
use lw_core::config::{EscapeMode, ReformatConfig};
use lw_core::error::LwError;
use lw_core::stats::TextStats;
use lw_core::types::{Severity, ValidationIssue};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};
use tracing::debug;

/// Reformatting mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Line breaks become spaces, nothing else.
    Simple,
    /// Structure-aware with separator tokens.
    Smart,
    /// Shell-safe escaping and joining.
    Terminal,
    /// The full configurable chain.
    Custom,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Simple => "simple",
            Mode::Smart => "smart",
            Mode::Terminal => "terminal",
            Mode::Custom => "custom",
        }
    }

    pub fn all() -> [Mode; 4] {
        [Mode::Simple, Mode::Smart, Mode::Terminal, Mode::Custom]
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of one reformatting run with its statistics. Failures surface
/// as error-severity issues, never as a missing result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReformatResult {
    pub output: String,
    pub mode: Mode,
    /// Input length in characters.
    pub original_len: usize,
    /// Output length in characters.
    pub output_len: usize,
    /// Percent shrink. Negative when escaping grows the text.
    pub compression_pct: f64,
    pub context: TextContext,
    pub input_stats: TextStats,
    pub output_stats: TextStats,
    pub issues: Vec<ValidationIssue>,
    pub protected_spans: usize,
    pub created_at: DateTime<Utc>,
}

impl ReformatResult {
    /// True when no error-severity issue was recorded.
    pub fn is_acceptable(&self) -> bool {
        !self.issues.iter().any(|i| i.severity == Severity::Error)
    }

    pub fn ratio(&self) -> f64 {
        if self.original_len == 0 {
            return 1.0;
        }
        self.output_len as f64 / self.original_len as f64
    }

    pub(crate) fn build(
        original: &str,
        output: String,
        mode: Mode,
        context: TextContext,
        issues: Vec<ValidationIssue>,
        protected_spans: usize,
    ) -> Self {
        let original_len = original.chars().count();
        let output_len = output.chars().count();
        let compression_pct = if original_len > 0 {
            (original_len as f64 - output_len as f64) / original_len as f64 * 100.0
        } else {
            0.0
        };
        Self {
            input_stats: TextStats::of(original),
            output_stats: TextStats::of(&output),
            output,
            mode,
            original_len,
            output_len,
            compression_pct,
            context,
            issues,
            protected_spans,
            created_at: Utc::now(),
        }
    }

    pub(crate) fn rejected(
        original: &str,
        mode: Mode,
        context: TextContext,
        issues: Vec<ValidationIssue>,
    ) -> Self {
        Self::build(original, String::new(), mode, context, issues, 0)
    }
}

/// Reject obviously unusable input. Returned as an issue, not an error.
pub(crate) fn input_check(text: &str, config: &ReformatConfig) -> Option<ValidationIssue> {
    if text.trim().is_empty() {
        return Some(
            ValidationIssue::error(LwError::EmptyInput.to_string())
                .with_suggestion("paste some text first"),
        );
    }
    let len = text.chars().count();
    if len > config.max_input_len {
        return Some(
            ValidationIssue::error(
                LwError::InputTooLarge { len, cap: config.max_input_len }.to_string(),
            )
            .with_suggestion("split the input or raise max_input_len"),
        );
    }
    None
}

/// Warn when the mode will escape but the escape set is empty. `sanitize`
/// is mode-agnostic and only covers the custom-mode flag.
pub(crate) fn escape_set_check(mode: Mode, config: &ReformatConfig) -> Option<ValidationIssue> {
    if mode == Mode::Terminal && config.escape_patterns.is_empty() {
        return Some(
            ValidationIssue::warning("escaping is enabled but no characters are configured")
                .with_suggestion("set escape_patterns"),
        );
    }
    None
}

pub(crate) fn escape_expected(mode: Mode, config: &ReformatConfig, context: &TextContext) -> bool {
    match mode {
        Mode::Terminal => true,
        Mode::Custom => match config.escape_special_chars {
            EscapeMode::On => true,
            EscapeMode::Auto => context.is_shell_like(),
            EscapeMode::Off => false,
        },
        Mode::Simple | Mode::Smart => false,
    }
}

fn panic_message(payload: Box<dyn std::any::Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

fn run_strategy(
    mode: Mode,
    text: &str,
    config: &ReformatConfig,
    context: &TextContext,
    vault: &mut SpanVault,
) -> (String, Vec<ValidationIssue>) {
    match mode {
        Mode::Simple => (simple::apply(text), Vec::new()),
        Mode::Smart => (smart::apply(text, config, vault), Vec::new()),
        Mode::Terminal => (terminal::apply(text, config), Vec::new()),
        Mode::Custom => custom::apply(text, config, context, vault),
    }
}

/// The synchronous reformatter.
pub struct Reformatter {
    pub mode: Mode,
}

impl Reformatter {
    pub fn new(mode: Mode) -> Self {
        Self { mode }
    }

    pub fn simple() -> Self {
        Self::new(Mode::Simple)
    }
    pub fn smart() -> Self {
        Self::new(Mode::Smart)
    }
    pub fn terminal() -> Self {
        Self::new(Mode::Terminal)
    }
    pub fn custom() -> Self {
        Self::new(Mode::Custom)
    }

    /// Reformat `text`. Total: bad input, bad config and strategy panics
    /// all come back inside the result.
    pub fn process(&self, text: &str, config: &ReformatConfig) -> ReformatResult {
        let mut config = config.clone();
        let mut issues = config.sanitize();
        issues.extend(escape_set_check(self.mode, &config));

        let context = lw_classify::classify(text);

        if let Some(issue) = input_check(text, &config) {
            issues.push(issue);
            return ReformatResult::rejected(text, self.mode, context, issues);
        }

        // Simple and terminal modes transform every character uniformly;
        // only the structure-aware modes need spans stashed away.
        let (work, mut vault) = match self.mode {
            Mode::Smart | Mode::Custom => protect(text, &config),
            Mode::Simple | Mode::Terminal => (text.to_string(), SpanVault::new(text)),
        };

        let outcome = catch_unwind(AssertUnwindSafe(|| {
            run_strategy(self.mode, &work, &config, &context, &mut vault)
        }));
        let (raw, strategy_issues) = match outcome {
            Ok(pair) => pair,
            Err(payload) => {
                let message = panic_message(payload);
                debug!(mode = %self.mode, message, "strategy panicked");
                issues.push(ValidationIssue::error(format!("transform failed: {message}")));
                // A failed transform hands back the input unchanged.
                return ReformatResult::build(
                    text,
                    text.to_string(),
                    self.mode,
                    context,
                    issues,
                    vault.len(),
                );
            }
        };
        issues.extend(strategy_issues);

        // Custom restores inside its chain, before wrapping.
        let output = match self.mode {
            Mode::Smart => vault.restore(&raw),
            _ => raw,
        };

        issues.extend(validator::validate_with(
            &output,
            &config,
            escape_expected(self.mode, &config, &context),
        ));

        ReformatResult::build(text, output, self.mode, context, issues, vault.len())
    }
}

impl Default for Reformatter {
    fn default() -> Self {
        Self::new(Mode::Simple)
    }
}

/// Reformat `text` in the given mode.
pub fn process(text: &str, mode: Mode, config: &ReformatConfig) -> ReformatResult {
    Reformatter::new(mode).process(text, config)
}
