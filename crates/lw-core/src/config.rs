//! Typed reformatting configuration with named presets.

use crate::error::Result;
use crate::patterns::SHELL_SENSITIVE;
use crate::types::ValidationIssue;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use tracing::debug;

pub const MIN_LINE_LENGTH: usize = 50;
pub const MAX_LINE_LENGTH: usize = 2000;
pub const DEFAULT_LINE_LENGTH: usize = 500;
pub const MIN_INPUT_CAP: usize = 1000;
pub const DEFAULT_INPUT_CAP: usize = 1_000_000;
pub const DEFAULT_CHUNK_SIZE: usize = 10_000;
pub const DEFAULT_LARGE_INPUT_THRESHOLD: usize = 50_000;

/// How far whitespace runs are compacted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompressionLevel {
    /// Whitespace passes through untouched.
    None,
    /// Space and tab runs become single spaces.
    Light,
    /// All whitespace runs become single spaces.
    Balanced,
    /// Like balanced, plus a final trim.
    Aggressive,
}

impl Default for CompressionLevel {
    fn default() -> Self {
        CompressionLevel::Balanced
    }
}

/// Which shell's escaping conventions apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EscapeDialect {
    PowerShell,
    Posix,
}

impl Default for EscapeDialect {
    fn default() -> Self {
        EscapeDialect::PowerShell
    }
}

/// Whether custom mode escapes shell characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EscapeMode {
    Off,
    /// Escape only when the detected context looks shell-like.
    Auto,
    On,
}

impl Default for EscapeMode {
    fn default() -> Self {
        EscapeMode::Off
    }
}

/// What terminal mode does with line breaks. The two policies are
/// mutually exclusive by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NewlinePolicy {
    /// Join lines with single spaces.
    SpaceJoin,
    /// Replace line breaks with the dialect's escaped-newline token.
    EscapeToken,
}

impl Default for NewlinePolicy {
    fn default() -> Self {
        NewlinePolicy::SpaceJoin
    }
}

/// Quote style wrapped around the whole output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WrapQuote {
    None,
    Double,
    Single,
    Backtick,
}

impl Default for WrapQuote {
    fn default() -> Self {
        WrapQuote::None
    }
}

/// One user-supplied rewrite rule, applied in order in custom mode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Replacement {
    pub pattern: String,
    pub replacement: String,
}

/// Escape table for one shell dialect. The rules are data so callers can
/// inspect or extend them; characters outside the table fall back to the
/// dialect's prefix character.
#[derive(Debug, Clone)]
pub struct EscapeTable {
    pub prefix: char,
    pub rules: Vec<(char, String)>,
    pub newline_token: String,
}

impl EscapeTable {
    pub fn powershell() -> Self {
        let rules = [
            ('`', "``"),
            ('"', "\"\""),
            ('\'', "''"),
            ('$', "`$"),
            ('|', "`|"),
            ('>', "`>"),
            ('<', "`<"),
            ('&', "`&"),
            ('(', "`("),
            (')', "`)"),
            ('{', "`{"),
            ('}', "`}"),
            ('[', "`["),
            (']', "`]"),
            ('#', "`#"),
            (';', "`;"),
        ];
        Self {
            prefix: '`',
            rules: rules.iter().map(|(c, e)| (*c, e.to_string())).collect(),
            newline_token: "`n".into(),
        }
    }

    pub fn posix() -> Self {
        Self {
            prefix: '\\',
            rules: SHELL_SENSITIVE.iter().map(|&c| (c, format!("\\{c}"))).collect(),
            newline_token: "\\n".into(),
        }
    }

    pub fn for_dialect(dialect: EscapeDialect) -> Self {
        match dialect {
            EscapeDialect::PowerShell => POWERSHELL_ESCAPES.clone(),
            EscapeDialect::Posix => POSIX_ESCAPES.clone(),
        }
    }

    /// Replacement for `c`, if the table escapes it.
    pub fn lookup(&self, c: char) -> Option<&str> {
        self.rules.iter().find(|(rc, _)| *rc == c).map(|(_, e)| e.as_str())
    }
}

pub static POWERSHELL_ESCAPES: LazyLock<EscapeTable> = LazyLock::new(EscapeTable::powershell);
pub static POSIX_ESCAPES: LazyLock<EscapeTable> = LazyLock::new(EscapeTable::posix);

/// Full reformatting configuration. Every field has a documented default;
/// unknown options cannot exist by construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReformatConfig {
    /// Token inserted at paragraph boundaries in smart and custom modes.
    pub paragraph_separator: String,
    /// Token inserted before list items and blockquotes.
    pub list_separator: String,
    /// Output length the validator warns at. Clamped to [50, 2000].
    pub max_line_length: usize,
    pub compression_level: CompressionLevel,
    pub preserve_code_blocks: bool,
    pub preserve_urls: bool,
    /// Keep leading whitespace instead of stripping it per line.
    pub preserve_indentation: bool,
    /// Recognize headings, tables, quotes and rules in smart mode.
    pub detect_markdown: bool,
    pub escape_special_chars: EscapeMode,
    /// The characters to escape when escaping is active.
    pub escape_patterns: Vec<char>,
    pub escape_dialect: EscapeDialect,
    pub newline_policy: NewlinePolicy,
    pub wrap_quote: WrapQuote,
    /// Wrap the output in a PowerShell here-string. Wins over `wrap_quote`.
    pub here_string: bool,
    pub replacements: Vec<Replacement>,
    /// Convert tabs to four spaces in custom mode.
    pub tabs_to_spaces: bool,
    pub trim_output: bool,
    /// Truncate at `max_line_length` instead of warning.
    pub truncate_at_max: bool,
    /// Absolute input cap, checked before any transform.
    pub max_input_len: usize,
    /// Inputs above this take the chunked path.
    pub large_input_threshold: usize,
    pub chunk_size: usize,
    /// Advisory only; recorded, never changes behavior.
    pub encoding: String,
}

impl Default for ReformatConfig {
    fn default() -> Self {
        Self {
            paragraph_separator: "[PARA]".into(),
            list_separator: "[LIST]".into(),
            max_line_length: DEFAULT_LINE_LENGTH,
            compression_level: CompressionLevel::Balanced,
            preserve_code_blocks: true,
            preserve_urls: true,
            preserve_indentation: false,
            detect_markdown: true,
            escape_special_chars: EscapeMode::Off,
            escape_patterns: SHELL_SENSITIVE.to_vec(),
            escape_dialect: EscapeDialect::PowerShell,
            newline_policy: NewlinePolicy::SpaceJoin,
            wrap_quote: WrapQuote::None,
            here_string: false,
            replacements: Vec::new(),
            tabs_to_spaces: false,
            trim_output: true,
            truncate_at_max: false,
            max_input_len: DEFAULT_INPUT_CAP,
            large_input_threshold: DEFAULT_LARGE_INPUT_THRESHOLD,
            chunk_size: DEFAULT_CHUNK_SIZE,
            encoding: "utf-8".into(),
        }
    }
}

impl ReformatConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_separators(mut self, paragraph: &str, list: &str) -> Self {
        self.paragraph_separator = paragraph.to_string();
        self.list_separator = list.to_string();
        self
    }

    pub fn with_max_line_length(mut self, max: usize) -> Self {
        self.max_line_length = max;
        self
    }

    pub fn with_compression(mut self, level: CompressionLevel) -> Self {
        self.compression_level = level;
        self
    }

    pub fn with_dialect(mut self, dialect: EscapeDialect) -> Self {
        self.escape_dialect = dialect;
        self
    }

    /// The escape table for the configured dialect.
    pub fn escape_table(&self) -> EscapeTable {
        EscapeTable::for_dialect(self.escape_dialect)
    }

    /// Clamp numeric fields into their bounds and resolve option conflicts.
    /// Returns a warning for every adjustment; never fails.
    pub fn sanitize(&mut self) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();

        if self.max_line_length < MIN_LINE_LENGTH || self.max_line_length > MAX_LINE_LENGTH {
            let clamped = self.max_line_length.clamp(MIN_LINE_LENGTH, MAX_LINE_LENGTH);
            debug!(from = self.max_line_length, to = clamped, "clamping max_line_length");
            issues.push(ValidationIssue::warning(format!(
                "max_line_length {} is out of range [{}, {}]; using {}",
                self.max_line_length, MIN_LINE_LENGTH, MAX_LINE_LENGTH, clamped
            )));
            self.max_line_length = clamped;
        }

        if self.max_input_len < MIN_INPUT_CAP {
            issues.push(ValidationIssue::warning(format!(
                "max_input_len {} is below the minimum {}; using {}",
                self.max_input_len, MIN_INPUT_CAP, MIN_INPUT_CAP
            )));
            self.max_input_len = MIN_INPUT_CAP;
        }

        if self.chunk_size == 0 {
            issues.push(ValidationIssue::warning(format!(
                "chunk_size 0 is unusable; using {DEFAULT_CHUNK_SIZE}"
            )));
            self.chunk_size = DEFAULT_CHUNK_SIZE;
        }

        if self.here_string && self.wrap_quote != WrapQuote::None {
            issues.push(ValidationIssue::warning(
                "here_string and wrap_quote both set; wrap_quote is ignored",
            ));
            self.wrap_quote = WrapQuote::None;
        }

        if self.escape_special_chars != EscapeMode::Off && self.escape_patterns.is_empty() {
            issues.push(
                ValidationIssue::warning("escaping is enabled but no characters are configured")
                    .with_suggestion("set escape_patterns or turn escape_special_chars off"),
            );
        }

        issues
    }

    /// Look up a named preset.
    pub fn preset(name: &str) -> Option<Self> {
        match name {
            "developer" => Some(Self::developer()),
            "cli-poweruser" => Some(Self::cli_poweruser()),
            "content-creator" => Some(Self::content_creator()),
            "system-admin" => Some(Self::system_admin()),
            _ => None,
        }
    }

    /// Code-heavy pastes: keep structure and indentation, never escape.
    pub fn developer() -> Self {
        Self {
            max_line_length: 800,
            compression_level: CompressionLevel::None,
            preserve_indentation: true,
            escape_special_chars: EscapeMode::Off,
            ..Self::default()
        }
    }

    /// Shell one-liners: tight output, everything escaped.
    pub fn cli_poweruser() -> Self {
        Self {
            max_line_length: 400,
            compression_level: CompressionLevel::Balanced,
            escape_special_chars: EscapeMode::On,
            escape_patterns: vec!['$', '|', '>', '<', '&', '"', '\'', '`'],
            escape_dialect: EscapeDialect::PowerShell,
            ..Self::default()
        }
    }

    /// Prose and markdown: light compaction, structure markers on.
    pub fn content_creator() -> Self {
        Self {
            max_line_length: 600,
            compression_level: CompressionLevel::Light,
            detect_markdown: true,
            ..Self::default()
        }
    }

    /// Paste-anywhere-safe: short lines, escaped and quoted.
    pub fn system_admin() -> Self {
        Self {
            max_line_length: 200,
            compression_level: CompressionLevel::Aggressive,
            escape_special_chars: EscapeMode::On,
            wrap_quote: WrapQuote::Double,
            ..Self::default()
        }
    }
}
