//! Span protection — stashes fragile regions behind opaque tokens.

use lw_core::config::ReformatConfig;
use lw_core::patterns::{RE_FENCED_CODE, RE_INLINE_CODE, RE_URL};
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// What a protected span held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpanKind {
    FencedCode,
    InlineCode,
    Url,
    Table,
}

/// One stashed region. Restoring puts `content` back verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProtectedSpan {
    pub token: String,
    pub content: String,
    pub kind: SpanKind,
}

/// Holds protected spans for one processing run. Tokens are built from a
/// per-run salt that is re-rolled until the input cannot collide with it,
/// and end in a non-hex terminator so no token is a prefix of another.
#[derive(Debug, Clone)]
pub struct SpanVault {
    salt: String,
    spans: Vec<ProtectedSpan>,
}

impl SpanVault {
    pub fn new(text: &str) -> Self {
        let mut salt = fresh_salt();
        while text.contains(&format!("LW{salt}")) {
            salt = fresh_salt();
        }
        Self { salt, spans: Vec::new() }
    }

    /// Stash `content` and return the token standing in for it.
    pub fn stash(&mut self, content: &str, kind: SpanKind) -> String {
        let token = format!("LW{}{}X", self.salt, self.spans.len());
        self.spans.push(ProtectedSpan {
            token: token.clone(),
            content: content.to_string(),
            kind,
        });
        token
    }

    /// Replace every match of `re` in `text` with a fresh token.
    pub fn extract(&mut self, text: &str, re: &Regex, kind: SpanKind) -> String {
        let mut out = String::with_capacity(text.len());
        let mut last = 0;
        for m in re.find_iter(text) {
            out.push_str(&text[last..m.start()]);
            out.push_str(&self.stash(m.as_str(), kind));
            last = m.end();
        }
        out.push_str(&text[last..]);
        out
    }

    /// Swap every token back for its original content. Later spans restore
    /// first so that spans nested inside other spans unwind cleanly.
    pub fn restore(&self, text: &str) -> String {
        let mut out = text.to_string();
        for span in self.spans.iter().rev() {
            out = out.replace(&span.token, &span.content);
        }
        out
    }

    pub fn len(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    pub fn spans(&self) -> &[ProtectedSpan] {
        &self.spans
    }
}

fn fresh_salt() -> String {
    Uuid::new_v4().simple().to_string()[..8].to_uppercase()
}

/// Protect the regions the config asks for: fenced code first (an
/// unterminated fence runs to end of input), then inline code, then URLs.
pub fn protect(text: &str, config: &ReformatConfig) -> (String, SpanVault) {
    let mut vault = SpanVault::new(text);
    let mut out = text.to_string();

    if config.preserve_code_blocks {
        out = vault.extract(&out, &RE_FENCED_CODE, SpanKind::FencedCode);
        out = vault.extract(&out, &RE_INLINE_CODE, SpanKind::InlineCode);
    }
    if config.preserve_urls {
        out = vault.extract(&out, &RE_URL, SpanKind::Url);
    }

    (out, vault)
}
