//! Weighted context classifier for pasted text.

pub mod config;
pub mod rules;
pub mod types;

pub use config::{default_classify_config, CLASSIFY_CONFIG};
pub use rules::classify_with;
pub use types::{ClassifyConfig, ContextKind, TextContext};

/// Classify with the default configuration.
pub fn classify(text: &str) -> TextContext {
    classify_with(text, &CLASSIFY_CONFIG)
}

#[cfg(test)]
mod tests;
