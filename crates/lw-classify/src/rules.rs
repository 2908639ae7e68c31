//! Additive weighted classifier over a bounded sample.

use crate::types::{ClassifyConfig, ContextKind, TextContext};
use tracing::debug;

struct CategoryScore {
    kind: ContextKind,
    score: f64,
    features: Vec<String>,
}

fn score_category(
    sample: &str,
    patterns: &[(String, String)],
    weight: f64,
    kind: ContextKind,
) -> CategoryScore {
    let mut score = 0.0;
    let mut features = Vec::new();
    for (name, pattern) in patterns {
        let hit = regex::Regex::new(pattern).map(|r| r.is_match(sample)).unwrap_or(false);
        if hit {
            score += weight;
            features.push(name.clone());
        }
    }
    CategoryScore { kind, score, features }
}

fn char_density(sample: &str, chars: &[char], weight: f64, cap: f64) -> f64 {
    let hits = sample.chars().filter(|c| chars.contains(c)).count();
    (hits as f64 * weight).min(cap)
}

/// Classify a text into its broad shape. Scores are additive per matching
/// pattern; the highest-scoring category wins when it clears the
/// confidence gate, otherwise the verdict is plain with confidence zero.
pub fn classify_with(text: &str, config: &ClassifyConfig) -> TextContext {
    if text.is_empty() {
        return TextContext::plain();
    }
    let sample: String = text.chars().take(config.sample_window).collect();

    let mut shell = score_category(&sample, &config.shell_patterns, config.shell_weight, ContextKind::Terminal);
    let density = char_density(&sample, &config.special_chars, config.density_weight, config.density_cap);
    if density > 0.0 {
        shell.score += density;
        shell.features.push(format!("special-char-density {density:.2}"));
    }

    // Order fixes tie-breaking: terminal, then code, markdown, list.
    let candidates = [
        shell,
        score_category(&sample, &config.code_patterns, config.structure_weight, ContextKind::Code),
        score_category(&sample, &config.markdown_patterns, config.structure_weight, ContextKind::Markdown),
        score_category(&sample, &config.list_patterns, config.structure_weight, ContextKind::List),
    ];

    let mut best = &candidates[0];
    for candidate in &candidates[1..] {
        if candidate.score > best.score {
            best = candidate;
        }
    }

    if best.score < config.min_confidence {
        debug!(score = best.score, "no category cleared the gate");
        return TextContext::plain();
    }

    let confidence = best.score.min(1.0);
    debug!(kind = ?best.kind, confidence, "classified sample");
    TextContext { kind: best.kind, confidence, features: best.features.clone() }
}
