//! Default classifier configuration.

use crate::types::ClassifyConfig;

fn p(items: &[(&str, &str)]) -> Vec<(String, String)> {
    items.iter().map(|(name, pattern)| (name.to_string(), pattern.to_string())).collect()
}

/// Default classifier configuration.
pub fn default_classify_config() -> ClassifyConfig {
    ClassifyConfig {
        shell_patterns: p(&[
            ("variable-assignment", r"\$\w+\s*="),
            ("cmdlet-call", r"\b(Get|Set|New|Remove|Invoke|Start|Stop|Where|Select|Out)-[A-Z]\w*"),
            ("pipeline", r"\|\s*[A-Za-z]"),
            ("redirection", r"\S[ \t]*>{1,2}[ \t]*\S"),
            ("command-chain", r"&&|\|\|"),
            ("unix-command", r"\b(sudo|grep|awk|sed|curl|chmod|mkdir|apt|yum|tar)\s"),
        ]),
        code_patterns: p(&[
            ("code-fence", r"```"),
            ("function-def", r"\b(fn|function|def|func)\s+\w+\s*\("),
            ("import-stmt", r"(?m)^\s*(import|use|from|#include|require)\b"),
            ("brace-line", r"(?m)[{;]\s*$"),
            ("keyword-cluster", r"\b(const|let|var|return|class|impl|pub)\b"),
        ]),
        markdown_patterns: p(&[
            ("heading", r"(?m)^#{1,6}\s+\S"),
            ("md-link", r"\[[^\]]+\]\([^)]+\)"),
            ("emphasis", r"\*\*[^*]+\*\*|__[^_]+__"),
            ("table-row", r"(?m)^\s*\|.+\|\s*$"),
            ("blockquote", r"(?m)^\s*>\s+"),
        ]),
        list_patterns: p(&[
            ("numbered-item", r"(?m)^\s*\d+[.)]\s+"),
            ("bullet-item", r"(?m)^\s*[-*+\u{2022}]\s+"),
            ("lettered-item", r"(?m)^\s*[A-Za-z][.)]\s+\S"),
        ]),
        special_chars: vec!['$', '|', '>', '<', '&', '"', '\'', '`'],
        shell_weight: 0.2,
        structure_weight: 0.3,
        density_weight: 0.05,
        density_cap: 0.3,
        sample_window: 2000,
        min_confidence: 0.3,
    }
}

/// The default config instance.
pub static CLASSIFY_CONFIG: std::sync::LazyLock<ClassifyConfig> =
    std::sync::LazyLock::new(default_classify_config);
