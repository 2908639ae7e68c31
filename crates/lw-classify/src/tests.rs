use crate::*;
use crate::config::default_classify_config;

fn cfg() -> ClassifyConfig {
    default_classify_config()
}

// ========== Terminal Detection ==========

#[test]
fn test_powershell_pipeline() {
    let ctx = classify("$var = Get-Process | Where-Object Name");
    assert_eq!(ctx.kind, ContextKind::Terminal);
    assert!(ctx.confidence > 0.3);
    assert!(ctx.features.iter().any(|f| f == "variable-assignment"));
    assert!(ctx.features.iter().any(|f| f == "cmdlet-call"));
    assert!(ctx.features.iter().any(|f| f == "pipeline"));
}

#[test]
fn test_unix_pipeline() {
    let ctx = classify("ps aux | grep nginx && sudo systemctl restart nginx");
    assert_eq!(ctx.kind, ContextKind::Terminal);
    assert!(ctx.confidence >= 0.3);
}

#[test]
fn test_redirection() {
    let ctx = classify("cat input.txt > output.txt && mkdir backup");
    assert_eq!(ctx.kind, ContextKind::Terminal);
}

#[test]
fn test_density_alone_stays_below_gate() {
    // Three sensitive chars and no pattern hits: 0.15 < 0.30.
    let ctx = classify("the price is $5 and she said \"hi\" politely yesterday");
    assert_eq!(ctx.kind, ContextKind::Plain);
    assert_eq!(ctx.confidence, 0.0);
}

// ========== Plain Fallback ==========

#[test]
fn test_plain_sentence() {
    let ctx = classify("This is an ordinary sentence describing the weather in town.");
    assert_eq!(ctx.kind, ContextKind::Plain);
    assert_eq!(ctx.confidence, 0.0);
    assert!(ctx.features.is_empty());
}

#[test]
fn test_empty_input_is_plain() {
    let ctx = classify("");
    assert_eq!(ctx.kind, ContextKind::Plain);
    assert_eq!(ctx.confidence, 0.0);
}

#[test]
fn test_plain_is_not_shell_like() {
    assert!(!TextContext::plain().is_shell_like());
    assert!(classify("$x = 1 | Out-Null").is_shell_like());
}

// ========== Code Detection ==========

#[test]
fn test_code_fence() {
    let ctx = classify("```rust\nfn main() {\n    println!(\"hi\");\n}\n```");
    assert_eq!(ctx.kind, ContextKind::Code);
    assert!(ctx.confidence >= 0.3);
}

#[test]
fn test_import_and_braces() {
    let ctx = classify("import os\nclass Runner:\n    def run(self):\n        return 1;");
    assert_eq!(ctx.kind, ContextKind::Code);
}

// ========== Markdown Detection ==========

#[test]
fn test_markdown_document() {
    let ctx = classify("# Title\n\nSome **bold** text with a [link](https://example.com).");
    assert_eq!(ctx.kind, ContextKind::Markdown);
    assert!(ctx.confidence >= 0.6);
}

#[test]
fn test_blockquotes_are_markdown_not_terminal() {
    let ctx = classify("> first quoted line\n> second quoted line");
    assert_eq!(ctx.kind, ContextKind::Markdown);
}

// ========== List Detection ==========

#[test]
fn test_bullet_list() {
    let ctx = classify("- apples\n- pears\n- plums");
    assert_eq!(ctx.kind, ContextKind::List);
    assert!(ctx.confidence >= 0.3);
}

#[test]
fn test_numbered_list() {
    let ctx = classify("1. wake up\n2. make coffee\n3. write tests");
    assert_eq!(ctx.kind, ContextKind::List);
}

// ========== Scoring Mechanics ==========

#[test]
fn test_confidence_clamped_to_one() {
    let text = "$a = Get-Item x | Out-Null\nsudo rm -rf ./tmp && cat a > b\n$$$|||>>>&&&\"\"\"";
    let ctx = classify(text);
    assert_eq!(ctx.kind, ContextKind::Terminal);
    assert!(ctx.confidence <= 1.0);
}

#[test]
fn test_sample_window_bounds_scan() {
    // Shell content pushed past the window must not count.
    let mut text = "plain words ".repeat(200);
    assert!(text.chars().count() > 2000);
    text.push_str("$x = Get-Thing | Out-Null");
    let ctx = classify_with(&text, &cfg());
    assert_eq!(ctx.kind, ContextKind::Plain);
}

#[test]
fn test_custom_config_weights() {
    let mut config = cfg();
    config.min_confidence = 0.9;
    let ctx = classify_with("$var = Get-Process | Where-Object Name", &config);
    assert_eq!(ctx.kind, ContextKind::Plain);
}

#[test]
fn test_invalid_pattern_is_ignored() {
    let mut config = cfg();
    config.shell_patterns.push(("broken".into(), "([".into()));
    let ctx = classify_with("$var = Get-Process | Where-Object Name", &config);
    assert_eq!(ctx.kind, ContextKind::Terminal);
    assert!(!ctx.features.iter().any(|f| f == "broken"));
}

#[test]
fn test_density_contributes_to_terminal() {
    let ctx = classify("$var = Get-Process | Where-Object Name");
    assert!(ctx.features.iter().any(|f| f.starts_with("special-char-density")));
    assert!((ctx.confidence - 0.7).abs() < 1e-9);
}

#[test]
fn test_context_serializes() {
    let ctx = classify("- one\n- two");
    let json = serde_json::to_string(&ctx).expect("serialize");
    assert!(json.contains("\"list\""));
}
