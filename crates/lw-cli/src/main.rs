//! Command-line front end: read text, reformat, print one line.

use anyhow::Context;
use clap::Parser;
use lw_core::{ReformatConfig, Severity};
use lw_engine::{ChunkedReformatter, Mode};
use std::io::Read;
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser, Debug)]
#[command(
    name = "lineweaver",
    version,
    about = "Fold multi-line text onto a single line",
    long_about = "Fold multi-line text onto a single line for chat boxes, terminals and \
    log search fields. Paragraphs and list items are marked with separator tokens, code \
    spans and URLs pass through untouched, and terminal mode escapes shell-sensitive \
    characters."
)]
struct Cli {
    /// File to reformat; reads stdin when omitted
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Reformatting mode
    #[arg(short, long, value_enum, default_value = "smart")]
    mode: CliMode,

    /// Named preset (developer, cli-poweruser, content-creator, system-admin)
    #[arg(short, long, conflicts_with = "config")]
    preset: Option<String>,

    /// JSON config file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Paragraph separator token
    #[arg(long, value_name = "TOKEN")]
    paragraph_separator: Option<String>,

    /// List separator token
    #[arg(long, value_name = "TOKEN")]
    list_separator: Option<String>,

    /// Output length the validator warns at
    #[arg(long, value_name = "CHARS")]
    max_line_length: Option<usize>,

    /// Emit the full result as JSON instead of plain output
    #[arg(long)]
    json: bool,

    /// Print input/output statistics to stderr
    #[arg(long)]
    stats: bool,

    /// Verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum CliMode {
    Simple,
    Smart,
    Terminal,
    Custom,
}

impl From<CliMode> for Mode {
    fn from(m: CliMode) -> Self {
        match m {
            CliMode::Simple => Self::Simple,
            CliMode::Smart => Self::Smart,
            CliMode::Terminal => Self::Terminal,
            CliMode::Custom => Self::Custom,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    setup_tracing(cli.verbose)?;

    let config = build_config(&cli)?;
    let text = read_input(&cli)?;

    let reformatter = ChunkedReformatter::new(cli.mode.into(), config);
    let result = reformatter.process(&text).await?;

    for issue in &result.issues {
        let suggestion = issue.suggestion.as_deref().unwrap_or("");
        match issue.severity {
            Severity::Error => tracing::error!(suggestion, "{}", issue.message),
            Severity::Warning => tracing::warn!(suggestion, "{}", issue.message),
            Severity::Info => tracing::info!(suggestion, "{}", issue.message),
        }
    }

    if cli.stats {
        eprintln!(
            "{} chars in, {} out ({:+.1}% change), {} protected spans",
            result.original_len,
            result.output_len,
            -result.compression_pct,
            result.protected_spans
        );
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{}", result.output);
    }

    if !result.is_acceptable() {
        std::process::exit(1);
    }
    Ok(())
}

fn build_config(cli: &Cli) -> anyhow::Result<ReformatConfig> {
    let mut config = if let Some(name) = &cli.preset {
        ReformatConfig::preset(name).with_context(|| {
            format!("unknown preset '{name}' (developer, cli-poweruser, content-creator, system-admin)")
        })?
    } else if let Some(path) = &cli.config {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read config file {}", path.display()))?;
        ReformatConfig::from_json(&json)
            .with_context(|| format!("cannot parse config file {}", path.display()))?
    } else {
        ReformatConfig::new()
    };

    if let Some(sep) = &cli.paragraph_separator {
        config.paragraph_separator = sep.clone();
    }
    if let Some(sep) = &cli.list_separator {
        config.list_separator = sep.clone();
    }
    if let Some(max) = cli.max_line_length {
        config.max_line_length = max;
    }
    Ok(config)
}

fn read_input(cli: &Cli) -> anyhow::Result<String> {
    match &cli.input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("cannot read {}", path.display())),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("cannot read stdin")?;
            Ok(buf)
        }
    }
}

fn setup_tracing(verbosity: u8) -> anyhow::Result<()> {
    let filter = match verbosity {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();

    Ok(())
}
