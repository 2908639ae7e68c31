//! Chunked processing for large inputs.

use crate::pipeline::{
    escape_expected, escape_set_check, input_check, Mode, ReformatResult, Reformatter,
};
use crate::{simple, terminal, validator};
use lw_core::config::{NewlinePolicy, ReformatConfig};
use lw_core::error::{LwError, Result};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::debug;

/// Progress snapshot for one chunked run.
#[derive(Debug, Clone, Copy)]
pub struct ChunkProgress {
    pub completed: usize,
    pub total: usize,
}

impl ChunkProgress {
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            return 1.0;
        }
        self.completed as f64 / self.total as f64
    }
}

/// Cooperative cancellation flag, cheap to clone across tasks.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

/// Split `text` into chunks of roughly `size` characters, cutting only
/// right after a whitespace character so words stay whole. A chunk can
/// run long when no whitespace turns up. Never cuts between the halves
/// of a CRLF pair.
pub(crate) fn split_chunks(text: &str, size: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::with_capacity(size + 16);
    let mut count = 0usize;
    for c in text.chars() {
        current.push(c);
        count += 1;
        if count >= size && c.is_whitespace() && c != '\r' {
            chunks.push(std::mem::take(&mut current));
            count = 0;
        }
    }
    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

/// Works large inputs as parallel per-chunk tasks, reassembled in index
/// order. Modes whose output depends on structure spanning the whole
/// input always run in a single pass instead.
pub struct ChunkedReformatter {
    pub mode: Mode,
    pub config: ReformatConfig,
}

impl ChunkedReformatter {
    pub fn new(mode: Mode, config: ReformatConfig) -> Self {
        Self { mode, config }
    }

    /// Process without cancellation or progress reporting.
    pub async fn process(&self, text: &str) -> Result<ReformatResult> {
        self.process_with(text, &CancelToken::new(), None).await
    }

    /// Process with a cancel token and an optional progress channel.
    /// Cancellation and lost workers are the only errors; everything else
    /// comes back inside the result. A cancelled run yields no output.
    pub async fn process_with(
        &self,
        text: &str,
        cancel: &CancelToken,
        progress: Option<mpsc::Sender<ChunkProgress>>,
    ) -> Result<ReformatResult> {
        let mut config = self.config.clone();
        let mut issues = config.sanitize();
        issues.extend(escape_set_check(self.mode, &config));

        if cancel.is_cancelled() {
            return Err(LwError::Cancelled { completed: 0, total: 0 });
        }

        let total_chars = text.chars().count();
        if total_chars <= config.large_input_threshold {
            let result = Reformatter::new(self.mode).process(text, &self.config);
            tokio::task::yield_now().await;
            return Ok(result);
        }

        let chunk_fn: fn(&str, &ReformatConfig) -> String = match self.mode {
            Mode::Simple => |t, _c| simple::apply(t),
            Mode::Terminal => terminal::apply,
            Mode::Smart | Mode::Custom => {
                // Separator placement needs the whole input in view.
                debug!(mode = %self.mode, total_chars, "mode is not chunkable, single pass");
                let result = Reformatter::new(self.mode).process(text, &self.config);
                tokio::task::yield_now().await;
                return Ok(result);
            }
        };

        if let Some(issue) = input_check(text, &config) {
            issues.push(issue);
            let context = lw_classify::classify(text);
            return Ok(ReformatResult::rejected(text, self.mode, context, issues));
        }

        // Chunk outputs are joined below; only the final result is trimmed.
        let mut worker_config = config.clone();
        worker_config.trim_output = false;
        let worker_config = Arc::new(worker_config);

        let chunks = split_chunks(text, config.chunk_size);
        let total = chunks.len();
        debug!(total, chunk_size = config.chunk_size, mode = %self.mode, "processing in chunks");

        let completed = Arc::new(AtomicUsize::new(0));
        let mut handles = Vec::with_capacity(total);
        for (index, chunk) in chunks.into_iter().enumerate() {
            let worker_config = worker_config.clone();
            let cancel = cancel.clone();
            let completed = completed.clone();
            let progress = progress.clone();
            handles.push(tokio::spawn(async move {
                if cancel.is_cancelled() {
                    return None;
                }
                let out = chunk_fn(&chunk, &worker_config);
                let done = completed.fetch_add(1, Ordering::SeqCst) + 1;
                if let Some(tx) = &progress {
                    let _ = tx.try_send(ChunkProgress { completed: done, total });
                }
                tokio::task::yield_now().await;
                Some((index, out))
            }));
        }

        let mut parts: Vec<Option<String>> = vec![None; total];
        let mut saw_cancel = false;
        for handle in handles {
            match handle.await {
                Ok(Some((index, out))) => parts[index] = Some(out),
                Ok(None) => saw_cancel = true,
                Err(err) => return Err(LwError::Task(err.to_string())),
            }
        }
        if saw_cancel || cancel.is_cancelled() {
            return Err(LwError::Cancelled {
                completed: completed.load(Ordering::SeqCst),
                total,
            });
        }
        let parts: Vec<String> = parts.into_iter().flatten().collect();

        // Escaped-newline output concatenates directly; space-joined parts
        // lost their boundary whitespace and get it back here.
        let token_joined =
            self.mode == Mode::Terminal && config.newline_policy == NewlinePolicy::EscapeToken;
        let mut output = if token_joined {
            parts.concat()
        } else {
            parts.into_iter().filter(|p| !p.is_empty()).collect::<Vec<_>>().join(" ")
        };
        if config.trim_output {
            output = output.trim().to_string();
        }

        let context = lw_classify::classify(text);
        issues.extend(validator::validate_with(
            &output,
            &config,
            escape_expected(self.mode, &config, &context),
        ));
        Ok(ReformatResult::build(text, output, self.mode, context, issues, 0))
    }
}
