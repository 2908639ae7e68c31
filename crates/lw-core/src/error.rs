use thiserror::Error;

#[derive(Error, Debug)]
pub enum LwError {
    #[error("Empty input: nothing to reformat")]
    EmptyInput,
    #[error("Input too large: {len} characters (cap {cap})")]
    InputTooLarge { len: usize, cap: usize },
    #[error("Invalid pattern: {pattern}")]
    InvalidPattern { pattern: String },
    #[error("Cancelled after {completed} of {total} chunks")]
    Cancelled { completed: usize, total: usize },
    #[error("Worker task failed: {0}")]
    Task(String),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, LwError>;
