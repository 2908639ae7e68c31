//! Reformatting engine: protection, mode strategies, validation, chunking.

pub mod protector;
pub mod simple;
pub mod smart;
pub mod terminal;
pub mod custom;
pub mod validator;
pub mod pipeline;
pub mod chunked;
pub mod cache;

pub use cache::{CacheKey, ResultCache};
pub use chunked::{CancelToken, ChunkProgress, ChunkedReformatter};
pub use pipeline::{process, Mode, ReformatResult, Reformatter};
pub use protector::{protect, ProtectedSpan, SpanKind, SpanVault};
pub use validator::{validate, validate_with};
