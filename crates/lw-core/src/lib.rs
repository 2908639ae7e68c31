pub mod config;
pub mod error;
pub mod patterns;
pub mod stats;
pub mod types;

pub use config::ReformatConfig;
pub use error::{LwError, Result};
pub use stats::TextStats;
pub use types::{Severity, ValidationIssue};
