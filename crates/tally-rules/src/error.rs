//! Error types for rule loading

use std::path::PathBuf;
use tally_core::ExprError;
use thiserror::Error;

/// Result type for rule operations
pub type RuleResult<T> = Result<T, RuleError>;

/// Errors that can occur while loading comparison rules
#[derive(Debug, Error)]
pub enum RuleError {
    /// Failed to read the rules file
    #[error("failed to read rules file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A rule line does not have the `source = target : pairs` shape
    #[error("malformed rule on line {line}: {reason}")]
    Malformed { line: usize, reason: String },

    /// A field expression inside a rule line failed to parse
    #[error("bad expression '{expr}' on line {line}: {source}")]
    BadExpression {
        line: usize,
        expr: String,
        #[source]
        source: ExprError,
    },
}
