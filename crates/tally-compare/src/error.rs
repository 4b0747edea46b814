//! Error types for comparison runs
//!
//! Everything here is fatal: it aborts the run and means the rules
//! or the call are wrong. A field that merely disagrees is never an
//! error; it is collected as a [`Mismatch`](crate::Mismatch) in the
//! result.

use std::fmt;
use tally_core::ResolveError;
use tally_rules::RuleError;
use thiserror::Error;

/// Which side of a comparison a diagnostic refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Source,
    Target,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Source => write!(f, "source"),
            Side::Target => write!(f, "target"),
        }
    }
}

/// Errors that abort a comparison run
#[derive(Debug, Error)]
pub enum CompareError {
    /// No rule is registered for the source kind
    #[error("no comparison rule registered for kind '{kind}'")]
    NoRuleFound { kind: String },

    /// An entire side of the comparison is absent
    #[error("comparison input is null on the {side} side")]
    NullInput { side: Side },

    /// The target's kind is not the one the rule declares
    #[error("rule for '{source_kind}' expects target kind '{expected}', got '{actual}'")]
    UnexpectedTargetType {
        source_kind: String,
        expected: String,
        actual: String,
    },

    /// A side failed to serialize into its field tree
    #[error("failed to snapshot the {side} side: {source}")]
    Snapshot {
        side: Side,
        #[source]
        source: serde_json::Error,
    },

    /// A rule expression named a field the side does not have
    #[error("broken mapping for {side} kind '{kind}': {source}")]
    Resolve {
        side: Side,
        kind: String,
        #[source]
        source: ResolveError,
    },

    /// Rule loading failed
    #[error("failed to load comparison rules: {0}")]
    Rules(#[from] RuleError),
}
