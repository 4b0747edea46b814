//! Mapping expressions: a literal value or a dotted field path

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Prefix marking a literal expression in rule text.
pub const LITERAL_PREFIX: &str = "const:";

/// Error type for malformed mapping expressions
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ExprError {
    #[error("expression is empty")]
    Empty,

    #[error("empty path segment in '{expr}'")]
    EmptySegment { expr: String },
}

/// One side of a field mapping, parsed once at configuration time.
///
/// `const:Transfer completed` is a literal: it resolves to the text
/// after the marker regardless of which value it is resolved against.
/// Anything else is a dotted field path walked through a subject's
/// field tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Expr {
    /// Fixed text, resolved verbatim.
    Literal(String),
    /// Dot-separated field identifiers, resolved by traversal.
    Path(Vec<String>),
}

impl Expr {
    /// Create a literal expression.
    pub fn literal(text: impl Into<String>) -> Self {
        Expr::Literal(text.into())
    }

    /// Create a path expression from pre-split segments.
    ///
    /// Segments are taken as-is; the fallible route is [`FromStr`].
    pub fn path<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Expr::Path(segments.into_iter().map(Into::into).collect())
    }

    /// True if this expression is a literal.
    pub fn is_literal(&self) -> bool {
        matches!(self, Expr::Literal(_))
    }
}

impl FromStr for Expr {
    type Err = ExprError;

    /// Parse the textual rule-file form.
    ///
    /// The input is expected pre-trimmed; interior whitespace is part
    /// of the expression, so literals may contain spaces.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(text) = s.strip_prefix(LITERAL_PREFIX) {
            return Ok(Expr::Literal(text.to_string()));
        }
        if s.is_empty() {
            return Err(ExprError::Empty);
        }
        let segments: Vec<String> = s.split('.').map(str::to_string).collect();
        if segments.iter().any(String::is_empty) {
            return Err(ExprError::EmptySegment {
                expr: s.to_string(),
            });
        }
        Ok(Expr::Path(segments))
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Literal(text) => write!(f, "{}{}", LITERAL_PREFIX, text),
            Expr::Path(segments) => write!(f, "{}", segments.join(".")),
        }
    }
}
