//! Comparison outcome: the mismatch list and its rendering

use std::fmt;
use tally_core::{render, Value};

/// One field-level disagreement found by a comparison run.
///
/// Expressions are kept in their textual form so the report reads
/// like the rule that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Mismatch {
    /// Expression resolved against the target side
    pub target_expr: String,
    /// Expression resolved against the source side
    pub source_expr: String,
    /// Value the source expression resolved to
    pub expected: Value,
    /// Value the target expression resolved to
    pub actual: Value,
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} = {}: expected '{}', actual '{}'",
            self.target_expr,
            self.source_expr,
            render(&self.expected),
            render(&self.actual)
        )
    }
}

/// Outcome of one comparison run.
///
/// Mismatches appear in rule order; the run passes exactly when the
/// list is empty. The `Display` rendering enumerates every mismatch
/// so a single failure message shows all broken fields at once.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonResult {
    /// Kind of the compared source
    pub source_kind: String,
    /// Kind of the compared target
    pub target_kind: String,
    /// Every field pair that failed the equivalence check
    pub mismatches: Vec<Mismatch>,
}

impl ComparisonResult {
    /// Check whether the run found no mismatches
    pub fn passed(&self) -> bool {
        self.mismatches.is_empty()
    }
}

impl fmt::Display for ComparisonResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.passed() {
            return write!(
                f,
                "{} and {} are equivalent",
                self.source_kind, self.target_kind
            );
        }

        write!(
            f,
            "{} field mismatches between {} and {}:",
            self.mismatches.len(),
            self.source_kind,
            self.target_kind
        )?;
        for mismatch in &self.mismatches {
            write!(f, "\n  {}", mismatch)?;
        }
        Ok(())
    }
}
