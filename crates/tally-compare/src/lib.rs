//! Field equivalence checking between two shapes of one business
//! entity
//!
//! A rules file declares which fields of a source representation
//! must agree with which fields of a target representation, for
//! example an API request against its response, or a response
//! against the stored record. The engine resolves both sides of
//! every configured pair, applies a numeric-aware equivalence
//! relation, and reports every broken field in one result instead
//! of stopping at the first.
//!
//! ```text
//! rules file ──> RuleTable ──> Comparator ──> ComparisonResult
//!                                  ▲                │
//!              source + target ────┘                ▼
//!                                          Verifier (assertions)
//! ```
//!
//! # Example
//!
//! ```ignore
//! use tally_compare::Verifier;
//!
//! let verifier = Verifier::load("comparison.rules")?;
//! verifier
//!     .assert_equivalent(&request, &response)
//!     .assert_equivalent(&response, &record);
//! ```

mod engine;
mod error;
mod report;
mod verify;

pub use engine::Comparator;
pub use error::{CompareError, Side};
pub use report::{ComparisonResult, Mismatch};
pub use verify::Verifier;

// Re-export the pieces callers need to declare subjects and rules
pub use tally_core::{Expr, Subject, Value};
pub use tally_rules::{ComparisonRule, RuleError, RuleTable};
