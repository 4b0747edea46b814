//! Comparison rules: which fields of one representation must match
//! which fields of another
//!
//! A rules file holds one rule per line:
//!
//! ```text
//! # source kind = target kind : field pairs
//! TransferRequest = TransferResponse: senderAccountId,amount,message=const:Transfer completed
//! ```
//!
//! Each entry in the pair list is either a bare field expression
//! (checked under the same path on both sides) or a `target=source`
//! pair: the left expression is resolved against the target and the
//! right against the source, so a `const:` literal on the right
//! pins the expected value. Expressions are dotted paths into the
//! serialized representation, or `const:` literals.
//!
//! # Example
//!
//! ```ignore
//! use tally_rules::RuleTable;
//!
//! // Load rules from a file
//! let table = RuleTable::load("comparison.rules")?;
//!
//! // Or parse them from text
//! let table: RuleTable = "Order = OrderRow: id,total".parse()?;
//! let rule = table.rule_for("Order").unwrap();
//! ```

mod error;
mod loader;
mod rule;

pub use error::{RuleError, RuleResult};
pub use rule::{ComparisonRule, RuleTable};
