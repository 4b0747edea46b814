//! The comparison engine
//!
//! Snapshots both sides into field trees, finds the rule for the
//! source's kind, resolves every mapped pair and collects all
//! mismatches. Fatal conditions (missing rule, null input, broken
//! mapping) abort the run; plain field disagreements never do.

use crate::error::{CompareError, Side};
use crate::report::{ComparisonResult, Mismatch};
use serde_json::Value;
use std::path::Path;
use tally_core::{equivalent, resolve, Subject};
use tally_rules::{ComparisonRule, RuleTable};
use tracing::{debug, trace};

/// Rule-driven comparator over a loaded rule table.
///
/// The table is never mutated after construction, so one comparator
/// can serve any number of comparisons, from any thread.
pub struct Comparator {
    rules: RuleTable,
}

impl Comparator {
    /// Create a comparator over an already-built rule table
    pub fn new(rules: RuleTable) -> Self {
        Self { rules }
    }

    /// Load the rule table from a rules file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CompareError> {
        Ok(Self::new(RuleTable::load(path)?))
    }

    /// The loaded rule table
    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    /// Compare `source` against `target` under the rule registered
    /// for the source's kind.
    ///
    /// The target's kind must be the one the rule declares; anything
    /// else fails with [`CompareError::UnexpectedTargetType`] before
    /// any field is looked at.
    pub fn compare<S: Subject, T: Subject>(
        &self,
        source: &S,
        target: &T,
    ) -> Result<ComparisonResult, CompareError> {
        let (source_tree, target_tree) = snapshot_both(source, target)?;

        let source_kind = source.kind();
        let rule = self
            .rules
            .rule_for(source_kind)
            .ok_or_else(|| CompareError::NoRuleFound {
                kind: source_kind.to_string(),
            })?;

        let target_kind = target.kind();
        if rule.target_kind() != target_kind {
            return Err(CompareError::UnexpectedTargetType {
                source_kind: source_kind.to_string(),
                expected: rule.target_kind().to_string(),
                actual: target_kind.to_string(),
            });
        }

        run(source_kind, target_kind, rule, &source_tree, &target_tree)
    }

    /// Compare under an explicit rule, skipping both the table
    /// lookup and the target kind check.
    pub fn compare_with<S: Subject, T: Subject>(
        &self,
        source: &S,
        target: &T,
        rule: &ComparisonRule,
    ) -> Result<ComparisonResult, CompareError> {
        let (source_tree, target_tree) = snapshot_both(source, target)?;
        run(source.kind(), target.kind(), rule, &source_tree, &target_tree)
    }
}

/// Serialize both sides, rejecting an absent side before any rule
/// work happens.
fn snapshot_both<S: Subject, T: Subject>(
    source: &S,
    target: &T,
) -> Result<(Value, Value), CompareError> {
    let source_tree = source.fields().map_err(|e| CompareError::Snapshot {
        side: Side::Source,
        source: e,
    })?;
    if source_tree.is_null() {
        return Err(CompareError::NullInput { side: Side::Source });
    }

    let target_tree = target.fields().map_err(|e| CompareError::Snapshot {
        side: Side::Target,
        source: e,
    })?;
    if target_tree.is_null() {
        return Err(CompareError::NullInput { side: Side::Target });
    }

    Ok((source_tree, target_tree))
}

/// Resolve every pair on both sides and collect mismatches without
/// short-circuiting.
fn run(
    source_kind: &str,
    target_kind: &str,
    rule: &ComparisonRule,
    source_tree: &Value,
    target_tree: &Value,
) -> Result<ComparisonResult, CompareError> {
    debug!(
        "Comparing {} against {} ({} field pairs)",
        source_kind,
        target_kind,
        rule.len()
    );

    let mut mismatches = Vec::new();
    for (target_expr, source_expr) in rule.mappings() {
        let expected = resolve(source_tree, source_expr).map_err(|e| CompareError::Resolve {
            side: Side::Source,
            kind: source_kind.to_string(),
            source: e,
        })?;
        let actual = resolve(target_tree, target_expr).map_err(|e| CompareError::Resolve {
            side: Side::Target,
            kind: target_kind.to_string(),
            source: e,
        })?;

        if !equivalent(&expected, &actual) {
            trace!("Mismatch at {} = {}", target_expr, source_expr);
            mismatches.push(Mismatch {
                target_expr: target_expr.to_string(),
                source_expr: source_expr.to_string(),
                expected,
                actual,
            });
        }
    }

    debug!(
        "Compared {} against {}: {} mismatches",
        source_kind,
        target_kind,
        mismatches.len()
    );

    Ok(ComparisonResult {
        source_kind: source_kind.to_string(),
        target_kind: target_kind.to_string(),
        mismatches,
    })
}
