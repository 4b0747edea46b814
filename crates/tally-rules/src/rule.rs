//! Rule model
//!
//! A [`ComparisonRule`] pairs expressions checked on a target
//! representation with the expressions that supply their expected
//! values from a source representation. A [`RuleTable`] indexes
//! rules by source kind.

use indexmap::IndexMap;
use tally_core::Expr;

/// The field pairs that must be equivalent between one source kind
/// and one target kind.
///
/// Each pair holds a target expression (resolved against the target,
/// yielding the actual value) and a source expression (resolved
/// against the source, yielding the expected value; literals stand
/// for a fixed expectation). Pairs keep their insertion order, so
/// reports list mismatches in the order the rule names the fields.
/// Re-adding a target expression replaces its source expression but
/// keeps the original position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonRule {
    /// Kind of the representation the rule is looked up by
    source_kind: String,
    /// Kind the source is compared against
    target_kind: String,
    /// Checked target expression -> source expression with the
    /// expected value
    mappings: IndexMap<Expr, Expr>,
}

impl ComparisonRule {
    /// Create an empty rule between two kinds
    pub fn new(source_kind: impl Into<String>, target_kind: impl Into<String>) -> Self {
        Self {
            source_kind: source_kind.into(),
            target_kind: target_kind.into(),
            mappings: IndexMap::new(),
        }
    }

    /// Add a pair: `target` is checked against the value `source`
    /// yields
    pub fn with_mapping(mut self, target: Expr, source: Expr) -> Self {
        self.mappings.insert(target, source);
        self
    }

    /// Add a field that carries the same dotted path on both sides
    pub fn with_field(self, name: &str) -> Self {
        let expr = Expr::path(name.split('.'));
        self.with_mapping(expr.clone(), expr)
    }

    /// Kind of the source representation
    pub fn source_kind(&self) -> &str {
        &self.source_kind
    }

    /// Kind of the target representation
    pub fn target_kind(&self) -> &str {
        &self.target_kind
    }

    /// Iterate over `(target expression, source expression)` pairs
    /// in rule order
    pub fn mappings(&self) -> impl Iterator<Item = (&Expr, &Expr)> {
        self.mappings.iter()
    }

    /// Number of field pairs
    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    /// Check whether the rule has no field pairs
    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }
}

/// All loaded rules, indexed by source kind.
///
/// The table is immutable once built; share it behind an `Arc` to
/// compare from several threads.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleTable {
    rules: IndexMap<String, ComparisonRule>,
}

impl RuleTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a rule, keyed by its source kind.
    ///
    /// A later rule for the same source kind replaces the earlier
    /// one but keeps its position in [`RuleTable::kinds`].
    pub fn insert(&mut self, rule: ComparisonRule) {
        self.rules.insert(rule.source_kind().to_string(), rule);
    }

    /// Look up the rule for a source kind
    pub fn rule_for(&self, kind: &str) -> Option<&ComparisonRule> {
        self.rules.get(kind)
    }

    /// Iterate over the source kinds in load order
    pub fn kinds(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(String::as_str)
    }

    /// Number of rules
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Check whether the table holds no rules
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
