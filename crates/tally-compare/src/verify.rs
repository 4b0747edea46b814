//! Assertion facade
//!
//! Wraps the comparator behind assertions that panic with the full
//! mismatch report, so a failing check shows every broken field in
//! one message. The non-panicking [`Verifier::check`] is there for
//! callers that want to inspect the result instead.

use crate::engine::Comparator;
use crate::error::CompareError;
use crate::report::ComparisonResult;
use std::path::Path;
use tally_core::Subject;
use tally_rules::{ComparisonRule, RuleTable};

/// Fluent assertion wrapper around a [`Comparator`].
///
/// Assertions return `&Self`, so consecutive checks chain:
///
/// ```ignore
/// use tally_compare::Verifier;
///
/// let verifier = Verifier::load("comparison.rules")?;
/// verifier
///     .assert_equivalent(&request, &response)
///     .assert_equivalent(&response, &record);
/// ```
pub struct Verifier {
    comparator: Comparator,
}

impl Verifier {
    /// Create a verifier over an already-built rule table
    pub fn new(rules: RuleTable) -> Self {
        Self {
            comparator: Comparator::new(rules),
        }
    }

    /// Load the rule table from a rules file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CompareError> {
        Ok(Self {
            comparator: Comparator::load(path)?,
        })
    }

    /// The underlying comparator
    pub fn comparator(&self) -> &Comparator {
        &self.comparator
    }

    /// Run the comparison for the source's registered rule without
    /// asserting
    pub fn check<S: Subject, T: Subject>(
        &self,
        source: &S,
        target: &T,
    ) -> Result<ComparisonResult, CompareError> {
        self.comparator.compare(source, target)
    }

    /// Assert that `source` and `target` are equivalent under the
    /// rule registered for the source's kind.
    ///
    /// # Panics
    ///
    /// Panics with the rendered mismatch report when any field pair
    /// disagrees, and with the engine diagnostic when the comparison
    /// cannot run at all (null input, missing rule, broken mapping).
    pub fn assert_equivalent<S: Subject, T: Subject>(&self, source: &S, target: &T) -> &Self {
        self.verdict(self.comparator.compare(source, target))
    }

    /// Assert equivalence under an explicit rule.
    ///
    /// # Panics
    ///
    /// Same conditions as [`Verifier::assert_equivalent`].
    pub fn assert_equivalent_with<S: Subject, T: Subject>(
        &self,
        source: &S,
        target: &T,
        rule: &ComparisonRule,
    ) -> &Self {
        self.verdict(self.comparator.compare_with(source, target, rule))
    }

    fn verdict(&self, outcome: Result<ComparisonResult, CompareError>) -> &Self {
        match outcome {
            Ok(result) if result.passed() => self,
            Ok(result) => panic!("{}", result),
            Err(err) => panic!("equivalence check could not run: {}", err),
        }
    }
}
