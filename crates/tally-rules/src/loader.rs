//! Rules file parsing
//!
//! One rule per line:
//!
//! ```text
//! SourceKind = TargetKind: entry,entry,...
//! ```
//!
//! Each entry is either a bare expression, checked under the same
//! path on both sides, or a `target=source` pair whose left
//! expression is resolved against the target and whose right
//! expression supplies the expected value from the source (a
//! `const:` literal makes the expectation a fixed text). Blank lines
//! and lines starting with `#` are skipped. Kinds and entries are
//! trimmed, so the format tolerates spacing around separators; text
//! after a `const:` marker is kept verbatim apart from that outer
//! trim.

use crate::error::{RuleError, RuleResult};
use crate::rule::{ComparisonRule, RuleTable};
use std::fs;
use std::path::Path;
use std::str::FromStr;
use tally_core::Expr;
use tracing::{debug, trace};

impl RuleTable {
    /// Load a rule table from a rules file
    pub fn load(path: impl AsRef<Path>) -> RuleResult<Self> {
        let path = path.as_ref();
        debug!("Loading rules file: {:?}", path);

        let content = fs::read_to_string(path).map_err(|e| RuleError::ReadFile {
            path: path.to_path_buf(),
            source: e,
        })?;

        let table: RuleTable = content.parse()?;
        debug!("Loaded {} comparison rules from {:?}", table.len(), path);
        Ok(table)
    }
}

impl FromStr for RuleTable {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut table = RuleTable::new();

        for (index, raw) in s.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let rule = parse_rule_line(index + 1, line)?;
            trace!(
                "Parsed rule: {} -> {} ({} field pairs)",
                rule.source_kind(),
                rule.target_kind(),
                rule.len()
            );
            table.insert(rule);
        }

        Ok(table)
    }
}

/// Parse one non-blank rule line. `line_no` is 1-based and only used
/// for error reporting.
fn parse_rule_line(line_no: usize, line: &str) -> RuleResult<ComparisonRule> {
    let (source_kind, rest) = line.split_once('=').ok_or_else(|| RuleError::Malformed {
        line: line_no,
        reason: "missing '=' between source and target kind".to_string(),
    })?;
    let source_kind = source_kind.trim();
    if source_kind.is_empty() {
        return Err(RuleError::Malformed {
            line: line_no,
            reason: "empty source kind".to_string(),
        });
    }

    let (target_kind, pair_list) = rest.split_once(':').ok_or_else(|| RuleError::Malformed {
        line: line_no,
        reason: "missing ':' after target kind".to_string(),
    })?;
    let target_kind = target_kind.trim();
    if target_kind.is_empty() {
        return Err(RuleError::Malformed {
            line: line_no,
            reason: "empty target kind".to_string(),
        });
    }

    let mut rule = ComparisonRule::new(source_kind, target_kind);
    for entry in pair_list.split(',') {
        let entry = entry.trim();
        if entry.is_empty() {
            continue;
        }

        rule = match entry.split_once('=') {
            Some((target, source)) => rule.with_mapping(
                parse_expr(line_no, target.trim())?,
                parse_expr(line_no, source.trim())?,
            ),
            None => {
                let expr = parse_expr(line_no, entry)?;
                rule.with_mapping(expr.clone(), expr)
            }
        };
    }

    Ok(rule)
}

fn parse_expr(line_no: usize, text: &str) -> RuleResult<Expr> {
    text.parse().map_err(|source| RuleError::BadExpression {
        line: line_no,
        expr: text.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_file(dir: &Path, name: &str, content: &str) {
        let mut file = fs::File::create(dir.join(name)).unwrap();
        file.write_all(content.as_bytes()).unwrap();
    }

    #[test]
    fn test_parse_single_rule() {
        let table: RuleTable =
            "TransferRequest = TransferResponse: senderAccountId,receiverAccountId,amount,message=const:Transfer completed"
                .parse()
                .unwrap();

        assert_eq!(table.len(), 1);
        let rule = table.rule_for("TransferRequest").unwrap();
        assert_eq!(rule.target_kind(), "TransferResponse");
        assert_eq!(rule.len(), 4);

        let pairs: Vec<_> = rule.mappings().collect();
        assert_eq!(
            pairs[0],
            (&Expr::path(["senderAccountId"]), &Expr::path(["senderAccountId"]))
        );
        assert_eq!(
            pairs[3],
            (
                &Expr::path(["message"]),
                &Expr::literal("Transfer completed")
            )
        );
    }

    #[test]
    fn test_parse_dotted_path_entry() {
        let table: RuleTable = "TransferRequest = TransferResponse: customer.address.city"
            .parse()
            .unwrap();

        let rule = table.rule_for("TransferRequest").unwrap();
        let (target, _) = rule.mappings().next().unwrap();
        assert_eq!(target, &Expr::path(["customer", "address", "city"]));
    }

    #[test]
    fn test_parse_skips_blank_and_comment_lines() {
        let table: RuleTable = "\n# transfers\nOrder = OrderRow: id\n\n   \n# refunds\nRefund = RefundRow: id\n"
            .parse()
            .unwrap();

        assert_eq!(table.kinds().collect::<Vec<_>>(), ["Order", "Refund"]);
    }

    #[test]
    fn test_parse_tolerates_spacing() {
        let table: RuleTable = "  Order = OrderRow :  id , customer.name , message = const:ok  "
            .parse()
            .unwrap();

        let rule = table.rule_for("Order").unwrap();
        assert_eq!(rule.target_kind(), "OrderRow");
        assert_eq!(rule.len(), 3);
        let pairs: Vec<_> = rule.mappings().collect();
        assert_eq!(pairs[2], (&Expr::path(["message"]), &Expr::literal("ok")));
    }

    #[test]
    fn test_literal_keeps_interior_text() {
        let table: RuleTable = "Order = OrderRow: status=const:IN PROGRESS: phase 2"
            .parse()
            .unwrap();

        let rule = table.rule_for("Order").unwrap();
        let (_, source) = rule.mappings().next().unwrap();
        assert_eq!(source, &Expr::literal("IN PROGRESS: phase 2"));
    }

    #[test]
    fn test_empty_pair_list_is_legal() {
        let table: RuleTable = "Order = OrderRow:".parse().unwrap();
        let rule = table.rule_for("Order").unwrap();
        assert!(rule.is_empty());
    }

    #[test]
    fn test_trailing_comma_ignored() {
        let table: RuleTable = "Order = OrderRow: id,total,".parse().unwrap();
        assert_eq!(table.rule_for("Order").unwrap().len(), 2);
    }

    #[test]
    fn test_duplicate_rule_last_wins() {
        let table: RuleTable = "Order = OrderRow: id\nRefund = RefundRow: id\nOrder = OrderRecord: total\n"
            .parse()
            .unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.rule_for("Order").unwrap().target_kind(), "OrderRecord");
        assert_eq!(table.kinds().collect::<Vec<_>>(), ["Order", "Refund"]);
    }

    #[test]
    fn test_missing_equals_is_malformed() {
        let err = "OrderRow: id".parse::<RuleTable>().unwrap_err();
        assert!(matches!(err, RuleError::Malformed { line: 1, .. }));
    }

    #[test]
    fn test_missing_colon_is_malformed() {
        let err = "Order = OrderRow".parse::<RuleTable>().unwrap_err();
        assert!(matches!(err, RuleError::Malformed { line: 1, .. }));
    }

    #[test]
    fn test_empty_kind_is_malformed() {
        assert!(matches!(
            " = OrderRow: id".parse::<RuleTable>().unwrap_err(),
            RuleError::Malformed { .. }
        ));
        assert!(matches!(
            "Order = : id".parse::<RuleTable>().unwrap_err(),
            RuleError::Malformed { .. }
        ));
    }

    #[test]
    fn test_bad_expression_reports_line() {
        let err = "# header\nOrder = OrderRow: id\nRefund = RefundRow: a..b\n"
            .parse::<RuleTable>()
            .unwrap_err();

        match err {
            RuleError::BadExpression { line, expr, .. } => {
                assert_eq!(line, 3);
                assert_eq!(expr, "a..b");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_load_from_file() {
        let dir = TempDir::new().unwrap();
        write_file(
            dir.path(),
            "comparison.rules",
            "# transfer checks\nTransferRequest = TransferResponse: amount,message=const:Transfer completed\n",
        );

        let table = RuleTable::load(dir.path().join("comparison.rules")).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.rule_for("TransferRequest").unwrap().len(), 2);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let result = RuleTable::load(dir.path().join("absent.rules"));
        assert!(matches!(result, Err(RuleError::ReadFile { .. })));
    }
}
