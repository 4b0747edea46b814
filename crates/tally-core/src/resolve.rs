//! Expression resolution against a serialized field tree

use crate::expr::Expr;
use serde_json::Value;
use thiserror::Error;
use tracing::trace;

/// Errors raised while resolving a path expression.
///
/// Both variants mean the mapping expression does not fit the model's
/// shape. They are configuration defects, never data mismatches, so
/// the engine propagates them instead of recording them in the report.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ResolveError {
    /// A path segment names a field the current object does not have.
    #[error("field '{field}' not found while resolving '{path}'")]
    FieldNotFound { field: String, path: String },

    /// A path tries to descend into a scalar value.
    #[error("cannot descend into {kind} value at segment '{field}' while resolving '{path}'")]
    NotTraversable {
        field: String,
        kind: &'static str,
        path: String,
    },
}

/// Short name for a value's JSON kind, used in diagnostics.
pub fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Resolve a mapping expression against a field tree.
///
/// Literals resolve to their fixed text without touching the tree.
/// Paths are walked one segment at a time; null anywhere along the
/// way short-circuits the rest of the path to null, so an absent
/// optional nested object compares instead of erroring.
pub fn resolve(root: &Value, expr: &Expr) -> Result<Value, ResolveError> {
    let segments = match expr {
        Expr::Literal(text) => return Ok(Value::String(text.clone())),
        Expr::Path(segments) => segments,
    };

    let mut current = root;
    for segment in segments {
        if current.is_null() {
            trace!("Null before segment '{}' in '{}', short-circuiting", segment, expr);
            return Ok(Value::Null);
        }
        current = match current {
            Value::Object(map) => {
                map.get(segment)
                    .ok_or_else(|| ResolveError::FieldNotFound {
                        field: segment.clone(),
                        path: expr.to_string(),
                    })?
            }
            other => {
                return Err(ResolveError::NotTraversable {
                    field: segment.clone(),
                    kind: value_kind(other),
                    path: expr.to_string(),
                })
            }
        };
    }

    Ok(current.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn path(text: &str) -> Expr {
        text.parse().unwrap()
    }

    #[test]
    fn test_literal_ignores_the_tree() {
        let expr = Expr::literal("Transfer completed");
        assert_eq!(
            resolve(&Value::Null, &expr).unwrap(),
            json!("Transfer completed")
        );
        assert_eq!(
            resolve(&json!({"message": "other"}), &expr).unwrap(),
            json!("Transfer completed")
        );
    }

    #[test]
    fn test_resolve_top_level_field() {
        let tree = json!({"amount": "10.00", "currency": "EUR"});
        assert_eq!(resolve(&tree, &path("amount")).unwrap(), json!("10.00"));
    }

    #[test]
    fn test_resolve_nested_path() {
        let tree = json!({"customer": {"address": {"city": "Vienna"}}});
        assert_eq!(
            resolve(&tree, &path("customer.address.city")).unwrap(),
            json!("Vienna")
        );
    }

    #[test]
    fn test_resolve_yields_whole_subtree() {
        let tree = json!({"customer": {"name": "Ada"}});
        assert_eq!(
            resolve(&tree, &path("customer")).unwrap(),
            json!({"name": "Ada"})
        );
    }

    #[test]
    fn test_null_short_circuits_mid_path() {
        let tree = json!({"customer": null});
        assert_eq!(
            resolve(&tree, &path("customer.address.city")).unwrap(),
            Value::Null
        );
    }

    #[test]
    fn test_null_root_short_circuits() {
        assert_eq!(resolve(&Value::Null, &path("a.b")).unwrap(), Value::Null);
    }

    #[test]
    fn test_terminal_null_is_returned() {
        let tree = json!({"message": null});
        assert_eq!(resolve(&tree, &path("message")).unwrap(), Value::Null);
    }

    #[test]
    fn test_missing_field_is_an_error() {
        let tree = json!({"amount": 1});
        let err = resolve(&tree, &path("customer.name")).unwrap_err();
        assert_eq!(
            err,
            ResolveError::FieldNotFound {
                field: "customer".to_string(),
                path: "customer.name".to_string(),
            }
        );
        assert!(err.to_string().contains("'customer'"));
    }

    #[test]
    fn test_descending_into_scalar_is_an_error() {
        let tree = json!({"amount": "10.00"});
        let err = resolve(&tree, &path("amount.cents")).unwrap_err();
        assert_eq!(
            err,
            ResolveError::NotTraversable {
                field: "cents".to_string(),
                kind: "string",
                path: "amount.cents".to_string(),
            }
        );
    }

    #[test]
    fn test_value_kind_names() {
        assert_eq!(value_kind(&json!(null)), "null");
        assert_eq!(value_kind(&json!(true)), "boolean");
        assert_eq!(value_kind(&json!(1)), "number");
        assert_eq!(value_kind(&json!("x")), "string");
        assert_eq!(value_kind(&json!([1])), "array");
        assert_eq!(value_kind(&json!({"a": 1})), "object");
    }
}
