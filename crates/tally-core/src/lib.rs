//! Core types for field-equivalence checking
//!
//! This crate provides the building blocks the comparison engine is
//! assembled from:
//!
//! - [`Subject`] - the introspection contract comparable types implement
//! - [`Expr`] - a parsed mapping expression (literal or dotted field path)
//! - [`resolve`] - expression evaluation against a serialized field tree
//! - [`equivalent`] - the numeric-aware equivalence relation
//!
//! # Example
//!
//! ```ignore
//! use tally_core::{equivalent, resolve, Expr, Subject};
//!
//! let tree = request.fields()?;
//! let expr: Expr = "customer.name".parse()?;
//! let value = resolve(&tree, &expr)?;
//! ```

mod equiv;
mod expr;
mod resolve;
mod subject;

pub use equiv::{equivalent, render};
pub use expr::{Expr, ExprError, LITERAL_PREFIX};
pub use resolve::{resolve, value_kind, ResolveError};
pub use subject::{simple_type_name, Subject};

// Re-export serde_json::Value for convenience
pub use serde_json::Value;
