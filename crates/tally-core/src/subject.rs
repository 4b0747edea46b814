//! The introspection contract comparable values implement

use serde::Serialize;
use serde_json::Value;

/// A value that can take part in a field comparison.
///
/// The engine never reads fields through accessor methods: it
/// serializes the whole value into a [`Value`] tree once per
/// comparison and walks that. Private fields, nested objects and
/// fields merged in with `#[serde(flatten)]` are all reachable, and
/// formatting logic in getters cannot leak into a comparison.
///
/// Most types only need the marker impl:
///
/// ```ignore
/// #[derive(Serialize)]
/// #[serde(rename_all = "camelCase")]
/// struct TransferRequest {
///     sender_account_id: u64,
/// }
///
/// impl Subject for TransferRequest {}
/// ```
pub trait Subject: Serialize {
    /// The rule-table key for this value.
    ///
    /// Defaults to the type's own name with module path and generic
    /// arguments stripped, so `bank::api::TransferRequest` is looked
    /// up as `TransferRequest` no matter which module it lives in.
    /// Wrapper types override this to report the concrete shape they
    /// currently carry (see the `Option` impl below).
    fn kind(&self) -> &str {
        simple_type_name(std::any::type_name::<Self>())
    }

    /// Serialize this value into the field tree the engine walks.
    ///
    /// Rule expressions address the *serialized* field names, so serde
    /// rename attributes apply to the rule vocabulary as well.
    fn fields(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}

/// An absent side is `None` and serializes to null, which the engine
/// rejects with a dedicated error rather than a field mismatch. The
/// kind comes from the inner value, or from `T`'s name when there is
/// none, so rule lookup still works for an `Option<TransferRecord>`
/// handed back by a storage fetch.
impl<T: Subject> Subject for Option<T> {
    fn kind(&self) -> &str {
        match self {
            Some(inner) => inner.kind(),
            None => simple_type_name(std::any::type_name::<T>()),
        }
    }
}

/// Strip module path and generic arguments from a type name.
pub fn simple_type_name(full: &str) -> &str {
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}
