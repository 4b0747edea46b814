//! The equivalence relation: numeric-aware, null-strict

use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

/// Canonical numeric text: optional sign, digits, optional fractional
/// digits. Exponent forms and bare decimal points are not
/// numeric-like and take the string comparison instead.
static NUMERIC_TEXT: OnceLock<Regex> = OnceLock::new();

fn numeric_text() -> &'static Regex {
    NUMERIC_TEXT.get_or_init(|| {
        Regex::new(r"^[+-]?[0-9]+(\.[0-9]+)?$").expect("static pattern is valid")
    })
}

/// Decide whether two resolved values are equal for comparison
/// purposes.
///
/// The relation is total and reflexive over everything the resolver
/// can produce:
///
/// 1. Null is equal to null and nothing else - in particular not to
///    the text `"null"`.
/// 2. If both sides are numeric-like (a number, or text whose trimmed
///    form is `[+-]?digits[.digits]`), they compare by exact numeric
///    value: `100`, `100.0` and `"100.00"` are all equal, and scale
///    differences never matter. The comparison is digit-exact, so
///    values outside f64 precision still compare correctly.
/// 3. Everything else compares by its string rendering, so a boolean
///    `true` equals the text `"true"`.
///
/// A numeric-like value against non-numeric text falls through to
/// rule 3 and compares unequal.
pub fn equivalent(a: &Value, b: &Value) -> bool {
    if a.is_null() || b.is_null() {
        return a.is_null() && b.is_null();
    }
    if let (Some(x), Some(y)) = (decimal(a), decimal(b)) {
        return x == y;
    }
    render(a) == render(b)
}

/// Render a value the way the string fallback of [`equivalent`] sees
/// it: strings verbatim, booleans and numbers as printed, containers
/// as compact JSON. Reports use the same rendering, so report text
/// and verdict can never disagree.
pub fn render(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        other => serde_json::to_string(other).unwrap_or_default(),
    }
}

/// Exact decimal form: sign, significant digits, and decimal point
/// position (value = 0.digits x 10^point). Leading and trailing
/// zeros are stripped, which is what makes scale differences
/// normalize away.
#[derive(Debug, PartialEq, Eq)]
struct Decimal {
    negative: bool,
    digits: String,
    point: i64,
}

/// The canonical decimal of a numeric-like value, or `None` when the
/// value does not take part in numeric comparison.
fn decimal(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => parse_decimal(&n.to_string()),
        Value::String(s) => {
            let trimmed = s.trim();
            if numeric_text().is_match(trimmed) {
                parse_decimal(trimmed)
            } else {
                None
            }
        }
        _ => None,
    }
}

/// Parse decimal text into canonical form.
///
/// Accepts an optional exponent because serde_json prints large and
/// small floats in scientific notation; the numeric-like gate for
/// strings stays the plain canonical form.
fn parse_decimal(text: &str) -> Option<Decimal> {
    let (negative, rest) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };

    let (mantissa, exponent) = match rest.find(['e', 'E']) {
        Some(pos) => (&rest[..pos], rest[pos + 1..].parse::<i64>().ok()?),
        None => (rest, 0i64),
    };

    let (int_part, frac_part) = match mantissa.split_once('.') {
        Some((int, frac)) => (int, frac),
        None => (mantissa, ""),
    };
    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }
    if !int_part.bytes().all(|b| b.is_ascii_digit())
        || !frac_part.bytes().all(|b| b.is_ascii_digit())
    {
        return None;
    }

    // value = int_part.frac_part x 10^exponent
    let mut digits = format!("{}{}", int_part, frac_part);
    let mut point = (int_part.len() as i64).checked_add(exponent)?;

    let leading = digits.len() - digits.trim_start_matches('0').len();
    digits.drain(..leading);
    point = point.checked_sub(leading as i64)?;
    digits.truncate(digits.trim_end_matches('0').len());

    if digits.is_empty() {
        // all zeros: one canonical zero, regardless of sign and scale
        return Some(Decimal {
            negative: false,
            digits,
            point: 0,
        });
    }

    Some(Decimal {
        negative,
        digits,
        point,
    })
}
