//! Pure rule predicates.
//!
//! Every predicate is total: any JSON value yields pass or a named failure
//! reason, never a panic. Value-shape rules treat absence (null, empty
//! string) as out of their concern and pass — compose with `required` to
//! reject absence.

use crate::enums::Reason;
use crate::schema::Rule;
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

/// Apply a single-field rule to a value. Returns the failure reason, or
/// `None` if the rule passes.
///
/// `MatchFields` needs a group snapshot, not a single value; it is
/// rejected on fields at check time and inert here.
pub fn apply_rule(rule: &Rule, value: &Value) -> Option<Reason> {
    match rule {
        Rule::Required => required(value),
        Rule::MinLength(min) => min_length(*min, value),
        Rule::MaxLength(max) => max_length(*max, value),
        Rule::Email => email(value),
        Rule::Pattern(pattern) => pattern_match(pattern, value),
        Rule::Range(min, max) => range(*min, *max, value),
        Rule::MatchFields(_, _) => None,
    }
}

/// Fails on absent values. Booleans never fail: an unchecked checkbox is
/// `false`, not missing.
pub fn required(value: &Value) -> Option<Reason> {
    match value {
        Value::Bool(_) => None,
        v if is_absent(v) => Some(Reason::Required),
        _ => None,
    }
}

/// String length lower bound in chars.
pub fn min_length(min: usize, value: &Value) -> Option<Reason> {
    if is_absent(value) {
        return None;
    }
    match value.as_str() {
        Some(s) if s.chars().count() >= min => None,
        // Non-text present values cannot satisfy a text-length bound.
        _ => Some(Reason::MinLength),
    }
}

/// String length upper bound in chars.
pub fn max_length(max: usize, value: &Value) -> Option<Reason> {
    if is_absent(value) {
        return None;
    }
    match value.as_str() {
        Some(s) if s.chars().count() <= max => None,
        _ => Some(Reason::MaxLength),
    }
}

/// Standard email shape: local part, `@`, domain with at least one dot,
/// no whitespace.
pub fn email(value: &Value) -> Option<Reason> {
    if is_absent(value) {
        return None;
    }
    match value.as_str() {
        Some(s) if EMAIL_RE.is_match(s) => None,
        _ => Some(Reason::Email),
    }
}

/// Unanchored regex match. An uncompilable pattern fails the rule; check
/// rejects such patterns at setup, so this only arises for rules installed
/// past the checked surface.
pub fn pattern_match(pattern: &str, value: &Value) -> Option<Reason> {
    if is_absent(value) {
        return None;
    }
    let Some(s) = value.as_str() else {
        return Some(Reason::Pattern);
    };
    match Regex::new(pattern) {
        Ok(re) if re.is_match(s) => None,
        _ => Some(Reason::Pattern),
    }
}

/// Inclusive numeric bounds. Null passes; a present value that cannot be
/// coerced to a number fails the rule rather than faulting evaluation.
pub fn range(min: f64, max: f64, value: &Value) -> Option<Reason> {
    if value.is_null() {
        return None;
    }
    match as_number(value) {
        Some(n) if n >= min && n <= max => None,
        _ => Some(Reason::Range),
    }
}

/// Cross-field equality, symmetric in its two sides.
///
/// Suppressed while either side is pristine: a mismatch is only an error
/// once the user has edited both fields.
pub fn match_fields(a: &Value, a_pristine: bool, b: &Value, b_pristine: bool) -> Option<Reason> {
    if a_pristine || b_pristine {
        return None;
    }
    if value_eq(a, b) { None } else { Some(Reason::Match) }
}

/// Null and the empty string count as absent.
pub(crate) fn is_absent(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

/// Numeric coercion: numbers pass through, numeric strings parse.
pub(crate) fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Deep equality: integer 42 equals float 42.0; object key order is
/// irrelevant; arrays compare element-wise by position and length.
pub fn value_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::Number(a), Value::Number(b)) => match (a.as_f64(), b.as_f64()) {
            (Some(fa), Some(fb)) => fa == fb,
            _ => a == b,
        },
        (Value::String(a), Value::String(b)) => a == b,
        (Value::Array(a), Value::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b.iter()).all(|(a, b)| value_eq(a, b))
        }
        (Value::Object(a), Value::Object(b)) => {
            if a.len() != b.len() {
                return false;
            }
            a.iter().all(|(k, v)| b.get(k).is_some_and(|bv| value_eq(v, bv)))
        }
        _ => false,
    }
}
