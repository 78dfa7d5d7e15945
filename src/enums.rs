//! Closed enumerations used throughout the schema type system.
//!
//! Failure reasons are "closed" — only the defined variants exist. A rule
//! that does not pass always reports exactly one of these names.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Named failure reason produced by a rule that did not pass.
///
/// Reasons are data, not errors: they are collected into a
/// [`ValidationReport`](crate::report::ValidationReport) and never
/// propagated as faults.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Reason {
    Required,
    MinLength,
    MaxLength,
    Email,
    Pattern,
    Range,
    Match,
}

impl Reason {
    /// The wire name of the reason, identical to its serde form.
    pub fn as_str(self) -> &'static str {
        match self {
            Reason::Required => "required",
            Reason::MinLength => "minLength",
            Reason::MaxLength => "maxLength",
            Reason::Email => "email",
            Reason::Pattern => "pattern",
            Reason::Range => "range",
            Reason::Match => "match",
        }
    }
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
