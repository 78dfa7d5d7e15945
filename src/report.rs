//! The validation report: the full current pass/fail state of a schema.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::enums::Reason;

/// Per field/group path, the ordered set of currently-failing reasons.
///
/// Every declared field and group has an entry; an empty set means valid.
/// A group's own cross-field failures appear under the group's path,
/// independent of child failures; the root group reports under `""`.
///
/// A report is a pure function of (values, active rules, interaction
/// state): evaluating twice with no intervening mutation yields equal
/// reports.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationReport {
    entries: BTreeMap<String, Vec<Reason>>,
}

impl ValidationReport {
    pub fn new() -> ValidationReport {
        ValidationReport::default()
    }

    pub(crate) fn insert(&mut self, path: String, reasons: Vec<Reason>) {
        self.entries.insert(path, reasons);
    }

    /// Failing reasons for a path, in rule-declaration order.
    /// Unknown paths report no failures.
    pub fn failures(&self, path: &str) -> &[Reason] {
        self.entries.get(path).map(Vec::as_slice).unwrap_or(&[])
    }

    /// A path is valid iff its failing set is empty.
    pub fn path_is_valid(&self, path: &str) -> bool {
        self.failures(path).is_empty()
    }

    /// The whole schema is valid iff every entry's failing set is empty.
    pub fn is_valid(&self) -> bool {
        self.entries.values().all(Vec::is_empty)
    }

    /// A group's validity requires all of its descendants and its own
    /// cross-field rules to pass. The empty path covers the whole schema.
    pub fn subtree_is_valid(&self, path: &str) -> bool {
        if path.is_empty() {
            return self.is_valid();
        }
        let prefix = format!("{}.", path);
        self.entries
            .iter()
            .filter(|(k, _)| *k == path || k.starts_with(&prefix))
            .all(|(_, v)| v.is_empty())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Reason])> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }
}
