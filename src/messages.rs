//! Message catalog and user-facing message derivation.
//!
//! The catalog is consulted only when rendering a report, never during
//! evaluation.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::engine::Interaction;
use crate::enums::Reason;
use crate::error::MessageError;

/// Flat mapping from failure reason to a human-readable string.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageCatalog {
    entries: BTreeMap<Reason, String>,
}

impl MessageCatalog {
    pub fn new() -> MessageCatalog {
        MessageCatalog::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, reason: Reason, text: impl Into<String>) -> MessageCatalog {
        self.entries.insert(reason, text.into());
        self
    }

    pub fn set(&mut self, reason: Reason, text: impl Into<String>) {
        self.entries.insert(reason, text.into());
    }

    pub fn get(&self, reason: Reason) -> Option<&str> {
        self.entries.get(&reason).map(String::as_str)
    }

    pub fn contains(&self, reason: Reason) -> bool {
        self.entries.contains_key(&reason)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Derive the user-facing message string for one field.
///
/// Messages are suppressed entirely unless the field has been touched or
/// edited — an untouched, pristine field never shows errors, even when its
/// failing set is non-empty. When shown, the catalog text of each failing
/// reason is joined with a single space, in report order.
///
/// # Errors
///
/// A reason with no catalog entry is a configuration error and surfaces as
/// [`MessageError`] rather than rendering blank.
pub fn render_messages(
    interaction: Interaction,
    failures: &[Reason],
    catalog: &MessageCatalog,
) -> Result<String, MessageError> {
    if !interaction.touched && !interaction.dirty {
        return Ok(String::new());
    }

    let mut parts = Vec::with_capacity(failures.len());
    for reason in failures {
        match catalog.get(*reason) {
            Some(text) => parts.push(text),
            None => {
                return Err(MessageError {
                    reason: *reason,
                    path: None,
                });
            }
        }
    }
    Ok(parts.join(" "))
}
