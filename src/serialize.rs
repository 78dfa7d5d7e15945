//! [`SchemaDoc`] → YAML serialization.

use crate::error::SerializeError;
use crate::schema::SchemaDoc;

/// Serialize a SchemaDoc to a YAML string.
///
/// `form` is emitted first, then `rules`, `triggers`, and `messages` in
/// declaration order; empty sections are omitted, so
/// parse → serialize → parse is lossless.
pub fn serialize(doc: &SchemaDoc) -> Result<String, SerializeError> {
    // Convert to serde_json::Value first for consistent field ordering
    let value = serde_json::to_value(doc).map_err(|e| SerializeError {
        message: format!("failed to convert schema to JSON value: {}", e),
    })?;

    let yaml = serde_saphyr::to_string(&value).map_err(|e| SerializeError {
        message: format!("failed to serialize to YAML: {}", e),
    })?;

    Ok(yaml)
}
