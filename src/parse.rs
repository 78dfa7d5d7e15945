use crate::error::{ParseError, ParseErrorKind};
use crate::schema::SchemaDoc;

/// Parse a YAML string into an unchecked SchemaDoc.
///
/// Performs YAML deserialization and type mapping only. Does NOT check
/// configuration rules — [`check`](crate::check::check) does that, and
/// [`Engine::new`](crate::engine::Engine::new) enforces it.
pub fn parse(input: &str) -> Result<SchemaDoc, ParseError> {
    if input.trim().is_empty() {
        return Err(ParseError {
            kind: ParseErrorKind::Syntax,
            message: "empty input".to_string(),
            path: None,
        });
    }

    // Deserialize via a serde_json::Value intermediate so top-level keys
    // can be checked before the typed mapping runs.
    let value: serde_json::Value = serde_saphyr::from_str(input).map_err(|e| {
        let msg = e.to_string();
        ParseError {
            kind: classify_saphyr_error(&msg),
            message: msg,
            path: None,
        }
    })?;

    if !value.is_object() {
        return Err(ParseError {
            kind: ParseErrorKind::TypeMismatch,
            message: "document root must be a YAML mapping".to_string(),
            path: None,
        });
    }

    if let Some(obj) = value.as_object() {
        for key in obj.keys() {
            match key.as_str() {
                "form" | "rules" | "triggers" | "messages" => {}
                other => {
                    return Err(ParseError {
                        kind: ParseErrorKind::TypeMismatch,
                        message: format!("unknown top-level field: {}", other),
                        path: Some(other.to_string()),
                    });
                }
            }
        }
    }

    let doc: SchemaDoc = serde_json::from_value(value).map_err(|e| {
        let msg = e.to_string();
        ParseError {
            kind: classify_json_error(&msg),
            message: msg,
            path: None,
        }
    })?;

    Ok(doc)
}

fn classify_saphyr_error(msg: &str) -> ParseErrorKind {
    let lower = msg.to_lowercase();
    if lower.contains("unknown") || lower.contains("variant") {
        ParseErrorKind::UnknownVariant
    } else if lower.contains("type") || lower.contains("invalid") || lower.contains("expected") {
        ParseErrorKind::TypeMismatch
    } else {
        ParseErrorKind::Syntax
    }
}

fn classify_json_error(msg: &str) -> ParseErrorKind {
    let lower = msg.to_lowercase();
    if lower.contains("unknown variant") || lower.contains("unknown field") {
        ParseErrorKind::UnknownVariant
    } else if lower.contains("missing field") || lower.contains("invalid type") {
        ParseErrorKind::TypeMismatch
    } else {
        ParseErrorKind::Syntax
    }
}
