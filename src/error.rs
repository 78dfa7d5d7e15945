use serde::{Deserialize, Serialize};
use std::fmt;

use crate::enums::Reason;

/// Error kind for parse failures.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParseErrorKind {
    Syntax,
    TypeMismatch,
    UnknownVariant,
}

/// Produced by `parse` when YAML deserialization fails.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.path {
            Some(path) => write!(f, "{}: {}", path, self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

impl std::error::Error for ParseError {}

/// Produced by `check` when a schema violates a configuration rule, and by
/// the engine's event API when a caller names an unknown field.
///
/// These are programmer faults: a broken schema, not a bad user input.
/// Rule failures during evaluation are never represented as this type.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigError {
    pub code: String,
    pub path: String,
    pub message: String,
}

impl ConfigError {
    /// Event-API fault: the caller referenced a field the schema does not declare.
    pub(crate) fn unknown_field(path: &str) -> ConfigError {
        ConfigError {
            code: "C-009".to_string(),
            path: path.to_string(),
            message: format!("unknown field: '{}'", path),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}: {}", self.code, self.path, self.message)
    }
}

impl std::error::Error for ConfigError {}

/// Result of configuration checking: all errors found, not just the first.
#[derive(Clone, Debug, Default)]
pub struct CheckResult {
    pub errors: Vec<ConfigError>,
}

impl CheckResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Produced at render time when a failing reason has no catalog entry.
///
/// A missing entry is a schema bug and must surface loudly rather than
/// silently render blank.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageError {
    pub reason: Reason,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl fmt::Display for MessageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.path {
            Some(path) => write!(
                f,
                "no catalog entry for failure reason '{}' (field '{}')",
                self.reason, path
            ),
            None => write!(f, "no catalog entry for failure reason '{}'", self.reason),
        }
    }
}

impl std::error::Error for MessageError {}

/// Serialization error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SerializeError {
    pub message: String,
}

impl fmt::Display for SerializeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for SerializeError {}

/// Combined error type for the `load` entry point and engine surface.
#[derive(Clone, Debug)]
pub enum FormError {
    Parse(ParseError),
    Config(ConfigError),
    Message(MessageError),
}

impl fmt::Display for FormError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormError::Parse(e) => write!(f, "Parse error: {}", e),
            FormError::Config(e) => write!(f, "Configuration error: {}", e),
            FormError::Message(e) => write!(f, "Message error: {}", e),
        }
    }
}

impl std::error::Error for FormError {}
