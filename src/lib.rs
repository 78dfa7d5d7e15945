//! Declarative validation rule engine for form-like data.
//!
//! A schema declares named fields and nested groups, each carrying
//! parameterized validation rules. The engine owns the mutable runtime
//! state — field values, touched/dirty interaction flags, and the
//! currently-active rule set per field — and recomputes a structured
//! validation report on every input event:
//!
//! ```text
//! parse(yaml) → SchemaDoc → check(doc)       → CheckResult
//!                         → Engine::new(doc) → set_value/mark_touched/…
//!                                            → evaluate() → ValidationReport
//!                                            → messages_for() → String
//! ```
//!
//! Rule failures are data (named reasons collected into the report), never
//! errors; configuration mistakes (duplicate names, dangling references,
//! missing catalog entries) fail fast at construction. Triggers
//! reconfigure a field's active rules whenever a designated controller
//! field's value changes, before the report for that event is computed.
//!
//! # Quick Start
//!
//! ```rust
//! let yaml = r#"
//! form:
//!   - field: email
//!     initial: ""
//!     rules: [required, email]
//!   - field: rating
//!     rules:
//!       - range: [1, 5]
//! messages:
//!   required: "Please enter a value."
//!   email: "Please enter a valid email address."
//!   range: "Please rate between 1 and 5."
//! "#;
//!
//! let mut engine = formcheck::load(yaml).expect("valid schema");
//!
//! // Empty and required → invalid, but messages stay suppressed until
//! // the field is touched.
//! assert!(!engine.report().path_is_valid("email"));
//! assert_eq!(engine.messages_for("email").unwrap(), "");
//!
//! engine.set_value("email", "ada@example.com".into()).unwrap();
//! assert!(engine.report().path_is_valid("email"));
//! ```

pub mod check;
pub mod engine;
pub mod enums;
pub mod error;
pub mod messages;
pub mod parse;
pub mod report;
pub mod rules;
pub mod schema;
pub mod serialize;

pub(crate) mod evaluate;

pub use engine::{Engine, Interaction};
pub use enums::Reason;
pub use error::*;
pub use messages::{MessageCatalog, render_messages};
pub use report::ValidationReport;
pub use schema::*;

// Re-export entry-point functions at the crate root for convenience.
pub use check::check;
pub use parse::parse;
pub use serialize::serialize;

/// Convenience entry point composing parse → check → engine.
///
/// # Errors
///
/// Returns `Err(Vec<FormError>)` if parsing fails or checking finds
/// configuration errors.
///
/// # Example
///
/// ```rust
/// let yaml = r#"
/// form:
///   - field: name
///     rules: [required]
/// messages:
///   required: "Please enter a value."
/// "#;
///
/// match formcheck::load(yaml) {
///     Ok(engine) => println!("{} entries", engine.report().iter().count()),
///     Err(errors) => eprintln!("{} errors", errors.len()),
/// }
/// ```
pub fn load(input: &str) -> Result<Engine, Vec<FormError>> {
    let doc = parse::parse(input).map_err(|e| vec![FormError::Parse(e)])?;
    Engine::new(doc).map_err(|errors| errors.into_iter().map(FormError::Config).collect())
}
