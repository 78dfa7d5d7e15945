//! The stateful validation engine.
//!
//! Single-threaded, synchronous, event-driven: every operation runs to
//! completion before the next external event is processed. A rule-activation
//! change triggered by a controller field's value change is applied before
//! the affected field's report is recomputed for that same event — never
//! stale activation.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

use crate::check::{check, runtime_rules_error};
use crate::error::{ConfigError, FormError, MessageError};
use crate::evaluate::evaluate_doc;
use crate::messages::{MessageCatalog, render_messages};
use crate::report::ValidationReport;
use crate::rules::value_eq;
use crate::schema::{Node, Rule, SchemaDoc, join_path};

/// Interaction flags for a single field.
///
/// Touched/dirty gate message display, never validity — with the one
/// exception that cross-field `matchFields` rules suppress themselves
/// while either side is pristine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interaction {
    pub touched: bool,
    pub dirty: bool,
}

impl Interaction {
    pub fn pristine(self) -> bool {
        !self.dirty
    }
}

/// Mutable per-field runtime state.
#[derive(Clone, Debug)]
pub(crate) struct FieldState {
    pub(crate) value: Value,
    pub(crate) touched: bool,
    pub(crate) dirty: bool,
    /// The subset of rules currently in effect; starts as the declared
    /// list and may be replaced by triggers or `set_field_rules`.
    pub(crate) active: Vec<Rule>,
}

type OnChange = Box<dyn FnMut(&ValidationReport)>;

/// Owns the declared schema plus all mutable runtime state: field values,
/// interaction flags, active rule sets, and the last computed report.
pub struct Engine {
    doc: SchemaDoc,
    state: BTreeMap<String, FieldState>,
    report: ValidationReport,
    on_change: Option<OnChange>,
}

impl Engine {
    /// Build an engine from a checked schema.
    ///
    /// # Errors
    ///
    /// Fails fast with every configuration error `check` finds; a broken
    /// schema never produces a half-working engine.
    pub fn new(doc: SchemaDoc) -> Result<Engine, Vec<ConfigError>> {
        let result = check(&doc);
        if !result.is_valid() {
            return Err(result.errors);
        }
        let state = initial_state(&doc);
        let report = evaluate_doc(&doc, &state);
        Ok(Engine {
            doc,
            state,
            report,
            on_change: None,
        })
    }

    // ─── Inbound events ─────────────────────────────────────────────────

    /// Set a field's value, marking it dirty.
    ///
    /// Applies any trigger whose controller is this field, then recomputes
    /// the report; if the report changed, the registered change callback
    /// is invoked with it.
    pub fn set_value(&mut self, field: &str, value: Value) -> Result<(), ConfigError> {
        let Some(st) = self.state.get_mut(field) else {
            return Err(ConfigError::unknown_field(field));
        };
        st.value = value;
        st.dirty = true;
        self.apply_triggers(field);
        self.refresh(true);
        Ok(())
    }

    /// Mark a field touched. Interaction gates messages, not validity, so
    /// the report is unaffected.
    pub fn mark_touched(&mut self, field: &str) -> Result<(), ConfigError> {
        let Some(st) = self.state.get_mut(field) else {
            return Err(ConfigError::unknown_field(field));
        };
        st.touched = true;
        Ok(())
    }

    /// Mark a field dirty without changing its value.
    ///
    /// Dirtiness can lift `matchFields` suppression, so the report is
    /// recomputed; only value changes push to the callback.
    pub fn mark_dirty(&mut self, field: &str) -> Result<(), ConfigError> {
        let Some(st) = self.state.get_mut(field) else {
            return Err(ConfigError::unknown_field(field));
        };
        st.dirty = true;
        self.refresh(false);
        Ok(())
    }

    /// Replace a field's active rule set.
    ///
    /// The installed list is held to the same configuration rules as a
    /// declared one: no group rules, patterns must compile, and every
    /// producible reason needs a catalog entry.
    pub fn set_field_rules(&mut self, field: &str, rules: Vec<Rule>) -> Result<(), ConfigError> {
        if !self.state.contains_key(field) {
            return Err(ConfigError::unknown_field(field));
        }
        if let Some(err) = runtime_rules_error(field, &rules, &self.doc.messages) {
            return Err(err);
        }
        if let Some(st) = self.state.get_mut(field) {
            st.active = rules;
        }
        self.refresh(true);
        Ok(())
    }

    /// Empty a field's active rule set.
    pub fn clear_field_rules(&mut self, field: &str) -> Result<(), ConfigError> {
        self.set_field_rules(field, Vec::new())
    }

    /// Register the single report-change callback (push contract).
    pub fn on_change(&mut self, callback: impl FnMut(&ValidationReport) + 'static) {
        self.on_change = Some(Box::new(callback));
    }

    /// Restore every field to its declared initial value, untouched and
    /// pristine, and every active rule set to the declared list.
    ///
    /// Does not fire the change callback: a reset is a rebuild, not an
    /// input event.
    pub fn reset(&mut self) {
        self.state = initial_state(&self.doc);
        self.report = evaluate_doc(&self.doc, &self.state);
    }

    // ─── Outbound ───────────────────────────────────────────────────────

    /// Recompute the report from current state (pull contract). Pure:
    /// calling twice with no intervening mutation yields equal reports.
    pub fn evaluate(&self) -> ValidationReport {
        evaluate_doc(&self.doc, &self.state)
    }

    /// The last computed report.
    pub fn report(&self) -> &ValidationReport {
        &self.report
    }

    /// The current nested value snapshot, fields in declaration order.
    pub fn values(&self) -> Value {
        collect_values(&self.doc.form, "", &self.state)
    }

    /// User-facing messages for one field, derived from the last computed
    /// report and the schema's catalog.
    pub fn messages_for(&self, field: &str) -> Result<String, FormError> {
        let Some(interaction) = self.interaction(field) else {
            return Err(FormError::Config(ConfigError::unknown_field(field)));
        };
        render_messages(interaction, self.report.failures(field), &self.doc.messages).map_err(
            |e| {
                FormError::Message(MessageError {
                    path: Some(field.to_string()),
                    ..e
                })
            },
        )
    }

    // ─── Accessors ──────────────────────────────────────────────────────

    pub fn value(&self, field: &str) -> Option<&Value> {
        self.state.get(field).map(|st| &st.value)
    }

    pub fn interaction(&self, field: &str) -> Option<Interaction> {
        self.state.get(field).map(|st| Interaction {
            touched: st.touched,
            dirty: st.dirty,
        })
    }

    pub fn active_rules(&self, field: &str) -> Option<&[Rule]> {
        self.state.get(field).map(|st| st.active.as_slice())
    }

    pub fn catalog(&self) -> &MessageCatalog {
        &self.doc.messages
    }

    pub fn schema(&self) -> &SchemaDoc {
        &self.doc
    }

    // ─── Internals ──────────────────────────────────────────────────────

    /// Re-derive the active rules of every trigger target whose controller
    /// is the changed field. First arm whose value deep-equals the
    /// controller's current value wins, else the trigger's `otherwise`.
    fn apply_triggers(&mut self, changed: &str) {
        let mut updates: Vec<(String, Vec<Rule>)> = Vec::new();
        for trigger in &self.doc.triggers {
            if trigger.controller != changed {
                continue;
            }
            let Some(controller) = self.state.get(&trigger.controller) else {
                continue;
            };
            let rules = trigger
                .when
                .iter()
                .find(|arm| value_eq(&arm.value, &controller.value))
                .map(|arm| arm.rules.clone())
                .unwrap_or_else(|| trigger.otherwise.clone());
            updates.push((trigger.target.clone(), rules));
        }
        for (target, rules) in updates {
            if let Some(st) = self.state.get_mut(&target) {
                st.active = rules;
            }
        }
    }

    /// Recompute the report; when it differs from the previous one and
    /// `push` is set, invoke the registered callback.
    fn refresh(&mut self, push: bool) {
        let next = evaluate_doc(&self.doc, &self.state);
        if next == self.report {
            return;
        }
        self.report = next;
        if push && let Some(mut callback) = self.on_change.take() {
            callback(&self.report);
            self.on_change = Some(callback);
        }
    }
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("doc", &self.doc)
            .field("state", &self.state)
            .field("report", &self.report)
            .field("on_change", &self.on_change.is_some())
            .finish()
    }
}

fn initial_state(doc: &SchemaDoc) -> BTreeMap<String, FieldState> {
    doc.flatten_fields()
        .into_iter()
        .map(|(path, field)| {
            let state = FieldState {
                value: field.initial.clone(),
                touched: false,
                dirty: false,
                active: field.rules.clone(),
            };
            (path, state)
        })
        .collect()
}

fn collect_values(children: &[Node], prefix: &str, state: &BTreeMap<String, FieldState>) -> Value {
    let mut map = serde_json::Map::new();
    for node in children {
        match node {
            Node::Field(field) => {
                let path = join_path(prefix, &field.name);
                let value = state
                    .get(&path)
                    .map(|st| st.value.clone())
                    .unwrap_or(Value::Null);
                map.insert(field.name.clone(), value);
            }
            Node::Group(group) => {
                let path = join_path(prefix, &group.name);
                map.insert(
                    group.name.clone(),
                    collect_values(&group.children, &path, state),
                );
            }
        }
    }
    Value::Object(map)
}
