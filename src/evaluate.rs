//! Report computation.
//!
//! Evaluation is deterministic and side-effect-free: identical (values,
//! active-rule-set, interaction-state) always yields an identical report.
//! All failing reasons are collected per field, not just the first.

use std::collections::BTreeMap;

use crate::engine::FieldState;
use crate::report::ValidationReport;
use crate::rules::{apply_rule, match_fields};
use crate::schema::{Node, Rule, SchemaDoc, join_path};

/// Evaluate the whole schema tree against the current field state.
pub(crate) fn evaluate_doc(
    doc: &SchemaDoc,
    state: &BTreeMap<String, FieldState>,
) -> ValidationReport {
    let mut report = ValidationReport::new();
    eval_children(&doc.form, "", state, &mut report);
    eval_group_rules("", &doc.rules, state, &mut report);
    report
}

fn eval_children(
    children: &[Node],
    prefix: &str,
    state: &BTreeMap<String, FieldState>,
    report: &mut ValidationReport,
) {
    for node in children {
        match node {
            Node::Field(field) => {
                let path = join_path(prefix, &field.name);
                let mut reasons = Vec::new();
                if let Some(st) = state.get(&path) {
                    // Active rules run in declaration order; the report is
                    // a set, so a repeated reason is recorded once.
                    for rule in &st.active {
                        if let Some(reason) = apply_rule(rule, &st.value)
                            && !reasons.contains(&reason)
                        {
                            reasons.push(reason);
                        }
                    }
                }
                report.insert(path, reasons);
            }
            Node::Group(group) => {
                let path = join_path(prefix, &group.name);
                eval_children(&group.children, &path, state, report);
                eval_group_rules(&path, &group.rules, state, report);
            }
        }
    }
}

/// A group's own cross-field failures are reported under the group's own
/// path, independent of child failures. The root group reports under `""`.
fn eval_group_rules(
    group_path: &str,
    rules: &[Rule],
    state: &BTreeMap<String, FieldState>,
    report: &mut ValidationReport,
) {
    let mut reasons = Vec::new();
    for rule in rules {
        if let Rule::MatchFields(a, b) = rule {
            let path_a = join_path(group_path, a);
            let path_b = join_path(group_path, b);
            if let (Some(sa), Some(sb)) = (state.get(&path_a), state.get(&path_b))
                && let Some(reason) = match_fields(&sa.value, !sa.dirty, &sb.value, !sb.dirty)
                && !reasons.contains(&reason)
            {
                reasons.push(reason);
            }
        }
    }
    report.insert(group_path.to_string(), reasons);
}
