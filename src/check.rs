//! Schema configuration checking against rules C-001 through C-008.
//!
//! Returns **all** errors, not just the first. Checking does not modify
//! the schema. Configuration errors are programmer faults and surface
//! fail-fast: [`Engine::new`](crate::engine::Engine::new) refuses a schema
//! that does not check clean.

use regex::Regex;
use std::collections::{BTreeSet, HashSet};

use crate::error::{CheckResult, ConfigError};
use crate::messages::MessageCatalog;
use crate::schema::{Node, Rule, SchemaDoc, join_path};

/// Check a schema document against all configuration rules (C-001..C-008).
/// Returns a CheckResult containing all errors found.
pub fn check(doc: &SchemaDoc) -> CheckResult {
    let mut errors = Vec::new();

    c001_unique_names(doc, &mut errors);
    c002_match_fields_siblings(doc, &mut errors);
    c003_trigger_refs(doc, &mut errors);
    c004_catalog_coverage(doc, &mut errors);
    c005_pattern_regexes(doc, &mut errors);
    c006_bounds(doc, &mut errors);
    c007_rule_placement(doc, &mut errors);
    c008_name_syntax(doc, &mut errors);

    CheckResult { errors }
}

// ─── Helper: every rule list in the document ─────────────────────────────────

#[derive(Clone, Copy, PartialEq)]
enum ListKind {
    /// A field's declared rules, or a trigger-installed list — single-field
    /// rules only.
    Field,
    /// A group's own rules — cross-field rules only.
    Group,
}

struct RuleList<'a> {
    path: String,
    rules: &'a [Rule],
    kind: ListKind,
}

fn rule_lists(doc: &SchemaDoc) -> Vec<RuleList<'_>> {
    let mut lists = vec![RuleList {
        path: String::new(),
        rules: &doc.rules,
        kind: ListKind::Group,
    }];
    for (path, field) in doc.flatten_fields() {
        lists.push(RuleList {
            path,
            rules: &field.rules,
            kind: ListKind::Field,
        });
    }
    for (path, group) in doc.flatten_groups() {
        lists.push(RuleList {
            path,
            rules: &group.rules,
            kind: ListKind::Group,
        });
    }
    for (i, trigger) in doc.triggers.iter().enumerate() {
        for (j, arm) in trigger.when.iter().enumerate() {
            lists.push(RuleList {
                path: format!("triggers[{}].when[{}]", i, j),
                rules: &arm.rules,
                kind: ListKind::Field,
            });
        }
        lists.push(RuleList {
            path: format!("triggers[{}].otherwise", i),
            rules: &trigger.otherwise,
            kind: ListKind::Field,
        });
    }
    lists
}

/// Every group in the document as (path, children, own rules), with the
/// implicit root group first.
fn groups(doc: &SchemaDoc) -> Vec<(String, &[Node], &[Rule])> {
    let mut out: Vec<(String, &[Node], &[Rule])> =
        vec![(String::new(), doc.form.as_slice(), doc.rules.as_slice())];
    for (path, group) in doc.flatten_groups() {
        out.push((path, &group.children, &group.rules));
    }
    out
}

// ─── C-001 ──────────────────────────────────────────────────────────────────

fn c001_unique_names(doc: &SchemaDoc, errors: &mut Vec<ConfigError>) {
    for (prefix, children, _) in groups(doc) {
        let mut seen = HashSet::new();
        for child in children {
            if !seen.insert(child.name()) {
                errors.push(ConfigError {
                    code: "C-001".to_string(),
                    path: join_path(&prefix, child.name()),
                    message: format!("duplicate name '{}' within a group", child.name()),
                });
            }
        }
    }
}

// ─── C-002 ──────────────────────────────────────────────────────────────────

fn c002_match_fields_siblings(doc: &SchemaDoc, errors: &mut Vec<ConfigError>) {
    for (prefix, children, rules) in groups(doc) {
        let siblings: HashSet<&str> = children
            .iter()
            .filter_map(|c| match c {
                Node::Field(f) => Some(f.name.as_str()),
                Node::Group(_) => None,
            })
            .collect();
        for rule in rules {
            if let Rule::MatchFields(a, b) = rule {
                for name in [a, b] {
                    if !siblings.contains(name.as_str()) {
                        errors.push(ConfigError {
                            code: "C-002".to_string(),
                            path: prefix.clone(),
                            message: format!(
                                "matchFields references '{}', which is not a sibling field of this group",
                                name
                            ),
                        });
                    }
                }
            }
        }
    }
}

// ─── C-003 ──────────────────────────────────────────────────────────────────

fn c003_trigger_refs(doc: &SchemaDoc, errors: &mut Vec<ConfigError>) {
    let fields: HashSet<String> = doc.flatten_fields().into_iter().map(|(p, _)| p).collect();
    let group_paths: HashSet<String> =
        doc.flatten_groups().into_iter().map(|(p, _)| p).collect();

    for (i, trigger) in doc.triggers.iter().enumerate() {
        for (role, path) in [("controller", &trigger.controller), ("target", &trigger.target)] {
            if !fields.contains(path) {
                let detail = if group_paths.contains(path) {
                    "names a group; triggers reconfigure fields"
                } else {
                    "names an unknown field"
                };
                errors.push(ConfigError {
                    code: "C-003".to_string(),
                    path: format!("triggers[{}].{}", i, role),
                    message: format!("trigger {} '{}' {}", role, path, detail),
                });
            }
        }
    }
}

// ─── C-004 ──────────────────────────────────────────────────────────────────

fn c004_catalog_coverage(doc: &SchemaDoc, errors: &mut Vec<ConfigError>) {
    let mut missing = BTreeSet::new();
    for list in rule_lists(doc) {
        for rule in list.rules {
            let reason = rule.reason();
            if !doc.messages.contains(reason) && missing.insert(reason) {
                errors.push(ConfigError {
                    code: "C-004".to_string(),
                    path: list.path.clone(),
                    message: format!(
                        "producible failure reason '{}' has no message catalog entry",
                        reason
                    ),
                });
            }
        }
    }
}

// ─── C-005 ──────────────────────────────────────────────────────────────────

fn c005_pattern_regexes(doc: &SchemaDoc, errors: &mut Vec<ConfigError>) {
    for list in rule_lists(doc) {
        for rule in list.rules {
            if let Rule::Pattern(pattern) = rule
                && let Err(e) = Regex::new(pattern)
            {
                errors.push(ConfigError {
                    code: "C-005".to_string(),
                    path: list.path.clone(),
                    message: format!("invalid pattern regex '{}': {}", pattern, e),
                });
            }
        }
    }
}

// ─── C-006 ──────────────────────────────────────────────────────────────────

fn c006_bounds(doc: &SchemaDoc, errors: &mut Vec<ConfigError>) {
    for list in rule_lists(doc) {
        for rule in list.rules {
            if let Rule::Range(min, max) = rule
                && min > max
            {
                errors.push(ConfigError {
                    code: "C-006".to_string(),
                    path: list.path.clone(),
                    message: format!("range bounds inverted: min {} > max {}", min, max),
                });
            }
        }
        let min = list.rules.iter().find_map(|r| match r {
            Rule::MinLength(n) => Some(*n),
            _ => None,
        });
        let max = list.rules.iter().find_map(|r| match r {
            Rule::MaxLength(n) => Some(*n),
            _ => None,
        });
        if let (Some(min), Some(max)) = (min, max)
            && min > max
        {
            errors.push(ConfigError {
                code: "C-006".to_string(),
                path: list.path.clone(),
                message: format!("length bounds inverted: minLength {} > maxLength {}", min, max),
            });
        }
    }
}

// ─── C-007 ──────────────────────────────────────────────────────────────────

fn c007_rule_placement(doc: &SchemaDoc, errors: &mut Vec<ConfigError>) {
    for list in rule_lists(doc) {
        for rule in list.rules {
            let misplaced = match list.kind {
                ListKind::Field => rule.is_group_rule(),
                ListKind::Group => !rule.is_group_rule(),
            };
            if misplaced {
                let expected = match list.kind {
                    ListKind::Field => "a single-field rule list",
                    ListKind::Group => "a group rule list",
                };
                errors.push(ConfigError {
                    code: "C-007".to_string(),
                    path: list.path.clone(),
                    message: format!("rule '{}' is not valid in {}", rule.reason(), expected),
                });
            }
        }
    }
}

// ─── C-008 ──────────────────────────────────────────────────────────────────

fn c008_name_syntax(doc: &SchemaDoc, errors: &mut Vec<ConfigError>) {
    for (prefix, children, _) in groups(doc) {
        for child in children {
            let name = child.name();
            if name.is_empty() || name.contains('.') {
                errors.push(ConfigError {
                    code: "C-008".to_string(),
                    path: join_path(&prefix, name),
                    message: format!(
                        "name '{}' is empty or contains '.', which is reserved as the path separator",
                        name
                    ),
                });
            }
        }
    }
}

// ─── Runtime rule installation ──────────────────────────────────────────────

/// Checks applied to a rule list installed on a field at runtime via
/// `set_field_rules`: placement, regex validity, catalog coverage. Returns
/// the first error; the installation is rejected wholesale.
pub(crate) fn runtime_rules_error(
    path: &str,
    rules: &[Rule],
    catalog: &MessageCatalog,
) -> Option<ConfigError> {
    for rule in rules {
        if rule.is_group_rule() {
            return Some(ConfigError {
                code: "C-007".to_string(),
                path: path.to_string(),
                message: format!(
                    "rule '{}' is not valid in a single-field rule list",
                    rule.reason()
                ),
            });
        }
        if let Rule::Pattern(pattern) = rule
            && let Err(e) = Regex::new(pattern)
        {
            return Some(ConfigError {
                code: "C-005".to_string(),
                path: path.to_string(),
                message: format!("invalid pattern regex '{}': {}", pattern, e),
            });
        }
        if !catalog.contains(rule.reason()) {
            return Some(ConfigError {
                code: "C-004".to_string(),
                path: path.to_string(),
                message: format!(
                    "producible failure reason '{}' has no message catalog entry",
                    rule.reason()
                ),
            });
        }
    }
    None
}
