use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::enums::Reason;
use crate::messages::MessageCatalog;

// ─── Rules ──────────────────────────────────────────────────────────────────

/// A validation rule as explicit immutable configuration.
///
/// Every parameter — bounds, regex source, referenced field names — is
/// carried as data on the variant, never as captured closure state. This
/// keeps rules serializable and comparable, so an active rule set can be
/// inspected, persisted, and asserted on in tests.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Rule {
    /// Fails on null or the empty string. Boolean values never fail:
    /// `false` is a legitimate checkbox state, not an absence.
    Required,
    /// Minimum string length in chars. Passes on absent values.
    MinLength(usize),
    /// Maximum string length in chars. Passes on absent values.
    MaxLength(usize),
    /// Standard email shape. Passes on absent values.
    Email,
    /// Regex match (unanchored, like the `regex` crate's `is_match`).
    /// Passes on absent values.
    Pattern(String),
    /// Inclusive numeric bounds. Passes on null; a present non-numeric
    /// value fails rather than faulting evaluation.
    Range(f64, f64),
    /// Cross-field equality of two sibling fields. Only valid in a group's
    /// rule list; suppressed while either side is pristine.
    MatchFields(String, String),
}

impl Rule {
    /// The failure reason this rule reports when it does not pass.
    pub fn reason(&self) -> Reason {
        match self {
            Rule::Required => Reason::Required,
            Rule::MinLength(_) => Reason::MinLength,
            Rule::MaxLength(_) => Reason::MaxLength,
            Rule::Email => Reason::Email,
            Rule::Pattern(_) => Reason::Pattern,
            Rule::Range(_, _) => Reason::Range,
            Rule::MatchFields(_, _) => Reason::Match,
        }
    }

    /// Group rules evaluate against a group's sub-field snapshot rather
    /// than a single value.
    pub fn is_group_rule(&self) -> bool {
        matches!(self, Rule::MatchFields(_, _))
    }
}

// ─── Fields and groups ──────────────────────────────────────────────────────

/// A named value slot with its declared rule list.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldSpec {
    #[serde(rename = "field")]
    pub name: String,
    /// Initial value; also the value restored by `Engine::reset`.
    #[serde(default)]
    pub initial: Value,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rules: Vec<Rule>,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, initial: Value, rules: Vec<Rule>) -> FieldSpec {
        FieldSpec {
            name: name.into(),
            initial,
            rules,
        }
    }
}

/// An ordered collection of named fields and nested groups, with
/// group-scoped cross-field rules.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GroupSpec {
    #[serde(rename = "group")]
    pub name: String,
    pub children: Vec<Node>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rules: Vec<Rule>,
}

impl GroupSpec {
    pub fn new(name: impl Into<String>, children: Vec<Node>, rules: Vec<Rule>) -> GroupSpec {
        GroupSpec {
            name: name.into(),
            children,
            rules,
        }
    }
}

/// A schema tree node: either a field or a nested group.
///
/// Untagged: a mapping with `children` is a group, otherwise a field.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Node {
    Group(GroupSpec),
    Field(FieldSpec),
}

impl Node {
    pub fn name(&self) -> &str {
        match self {
            Node::Group(g) => &g.name,
            Node::Field(f) => &f.name,
        }
    }
}

impl From<FieldSpec> for Node {
    fn from(spec: FieldSpec) -> Node {
        Node::Field(spec)
    }
}

impl From<GroupSpec> for Node {
    fn from(spec: GroupSpec) -> Node {
        Node::Group(spec)
    }
}

// ─── Triggers ───────────────────────────────────────────────────────────────

/// One arm of a trigger table: controller value → rule list for the target.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TriggerArm {
    pub value: Value,
    #[serde(default)]
    pub rules: Vec<Rule>,
}

/// Declarative rule-reconfiguration table.
///
/// Whenever `controller`'s value changes, `target`'s active rule set is
/// re-derived: the first arm whose value deep-equals the controller's new
/// value wins, else `otherwise`. Activation is applied before the report
/// for that same event is computed — never stale activation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Trigger {
    /// Dotted path of the field whose value drives the reconfiguration.
    pub controller: String,
    /// Dotted path of the field whose active rules are replaced.
    pub target: String,
    #[serde(default)]
    pub when: Vec<TriggerArm>,
    #[serde(default)]
    pub otherwise: Vec<Rule>,
}

// ─── Schema document ────────────────────────────────────────────────────────

/// A complete declared schema: the field tree, root-level cross-field
/// rules, the trigger table, and the message catalog.
///
/// Constructed programmatically or parsed from YAML via
/// [`parse`](crate::parse::parse). Declared once; field values and rule
/// activation mutate on the [`Engine`](crate::engine::Engine), never here.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SchemaDoc {
    pub form: Vec<Node>,
    /// Cross-field rules scoped to the root group; reported under the
    /// empty path `""`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rules: Vec<Rule>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub triggers: Vec<Trigger>,
    #[serde(default, skip_serializing_if = "MessageCatalog::is_empty")]
    pub messages: MessageCatalog,
}

impl SchemaDoc {
    pub fn new(form: Vec<Node>) -> SchemaDoc {
        SchemaDoc {
            form,
            rules: Vec::new(),
            triggers: Vec::new(),
            messages: MessageCatalog::new(),
        }
    }

    /// All declared fields as (dotted path, spec) pairs in declaration order.
    pub(crate) fn flatten_fields(&self) -> Vec<(String, &FieldSpec)> {
        let mut out = Vec::new();
        collect_fields(&self.form, "", &mut out);
        out
    }

    /// All declared groups as (dotted path, spec) pairs in declaration
    /// order. The implicit root group is not included.
    pub(crate) fn flatten_groups(&self) -> Vec<(String, &GroupSpec)> {
        let mut out = Vec::new();
        collect_groups(&self.form, "", &mut out);
        out
    }
}

/// Join a group prefix and a child name into a dotted report path.
pub(crate) fn join_path(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", prefix, name)
    }
}

fn collect_fields<'a>(nodes: &'a [Node], prefix: &str, out: &mut Vec<(String, &'a FieldSpec)>) {
    for node in nodes {
        match node {
            Node::Field(f) => out.push((join_path(prefix, &f.name), f)),
            Node::Group(g) => collect_fields(&g.children, &join_path(prefix, &g.name), out),
        }
    }
}

fn collect_groups<'a>(nodes: &'a [Node], prefix: &str, out: &mut Vec<(String, &'a GroupSpec)>) {
    for node in nodes {
        if let Node::Group(g) = node {
            let path = join_path(prefix, &g.name);
            out.push((path.clone(), g));
            collect_groups(&g.children, &path, out);
        }
    }
}
