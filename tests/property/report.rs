use formcheck::engine::Engine;
use formcheck::enums::Reason;
use formcheck::messages::MessageCatalog;
use formcheck::report::ValidationReport;
use formcheck::schema::{FieldSpec, GroupSpec, Rule, SchemaDoc};
use proptest::prelude::*;
use serde_json::json;

fn small_schema() -> SchemaDoc {
    let mut doc = SchemaDoc::new(vec![
        FieldSpec::new("a", json!(""), vec![Rule::Required]).into(),
        FieldSpec::new("b", json!(""), vec![Rule::MinLength(2)]).into(),
        GroupSpec::new(
            "g",
            vec![
                FieldSpec::new("c", json!(""), vec![]).into(),
                FieldSpec::new("d", json!(""), vec![]).into(),
            ],
            vec![Rule::MatchFields("c".to_string(), "d".to_string())],
        )
        .into(),
    ]);
    doc.messages = MessageCatalog::new()
        .with(Reason::Required, "Please enter a value.")
        .with(Reason::MinLength, "The value is too short.")
        .with(Reason::Match, "The values do not match.");
    doc
}

const FIELDS: [&str; 4] = ["a", "b", "g.c", "g.d"];

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    // After any event sequence, pull evaluation is deterministic and
    // agrees with the engine's stored report.
    #[test]
    fn evaluation_is_deterministic(
        ops in proptest::collection::vec((0usize..4, "[a-z@. ]{0,8}"), 0..12),
    ) {
        let mut engine = Engine::new(small_schema()).unwrap();
        for (idx, value) in ops {
            engine.set_value(FIELDS[idx], json!(value)).unwrap();
        }
        let first = engine.evaluate();
        let second = engine.evaluate();
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(&first, engine.report());
    }

    // Reports survive a JSON round-trip unchanged.
    #[test]
    fn report_round_trips_through_json(
        ops in proptest::collection::vec((0usize..4, "[a-z@. ]{0,8}"), 0..12),
    ) {
        let mut engine = Engine::new(small_schema()).unwrap();
        for (idx, value) in ops {
            engine.set_value(FIELDS[idx], json!(value)).unwrap();
        }
        let report = engine.evaluate();
        let encoded = serde_json::to_string(&report).unwrap();
        let decoded: ValidationReport = serde_json::from_str(&encoded).unwrap();
        prop_assert_eq!(report, decoded);
    }

    // The report entry for a single-rule field agrees with direct rule
    // application.
    #[test]
    fn report_agrees_with_direct_rule_application(s in "[a-z]{0,4}") {
        let mut engine = Engine::new(small_schema()).unwrap();
        engine.set_value("a", json!(s.clone())).unwrap();
        prop_assert_eq!(engine.report().path_is_valid("a"), !s.is_empty());
    }

    // The group's cross-field entry fails exactly when both children are
    // dirty and differ.
    #[test]
    fn group_entry_tracks_both_children(c in "[a-z]{0,3}", d in "[a-z]{0,3}") {
        let mut engine = Engine::new(small_schema()).unwrap();
        engine.set_value("g.c", json!(c.clone())).unwrap();
        engine.set_value("g.d", json!(d.clone())).unwrap();
        prop_assert_eq!(engine.report().path_is_valid("g"), c == d);
    }
}
