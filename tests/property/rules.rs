use formcheck::enums::Reason;
use formcheck::rules::{
    apply_rule, match_fields, max_length, min_length, range, required, value_eq,
};
use formcheck::schema::Rule;
use proptest::prelude::*;
use serde_json::{Value, json};

fn arb_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        (-1.0e6f64..1.0e6).prop_map(|f| json!(f)),
        "[a-zA-Z0-9 @.]{0,20}".prop_map(Value::from),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    // required fails exactly on emptiness for strings
    #[test]
    fn required_matches_string_emptiness(s in "[a-z ]{0,10}") {
        let value = json!(s);
        let expected = if s.is_empty() { Some(Reason::Required) } else { None };
        prop_assert_eq!(required(&value), expected);
    }

    // booleans never fail required, regardless of their value
    #[test]
    fn required_never_fails_on_booleans(b in any::<bool>()) {
        prop_assert_eq!(required(&json!(b)), None);
    }

    // minLength fails iff the char count is short and the value non-empty
    #[test]
    fn min_length_matches_char_count(s in "[a-zA-Zäöü]{0,12}", n in 0usize..12) {
        let value = json!(s.clone());
        let expected = if !s.is_empty() && s.chars().count() < n {
            Some(Reason::MinLength)
        } else {
            None
        };
        prop_assert_eq!(min_length(n, &value), expected);
    }

    // maxLength mirrors minLength on the other bound
    #[test]
    fn max_length_matches_char_count(s in "[a-zA-Z]{0,12}", n in 0usize..12) {
        let value = json!(s.clone());
        let expected = if !s.is_empty() && s.chars().count() > n {
            Some(Reason::MaxLength)
        } else {
            None
        };
        prop_assert_eq!(max_length(n, &value), expected);
    }

    // range is total: any value, any bounds, no panic; finite numbers
    // inside the bounds pass
    #[test]
    fn range_is_total_and_accepts_in_bounds(value in arb_value(), a in -100.0f64..100.0, b in -100.0f64..100.0) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let outcome = range(lo, hi, &value);
        match value.as_f64() {
            Some(n) if n >= lo && n <= hi => prop_assert_eq!(outcome, None),
            _ => {}
        }
    }

    // matchFields is symmetric in its two sides
    #[test]
    fn match_fields_symmetry(
        a in arb_value(),
        b in arb_value(),
        ap in any::<bool>(),
        bp in any::<bool>(),
    ) {
        prop_assert_eq!(
            match_fields(&a, ap, &b, bp),
            match_fields(&b, bp, &a, ap)
        );
    }

    // matchFields passes whenever at least one side is pristine
    #[test]
    fn match_fields_suppressed_while_pristine(a in arb_value(), b in arb_value()) {
        prop_assert_eq!(match_fields(&a, true, &b, false), None);
        prop_assert_eq!(match_fields(&a, false, &b, true), None);
        prop_assert_eq!(match_fields(&a, true, &b, true), None);
    }

    // value equality is reflexive, so a field always matches itself
    #[test]
    fn value_eq_is_reflexive(v in arb_value()) {
        prop_assert!(value_eq(&v, &v));
        prop_assert_eq!(match_fields(&v, false, &v, false), None);
    }

    // every single-field rule is total over arbitrary values
    #[test]
    fn single_field_rules_are_total(value in arb_value(), n in 0usize..20) {
        for rule in [
            Rule::Required,
            Rule::MinLength(n),
            Rule::MaxLength(n),
            Rule::Email,
            Rule::Pattern("^[0-9]+$".to_string()),
            Rule::Range(1.0, 5.0),
        ] {
            let _ = apply_rule(&rule, &value);
        }
    }
}
