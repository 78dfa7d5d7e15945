#![no_main]

use arbitrary::{Arbitrary, Unstructured};
use formcheck::rules::{apply_rule, match_fields};
use formcheck::schema::Rule;
use libfuzzer_sys::fuzz_target;
use serde_json::Value;

/// Generate an arbitrary rule from fuzzer bytes.
fn arbitrary_rule(u: &mut Unstructured<'_>) -> arbitrary::Result<Rule> {
    Ok(match u.int_in_range(0..=6)? {
        0 => Rule::Required,
        1 => Rule::MinLength(usize::arbitrary(u)? % 1024),
        2 => Rule::MaxLength(usize::arbitrary(u)? % 1024),
        3 => Rule::Email,
        4 => Rule::Pattern(String::arbitrary(u)?),
        5 => Rule::Range(f64::arbitrary(u)?, f64::arbitrary(u)?),
        _ => Rule::MatchFields(String::arbitrary(u)?, String::arbitrary(u)?),
    })
}

/// Generate a simple arbitrary JSON value from fuzzer bytes.
fn arbitrary_value(u: &mut Unstructured<'_>) -> arbitrary::Result<Value> {
    match u.int_in_range(0..=4)? {
        0 => Ok(Value::Null),
        1 => Ok(Value::Bool(bool::arbitrary(u)?)),
        2 => {
            let n = f64::arbitrary(u)?;
            Ok(serde_json::Number::from_f64(n)
                .map(Value::Number)
                .unwrap_or(Value::Null))
        }
        3 => Ok(Value::String(String::arbitrary(u)?)),
        _ => Ok(Value::Null),
    }
}

fuzz_target!(|data: &[u8]| {
    let mut u = Unstructured::new(data);

    let rule = match arbitrary_rule(&mut u) {
        Ok(r) => r,
        Err(_) => return,
    };

    let value = match arbitrary_value(&mut u) {
        Ok(v) => v,
        Err(_) => return,
    };

    // Evaluation must be total: no rule/value combination may panic.
    let _ = apply_rule(&rule, &value);

    if let Ok(other) = arbitrary_value(&mut u) {
        let outcome = match_fields(&value, false, &other, false);
        assert_eq!(outcome, match_fields(&other, false, &value, false));
    }
});
