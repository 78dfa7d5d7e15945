//! End-to-end scenario over a complete customer sign-up schema: nested
//! address group, email confirmation group, rating bounds, and a
//! notification preference that controls whether the phone is required.

use formcheck::engine::{Engine, Interaction};
use formcheck::enums::Reason;
use formcheck::messages::render_messages;
use formcheck::parse::parse;
use formcheck::serialize::serialize;
use serde_json::json;

const CUSTOMER_YAML: &str = r#"
form:
  - field: firstName
    initial: ""
    rules:
      - required
      - minLength: 3
  - field: lastName
    initial: ""
    rules:
      - required
      - maxLength: 50
  - field: phone
    initial: ""
  - group: emailGroup
    children:
      - field: email
        initial: ""
        rules: [required, email]
      - field: confirmEmail
        initial: ""
        rules: [required]
    rules:
      - matchFields: [email, confirmEmail]
  - field: notification
    initial: email
  - field: rating
    rules:
      - range: [1, 5]
  - field: sendCatalog
    initial: false
  - group: address
    children:
      - field: addressType
        initial: home
        rules: [required]
      - field: street1
        initial: ""
        rules: [required]
      - field: street2
        initial: ""
      - field: city
        initial: ""
        rules: [required]
      - field: state
        initial: ""
        rules: [required]
      - field: zip
        initial: ""
        rules: [required]
triggers:
  - controller: notification
    target: phone
    when:
      - value: phone
        rules: [required]
    otherwise: []
messages:
  required: "Please enter a value."
  minLength: "The value is too short."
  maxLength: "The value is too long."
  email: "Please enter a valid email address."
  range: "Please rate between 1 and 5."
  match: "The confirmation does not match."
"#;

fn customer_engine() -> Engine {
    formcheck::load(CUSTOMER_YAML).expect("customer schema should load")
}

#[test]
fn initial_report_flags_required_fields_but_shows_no_messages() {
    let engine = customer_engine();
    let report = engine.report();

    assert!(!report.is_valid());
    assert_eq!(report.failures("firstName"), &[Reason::Required]);
    assert_eq!(report.failures("emailGroup.email"), &[Reason::Required]);
    assert_eq!(report.failures("address.street1"), &[Reason::Required]);

    // Defaults hold: addressType is prefilled, the checkbox and the
    // untouched rating are fine, and the pristine confirmation group is
    // suppressed.
    assert!(report.path_is_valid("address.addressType"));
    assert!(report.path_is_valid("sendCatalog"));
    assert!(report.path_is_valid("rating"));
    assert!(report.path_is_valid("emailGroup"));

    // The group itself passes its own rule, but its subtree does not.
    assert!(!report.subtree_is_valid("emailGroup"));
    assert!(!report.subtree_is_valid("address"));

    // Nothing has been touched: every field renders silently.
    assert_eq!(engine.messages_for("firstName").unwrap(), "");
    assert_eq!(engine.messages_for("emailGroup.email").unwrap(), "");
}

#[test]
fn first_name_walks_through_its_rule_set() {
    let mut engine = customer_engine();

    engine.set_value("firstName", json!("Jo")).unwrap();
    assert_eq!(engine.report().failures("firstName"), &[Reason::MinLength]);
    assert_eq!(
        engine.messages_for("firstName").unwrap(),
        "The value is too short."
    );

    engine.set_value("firstName", json!("Joan")).unwrap();
    assert!(engine.report().path_is_valid("firstName"));
    assert_eq!(engine.messages_for("firstName").unwrap(), "");
}

#[test]
fn rating_accepts_the_inclusive_bounds_only() {
    let mut engine = customer_engine();

    engine.set_value("rating", json!(6)).unwrap();
    assert_eq!(engine.report().failures("rating"), &[Reason::Range]);
    assert_eq!(
        engine.messages_for("rating").unwrap(),
        "Please rate between 1 and 5."
    );

    engine.set_value("rating", json!(5)).unwrap();
    assert!(engine.report().path_is_valid("rating"));
}

#[test]
fn notification_preference_drives_phone_requiredness() {
    let mut engine = customer_engine();
    assert!(engine.report().path_is_valid("phone"));

    engine.set_value("notification", json!("phone")).unwrap();
    assert_eq!(engine.report().failures("phone"), &[Reason::Required]);

    engine.set_value("phone", json!("555-1234")).unwrap();
    assert!(engine.report().path_is_valid("phone"));

    engine.set_value("notification", json!("email")).unwrap();
    engine.set_value("phone", json!("")).unwrap();
    assert!(engine.report().path_is_valid("phone"));
}

#[test]
fn email_confirmation_mismatch_reports_under_the_group() {
    let mut engine = customer_engine();

    engine.set_value("emailGroup.email", json!("joan@example.com")).unwrap();
    assert!(engine.report().path_is_valid("emailGroup"));

    engine
        .set_value("emailGroup.confirmEmail", json!("jean@example.com"))
        .unwrap();
    assert_eq!(engine.report().failures("emailGroup"), &[Reason::Match]);

    // Group-level messages render through the free function with an
    // explicit interaction, since groups carry no interaction state.
    let shown = Interaction {
        touched: true,
        dirty: true,
    };
    let rendered = render_messages(
        shown,
        engine.report().failures("emailGroup"),
        engine.catalog(),
    )
    .unwrap();
    assert_eq!(rendered, "The confirmation does not match.");

    engine
        .set_value("emailGroup.confirmEmail", json!("joan@example.com"))
        .unwrap();
    assert!(engine.report().path_is_valid("emailGroup"));
}

#[test]
fn completed_form_is_valid_and_snapshots_for_saving() {
    let mut engine = customer_engine();

    engine.set_value("firstName", json!("Joan")).unwrap();
    engine.set_value("lastName", json!("Watson")).unwrap();
    engine.set_value("emailGroup.email", json!("joan@example.com")).unwrap();
    engine
        .set_value("emailGroup.confirmEmail", json!("joan@example.com"))
        .unwrap();
    engine.set_value("rating", json!(4)).unwrap();
    engine.set_value("sendCatalog", json!(true)).unwrap();
    engine.set_value("address.street1", json!("221B Baker St")).unwrap();
    engine.set_value("address.city", json!("London")).unwrap();
    engine.set_value("address.state", json!("LDN")).unwrap();
    engine.set_value("address.zip", json!("NW1 6XE")).unwrap();

    assert!(engine.report().is_valid());
    assert_eq!(
        engine.values(),
        json!({
            "firstName": "Joan",
            "lastName": "Watson",
            "phone": "",
            "emailGroup": {
                "email": "joan@example.com",
                "confirmEmail": "joan@example.com"
            },
            "notification": "email",
            "rating": 4,
            "sendCatalog": true,
            "address": {
                "addressType": "home",
                "street1": "221B Baker St",
                "street2": "",
                "city": "London",
                "state": "LDN",
                "zip": "NW1 6XE"
            }
        })
    );
}

#[test]
fn reset_returns_to_the_declared_defaults() {
    let mut engine = customer_engine();
    engine.set_value("firstName", json!("Joan")).unwrap();
    engine.set_value("notification", json!("phone")).unwrap();

    engine.reset();

    assert_eq!(engine.value("firstName").unwrap(), &json!(""));
    assert_eq!(engine.value("notification").unwrap(), &json!("email"));
    assert!(engine.active_rules("phone").unwrap().is_empty());
    assert_eq!(engine.report().failures("firstName"), &[Reason::Required]);
    assert_eq!(engine.messages_for("firstName").unwrap(), "");
}

#[test]
fn schema_round_trips_through_yaml() {
    let doc = parse(CUSTOMER_YAML).expect("parse should succeed");
    let yaml = serialize(&doc).expect("serialize should succeed");
    let reparsed = parse(&yaml).expect("round-trip parse should succeed");
    assert_eq!(doc, reparsed);
}
