//! End-to-end tests for JSON-driven engine configuration.

#![cfg(feature = "config")]

use std::sync::Arc;

use logmask::{
    Error, Level, LogEvent, MaskingConfig, MaskingMode, OperatorRegistry, PatternMaskingOperator,
    PropertyValue, ScalarValue,
};

fn string_property(event: &LogEvent, name: &str) -> String {
    match event.property(name) {
        Some(PropertyValue::Scalar(ScalarValue::String(text))) => text.clone(),
        other => panic!("expected a string property named {name}, got {other:?}"),
    }
}

#[test]
fn test_full_config_round_trip() {
    let config = MaskingConfig::from_json_str(
        r#"{
            "mode": "globally",
            "mask_value": "[HIDDEN]",
            "operators": [
                { "name": "email" },
                { "name": "credit-card", "settings": { "full_mask": false } }
            ],
            "mask_properties": [
                { "name": "*token*", "options": { "show_last": 4, "wildcard_match": true } }
            ],
            "exclude_properties": ["RequestId"]
        }"#,
    )
    .unwrap();
    let engine = config
        .build_engine(&OperatorRegistry::with_defaults())
        .unwrap();

    let event = LogEvent::new(
        Level::Info,
        "{Email} {ApiToken} {RequestId}",
        vec![
            (
                "Email".to_string(),
                PropertyValue::string("test@email.com"),
            ),
            (
                "ApiToken".to_string(),
                PropertyValue::string("sk_live_notarealkey1234"),
            ),
            (
                "RequestId".to_string(),
                PropertyValue::string("req-1@trace"),
            ),
        ],
    );

    let masked = engine.mask(event);
    assert_eq!(string_property(&masked, "Email"), "[HIDDEN]");
    assert_eq!(
        string_property(&masked, "ApiToken"),
        "*******************1234"
    );
    assert_eq!(string_property(&masked, "RequestId"), "req-1@trace");
}

#[test]
fn test_configured_regex_operator_masks() {
    let config = MaskingConfig::from_json_str(
        r#"{ "operators": [{ "name": "regex", "settings": { "pattern": "ssn-\\d{4}" } }] }"#,
    )
    .unwrap();
    let engine = config
        .build_engine(&OperatorRegistry::with_defaults())
        .unwrap();

    let event = LogEvent::new(
        Level::Info,
        "{Note}",
        vec![(
            "Note".to_string(),
            PropertyValue::string("citizen ssn-1234 on file"),
        )],
    );

    let masked = engine.mask(event);
    assert_eq!(
        string_property(&masked, "Note"),
        "citizen ***MASKED*** on file"
    );
}

#[test]
fn test_in_area_mode_from_config_requires_an_area() {
    let config = MaskingConfig::from_json_str(r#"{ "mode": "in-area" }"#).unwrap();
    assert_eq!(config.mode, MaskingMode::InArea);

    let engine = config
        .build_engine(&OperatorRegistry::with_defaults())
        .unwrap();
    let event = LogEvent::new(
        Level::Info,
        "{Email}",
        vec![(
            "Email".to_string(),
            PropertyValue::string("test@email.com"),
        )],
    );

    let masked = engine.mask(event);
    assert_eq!(string_property(&masked, "Email"), "test@email.com");
}

#[test]
fn test_empty_mask_value_is_rejected_at_build() {
    let config = MaskingConfig::from_json_str(r#"{ "mask_value": "" }"#).unwrap();
    let outcome = config.build_engine(&OperatorRegistry::with_defaults());
    assert!(matches!(outcome, Err(Error::EmptyMaskValue)));
}

#[test]
fn test_unknown_operator_is_rejected_before_building() {
    let config =
        MaskingConfig::from_json_str(r#"{ "operators": [{ "name": "no-such" }] }"#).unwrap();
    let outcome = config.build_engine(&OperatorRegistry::with_defaults());
    assert!(matches!(outcome, Err(Error::UnknownOperator(name)) if name == "no-such"));
}

#[test]
fn test_registered_custom_operator_is_usable_from_config() {
    let mut registry = OperatorRegistry::with_defaults();
    registry.register("order-id", |_settings| {
        Ok(Arc::new(PatternMaskingOperator::new(r"ORD-\d{6}")?))
    });

    let config =
        MaskingConfig::from_json_str(r#"{ "operators": [{ "name": "order-id" }] }"#).unwrap();
    let engine = config.build_engine(&registry).unwrap();

    let event = LogEvent::new(
        Level::Info,
        "{Order}",
        vec![(
            "Order".to_string(),
            PropertyValue::string("shipping ORD-123456"),
        )],
    );
    let masked = engine.mask(event);
    assert_eq!(string_property(&masked, "Order"), "shipping ***MASKED***");
}
