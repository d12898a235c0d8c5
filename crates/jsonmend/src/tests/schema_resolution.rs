//! Unit coverage for the effective-schema view.

use serde_json::json;

use crate::{expand, Schema};

#[test]
fn all_of_merges_left_to_right() {
    let schema = json!({
        "properties": {"a": {"type": "number", "default": 1}},
        "required": ["a"],
        "allOf": [
            {
                "properties": {
                    "a": {"type": "number", "default": 10},
                    "b": {"type": "string", "default": "b"},
                },
                "required": ["c"],
            },
            {"properties": {"c": {"type": "boolean"}}},
        ],
    });
    let schema = Schema::new(&schema);
    let eff = schema.resolve();

    assert!(eff.all_of_merged());
    // Later members overwrite property schemas.
    assert_eq!(
        eff.property_schema("a").default_value(),
        Some(&json!(10))
    );
    // Required is a set union.
    assert!(eff.is_required("a"));
    assert!(eff.is_required("c"));
    assert!(!eff.is_required("b"));
    // Property order: outer first, then members in order.
    let names: Vec<_> = eff.properties().map(|(name, _)| name).collect();
    assert_eq!(names, ["a", "b", "c"]);
}

#[test]
fn all_of_default_is_last_wins() {
    let schema = json!({
        "default": {"from": "outer"},
        "allOf": [
            {"default": {"from": "first"}},
            {"default": {"from": "second"}},
        ],
    });
    let schema = Schema::new(&schema);
    assert_eq!(
        schema.resolve().default_value(),
        Some(&json!({"from": "second"}))
    );

    // And without members the outer default stands untouched.
    let plain = json!({"default": 3, "allOf": []});
    let plain = Schema::new(&plain);
    assert_eq!(plain.resolve().default_value(), Some(&json!(3)));
    assert!(!plain.resolve().all_of_merged());
}

#[test]
fn any_of_and_one_of_pass_through_undisambiguated() {
    // Neither branch is chosen; only the surface of the outer schema acts.
    let schema = json!({
        "anyOf": [{"type": "string"}, {"type": "number"}],
        "oneOf": [{"properties": {"x": {"type": "number"}}}],
    });
    assert_eq!(expand(&schema, ""), Some(serde_json::Value::Null));
    assert_eq!(expand(&schema, "{\"x\":1}"), Some(json!({"x": 1})));
}

#[test]
fn pattern_properties_match_in_document_order() {
    let schema = json!({"patternProperties": {
        "^a": {"type": "number", "default": 1},
        "a$": {"type": "number", "default": 2},
    }});
    let schema_view = Schema::new(&schema);
    let eff = schema_view.resolve();
    // "alpha" matches both patterns; the first declared wins.
    assert_eq!(
        eff.property_schema("alpha").default_value(),
        Some(&json!(1))
    );
    assert_eq!(eff.property_schema("beta").default_value(), Some(&json!(2)));
    assert!(eff.is_known("alpha"));
    assert!(!eff.is_known("nope"));
}

#[test]
fn uncompilable_patterns_are_skipped() {
    let schema = json!({"patternProperties": {
        "([unclosed": {"type": "number", "default": 9},
        "^ok": {"type": "number", "default": 1},
    }});
    let eff = Schema::new(&schema).resolve();
    assert!(eff.is_known("ok_key"));
    assert_eq!(eff.property_schema("([unclosed").default_value(), None);
}

#[test]
fn items_forms() {
    let uniform = json!({"items": {"type": "string"}});
    let eff = Schema::new(&uniform).resolve();
    assert_eq!(eff.item_schema(0).first_type(), Some("string"));
    assert_eq!(eff.item_schema(99).first_type(), Some("string"));

    let tuple = json!({"items": [{"type": "string"}, {"type": "number"}]});
    let eff = Schema::new(&tuple).resolve();
    assert_eq!(eff.item_schema(0).first_type(), Some("string"));
    assert_eq!(eff.item_schema(1).first_type(), Some("number"));
    assert_eq!(eff.item_schema(2).first_type(), None);

    let self_ref = json!({"items": {"$ref": "#"}});
    let eff = Schema::new(&self_ref).resolve();
    assert_eq!(eff.item_schema(0).first_type(), None);
    assert_eq!(eff.item_schema(0).default_value(), None);

    // Any other `$ref` degrades to the empty schema the same way.
    let external = json!({"items": {"$ref": "https://example.com/other.json"}});
    let eff = Schema::new(&external).resolve();
    assert_eq!(eff.item_schema(0).first_type(), None);
}

#[test]
fn additional_properties_is_only_false_when_literal_false() {
    let tight = json!({"additionalProperties": false});
    assert!(!Schema::new(&tight).resolve().additional_properties_allowed());

    for schema in [json!({}), json!({"additionalProperties": true}), json!({"additionalProperties": {"type": "string"}})] {
        assert!(Schema::new(&schema).resolve().additional_properties_allowed(), "{schema}");
    }
}

#[test]
fn boolean_and_non_object_schemas_behave_as_empty() {
    for schema in [json!(true), json!(false), json!(null), json!([1, 2])] {
        assert_eq!(expand(&schema, "{\"a\":1}"), Some(json!({"a": 1})), "{schema}");
        assert_eq!(expand(&schema, ""), Some(serde_json::Value::Null), "{schema}");
    }
}
