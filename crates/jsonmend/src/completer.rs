//! Folds a parse tree with a schema into the final JSON value.
//!
//! The completer never rejects a value for violating a constraint; the
//! schema contributes structure and defaults only. Its one refusal is the
//! garbage sentinel: an unterminated object none of whose entries can be
//! tied to the schema completes to nothing rather than to `{}`.

use serde_json::{Map, Value};

use crate::node::{NodeKind, ObjectEntry, ParseNode};
use crate::schema::Schema;

/// Completes `tree` against `schema`.
///
/// Missing object properties are filled from explicit sub-schema
/// defaults, truncated primitives are coerced to their nearest sensible
/// value, and an object-typed schema `default` is deep-merged underneath
/// whatever was parsed.
///
/// Returns `None` only for the garbage sentinel described in the module
/// docs; it is evaluated at the root, nested unrecognised entries are
/// silently dropped.
#[must_use]
pub fn complete(tree: &ParseNode, schema: Schema<'_>) -> Option<Value> {
    if let NodeKind::Object(entries) = &tree.kind {
        if !tree.is_complete() && !entries.is_empty() {
            let eff = schema.resolve();
            let salvageable = entries
                .iter()
                .any(|entry| entry.has_colon || eff.is_known(&entry.key));
            if !salvageable {
                return None;
            }
        }
    }
    Some(complete_value(tree, schema, true))
}

fn complete_value(node: &ParseNode, schema: Schema<'_>, use_type_defaults: bool) -> Value {
    match &node.kind {
        NodeKind::Object(entries) => complete_object(entries, schema),
        NodeKind::Array(elements) => complete_array(elements, schema),
        NodeKind::String(text) => Value::String(text.clone()),
        NodeKind::Number(text) => number_value(text),
        NodeKind::Bool(value) => Value::Bool(*value),
        NodeKind::Null => {
            if schema.allows_null() {
                Value::Null
            } else {
                // The schema's type list rules null out; fall back to the
                // value the schema would have supplied anyway.
                default_for(schema, use_type_defaults)
            }
        }
    }
}

fn complete_object(entries: &[ObjectEntry], schema: Schema<'_>) -> Value {
    let eff = schema.resolve();

    // `{}` (or a bare `{`) means "use your default", verbatim.
    if entries.is_empty() {
        if let Some(default @ Value::Object(_)) = eff.default_value() {
            return default.clone();
        }
    }

    let mut out = Map::new();
    for entry in entries {
        let prop = eff.property_schema(&entry.key);
        let optional = !eff.is_required(&entry.key);
        if let Some(value) = &entry.value {
            out.insert(entry.key.clone(), complete_value(value, prop, optional));
        } else if entry.has_colon {
            out.insert(entry.key.clone(), default_for(prop, optional));
        }
        // Neither colon nor value: a dangling fragment that matched
        // nothing; drop it.
    }

    if let Some(Value::Object(base)) = eff.default_value() {
        out = merge_maps(base, out);
    }

    // Fill-in pass: explicit defaults only, never for required names.
    for (name, sub) in eff.properties() {
        if out.contains_key(name) || eff.is_required(name) {
            continue;
        }
        if let Some(default) = sub.default_value() {
            out.insert(name.to_owned(), default.clone());
        }
    }

    if !eff.additional_properties_allowed() {
        out.retain(|name, _| eff.is_known(name));
    }

    Value::Object(out)
}

fn complete_array(elements: &[ParseNode], schema: Schema<'_>) -> Value {
    let eff = schema.resolve();
    let out = elements
        .iter()
        .enumerate()
        .map(|(index, element)| complete_value(element, eff.item_schema(index), true))
        .collect();
    Value::Array(out)
}

/// Deep merge: parsed keys win over `base`, objects merge key-wise,
/// everything else (arrays included) is replaced wholesale.
fn merge_maps(base: &Map<String, Value>, overlay: Map<String, Value>) -> Map<String, Value> {
    let mut out = base.clone();
    for (key, value) in overlay {
        let merged = match (out.get(&key), value) {
            (Some(Value::Object(under)), Value::Object(over)) => {
                Value::Object(merge_maps(under, over))
            }
            (_, value) => value,
        };
        out.insert(key, merged);
    }
    out
}

/// Parses the numeric slice of a number node, shedding any fragment that
/// cannot be part of a number yet (`1.23e` → `1.23`, `-` → `0`).
fn number_value(text: &str) -> Value {
    let mut slice = text;
    for dangling in ["e+", "e-", "E+", "E-", "e", "E", "."] {
        if let Some(stripped) = slice.strip_suffix(dangling) {
            slice = stripped;
            break;
        }
    }
    if slice.is_empty() || slice == "-" {
        return Value::from(0);
    }
    if let Ok(int) = slice.parse::<i64>() {
        // `-0` would lose its sign as an integer; let the float path keep
        // it, the way serde_json's own reader does.
        if int != 0 || !slice.starts_with('-') {
            return Value::from(int);
        }
    }
    slice
        .parse::<f64>()
        .map_or_else(|_| Value::from(0), Value::from)
}

/// Default value for a schema: its explicit `default` first, then — when
/// `use_type_defaults` — the canonical zero of its first declared type.
pub(crate) fn default_for(schema: Schema<'_>, use_type_defaults: bool) -> Value {
    if let Some(default) = schema.default_value() {
        return default.clone();
    }
    if use_type_defaults {
        if let Some(name) = schema.first_type() {
            return type_zero(name);
        }
    }
    Value::Null
}

fn type_zero(name: &str) -> Value {
    match name {
        "object" => Value::Object(Map::new()),
        "array" => Value::Array(Vec::new()),
        "string" => Value::String(String::new()),
        "number" | "integer" => Value::from(0),
        "boolean" => Value::Bool(false),
        // "null", and anything this crate does not recognise.
        _ => Value::Null,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};

    use super::{default_for, merge_maps, number_value, type_zero};
    use crate::schema::Schema;

    #[test]
    fn number_value_parses_integers_and_floats() {
        assert_eq!(number_value("42"), json!(42));
        assert_eq!(number_value("-17"), json!(-17));
        assert_eq!(number_value("1.25"), json!(1.25));
        assert_eq!(number_value("2e3"), json!(2e3));
    }

    #[test]
    fn number_value_sheds_dangling_fragments() {
        assert_eq!(number_value("1.23e"), json!(1.23));
        assert_eq!(number_value("1.23e+"), json!(1.23));
        assert_eq!(number_value("5."), json!(5));
        assert_eq!(number_value("10E-"), json!(10));
        assert_eq!(number_value("-"), json!(0));
    }

    #[test]
    fn number_value_keeps_negative_zero_signed() {
        assert_eq!(number_value("-0"), json!(-0.0));
        assert_eq!(number_value("0"), json!(0));
    }

    #[test]
    fn merge_prefers_overlay_and_recurses() {
        let base = json!({"a": {"x": 1, "y": 2}, "b": [1, 2], "c": 3});
        let overlay = json!({"a": {"y": 9}, "b": [9]});
        let (Value::Object(base), Value::Object(overlay)) = (base, overlay) else {
            unreachable!()
        };
        assert_eq!(
            Value::Object(merge_maps(&base, overlay)),
            json!({"a": {"x": 1, "y": 9}, "b": [9], "c": 3})
        );
    }

    #[test]
    fn default_resolution_order() {
        let explicit = json!({"type": "string", "default": "d"});
        assert_eq!(default_for(Schema::new(&explicit), true), json!("d"));
        assert_eq!(default_for(Schema::new(&explicit), false), json!("d"));

        let typed = json!({"type": ["integer", "string"]});
        assert_eq!(default_for(Schema::new(&typed), true), json!(0));
        assert_eq!(default_for(Schema::new(&typed), false), Value::Null);

        assert_eq!(default_for(Schema::empty(), true), Value::Null);
    }

    #[test]
    fn canonical_zeros() {
        assert_eq!(type_zero("object"), json!({}));
        assert_eq!(type_zero("array"), json!([]));
        assert_eq!(type_zero("string"), json!(""));
        assert_eq!(type_zero("number"), json!(0));
        assert_eq!(type_zero("integer"), json!(0));
        assert_eq!(type_zero("boolean"), json!(false));
        assert_eq!(type_zero("null"), Value::Null);
    }
}
