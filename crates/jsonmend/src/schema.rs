//! Schema views.
//!
//! Schemas stay plain [`serde_json::Value`]s; this module wraps them in
//! two lightweight borrowed views. [`Schema`] is a raw schema (or the
//! empty schema, which constrains nothing). [`EffectiveSchema`] is the
//! flattened form the parser and completer actually consult: `allOf`
//! merged, pattern properties compiled, required names collected.
//!
//! Only structural keywords are interpreted. Validation keywords
//! (`minimum`, `enum`, `format`, …) are deliberately ignored — the schema
//! is a source of shape and defaults, never a gatekeeper.

use std::collections::BTreeSet;

use regex::Regex;
use serde_json::Value;

/// A borrowed, possibly-empty JSON Schema.
#[derive(Debug, Clone, Copy)]
pub struct Schema<'a> {
    raw: Option<&'a Value>,
}

impl<'a> Schema<'a> {
    /// Wraps an already-parsed schema document.
    #[must_use]
    pub fn new(raw: &'a Value) -> Self {
        Self { raw: Some(raw) }
    }

    /// The schema that accepts anything and defaults to nothing.
    #[must_use]
    pub fn empty() -> Schema<'static> {
        Schema { raw: None }
    }

    fn get(self, key: &str) -> Option<&'a Value> {
        self.raw?.as_object()?.get(key)
    }

    /// The schema's explicit `default`, if any.
    #[must_use]
    pub fn default_value(self) -> Option<&'a Value> {
        self.get("default")
    }

    /// Declared type names, in declaration order. Handles both the single
    /// form `"type": "string"` and the union form `"type": ["number",
    /// "null"]`.
    fn type_list(self) -> impl Iterator<Item = &'a str> {
        match self.get("type") {
            Some(Value::String(name)) => TypeNames::Single(Some(name)),
            Some(Value::Array(names)) => TypeNames::Union(names.iter()),
            _ => TypeNames::Single(None),
        }
    }

    /// The first declared type, which governs type defaults.
    pub(crate) fn first_type(self) -> Option<&'a str> {
        self.type_list().next()
    }

    /// Whether a parsed `null` is admissible: either the schema declares
    /// no types at all, or `"null"` is among them.
    pub(crate) fn allows_null(self) -> bool {
        let mut types = self.type_list().peekable();
        types.peek().is_none() || types.any(|name| name == "null")
    }

    /// Flattens this schema into the effective view.
    ///
    /// `allOf` members are merged left-to-right into the outer schema's
    /// own `properties`/`required`/`default` (later members overwrite
    /// property schemas and the default; `required` is a set union).
    /// `anyOf`/`oneOf` are left untouched. `patternProperties`, `items`,
    /// `type`, and `additionalProperties` are read from the outer schema
    /// only.
    #[must_use]
    pub fn resolve(self) -> EffectiveSchema<'a> {
        let mut eff = EffectiveSchema {
            properties: Vec::new(),
            patterns: Vec::new(),
            required: BTreeSet::new(),
            items: Items::Unspecified,
            additional_properties: true,
            default: self.default_value(),
            all_of_merged: false,
        };

        eff.absorb(self);
        if let Some(Value::Array(members)) = self.get("allOf") {
            for member in members {
                let member = Schema::new(member);
                eff.absorb(member);
                if let Some(default) = member.default_value() {
                    eff.default = Some(default);
                }
            }
            eff.all_of_merged = !members.is_empty();
        }

        if let Some(Value::Object(patterns)) = self.get("patternProperties") {
            for (pattern, sub) in patterns {
                // An uncompilable pattern cannot match any key; skip it.
                if let Ok(regex) = Regex::new(pattern) {
                    eff.patterns.push((regex, sub));
                }
            }
        }

        eff.items = match self.get("items") {
            Some(Value::Array(tuple)) => Items::PerIndex(tuple),
            Some(items @ Value::Object(_)) => {
                if items.get("$ref").is_some() {
                    // Only the self-reference `#` is meaningful, and its
                    // meaning is precisely "do not expand defaults here".
                    Items::SelfRef
                } else {
                    Items::Uniform(items)
                }
            }
            _ => Items::Unspecified,
        };

        if let Some(Value::Bool(false)) = self.get("additionalProperties") {
            eff.additional_properties = false;
        }

        eff
    }
}

enum TypeNames<'a> {
    Single(Option<&'a String>),
    Union(std::slice::Iter<'a, Value>),
}

impl<'a> Iterator for TypeNames<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        match self {
            TypeNames::Single(name) => name.take().map(String::as_str),
            TypeNames::Union(values) => values.find_map(Value::as_str),
        }
    }
}

/// The `items` declaration of an array schema.
#[derive(Debug, Clone, Copy)]
enum Items<'a> {
    Unspecified,
    /// One schema for every element.
    Uniform(&'a Value),
    /// Tuple form: one schema per index, empty past the end.
    PerIndex(&'a [Value]),
    /// `{"$ref": …}` — recursion into defaults is cut here.
    SelfRef,
}

/// A schema after `allOf` flattening, exposing exactly the attributes the
/// parser and completer consume.
pub struct EffectiveSchema<'a> {
    /// Property name → sub-schema, in document order, merged across
    /// `allOf` members.
    properties: Vec<(&'a str, &'a Value)>,
    patterns: Vec<(Regex, &'a Value)>,
    required: BTreeSet<&'a str>,
    items: Items<'a>,
    additional_properties: bool,
    default: Option<&'a Value>,
    all_of_merged: bool,
}

impl<'a> EffectiveSchema<'a> {
    fn absorb(&mut self, schema: Schema<'a>) {
        if let Some(Value::Object(props)) = schema.get("properties") {
            for (name, sub) in props {
                match self.properties.iter_mut().find(|(k, _)| *k == name.as_str()) {
                    Some(slot) => slot.1 = sub,
                    None => self.properties.push((name.as_str(), sub)),
                }
            }
        }
        if let Some(Value::Array(names)) = schema.get("required") {
            self.required.extend(names.iter().filter_map(Value::as_str));
        }
    }

    /// Sub-schema governing property `key`: its declared schema first,
    /// else the first pattern property whose regex matches, else the
    /// empty schema.
    #[must_use]
    pub fn property_schema(&self, key: &str) -> Schema<'a> {
        if let Some(&(_, sub)) = self.properties.iter().find(|(k, _)| *k == key) {
            return Schema::new(sub);
        }
        for &(ref regex, sub) in &self.patterns {
            if regex.is_match(key) {
                return Schema::new(sub);
            }
        }
        Schema::empty()
    }

    /// Sub-schema governing the array element at `index`.
    #[must_use]
    pub fn item_schema(&self, index: usize) -> Schema<'a> {
        match self.items {
            Items::Uniform(sub) => Schema::new(sub),
            Items::PerIndex(tuple) => tuple.get(index).map_or(Schema::empty(), Schema::new),
            Items::Unspecified | Items::SelfRef => Schema::empty(),
        }
    }

    /// Whether `key` is tied to the schema, by name or by pattern.
    #[must_use]
    pub fn is_known(&self, key: &str) -> bool {
        self.properties.iter().any(|(k, _)| *k == key)
            || self.patterns.iter().any(|(regex, _)| regex.is_match(key))
    }

    /// Whether `key` is in the merged `required` set.
    #[must_use]
    pub fn is_required(&self, key: &str) -> bool {
        self.required.contains(key)
    }

    /// Completes a partial key that is a prefix of exactly one property
    /// name. Ambiguous or unmatched partials stay as they are.
    #[must_use]
    pub fn complete_partial_key(&self, partial: &str) -> Option<&'a str> {
        let mut matches = self
            .properties
            .iter()
            .map(|(name, _)| *name)
            .filter(|name| name.starts_with(partial));
        let first = matches.next()?;
        matches.next().is_none().then_some(first)
    }

    /// Declared properties with their sub-schemas, in document order.
    pub fn properties(&self) -> impl Iterator<Item = (&'a str, Schema<'a>)> + '_ {
        self.properties
            .iter()
            .map(|&(name, sub)| (name, Schema::new(sub)))
    }

    /// The merged `default`, if any.
    #[must_use]
    pub fn default_value(&self) -> Option<&'a Value> {
        self.default
    }

    /// False only for a literal `"additionalProperties": false`.
    #[must_use]
    pub fn additional_properties_allowed(&self) -> bool {
        self.additional_properties
    }

    /// Whether `allOf` flattening actually took place.
    #[must_use]
    pub fn all_of_merged(&self) -> bool {
        self.all_of_merged
    }
}
