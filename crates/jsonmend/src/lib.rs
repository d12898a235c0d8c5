//! Completes partial JSON prefixes into schema-conformant values.
//!
//! Streaming producers — LLM token streams above all — emit JSON a few
//! bytes at a time. This crate takes whatever prefix has arrived so far,
//! parses it into a tree whose nodes know whether they were finished, and
//! folds that tree with a JSON Schema to produce a complete value:
//! defaults fill the holes, truncated keywords and numbers collapse to
//! their nearest sensible reading, and a property name cut off mid-word is
//! recovered when it prefixes exactly one schema property.
//!
//! The schema is *structure*, never a gatekeeper: `type`, `properties`,
//! `required`, `patternProperties`, `items`, `default`, `allOf` and
//! `additionalProperties: false` are interpreted; validation keywords
//! (`enum`, `minimum`, `format`, …) pass through without enforcement.
//!
//! # Examples
//!
//! ```
//! use serde_json::json;
//!
//! let schema = json!({
//!     "type": "object",
//!     "properties": {
//!         "name": {"type": "string", "default": "Unknown"},
//!         "age": {"type": "integer", "default": 0},
//!     },
//! });
//!
//! // The stream stopped mid-string: the partial value is kept verbatim,
//! // the missing property comes from its default.
//! let value = jsonmend::expand(&schema, r#"{"name":"Jo"#).unwrap();
//! assert_eq!(value, json!({"name": "Jo", "age": 0}));
//!
//! // Unrecoverable garbage is `None`, not a guess.
//! assert_eq!(jsonmend::expand(&schema, r#"{"a":1,,"b":2}"#), None);
//! ```
//!
//! Call [`expand`] repeatedly on a growing buffer — or let [`Expander`]
//! keep the buffer for you — and downstream consumers observe
//! increasingly refined snapshots of the final value.

mod chunks;
mod completer;
mod error;
mod expander;
mod node;
mod parser;
mod position;
mod schema;

pub use chunks::{produce_chunks, produce_prefixes};
pub use completer::complete;
pub use error::{ParseError, SyntaxError};
pub use expander::Expander;
pub use node::{NodeKind, ObjectEntry, ParseNode};
pub use parser::parse;
pub use position::Position;
pub use schema::{EffectiveSchema, Schema};

use serde_json::Value;
use tracing::debug;

/// Expands `prefix` — any initial slice of a JSON document — into a
/// complete value shaped by `schema`.
///
/// Returns `None` exactly when a non-empty prefix is unrecoverable:
/// structurally malformed, or an unterminated object with no entry the
/// schema recognises. An empty (or whitespace-only) prefix is not a
/// failure; it expands to the schema's own `default`, or the canonical
/// zero of its first declared type, or `null`.
///
/// A legitimate parsed `null` comes back as `Some(Value::Null)`, so the
/// failure sentinel stays distinguishable from data.
#[must_use]
pub fn expand(schema: &Value, prefix: &str) -> Option<Value> {
    let view = Schema::new(schema);
    match parse(prefix, view) {
        Ok(tree) => {
            let value = complete(&tree, view);
            if value.is_none() {
                debug!("prefix holds no entry the schema recognises");
            }
            value
        }
        Err(ParseError::EmptyInput) => Some(completer::default_for(view, true)),
        Err(err @ ParseError::Syntax { .. }) => {
            debug!(%err, "unrecoverable prefix");
            None
        }
    }
}

#[cfg(test)]
mod tests;
