//! Growing-buffer driver for repeated expansion.

use serde_json::Value;

use crate::expand;

/// Accumulates a streamed prefix and re-expands it after every chunk.
///
/// This is deliberately not an incremental parser: each [`feed`] call
/// re-parses the whole buffer, which is linear in its length and, for the
/// document sizes LLMs emit, cheaper than maintaining resumable parser
/// state. Snapshots therefore never depend on chunk boundaries — feeding
/// a document one byte at a time and all at once end in the same place.
///
/// # Examples
///
/// ```
/// use jsonmend::Expander;
/// use serde_json::json;
///
/// let schema = json!({"properties": {
///     "story": {"type": "string"},
///     "rating": {"type": "integer", "default": 3},
/// }});
/// let mut expander = Expander::new(schema);
///
/// assert_eq!(expander.feed(r#"{"sto"#), Some(json!({"rating": 3})));
/// assert_eq!(
///     expander.feed(r#"ry":"Once upo"#),
///     Some(json!({"story": "Once upo", "rating": 3})),
/// );
/// ```
///
/// [`feed`]: Expander::feed
#[derive(Debug, Clone)]
pub struct Expander {
    schema: Value,
    buffer: String,
}

impl Expander {
    /// Creates a driver that expands against `schema`.
    #[must_use]
    pub fn new(schema: Value) -> Self {
        Self {
            schema,
            buffer: String::new(),
        }
    }

    /// Appends a chunk and returns the refreshed snapshot.
    pub fn feed(&mut self, chunk: &str) -> Option<Value> {
        self.buffer.push_str(chunk);
        self.snapshot()
    }

    /// Expands everything received so far.
    #[must_use]
    pub fn snapshot(&self) -> Option<Value> {
        expand(&self.schema, &self.buffer)
    }

    /// The raw prefix received so far.
    #[must_use]
    pub fn buffer(&self) -> &str {
        &self.buffer
    }
}
