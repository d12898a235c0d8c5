//! The prefix-tolerant, schema-aware JSON parser.
//!
//! Unlike a conventional parser this one expects input cut off at an
//! arbitrary byte boundary — the tail of whatever a token stream has
//! delivered so far. It builds a [`ParseNode`] tree in a single pass;
//! values whose terminator never arrived become *incomplete* nodes rather
//! than errors. Hard errors are reserved for prefixes that no suffix can
//! repair (see [`SyntaxError`]).
//!
//! The schema participates in exactly one parsing decision: an object key
//! cut off mid-name is completed to the unique schema property it
//! prefixes, which in turn selects the sub-schema for the value that
//! follows. Everything else about the schema is the completer's business.

mod numbers;
mod strings;

use crate::error::{ParseError, SyntaxError};
use crate::node::{NodeKind, ObjectEntry, ParseNode};
use crate::position::Position;
use crate::schema::Schema;

/// Parses `input` as a prefix of a JSON document shaped by `schema`.
///
/// Returns [`ParseError::EmptyInput`] when the input holds nothing but
/// whitespace and [`ParseError::Syntax`] when the prefix is unrecoverably
/// malformed; any other input yields a tree, complete or not.
///
/// # Examples
///
/// ```
/// use jsonmend::{parse, NodeKind, Schema};
///
/// let tree = parse(r#"["a", "b"#, Schema::empty()).unwrap();
/// assert!(!tree.is_complete());
/// assert!(matches!(tree.kind, NodeKind::Array(_)));
/// ```
pub fn parse(input: &str, schema: Schema<'_>) -> Result<ParseNode, ParseError> {
    let mut parser = Parser::new(input);
    parser.skip_whitespace();
    if parser.at_end() {
        return Err(ParseError::EmptyInput);
    }

    let node = match parser.parse_value(schema) {
        Ok(node) => node,
        Err(kind) => return Err(parser.syntax_error(kind)),
    };

    parser.skip_whitespace();
    if node.is_complete() && matches!(parser.peek(), Some('}' | ']')) {
        return Err(parser.syntax_error(SyntaxError::TrailingCharacters));
    }
    Ok(node)
}

pub(crate) struct Parser<'a> {
    input: &'a str,
    pos: Position,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: Position::origin(),
        }
    }

    fn position(&self) -> Position {
        self.pos
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos.offset..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn at_end(&self) -> bool {
        self.pos.offset >= self.input.len()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos.offset += c.len_utf8();
        if c == '\n' {
            self.pos.line += 1;
            self.pos.column = 1;
        } else {
            self.pos.column += 1;
        }
        Some(c)
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.bump();
            true
        } else {
            false
        }
    }

    /// Consumes characters while `pred` holds, returning the consumed
    /// slice.
    fn eat_while(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
        let start = self.pos.offset;
        while let Some(c) = self.peek() {
            if !pred(c) {
                break;
            }
            self.bump();
        }
        &self.input[start..self.pos.offset]
    }

    fn skip_whitespace(&mut self) {
        self.eat_while(char::is_whitespace);
    }

    fn syntax_error(&self, kind: SyntaxError) -> ParseError {
        ParseError::Syntax {
            kind,
            line: self.pos.line,
            column: self.pos.column,
        }
    }

    fn parse_value(&mut self, schema: Schema<'_>) -> Result<ParseNode, SyntaxError> {
        match self.peek() {
            Some('{') => self.parse_object(schema),
            Some('[') => self.parse_array(schema),
            Some('"') => self.parse_string(),
            Some(c) if c == '-' || c.is_ascii_digit() => self.parse_number(),
            Some('t' | 'f' | 'n') => self.parse_literal(),
            Some(c) => Err(SyntaxError::InvalidCharacter(c)),
            None => Err(SyntaxError::UnexpectedEndOfInput),
        }
    }

    fn parse_object(&mut self, schema: Schema<'_>) -> Result<ParseNode, SyntaxError> {
        let start = self.position();
        self.bump(); // `{`
        let eff = schema.resolve();
        let mut entries: Vec<ObjectEntry> = Vec::new();

        let open = |entries| ParseNode {
            start,
            end: None,
            kind: NodeKind::Object(entries),
        };

        loop {
            self.skip_whitespace();
            let c = match self.peek() {
                None => return Ok(open(entries)),
                Some('}') => {
                    self.bump();
                    // A closed object only keeps entries that reached a
                    // value; key-only fragments are dropped.
                    entries.retain(|entry| entry.value.is_some());
                    return Ok(ParseNode {
                        start,
                        end: Some(self.position()),
                        kind: NodeKind::Object(entries),
                    });
                }
                Some(c) => c,
            };

            // Key: a string, or a bare identifier-like fragment the
            // producer never got to quote.
            let (key, key_is_partial) = if c == '"' {
                let (text, closed) = self.scan_string()?;
                (text, !closed)
            } else if c.is_alphabetic() || c == '_' {
                let text = self
                    .eat_while(|c| !c.is_whitespace() && !matches!(c, ':' | ',' | '}' | '"'));
                (text.to_owned(), true)
            } else {
                return Err(SyntaxError::InvalidPropertyStart(c));
            };

            // A key cut off mid-name may still pick out a unique schema
            // property.
            let key = if key_is_partial {
                eff.complete_partial_key(&key)
                    .map_or(key, std::borrow::ToOwned::to_owned)
            } else {
                key
            };

            let mut entry = ObjectEntry {
                key,
                value: None,
                has_colon: false,
            };

            self.skip_whitespace();
            if self.eat(':') {
                entry.has_colon = true;
                self.skip_whitespace();
            }

            if entry.has_colon && !matches!(self.peek(), None | Some(',' | '}')) {
                let prop = eff.property_schema(&entry.key);
                entry.value = Some(self.parse_value(prop)?);
            }
            entries.push(entry);

            self.skip_whitespace();
            match self.peek() {
                Some(',') => {
                    self.bump();
                    self.skip_whitespace();
                    if self.peek() == Some(',') {
                        return Err(SyntaxError::RepeatedComma);
                    }
                }
                // Loop around to consume the close.
                Some('}') => {}
                // Nothing that can continue this object; leave it open.
                _ => return Ok(open(entries)),
            }
        }
    }

    fn parse_array(&mut self, schema: Schema<'_>) -> Result<ParseNode, SyntaxError> {
        let start = self.position();
        self.bump(); // `[`
        let eff = schema.resolve();
        let mut elements = Vec::new();

        loop {
            self.skip_whitespace();
            match self.peek() {
                Some(']') => {
                    self.bump();
                    return Ok(ParseNode {
                        start,
                        end: Some(self.position()),
                        kind: NodeKind::Array(elements),
                    });
                }
                Some(c) if starts_value(c) => {
                    let item = eff.item_schema(elements.len());
                    elements.push(self.parse_value(item)?);
                }
                // EOF, or something no value starts with; leave it open.
                _ => {
                    return Ok(ParseNode {
                        start,
                        end: None,
                        kind: NodeKind::Array(elements),
                    });
                }
            }

            self.skip_whitespace();
            match self.peek() {
                Some(',') => {
                    self.bump();
                }
                Some(']') => {}
                _ => {
                    return Ok(ParseNode {
                        start,
                        end: None,
                        kind: NodeKind::Array(elements),
                    });
                }
            }
        }
    }

    /// Matches `true`/`false`/`null`, accepting a truncated keyword as an
    /// incomplete node.
    fn parse_literal(&mut self) -> Result<ParseNode, SyntaxError> {
        let start = self.position();
        let run = self.eat_while(|c| c.is_ascii_alphabetic());
        let (keyword, kind) = match run.as_bytes().first().copied() {
            Some(b't') => ("true", NodeKind::Bool(true)),
            Some(b'f') => ("false", NodeKind::Bool(false)),
            _ => ("null", NodeKind::Null),
        };
        if run == keyword {
            Ok(ParseNode {
                start,
                end: Some(self.position()),
                kind,
            })
        } else if keyword.starts_with(run) {
            Ok(ParseNode {
                start,
                end: None,
                kind,
            })
        } else {
            Err(SyntaxError::InvalidLiteral(run.to_owned()))
        }
    }
}

fn starts_value(c: char) -> bool {
    matches!(c, '{' | '[' | '"' | '-' | 't' | 'f' | 'n') || c.is_ascii_digit()
}
