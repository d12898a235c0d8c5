//! Number scanning with dangling-fragment backtracking.

use crate::error::SyntaxError;
use crate::node::{NodeKind, ParseNode};
use crate::position::Position;

use super::Parser;

impl Parser<'_> {
    /// Scans `-? (0 | [1-9][0-9]*) (. [0-9]+)? ([eE][+-]?[0-9]+)?`.
    ///
    /// A fraction or exponent whose digits never arrived is excluded from
    /// the node: `1.23e` yields a complete node over `1.23`, with the
    /// cursor left after the dangling fragment. A number that simply runs
    /// into the end of the input (`12`) stays incomplete — more digits
    /// may still arrive.
    pub(super) fn parse_number(&mut self) -> Result<ParseNode, SyntaxError> {
        let start = self.position();

        if self.eat('-') && self.at_end() {
            // A lone sign; the completer resolves it to zero.
            return Ok(self.number_node(start, self.position(), false));
        }

        match self.peek() {
            Some('0') => {
                self.bump();
            }
            Some(c) if c.is_ascii_digit() => {
                self.eat_while(|c| c.is_ascii_digit());
            }
            Some(c) => return Err(SyntaxError::InvalidCharacter(c)),
            None => return Err(SyntaxError::UnexpectedEndOfInput),
        }
        let mut valid_end = self.position();

        if self.peek() == Some('.') {
            self.bump();
            if self.eat_while(|c| c.is_ascii_digit()).is_empty() {
                return Ok(self.number_node(start, valid_end, true));
            }
            valid_end = self.position();
        }

        if matches!(self.peek(), Some('e' | 'E')) {
            self.bump();
            if matches!(self.peek(), Some('+' | '-')) {
                self.bump();
            }
            if self.eat_while(|c| c.is_ascii_digit()).is_empty() {
                return Ok(self.number_node(start, valid_end, true));
            }
            valid_end = self.position();
        }

        let complete = !self.at_end();
        Ok(self.number_node(start, valid_end, complete))
    }

    fn number_node(&self, start: Position, end: Position, complete: bool) -> ParseNode {
        let text = self.input[start.offset..end.offset].to_owned();
        ParseNode {
            start,
            end: complete.then_some(end),
            kind: NodeKind::Number(text),
        }
    }
}
