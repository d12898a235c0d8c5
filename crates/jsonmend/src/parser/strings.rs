//! String scanning: escapes, `\uXXXX` sequences, surrogate pairs.
//!
//! A string cut off anywhere — including in the middle of an escape
//! sequence — decodes gracefully: everything before the cut is kept, the
//! truncated escape contributes nothing, and the string is reported as
//! not closed. Hard errors are limited to input no suffix can fix: an
//! unknown escape letter, a non-hex digit inside `\uXXXX`, or a raw
//! control character.

use crate::error::SyntaxError;
use crate::node::{NodeKind, ParseNode};

use super::Parser;

impl Parser<'_> {
    /// Parses a string value starting at the opening quote.
    pub(super) fn parse_string(&mut self) -> Result<ParseNode, SyntaxError> {
        let start = self.position();
        let (text, closed) = self.scan_string()?;
        Ok(ParseNode {
            start,
            end: closed.then(|| self.position()),
            kind: NodeKind::String(text),
        })
    }

    /// Consumes a string starting at the opening quote, returning the
    /// decoded text and whether the closing quote was seen.
    pub(super) fn scan_string(&mut self) -> Result<(String, bool), SyntaxError> {
        self.bump(); // `"`
        let mut text = String::new();

        loop {
            match self.peek() {
                None => return Ok((text, false)),
                Some('"') => {
                    self.bump();
                    return Ok((text, true));
                }
                Some('\\') => {
                    self.bump();
                    if !self.decode_escape(&mut text)? {
                        return Ok((text, false));
                    }
                }
                Some(c) if (c as u32) < 0x20 => return Err(SyntaxError::InvalidCharacter(c)),
                Some(_) => {
                    let run = self.eat_while(|c| c != '"' && c != '\\' && (c as u32) >= 0x20);
                    text.push_str(run);
                }
            }
        }
    }

    /// Decodes one escape sequence after the backslash. `Ok(false)` means
    /// the input ran out before the sequence finished.
    fn decode_escape(&mut self, text: &mut String) -> Result<bool, SyntaxError> {
        let Some(c) = self.peek() else {
            return Ok(false);
        };
        let decoded = match c {
            '"' | '\\' | '/' => c,
            'b' => '\u{0008}',
            'f' => '\u{000C}',
            'n' => '\n',
            'r' => '\r',
            't' => '\t',
            'u' => {
                self.bump();
                return self.decode_unicode_escape(text);
            }
            other => return Err(SyntaxError::InvalidEscape(other)),
        };
        self.bump();
        text.push(decoded);
        Ok(true)
    }

    /// Decodes the `XXXX` after `\u`, combining UTF-16 surrogate pairs.
    fn decode_unicode_escape(&mut self, text: &mut String) -> Result<bool, SyntaxError> {
        let Some(high) = self.hex4()? else {
            return Ok(false);
        };
        if let Some(c) = char::from_u32(u32::from(high)) {
            text.push(c);
            return Ok(true);
        }

        // `high` is a surrogate half. A high half followed immediately by
        // a `\uXXXX` low half combines into one scalar.
        if (0xD800..=0xDBFF).contains(&high) {
            if self.rest().starts_with("\\u") {
                self.bump();
                self.bump();
                let Some(low) = self.hex4()? else {
                    return Ok(false);
                };
                if (0xDC00..=0xDFFF).contains(&low) {
                    let scalar =
                        0x10000 + (u32::from(high - 0xD800) << 10) + u32::from(low - 0xDC00);
                    text.push(char::from_u32(scalar).unwrap_or(char::REPLACEMENT_CHARACTER));
                } else {
                    // Two escapes, neither a valid pairing: the high half
                    // is unrepresentable, the second decodes on its own.
                    text.push(char::REPLACEMENT_CHARACTER);
                    match char::from_u32(u32::from(low)) {
                        Some(c) => text.push(c),
                        None => text.push(char::REPLACEMENT_CHARACTER),
                    }
                }
                return Ok(true);
            }
            if self.at_end() {
                // The next chunk may still deliver the low half.
                return Ok(false);
            }
        }
        // A lone half is unrepresentable no matter what follows.
        text.push(char::REPLACEMENT_CHARACTER);
        Ok(true)
    }

    /// Reads four hex digits; `None` when the input ends first.
    fn hex4(&mut self) -> Result<Option<u16>, SyntaxError> {
        let mut acc: u16 = 0;
        for _ in 0..4 {
            let Some(c) = self.peek() else {
                return Ok(None);
            };
            let Some(digit) = c.to_digit(16) else {
                return Err(SyntaxError::InvalidEscape(c));
            };
            self.bump();
            acc = (acc << 4) | u16::try_from(digit).unwrap_or(0);
        }
        Ok(Some(acc))
    }
}
