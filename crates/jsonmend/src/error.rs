//! Parser error types.

use thiserror::Error;

/// Error returned by [`parse`](crate::parse).
///
/// An *incomplete* prefix is not an error — the parser returns a tree with
/// unterminated nodes for those. Errors are reserved for input that can
/// never grow into valid JSON, plus the empty-input case which callers
/// usually want to special-case (see [`expand`](crate::expand)).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    /// The input was empty or contained only whitespace.
    #[error("input is empty")]
    EmptyInput,
    /// The prefix is unrecoverably malformed.
    #[error("{kind} at {line}:{column}")]
    Syntax {
        /// The specific malformation.
        kind: SyntaxError,
        /// 1-based line of the offending character.
        line: usize,
        /// 1-based column of the offending character.
        column: usize,
    },
}

/// The specific malformation behind a [`ParseError::Syntax`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SyntaxError {
    /// A character that cannot occur at this point in any JSON document.
    #[error("invalid character '{0}'")]
    InvalidCharacter(char),
    /// An unknown escape letter or a non-hex digit inside `\uXXXX`.
    #[error("invalid escape character '{0}'")]
    InvalidEscape(char),
    /// An alphabetic run that is not a prefix of `true`/`false`/`null`.
    #[error("invalid literal '{0}'")]
    InvalidLiteral(String),
    /// Two commas inside an object with no value between them.
    #[error("consecutive commas")]
    RepeatedComma,
    /// A property name starting with something other than `"` or an
    /// identifier character.
    #[error("property name cannot start with '{0}'")]
    InvalidPropertyStart(char),
    /// Non-whitespace text after a complete top-level value beginning
    /// with a stray `}` or `]`.
    #[error("trailing characters after a complete value")]
    TrailingCharacters,
    /// The input ended where it structurally never can.
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,
}
