//! Error types for SDL lexing, parsing, and tree construction.
//!
//! Every failure that comes out of reading a document carries the line and
//! column of the offending source text, so callers can point users at the
//! exact literal or token that broke.
//!
//! ## Error Categories
//!
//! - **Lexical errors**: unterminated literals, bad escapes, malformed numbers,
//!   dates or time spans, stray characters
//! - **Parse errors**: tokens in the wrong place, unmatched or unclosed braces
//! - **Unknown time zones**: a date-time literal names a zone that the
//!   configured [`ZoneResolver`](crate::ZoneResolver) cannot resolve
//! - **Decode errors**: the payload of a `[...]` binary literal is not valid base64
//! - **Invalid identifiers**: a tag or attribute built in code has an unusable name
//! - **Invalid UTF-8**: bytes passed to [`from_slice`](crate::from_slice) are not text
//!
//! ## Examples
//!
//! ```rust
//! use sdlang::{from_str, Error};
//!
//! let err = from_str("person \"unterminated").unwrap_err();
//! assert!(matches!(err, Error::Lexical { line: 1, .. }));
//! assert_eq!(err.position(), Some((1, 8)));
//! ```

use thiserror::Error;

/// Represents all possible errors produced while reading SDL text or building tags.
///
/// One error aborts the whole document; no partial tree is ever returned.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// The text could not be split into tokens.
    #[error("Lexical error at line {line}, column {col}: {kind}")]
    Lexical {
        line: usize,
        col: usize,
        kind: LexicalErrorKind,
    },

    /// The tokens do not form a valid document.
    #[error("Parse error at line {line}, column {col}: {kind}")]
    Parse {
        line: usize,
        col: usize,
        kind: ParseErrorKind,
    },

    /// A date-time literal names a zone the resolver does not know.
    #[error("Unknown time zone `{zone}` at line {line}, column {col}")]
    UnknownTimeZone {
        line: usize,
        col: usize,
        zone: String,
    },

    /// The payload of a binary literal is not valid base64.
    #[error("Invalid binary literal at line {line}, column {col}: {source}")]
    Decode {
        line: usize,
        col: usize,
        #[source]
        source: base64::DecodeError,
    },

    /// A tag, attribute or namespace name is not a legal identifier.
    #[error("Invalid identifier `{0}`")]
    InvalidIdentifier(String),

    /// Input handed over as bytes is not UTF-8.
    #[error("Input is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),
}

/// The specific reason a lexical error was raised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexicalErrorKind {
    #[error("unterminated string literal")]
    UnterminatedString,

    #[error("unterminated character literal")]
    UnterminatedCharacter,

    #[error("binary literal is missing its closing `]`")]
    UnterminatedBinary,

    #[error("unterminated block comment")]
    UnterminatedComment,

    #[error("invalid escape sequence `\\{0}`")]
    InvalidEscape(char),

    #[error("unexpected character `{0}`")]
    InvalidCharacter(char),

    #[error("character literal must contain exactly one character")]
    InvalidCharacterLiteral,

    #[error("malformed number `{0}`")]
    InvalidNumber(String),

    #[error("number `{0}` does not fit in a 64-bit integer")]
    NumberOutOfRange(String),

    #[error("malformed date `{0}`")]
    InvalidDate(String),

    #[error("malformed time of day `{0}`")]
    InvalidTime(String),

    #[error("malformed time span `{0}`")]
    InvalidTimeSpan(String),

    #[error("a backslash outside a string must end the line")]
    MisplacedBackslash,
}

/// The specific reason a parse error was raised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    #[error("expected {expected}, found {found}")]
    UnexpectedToken { expected: String, found: String },

    #[error("`}}` without a matching `{{`")]
    UnmatchedBrace,

    #[error("children block `{{` must follow a tag")]
    AnonymousChildrenBlock,

    #[error("children block is missing its closing `}}`")]
    UnclosedChildrenBlock,

    #[error("tags are nested deeper than the limit of {0}")]
    NestingTooDeep(usize),
}

impl Error {
    /// Creates a lexical error at the given position.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sdlang::{Error, LexicalErrorKind};
    ///
    /// let err = Error::lexical(3, 7, LexicalErrorKind::UnterminatedString);
    /// assert!(err.to_string().contains("line 3, column 7"));
    /// ```
    pub fn lexical(line: usize, col: usize, kind: LexicalErrorKind) -> Self {
        Error::Lexical { line, col, kind }
    }

    /// Creates a parse error at the given position.
    pub fn parse(line: usize, col: usize, kind: ParseErrorKind) -> Self {
        Error::Parse { line, col, kind }
    }

    /// Creates an "expected X, found Y" parse error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sdlang::Error;
    ///
    /// let err = Error::unexpected(2, 5, "a literal value", "`=`");
    /// assert!(err.to_string().contains("expected a literal value, found `=`"));
    /// ```
    pub fn unexpected(line: usize, col: usize, expected: &str, found: &str) -> Self {
        Error::Parse {
            line,
            col,
            kind: ParseErrorKind::UnexpectedToken {
                expected: expected.to_string(),
                found: found.to_string(),
            },
        }
    }

    /// Creates an unknown time zone error.
    pub fn unknown_time_zone(line: usize, col: usize, zone: &str) -> Self {
        Error::UnknownTimeZone {
            line,
            col,
            zone: zone.to_string(),
        }
    }

    /// Creates an invalid identifier error.
    pub fn invalid_identifier(name: &str) -> Self {
        Error::InvalidIdentifier(name.to_string())
    }

    /// Returns the `(line, column)` the error points at, if it came from source text.
    #[must_use]
    pub fn position(&self) -> Option<(usize, usize)> {
        match self {
            Error::Lexical { line, col, .. }
            | Error::Parse { line, col, .. }
            | Error::UnknownTimeZone { line, col, .. }
            | Error::Decode { line, col, .. } => Some((*line, *col)),
            Error::InvalidIdentifier(_) | Error::InvalidUtf8(_) => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
