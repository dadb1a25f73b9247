//! Parse errors.

use std::fmt;
use std::io;

use thiserror::Error;

use crate::position::Position;

/// Grammar violation codes.
///
/// A flat enum with no payload; the position travels in [`SyntaxError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ErrorKind {
    /// Byte with no valid continuation (top level, or after `\` in a value)
    IllegalChar = 0,
    /// `=` missing after an entry name
    EqualSignExpected,
    /// Opening or closing `"` missing, including end of input inside a value
    DoubleQuoteExpected,
    /// A token outgrew its buffer
    SizeViolation,
    /// Section header without a name
    NameExpected,
    /// Section header without the closing `]`
    BracketExpected,
}

impl ErrorKind {
    /// Get a human-readable message for this error kind.
    pub fn message(self) -> &'static str {
        match self {
            Self::IllegalChar => "illegal character",
            Self::EqualSignExpected => "expected '='",
            Self::DoubleQuoteExpected => "expected '\"'",
            Self::SizeViolation => "token too long",
            Self::NameExpected => "expected section name",
            Self::BracketExpected => "expected ']'",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// A grammar violation and where it happened.
///
/// This is what the event sink receives; [`ParseError::Syntax`] wraps it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{kind} at {position}")]
pub struct SyntaxError {
    pub kind: ErrorKind,
    pub position: Position,
}

impl SyntaxError {
    pub fn new(kind: ErrorKind, position: Position) -> Self {
        Self { kind, position }
    }
}

/// Why [`Parser::parse`](crate::Parser::parse) failed.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The input does not follow the grammar.
    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    /// The character source could not be started.
    #[error("failed to start input: {0}")]
    Start(#[source] io::Error),

    /// The character source failed while reading.
    #[error("failed to read input: {0}")]
    Read(#[source] io::Error),

    /// The character source could not be finished.
    #[error("failed to finish input: {0}")]
    Finish(#[source] io::Error),

    /// The event sink refused a section or entry.
    #[error("parse aborted by event sink")]
    Aborted,
}

impl ParseError {
    /// The grammar violation, if this is one.
    pub fn syntax(&self) -> Option<&SyntaxError> {
        match self {
            Self::Syntax(error) => Some(error),
            _ => None,
        }
    }

    /// The grammar violation code, if this is one.
    pub fn kind(&self) -> Option<ErrorKind> {
        self.syntax().map(|error| error.kind)
    }
}
