use thiserror::Error;

use std::io;

/// What the scanner objected to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    #[error("invalid input {found:?}")]
    InvalidInput { found: char },

    #[error("unexpected end of input")]
    UnexpectedEndOfInput,

    /// The scanner was stepped after it reached its terminal state.
    #[error("invalid scanner state")]
    InvalidState,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{kind} at line {line}, column {column}")]
    Parse {
        line: usize,
        column: usize,
        kind: ParseErrorKind,
    },

    #[error("cannot bind {}: {message}", .key.as_deref().unwrap_or("config"))]
    Bind { key: Option<String>, message: String },

    #[error("{0}")]
    Message(String),
}

impl Error {
    /// The scanner error kind, if this error came from the scanner.
    pub fn parse_kind(&self) -> Option<ParseErrorKind> {
        match self {
            Error::Parse { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}

pub type Result<T> = core::result::Result<T, Error>;
