//! Error types for lexing and parsing interface descriptions.

use thiserror::Error;

/// Error type for lexing and parsing operations.
#[derive(Debug, Error)]
pub enum ParseError {
    /// A character that cannot start any token.
    #[error("unexpected character '{character}' at {line}:{column}")]
    UnexpectedCharacter {
        /// Offending character.
        character: char,
        /// 1-based line.
        line: usize,
        /// 1-based column.
        column: usize,
    },

    /// Block comment or string literal not closed before end of input.
    #[error("unterminated {what} starting at {line}:{column}")]
    Unterminated {
        /// What was left open ("comment", "string").
        what: &'static str,
        /// 1-based line.
        line: usize,
        /// 1-based column.
        column: usize,
    },

    /// Integer literal that does not fit or is malformed.
    #[error("invalid number '{text}' at {line}:{column}")]
    InvalidNumber {
        /// Literal text.
        text: String,
        /// 1-based line.
        line: usize,
        /// 1-based column.
        column: usize,
    },

    /// Token other than the expected one.
    #[error("expected {expected}, found {found} at {line}:{column}")]
    UnexpectedToken {
        /// What the parser wanted.
        expected: String,
        /// What it got.
        found: String,
        /// 1-based line.
        line: usize,
        /// 1-based column.
        column: usize,
    },

    /// Input ended in the middle of a construct.
    #[error("unexpected end of input, expected {expected}")]
    UnexpectedEof {
        /// What the parser wanted.
        expected: String,
    },

    /// Platform name not in the known set.
    #[error("unknown platform '{name}' at {line}:{column}")]
    UnknownPlatform {
        /// Platform identifier as written.
        name: String,
        /// 1-based line.
        line: usize,
        /// 1-based column.
        column: usize,
    },

    /// Attribute name not in the known set.
    #[error("unknown attribute '{name}' at {line}:{column}")]
    UnknownAttribute {
        /// Attribute identifier as written.
        name: String,
        /// 1-based line.
        line: usize,
        /// 1-based column.
        column: usize,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ParseError {
    /// Creates an unexpected token error.
    pub fn unexpected(
        expected: impl Into<String>,
        found: impl Into<String>,
        line: usize,
        column: usize,
    ) -> Self {
        Self::UnexpectedToken {
            expected: expected.into(),
            found: found.into(),
            line,
            column,
        }
    }

    /// Creates an unexpected end of input error.
    pub fn eof(expected: impl Into<String>) -> Self {
        Self::UnexpectedEof {
            expected: expected.into(),
        }
    }

    /// Returns the 1-based line/column of the error, if it has one.
    #[must_use]
    pub fn location(&self) -> Option<(usize, usize)> {
        match self {
            Self::UnexpectedCharacter { line, column, .. }
            | Self::Unterminated { line, column, .. }
            | Self::InvalidNumber { line, column, .. }
            | Self::UnexpectedToken { line, column, .. }
            | Self::UnknownPlatform { line, column, .. }
            | Self::UnknownAttribute { line, column, .. } => Some((*line, *column)),
            Self::UnexpectedEof { .. } | Self::Io(_) => None,
        }
    }
}
