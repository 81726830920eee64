//! Parser error types.

use std::fmt;

use thiserror::Error;

use crate::lexer::{LexError, Position, Span, Token, TokenKind};

/// Which stage rejected the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// Malformed literal or comment, or an unknown character.
    Lex,
    /// Token mismatch or unexpected end of input.
    Syntax,
    /// A recognized form the parser does not implement.
    Unsupported,
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Lex => "lexical error",
            Self::Syntax => "syntax error",
            Self::Unsupported => "unsupported",
        })
    }
}

/// A parse error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} at {position}: {message}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    /// The error message.
    pub message: String,
    /// The location of the offending token.
    pub span: Span,
    /// Line and column of the offending token.
    pub position: Position,
    /// Expected tokens (if applicable).
    pub expected: Option<String>,
    /// Textual form of the token found.
    pub found: Option<String>,
}

impl ParseError {
    /// Creates a new syntax error.
    #[must_use]
    pub fn new(message: impl Into<String>, token: &Token) -> Self {
        Self {
            kind: ParseErrorKind::Syntax,
            message: message.into(),
            span: token.span,
            position: token.position,
            expected: None,
            found: Some(token.kind.to_string()),
        }
    }

    /// Creates an "unexpected token" error.
    #[must_use]
    pub fn unexpected(expected: impl Into<String>, token: &Token) -> Self {
        if token.is_eof() {
            return Self::unexpected_eof(expected, token);
        }
        let expected: String = expected.into();
        Self {
            message: format!("expected {expected}, found {}", token.kind),
            expected: Some(expected),
            ..Self::new("", token)
        }
    }

    /// Creates an "unexpected end of input" error.
    #[must_use]
    pub fn unexpected_eof(expected: impl Into<String>, token: &Token) -> Self {
        let expected: String = expected.into();
        Self {
            message: format!("unexpected end of input, expected {expected}"),
            expected: Some(expected),
            found: Some(TokenKind::Eof.to_string()),
            ..Self::new("", token)
        }
    }

    /// Creates an error for a form that is recognized but not implemented.
    #[must_use]
    pub fn unsupported(construct: impl fmt::Display, token: &Token) -> Self {
        Self {
            kind: ParseErrorKind::Unsupported,
            message: format!("{construct} is not supported"),
            ..Self::new("", token)
        }
    }

    /// Returns true for syntax errors, the only kind speculative parsing
    /// absorbs.
    #[must_use]
    pub const fn is_syntax(&self) -> bool {
        matches!(self.kind, ParseErrorKind::Syntax)
    }

    /// Byte offset of the offending token.
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.span.start
    }
}

impl From<LexError> for ParseError {
    fn from(err: LexError) -> Self {
        Self {
            kind: ParseErrorKind::Lex,
            message: err.message,
            span: Span::new(err.offset, err.offset),
            position: err.position,
            expected: None,
            found: None,
        }
    }
}
