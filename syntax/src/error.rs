use crate::tokens::TokenKind;
use std::fmt;

/// Describes an error that occurred while lexing a code expression.
#[derive(Clone, Eq, PartialEq)]
pub struct LexError {
    /// The error message. This is a string instead of an enum because the
    /// messages can be highly specific.
    pub message: String,

    /// Byte offset in the source the error occurred at.
    pub offset: usize,
}

impl LexError {
    pub fn new(message: impl Into<String>, offset: usize) -> Self {
        Self {
            message: message.into(),
            offset,
        }
    }
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} (at offset {})", self.message, self.offset)
    }
}

impl fmt::Debug for LexError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self)
    }
}

impl std::error::Error for LexError {}

/// A token sequence that does not form a valid expression.
///
/// No [`Expression`](crate::Expression) exists if one of these is returned.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum TokenError {
    #[error("an expression must contain at least one token")]
    EmptySequence,

    #[error("the first token must be a function id, value or variable, got a named argument")]
    LeadingNamedArg,

    #[error("the second token must be a value, variable or named argument, got a {0}")]
    InvalidSecondToken(TokenKind),

    #[error("every argument after the first must be a named argument, got a {kind} at position {index}")]
    ExpectedNamedArg {
        index: usize,
        kind: TokenKind,
    },
}

/// Any error produced while turning source text into an expression or
/// template.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum SyntaxError {
    #[error("{0}")]
    Lex(#[from] LexError),

    #[error("{0}")]
    Token(#[from] TokenError),
}
