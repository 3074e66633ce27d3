//! The core Quill syntax implementation.
//!
//! A template is plain text with embedded `{{ ... }}` code blocks. Each code
//! block holds a single expression: a quoted value, a `$variable`, or a call
//! of one function with one optional positional argument followed by named
//! arguments. This crate turns source text into validated [`Expression`]s; it
//! never evaluates anything.

pub mod error;
pub mod expression;
mod lexer;
pub mod template;
pub mod tokens;

pub use error::{LexError, SyntaxError, TokenError};
pub use expression::{Expression, Form, Warning};
pub use lexer::tokenize;
pub use template::{Block, Template};
pub use tokens::{Arg, FunctionId, Token, TokenKind};
