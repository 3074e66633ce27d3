//! Splits the content of a code block into a stream of tokens.
//!
//! The grammar is deliberately tiny: tokens are separated by whitespace and
//! are either quoted values, `$variables`, `name=value` named arguments, or
//! function ids such as `upper` and `text.upper`.

use crate::{
    error::LexError,
    tokens::*,
};
use std::{iter::Peekable, str::CharIndices};

/// Tokenize the content of a code block.
///
/// Empty or whitespace-only content produces an empty token list.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    let mut lexer = Lexer::new(source);
    let mut tokens = Vec::new();

    while let Some(token) = lexer.lex()? {
        tokens.push(token);
    }

    Ok(tokens)
}

/// Returns true if the given character may appear in a variable, function,
/// plugin or argument name.
pub(crate) fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

struct Lexer<'a> {
    source: &'a str,
    chars: Peekable<CharIndices<'a>>,
}

impl<'a> Lexer<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
        }
    }

    /// Advance to the next token in the source, or `None` at end of input.
    fn lex(&mut self) -> Result<Option<Token>, LexError> {
        self.skip_whitespace();

        let token = match self.peek() {
            None => return Ok(None),
            Some('\'') | Some('"') => Token::Value(self.lex_quoted()?),
            Some('$') => {
                self.advance();
                Token::Variable(self.lex_name("variable")?)
            }
            Some(_) => self.lex_word()?,
        };

        self.expect_separator()?;

        Ok(Some(token))
    }

    /// Lex either a function id or a named argument.
    fn lex_word(&mut self) -> Result<Token, LexError> {
        let first = self.lex_name("function")?;

        match self.peek() {
            Some('.') => {
                self.advance();
                let name = self.lex_name("function")?;

                Ok(Token::FunctionId(FunctionId::qualified(first, name)))
            }

            Some('=') => {
                self.advance();

                let value = match self.peek() {
                    Some('\'') | Some('"') => Arg::Value(self.lex_quoted()?),
                    Some('$') => {
                        self.advance();
                        Arg::Variable(self.lex_name("variable")?)
                    }
                    _ => return Err(self.error(format!("expected a quoted value or variable after `{}=`", first))),
                };

                Ok(Token::NamedArg {
                    name: first,
                    value,
                })
            }

            _ => Ok(Token::FunctionId(FunctionId::new(first))),
        }
    }

    /// Lex a single- or double-quoted string literal.
    ///
    /// A backslash escapes the opening quote character or another backslash;
    /// any other backslash is kept as-is.
    fn lex_quoted(&mut self) -> Result<String, LexError> {
        let start = self.offset();
        let quote = match self.advance() {
            Some(c) => c,
            None => return Err(self.error("expected a string literal")),
        };
        let mut value = String::new();

        loop {
            match self.advance() {
                None => return Err(LexError::new("unterminated string literal", start)),
                Some('\\') => match self.peek() {
                    Some(c) if c == quote || c == '\\' => {
                        self.advance();
                        value.push(c);
                    }
                    _ => value.push('\\'),
                },
                Some(c) if c == quote => return Ok(value),
                Some(c) => value.push(c),
            }
        }
    }

    fn lex_name(&mut self, what: &str) -> Result<String, LexError> {
        let start = self.offset();

        while let Some(c) = self.peek() {
            if !is_name_char(c) {
                break;
            }
            self.advance();
        }

        let end = self.offset();

        if start == end {
            return Err(match self.peek() {
                Some(c) => self.error(format!("expected a {} name, found `{}`", what, c)),
                None => self.error(format!("expected a {} name, found end of input", what)),
            });
        }

        Ok(self.source[start..end].to_owned())
    }

    fn expect_separator(&mut self) -> Result<(), LexError> {
        match self.peek() {
            None => Ok(()),
            Some(c) if c.is_whitespace() => Ok(()),
            Some(c) => Err(self.error(format!("unexpected character `{}`, tokens must be separated by whitespace", c))),
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if !c.is_whitespace() {
                break;
            }
            self.advance();
        }
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().map(|&(_, c)| c)
    }

    fn advance(&mut self) -> Option<char> {
        self.chars.next().map(|(_, c)| c)
    }

    /// Byte offset of the next unread character.
    fn offset(&mut self) -> usize {
        match self.chars.peek() {
            Some(&(offset, _)) => offset,
            None => self.source.len(),
        }
    }

    fn error(&mut self, message: impl Into<String>) -> LexError {
        LexError::new(message, self.offset())
    }
}
