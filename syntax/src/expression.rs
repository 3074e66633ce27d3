//! Validated code expressions.
//!
//! An expression is the content of a single `{{ ... }}` block. Its grammar is:
//!
//! ```text
//! expression := value | variable | call
//! call       := function_id [ (value | variable | named_arg) named_arg* ]
//! ```
//!
//! The grammar is enforced exactly once, when the expression is constructed.

use crate::{
    error::{SyntaxError, TokenError},
    lexer::tokenize,
    tokens::*,
};
use std::fmt;

/// A non-fatal problem found while validating an expression.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Warning {
    /// The expression starts with a value or variable but more tokens follow.
    /// Only the first token is rendered.
    TrailingTokensIgnored {
        count: usize,
    },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Warning::TrailingTokensIgnored {count} => write!(
                f,
                "the first token is a value or variable, but {} more token(s) follow; these will be ignored",
                count,
            ),
        }
    }
}

/// The shape of a validated expression.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Form<'a> {
    /// A literal value.
    Value(&'a str),

    /// A variable reference.
    Variable(&'a str),

    /// A function call and its arguments.
    Call {
        function: &'a FunctionId,
        arguments: &'a [Token],
    },
}

/// An immutable, validated sequence of tokens ready for rendering.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Expression {
    /// All tokens, including any that are ignored when rendering.
    tokens: Vec<Token>,

    /// Number of leading tokens that take part in rendering.
    rendered: usize,

    /// The source text this expression was parsed from, if any.
    source: Option<String>,

    warnings: Vec<Warning>,
}

impl Expression {
    /// Validate a token sequence as an expression.
    ///
    /// Rules are checked in token order and the first violation is returned.
    pub fn parse(tokens: Vec<Token>) -> Result<Self, TokenError> {
        let mut warnings = Vec::new();

        let rendered = match tokens.first() {
            None => return Err(TokenError::EmptySequence),
            Some(Token::NamedArg {..}) => return Err(TokenError::LeadingNamedArg),

            Some(Token::Value(_)) | Some(Token::Variable(_)) => {
                if tokens.len() > 1 {
                    let warning = Warning::TrailingTokensIgnored {
                        count: tokens.len() - 1,
                    };
                    log::warn!("{}", warning);
                    warnings.push(warning);
                }

                1
            }

            Some(Token::FunctionId(_)) => {
                if let Some(second) = tokens.get(1) {
                    if let Token::FunctionId(_) = second {
                        return Err(TokenError::InvalidSecondToken(second.kind()));
                    }
                }

                for (index, token) in tokens.iter().enumerate().skip(2) {
                    if token.kind() != TokenKind::NamedArg {
                        return Err(TokenError::ExpectedNamedArg {
                            index,
                            kind: token.kind(),
                        });
                    }
                }

                tokens.len()
            }
        };

        Ok(Self {
            tokens,
            rendered,
            source: None,
            warnings,
        })
    }

    /// Tokenize and validate the content of a code block.
    ///
    /// A lexical error short-circuits before the grammar is checked.
    pub fn from_source(content: &str) -> Result<Self, SyntaxError> {
        let content = content.trim();
        let tokens = tokenize(content)?;
        let mut expression = Self::parse(tokens)?;
        expression.source = Some(content.to_owned());

        Ok(expression)
    }

    /// Get every token in this expression, including ignored ones.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Get the tokens that take part in rendering.
    pub fn rendered_tokens(&self) -> &[Token] {
        &self.tokens[..self.rendered]
    }

    /// Get the tokens that were accepted but are never rendered.
    pub fn ignored_tokens(&self) -> &[Token] {
        &self.tokens[self.rendered..]
    }

    /// Get any diagnostics produced while validating this expression.
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// The leading token. Always present.
    pub fn head(&self) -> &Token {
        &self.tokens[0]
    }

    /// Get the shape of this expression. Ignored tokens are not part of it.
    pub fn form(&self) -> Form<'_> {
        match self.head() {
            Token::Value(value) => Form::Value(value),
            Token::Variable(name) => Form::Variable(name),
            Token::FunctionId(function) => Form::Call {
                function,
                arguments: &self.tokens[1..],
            },
            Token::NamedArg {..} => unreachable!("expressions never start with a named argument"),
        }
    }

    /// If this expression is a function call, get the function being called.
    pub fn function(&self) -> Option<&FunctionId> {
        match self.head() {
            Token::FunctionId(id) => Some(id),
            _ => None,
        }
    }

    /// Get the arguments of a function call. Empty if this expression is not
    /// a function call.
    pub fn arguments(&self) -> &[Token] {
        match self.function() {
            Some(_) => &self.tokens[1..],
            None => &[],
        }
    }

    /// Get the source text of this expression.
    pub fn source(&self) -> String {
        match self.source.as_ref() {
            Some(source) => source.clone(),
            None => self.to_string(),
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (i, token) in self.tokens.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            token.fmt(f)?;
        }

        Ok(())
    }
}
