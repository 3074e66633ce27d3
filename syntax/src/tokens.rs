//! The lexical units of a code expression.

use std::fmt;

/// A single token of a code expression.
///
/// Tokens are produced by the [lexer](crate::tokenize) and are immutable from
/// then on.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Token {
    /// A quoted literal, such as `'hello'`.
    Value(String),

    /// A variable reference, such as `$input`.
    Variable(String),

    /// A named function argument, such as `count='2'` or `count=$n`.
    NamedArg {
        name: String,
        value: Arg,
    },

    /// A function name, optionally qualified with the plugin it belongs to,
    /// such as `text.upper`.
    FunctionId(FunctionId),
}

impl Token {
    pub fn kind(&self) -> TokenKind {
        match self {
            Token::Value(_) => TokenKind::Value,
            Token::Variable(_) => TokenKind::Variable,
            Token::NamedArg {..} => TokenKind::NamedArg,
            Token::FunctionId(_) => TokenKind::FunctionId,
        }
    }

    /// Get this token as a first-order argument, if it is a value or a
    /// variable.
    pub fn as_arg(&self) -> Option<Arg> {
        match self {
            Token::Value(value) => Some(Arg::Value(value.clone())),
            Token::Variable(name) => Some(Arg::Variable(name.clone())),
            _ => None,
        }
    }
}

impl From<Arg> for Token {
    fn from(arg: Arg) -> Self {
        match arg {
            Arg::Value(value) => Token::Value(value),
            Arg::Variable(name) => Token::Variable(name),
        }
    }
}

impl From<FunctionId> for Token {
    fn from(id: FunctionId) -> Self {
        Token::FunctionId(id)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Token::Value(value) => write_quoted(f, value),
            Token::Variable(name) => write!(f, "${}", name),
            Token::NamedArg {name, value} => write!(f, "{}={}", name, value),
            Token::FunctionId(id) => id.fmt(f),
        }
    }
}

/// The value carried by a named argument, or passed positionally.
///
/// Arguments are first-order: they are never function calls themselves.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Arg {
    Value(String),
    Variable(String),
}

impl fmt::Display for Arg {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Arg::Value(value) => write_quoted(f, value),
            Arg::Variable(name) => write!(f, "${}", name),
        }
    }
}

/// Identifies a function to call, such as `upper` or `text.upper`.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FunctionId {
    /// The plugin the function belongs to. If absent, every plugin is
    /// searched.
    #[cfg_attr(feature = "serde", serde(default))]
    pub namespace: Option<String>,

    /// The function name.
    pub name: String,
}

impl FunctionId {
    /// Create an unqualified function id.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            namespace: None,
            name: name.into(),
        }
    }

    /// Create a function id qualified by a plugin name.
    pub fn qualified(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: Some(namespace.into()),
            name: name.into(),
        }
    }

    /// Get the namespace, treating an empty namespace as absent.
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref().filter(|namespace| !namespace.is_empty())
    }
}

impl fmt::Display for FunctionId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.namespace() {
            Some(namespace) => write!(f, "{}.{}", namespace, self.name),
            None => f.write_str(&self.name),
        }
    }
}

/// The kind of a token, without its payload.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TokenKind {
    Value,
    Variable,
    NamedArg,
    FunctionId,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            TokenKind::Value => "value",
            TokenKind::Variable => "variable",
            TokenKind::NamedArg => "named argument",
            TokenKind::FunctionId => "function id",
        })
    }
}

fn write_quoted(f: &mut fmt::Formatter, value: &str) -> fmt::Result {
    f.write_str("'")?;

    for c in value.chars() {
        if c == '\'' || c == '\\' {
            f.write_str("\\")?;
        }
        write!(f, "{}", c)?;
    }

    f.write_str("'")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_round_trips_source_form() {
        assert_eq!(Token::Value("it's".into()).to_string(), r"'it\'s'");
        assert_eq!(Token::Variable("input".into()).to_string(), "$input");
        assert_eq!(
            Token::NamedArg {
                name: "count".into(),
                value: Arg::Variable("n".into()),
            }.to_string(),
            "count=$n",
        );
        assert_eq!(Token::from(FunctionId::qualified("text", "upper")).to_string(), "text.upper");
    }

    #[test]
    fn empty_namespace_is_absent() {
        let id = FunctionId {
            namespace: Some(String::new()),
            name: "upper".into(),
        };

        assert_eq!(id.namespace(), None);
        assert_eq!(id.to_string(), "upper");
    }
}
