use std::{
    error::Error,
    fmt,
    num::{ParseFloatError, ParseIntError},
};

/// An exception raised by a function while it was being invoked.
///
/// Exceptions are carried inside a [`FunctionResult`](crate::FunctionResult)
/// rather than being returned from the dispatcher directly, which turns them
/// into an [`InvocationFailed`](crate::RenderError::InvocationFailed) error.
#[derive(Clone, Eq, PartialEq)]
pub struct Exception {
    message: String,
    cause: Option<Box<Exception>>,
}

impl Exception {
    /// Create a new exception with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            cause: None,
        }
    }

    /// Create a new exception with a message and another exception that caused
    /// this one.
    ///
    /// Causes can be chained together, almost like a linked list. This
    /// provides a poor man's kind of "trace" of errors to help find the root
    /// cause.
    pub fn with_cause(message: impl Into<String>, cause: Exception) -> Self {
        Self {
            message: message.into(),
            cause: Some(Box::new(cause)),
        }
    }

    /// Get the exception message.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the cause of the exception, if present.
    #[inline]
    pub fn cause(&self) -> Option<&Exception> {
        self.cause.as_deref()
    }
}

impl From<&str> for Exception {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

impl From<String> for Exception {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

impl From<ParseIntError> for Exception {
    fn from(error: ParseIntError) -> Self {
        Self::new(error.to_string())
    }
}

impl From<ParseFloatError> for Exception {
    fn from(error: ParseFloatError) -> Self {
        Self::new(error.to_string())
    }
}

impl fmt::Debug for Exception {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl fmt::Display for Exception {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.message)?;

        let mut cause = self.cause.as_ref();
        while let Some(c) = cause {
            write!(f, "; caused by: {}", c.message)?;
            cause = c.cause.as_ref();
        }

        Ok(())
    }
}

impl Error for Exception {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.cause.as_deref().map(|cause| cause as &(dyn Error + 'static))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_causes() {
        let exception = Exception::with_cause(
            "could not add",
            Exception::with_cause("invalid input", Exception::new("not a number")),
        );

        assert_eq!(
            exception.to_string(),
            "could not add; caused by: invalid input; caused by: not a number",
        );
        assert_eq!(exception.cause().map(Exception::message), Some("invalid input"));
    }

    #[test]
    fn parse_errors_convert() {
        let exception = Exception::from("x".parse::<i64>().unwrap_err());

        assert_eq!(exception.message(), "invalid digit found in string");
    }
}
