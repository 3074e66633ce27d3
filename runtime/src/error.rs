use crate::{
    exception::Exception,
    function::FunctionMetadata,
    syntax::FunctionId,
};
use std::{sync::Arc, time::Duration};

/// An error rendering an expression.
///
/// Render errors are never retried or recovered from locally; they fail the
/// whole expression, and the whole template the expression is part of.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum RenderError {
    #[error("no plugins are registered")]
    NoRegistry,

    #[error("function `{0}` not found")]
    FunctionNotFound(FunctionId),

    #[error("function {function} does not take any arguments but it is being called with {arguments} argument(s)")]
    ArityMismatch {
        function: Arc<FunctionMetadata>,
        arguments: usize,
    },

    #[error("error invoking function {function}: {cause}")]
    InvocationFailed {
        function: Arc<FunctionMetadata>,
        #[source]
        cause: Exception,
    },

    #[error("function {function} did not complete within {timeout:?}")]
    TimedOut {
        function: Arc<FunctionMetadata>,
        timeout: Duration,
    },
}

/// An error registering plugins.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum RegistryError {
    #[error("a plugin named `{0}` is already registered")]
    DuplicatePlugin(String),

    #[error("plugins cannot be added to the builder when an external registry is used; register them with that registry instead")]
    ExternalRegistry,
}
