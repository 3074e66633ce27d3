//! This module contains the core logic of the renderer.

use crate::{
    binder::{self, lookup},
    bindings::Bindings,
    error::RenderError,
    function::{Function, FunctionResult},
    runtime::Runtime,
    syntax::{Block, Expression, Form, FunctionId, Template, Token},
};
use scopeguard::ScopeGuard;

/// Render a single expression.
pub(crate) async fn render(runtime: &Runtime, expression: &Expression, bindings: &Bindings) -> Result<String, RenderError> {
    log::debug!("rendering code: `{}`", expression.source());

    match expression.form() {
        Form::Value(value) => Ok(value.to_owned()),
        Form::Variable(name) => Ok(lookup(name, bindings)),
        Form::Call {function, arguments} => render_function_call(runtime, function, arguments, bindings).await,
    }
}

/// Render every block of a template in order and concatenate the results.
pub(crate) async fn render_template(runtime: &Runtime, template: &Template, bindings: &Bindings) -> Result<String, RenderError> {
    let mut rendered = String::new();

    for block in template.blocks() {
        match block {
            Block::Text(text) => rendered.push_str(text),
            Block::Code(expression) => rendered.push_str(&render(runtime, expression, bindings).await?),
        }
    }

    Ok(rendered)
}

async fn render_function_call(
    runtime: &Runtime,
    id: &FunctionId,
    arguments: &[Token],
    bindings: &Bindings,
) -> Result<String, RenderError> {
    let function = resolve(runtime, id)?;

    // Arguments are bound into a private copy so that neither the caller nor
    // other renders ever see them.
    let args = binder::bind(function.metadata(), arguments, bindings.clone())?;

    let result = invoke(runtime, &function, args).await?;

    if let Some(exception) = result.error() {
        return Err(RenderError::InvocationFailed {
            function: result.function().clone(),
            cause: exception.clone(),
        });
    }

    Ok(result.into_value().unwrap_or_default())
}

/// Look up a function in the runtime's registry.
pub(crate) fn resolve(runtime: &Runtime, id: &FunctionId) -> Result<Function, RenderError> {
    let registry = match runtime.registry() {
        Some(registry) if !registry.is_empty() => registry,
        _ => return Err(RenderError::NoRegistry),
    };

    match registry.resolve(id) {
        Some(function) => {
            log::debug!("resolved `{}` to {}", id, function.metadata());
            Ok(function)
        }
        None => {
            log::error!("function `{}` not found", id);
            Err(RenderError::FunctionNotFound(id.clone()))
        }
    }
}

/// Invoke a function, applying the runtime's timeout if one is configured.
///
/// This is the only point where rendering suspends. If the returned future is
/// dropped before the function finishes, the function's own future is dropped
/// with it and nothing is rendered.
pub(crate) async fn invoke(runtime: &Runtime, function: &Function, args: Bindings) -> Result<FunctionResult, RenderError> {
    let metadata = function.metadata();
    let guard = scopeguard::guard((), |_| {
        log::debug!("invocation of {} was abandoned before it completed", metadata);
    });

    let result = match runtime.timeout() {
        Some(timeout) => match tokio::time::timeout(timeout, function.invoke(runtime, args)).await {
            Ok(result) => result,
            Err(_) => {
                return Err(RenderError::TimedOut {
                    function: metadata.clone(),
                    timeout,
                })
            }
        },
        None => function.invoke(runtime, args).await,
    };

    ScopeGuard::into_inner(guard);

    Ok(result)
}
