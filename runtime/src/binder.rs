//! Binds the arguments of a function call to the function's parameters.

use crate::{
    bindings::Bindings,
    error::RenderError,
    function::FunctionMetadata,
    syntax::{Arg, Token},
};
use std::sync::Arc;

/// Render a first-order argument: a literal renders as itself and a variable
/// renders as its current value, or the empty string if it is not set.
pub(crate) fn render_arg(arg: &Arg, bindings: &Bindings) -> String {
    match arg {
        Arg::Value(value) => value.clone(),
        Arg::Variable(name) => lookup(name, bindings),
    }
}

pub(crate) fn lookup(name: &str, bindings: &Bindings) -> String {
    match bindings.get(name) {
        Some(value) => value.to_owned(),
        None => {
            log::warn!("variable `${}` not found", name);
            String::new()
        }
    }
}

/// Bind the arguments of a call into the given bindings.
///
/// The first argument, when it is not named, binds to the first declared
/// parameter. Named arguments bind under their own name, and a repeated name
/// keeps its last value. Variables in arguments are looked up in the bindings
/// as they were before any argument was bound, so argument order never
/// changes the outcome. This differs from reading variables out of the
/// arguments as they are written, where `f 'new' b=$a` would bind `b` to `new`
/// when the first parameter is `a`; here `b` gets the caller's `a`.
pub(crate) fn bind(function: &Arc<FunctionMetadata>, arguments: &[Token], bindings: Bindings) -> Result<Bindings, RenderError> {
    if arguments.is_empty() {
        return Ok(bindings);
    }

    let first_parameter = match function.parameters.first() {
        Some(parameter) => parameter,
        None => {
            return Err(RenderError::ArityMismatch {
                function: function.clone(),
                arguments: arguments.len(),
            })
        }
    };

    let mut bound = bindings.clone();

    for (index, token) in arguments.iter().enumerate() {
        log::trace!("binding argument `{}` of {}", token, function);

        match token {
            Token::NamedArg {name, value} => {
                bound.set(name.clone(), render_arg(value, &bindings));
            }

            Token::Value(_) | Token::Variable(_) if index == 0 => {
                if let Some(arg) = token.as_arg() {
                    bound.set(first_parameter.name.clone(), render_arg(&arg, &bindings));
                }
            }

            // Expression::parse only accepts named arguments after the first.
            token => unreachable!("{} in argument position {}", token.kind(), index + 1),
        }
    }

    Ok(bound)
}
