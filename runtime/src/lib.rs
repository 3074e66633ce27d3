//! Rendering of Quill code expressions.
//!
//! A [`Runtime`] renders validated [`Expression`](syntax::Expression)s and
//! [`Template`](syntax::Template)s. Rendering a value or a variable never
//! fails; rendering a function call resolves the function in a
//! [`Registry`](registry::Registry), binds the call's arguments into a copy of
//! the bindings, and awaits the function.

#[macro_use]
mod macros;

mod binder;
pub mod bindings;
mod error;
mod eval;
pub mod exception;
mod foreign;
pub mod function;
pub mod registry;
pub mod runtime;

// Re-export syntax crate.
pub mod syntax {
    pub use quill_syntax::*;
}

pub mod prelude {
    pub use crate::{
        bindings::Bindings,
        exception::Exception,
        foreign::NativeResult,
        function::{Function, Parameter},
        registry::Plugin,
        runtime::Runtime,
    };
}

pub use crate::{
    bindings::Bindings,
    error::{RegistryError, RenderError},
    exception::Exception,
    foreign::{NativeFn, NativeResult},
    function::{Function, FunctionMetadata, FunctionResult, Parameter},
    registry::{Plugin, PluginCollection, Registry},
    runtime::{Runtime, RuntimeBuilder},
};
