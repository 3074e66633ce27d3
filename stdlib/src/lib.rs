//! The Quill standard plugin library.

use quill_runtime::{Plugin, RuntimeBuilder};

pub mod math;
pub mod text;

/// Get every standard plugin, in the order they should be registered.
pub fn plugins() -> Vec<Plugin> {
    vec![text::plugin(), math::plugin()]
}

/// Extension methods for registering the standard library with a runtime.
pub trait RuntimeBuilderExt {
    fn with_stdlib(self) -> Self;
}

impl RuntimeBuilderExt for RuntimeBuilder {
    fn with_stdlib(self) -> Self {
        self.plugins(plugins())
    }
}
