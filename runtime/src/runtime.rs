//! The Quill runtime.

use crate::{
    bindings::Bindings,
    error::{RegistryError, RenderError},
    eval,
    function::FunctionResult,
    registry::{Plugin, PluginCollection, Registry},
    syntax::{Expression, FunctionId, Template},
};
use std::{fmt, sync::Arc, time::Duration};

/// Configure a runtime.
#[derive(Default)]
pub struct RuntimeBuilder {
    plugins: Vec<Plugin>,
    registry: Option<Arc<dyn Registry>>,
    timeout: Option<Duration>,
}

impl RuntimeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a plugin in the runtime's own plugin collection.
    pub fn plugin(mut self, plugin: Plugin) -> Self {
        self.plugins.push(plugin);
        self
    }

    /// Register several plugins, in order.
    pub fn plugins(mut self, plugins: impl IntoIterator<Item = Plugin>) -> Self {
        self.plugins.extend(plugins);
        self
    }

    /// Use an external registry instead of the runtime's own plugin
    /// collection.
    pub fn registry(mut self, registry: Arc<dyn Registry>) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Fail any function invocation that takes longer than the given
    /// duration.
    ///
    /// Timeouts require the render to run inside a tokio runtime.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn build(self) -> Result<Runtime, RegistryError> {
        let registry: Option<Arc<dyn Registry>> = match self.registry {
            Some(_) if !self.plugins.is_empty() => return Err(RegistryError::ExternalRegistry),
            Some(registry) => Some(registry),
            None if self.plugins.is_empty() => None,
            None => {
                let collection = PluginCollection::new();

                for plugin in self.plugins {
                    collection.add(plugin)?;
                }

                Some(Arc::new(collection))
            }
        };

        Ok(Runtime {
            inner: Arc::new(Inner {
                registry,
                timeout: self.timeout,
            }),
        })
    }
}

/// Renders expressions and templates against a registry of functions.
///
/// A runtime is a cheap handle: clones share the same registry. It is also
/// what native functions receive, so they can call other functions.
#[derive(Clone, Default)]
pub struct Runtime {
    inner: Arc<Inner>,
}

#[derive(Default)]
struct Inner {
    registry: Option<Arc<dyn Registry>>,
    timeout: Option<Duration>,
}

impl Runtime {
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get the registry functions are resolved against, if any.
    pub fn registry(&self) -> Option<&dyn Registry> {
        self.inner.registry.as_deref()
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.inner.timeout
    }

    /// Render an expression with the given bindings.
    ///
    /// The bindings are never modified; function arguments are bound into a
    /// private copy.
    pub async fn render(&self, expression: &Expression, bindings: &Bindings) -> Result<String, RenderError> {
        eval::render(self, expression, bindings).await
    }

    /// Render a template with the given bindings.
    ///
    /// Code blocks are rendered in order. The first block that fails fails the
    /// whole template.
    pub async fn render_template(&self, template: &Template, bindings: &Bindings) -> Result<String, RenderError> {
        eval::render_template(self, template, bindings).await
    }

    /// Call a function directly with the given arguments.
    ///
    /// An exception raised by the function is returned in the result rather
    /// than as an error.
    pub async fn invoke(&self, id: &FunctionId, args: Bindings) -> Result<FunctionResult, RenderError> {
        let function = eval::resolve(self, id)?;

        eval::invoke(self, &function, args).await
    }
}

impl fmt::Debug for Runtime {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Runtime")
            .field("plugins", &self.registry().map(|registry| registry.plugins().len()))
            .field("timeout", &self.inner.timeout)
            .finish()
    }
}
