//! Functions that can be called from code expressions.

use crate::{
    bindings::Bindings,
    exception::Exception,
    foreign::NativeFn,
    runtime::Runtime,
};
use std::{fmt, sync::Arc, time::Instant};

/// A declared parameter of a function.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Parameter {
    pub name: String,
    pub description: Option<String>,

    /// Value bound to this parameter when the caller does not provide one.
    pub default_value: Option<String>,
}

impl Parameter {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            default_value: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_default(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }
}

impl From<&str> for Parameter {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Describes a function: where it lives and what parameters it declares.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FunctionMetadata {
    /// Name of the plugin the function is registered in. Set when the
    /// function is added to a plugin.
    pub plugin_name: Option<String>,
    pub name: String,
    pub description: Option<String>,

    /// Declared parameters, in order. Only the first one can be bound
    /// positionally.
    pub parameters: Vec<Parameter>,
}

impl FunctionMetadata {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            plugin_name: None,
            name: name.into(),
            description: None,
            parameters: Vec::new(),
        }
    }
}

impl fmt::Display for FunctionMetadata {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.plugin_name.as_ref() {
            Some(plugin) => write!(f, "{}.{}", plugin, self.name),
            None => f.write_str(&self.name),
        }
    }
}

/// A callable function.
///
/// Cloning a function is cheap; clones share the same metadata and body.
#[derive(Clone, Debug)]
pub struct Function {
    metadata: Arc<FunctionMetadata>,
    body: NativeFn,
}

impl Function {
    /// Create a function implemented in native code.
    pub fn native(name: impl Into<String>, body: impl Into<NativeFn>) -> Self {
        Self {
            metadata: Arc::new(FunctionMetadata::new(name)),
            body: body.into(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        Arc::make_mut(&mut self.metadata).description = Some(description.into());
        self
    }

    /// Declare the next parameter of this function.
    pub fn with_parameter(mut self, parameter: impl Into<Parameter>) -> Self {
        Arc::make_mut(&mut self.metadata).parameters.push(parameter.into());
        self
    }

    pub(crate) fn with_plugin_name(mut self, plugin_name: &str) -> Self {
        Arc::make_mut(&mut self.metadata).plugin_name = Some(plugin_name.to_owned());
        self
    }

    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    pub fn metadata(&self) -> &Arc<FunctionMetadata> {
        &self.metadata
    }

    /// Invoke this function with the given bindings.
    ///
    /// Parameters that have a default value and are not bound are filled in
    /// first. An exception raised by the function is embedded in the result
    /// instead of being returned as an error.
    pub async fn invoke(&self, runtime: &Runtime, mut args: Bindings) -> FunctionResult {
        for parameter in self.metadata.parameters.iter() {
            if let Some(default) = parameter.default_value.as_ref() {
                if !args.contains(&parameter.name) {
                    args.set(parameter.name.clone(), default.clone());
                }
            }
        }

        let start_time = Instant::now();
        let result = self.body.call(runtime.clone(), args).await;

        log::debug!("function {} took {:?}", self.metadata, start_time.elapsed());

        match result {
            Ok(value) => FunctionResult::new(self.metadata.clone(), value),
            Err(exception) => FunctionResult::failed(self.metadata.clone(), exception),
        }
    }
}

/// The outcome of invoking a function: an optional string value, or the
/// exception the function raised.
#[derive(Clone, Debug)]
pub struct FunctionResult {
    function: Arc<FunctionMetadata>,
    value: Option<String>,
    error: Option<Exception>,
}

impl FunctionResult {
    pub fn new(function: impl Into<Arc<FunctionMetadata>>, value: Option<String>) -> Self {
        Self {
            function: function.into(),
            value,
            error: None,
        }
    }

    pub fn failed(function: impl Into<Arc<FunctionMetadata>>, error: Exception) -> Self {
        Self {
            function: function.into(),
            value: None,
            error: Some(error),
        }
    }

    /// The function that produced this result.
    pub fn function(&self) -> &Arc<FunctionMetadata> {
        &self.function
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub fn error(&self) -> Option<&Exception> {
        self.error.as_ref()
    }

    pub fn into_value(self) -> Option<String> {
        self.value
    }
}

impl fmt::Display for FunctionResult {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.value().unwrap_or_default())
    }
}
