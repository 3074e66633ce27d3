//! Plugins and function lookup.
//!
//! Functions are grouped into named plugins. A function id either names its
//! plugin explicitly (`text.upper`), in which case only that plugin is
//! consulted, or leaves it out (`upper`), in which case plugins are searched in
//! the order they were registered and the first match wins.

use crate::{
    error::RegistryError,
    function::Function,
    syntax::FunctionId,
};
use std::{
    collections::BTreeMap,
    sync::{Arc, PoisonError, RwLock},
};

/// A named group of functions.
#[derive(Clone, Debug)]
pub struct Plugin {
    name: String,
    description: Option<String>,
    functions: BTreeMap<String, Function>,
}

impl Plugin {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            functions: BTreeMap::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Add a function to this plugin. A function with the same name replaces
    /// the previous one.
    pub fn function(mut self, function: Function) -> Self {
        let function = function.with_plugin_name(&self.name);

        if let Some(previous) = self.functions.insert(function.name().to_owned(), function) {
            log::warn!("function {} was defined twice; keeping the last definition", previous.metadata());
        }

        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Get a function in this plugin by name.
    pub fn get(&self, name: &str) -> Option<&Function> {
        self.functions.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    /// Iterate over the functions in this plugin, sorted by name.
    pub fn functions(&self) -> impl Iterator<Item = &Function> {
        self.functions.values()
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

/// A source of functions that code expressions can call.
///
/// Implementations must be safe to query from many renders at once.
pub trait Registry: Send + Sync {
    /// Get all registered plugins.
    ///
    /// Plugins must be returned in a stable order, the order they were
    /// registered in. Unqualified function lookup depends on it.
    fn plugins(&self) -> Vec<Arc<Plugin>>;

    fn is_empty(&self) -> bool {
        self.plugins().is_empty()
    }

    /// Find the function identified by the given id.
    fn resolve(&self, id: &FunctionId) -> Option<Function> {
        resolve(&self.plugins(), id)
    }
}

/// Find a function among plugins listed in registration order.
pub fn resolve(plugins: &[Arc<Plugin>], id: &FunctionId) -> Option<Function> {
    match id.namespace() {
        Some(namespace) => plugins.iter()
            .find(|plugin| plugin.name() == namespace)
            .and_then(|plugin| plugin.get(&id.name))
            .cloned(),

        None => plugins.iter()
            .find_map(|plugin| plugin.get(&id.name))
            .cloned(),
    }
}

/// An in-memory registry of plugins.
///
/// Plugins can be added while other threads are resolving functions; every
/// lookup sees a consistent list of plugins.
#[derive(Debug, Default)]
pub struct PluginCollection {
    plugins: RwLock<Vec<Arc<Plugin>>>,
}

impl PluginCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a plugin. Plugin names must be unique.
    pub fn add(&self, plugin: Plugin) -> Result<(), RegistryError> {
        let mut plugins = self.plugins.write().unwrap_or_else(PoisonError::into_inner);

        if plugins.iter().any(|existing| existing.name() == plugin.name()) {
            return Err(RegistryError::DuplicatePlugin(plugin.name().to_owned()));
        }

        log::debug!("registered plugin '{}' with {} function(s)", plugin.name(), plugin.len());
        plugins.push(Arc::new(plugin));

        Ok(())
    }

    /// Get a plugin by name.
    pub fn get(&self, name: &str) -> Option<Arc<Plugin>> {
        self.plugins.read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|plugin| plugin.name() == name)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.plugins.read().unwrap_or_else(PoisonError::into_inner).len()
    }
}

impl Registry for PluginCollection {
    fn plugins(&self) -> Vec<Arc<Plugin>> {
        self.plugins.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn resolve(&self, id: &FunctionId) -> Option<Function> {
        resolve(&self.plugins.read().unwrap_or_else(PoisonError::into_inner), id)
    }
}
