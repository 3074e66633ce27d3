//! Loading of the optional TOML configuration file.

use quill_runtime::Bindings;
use std::{
    collections::BTreeMap,
    fs,
    io,
    path::{Path, PathBuf},
    time::Duration,
};

#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct Config {
    /// Invocation timeout in milliseconds.
    pub timeout_ms: Option<u64>,

    /// Variables every render starts with.
    pub variables: BTreeMap<String, String>,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl Config {
    /// Load the configuration.
    ///
    /// An explicitly given file must exist. The default file is optional, and
    /// an empty configuration is used when it is absent.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        match crate::paths::config_file() {
            Some(path) if path.is_file() => Self::from_file(&path),
            Some(path) => {
                log::debug!("no config file at {}", path.display());
                Ok(Self::default())
            }
            None => Ok(Self::default()),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_owned(),
            source,
        })?;

        let config = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_owned(),
            source,
        })?;

        log::debug!("loaded config from {}", path.display());

        Ok(config)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }

    pub fn bindings(&self) -> Bindings {
        self.variables.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
    }
}
