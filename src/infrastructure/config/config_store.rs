use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde_yaml::Value;
use tracing::debug;

use crate::application::services::value_resolver::ConfigProvider;
use crate::common::error::XdockError;
use crate::common::result::XdockResult;

/// Prefix of environment variables that override file configuration.
pub const ENV_PREFIX: &str = "XDOCK";

/// Default location of the user configuration file
/// (`~/.config/xdock/config.yml` on Linux).
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("xdock").join("config.yml"))
}

/// Configuration read from a YAML file. Dotted keys walk nested mappings.
#[derive(Debug, Clone, Default)]
pub struct YamlConfigStore {
    root: Value,
}

impl YamlConfigStore {
    /// Load configuration from `path`. A missing file is an empty store.
    pub fn load<P: AsRef<Path>>(path: P) -> XdockResult<Self> {
        let path = path.as_ref();

        if !path.exists() {
            debug!(path = %path.display(), "configuration file not found, using empty configuration");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path).map_err(|e| {
            XdockError::config_error_with_source(
                format!("failed to read {}", path.display()),
                Some(path.to_path_buf()),
                e,
            )
        })?;

        let store = Self::from_yaml_str(&contents).map_err(|e| match e {
            XdockError::ConfigError { message, source, .. } => XdockError::ConfigError {
                message,
                path: Some(path.to_path_buf()),
                source,
            },
            other => other,
        })?;
        debug!(path = %path.display(), "loaded configuration file");
        Ok(store)
    }

    pub fn from_yaml_str(contents: &str) -> XdockResult<Self> {
        let root: Value = serde_yaml::from_str(contents).map_err(|e| {
            XdockError::config_error_with_source(format!("invalid YAML: {}", e), None, e)
        })?;

        match root {
            Value::Mapping(_) | Value::Null => Ok(Self { root }),
            _ => Err(XdockError::config_error(
                "configuration root must be a mapping",
                None,
            )),
        }
    }

    fn lookup(&self, key: &str) -> Option<&Value> {
        let mut current = &self.root;
        for segment in key.split('.') {
            current = current.as_mapping()?.get(segment)?;
        }
        Some(current)
    }
}

impl ConfigProvider for YamlConfigStore {
    fn get(&self, key: &str) -> Option<String> {
        match self.lookup(key)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }
}

/// Configuration from `XDOCK__SECTION__KEY` style environment variables.
///
/// `__` separates nesting levels and segments are lower-cased, so
/// `XDOCK__APP__IMAGE` answers the key `app.image`.
#[derive(Debug, Clone, Default)]
pub struct EnvConfigProvider {
    values: HashMap<String, String>,
}

impl EnvConfigProvider {
    pub fn from_env() -> Self {
        Self::from_vars(ENV_PREFIX, std::env::vars())
    }

    /// Takes an iterator so tests can pass synthetic variables.
    pub fn from_vars(prefix: &str, vars: impl IntoIterator<Item = (String, String)>) -> Self {
        let needle = format!("{}__", prefix);
        let values = vars
            .into_iter()
            .filter_map(|(name, value)| {
                let rest = name.strip_prefix(&needle)?;
                if rest.is_empty() {
                    return None;
                }
                let key = rest
                    .split("__")
                    .map(str::to_lowercase)
                    .collect::<Vec<_>>()
                    .join(".");
                Some((key, value))
            })
            .collect();

        Self { values }
    }
}

impl ConfigProvider for EnvConfigProvider {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}

/// Ordered providers; the first one that knows a key answers it.
#[derive(Default)]
pub struct LayeredConfig {
    layers: Vec<Box<dyn ConfigProvider>>,
}

impl LayeredConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_layer(mut self, layer: impl ConfigProvider + 'static) -> Self {
        self.layers.push(Box::new(layer));
        self
    }

    /// Environment over the YAML file at `path` (or the default location).
    pub fn load(path: Option<&Path>) -> XdockResult<Self> {
        let file_layer = match path.map(Path::to_path_buf).or_else(default_config_path) {
            Some(path) => YamlConfigStore::load(path)?,
            None => YamlConfigStore::default(),
        };

        Ok(Self::new()
            .with_layer(EnvConfigProvider::from_env())
            .with_layer(file_layer))
    }
}

impl ConfigProvider for LayeredConfig {
    fn get(&self, key: &str) -> Option<String> {
        self.layers.iter().find_map(|layer| layer.get(key))
    }
}
