use std::{fs, path::Path, path::PathBuf};
use tracing::{debug, info};

use super::ContainerConfig;
use crate::errors::{ConfigError, ContainerError, Result};
use crate::infrastructure::container::Container;

/// Configuration loader responsible for reading container configuration files
pub struct ConfigLoader {
    base_path: Option<PathBuf>,
}

impl ConfigLoader {
    /// Create a loader resolving relative paths against the working directory
    pub fn new() -> Self {
        Self { base_path: None }
    }

    /// Create a loader resolving relative paths against `base_path`
    pub fn with_base_path(base_path: PathBuf) -> Self {
        Self {
            base_path: Some(base_path),
        }
    }

    /// Read and parse a `.toml` or `.json` file
    pub fn load(&self, path: impl AsRef<Path>) -> std::result::Result<ContainerConfig, ConfigError> {
        let path = self.resolve_path(path.as_ref());
        let source = path.display().to_string();

        let text = fs::read_to_string(&path)
            .map_err(|e| ConfigError::FileRead(source.clone(), e))?;

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        let config = match extension.as_str() {
            "toml" => ContainerConfig::from_toml_source(&source, &text)?,
            "json" => ContainerConfig::from_json_source(&source, &text)?,
            other => return Err(ConfigError::UnsupportedFormat(other.to_string())),
        };

        debug!(
            path = %source,
            beans = config.beans.len(),
            definitions = config.definitions.len(),
            "Loaded container configuration"
        );
        Ok(config)
    }

    /// Read a file and apply it to `container`
    pub fn load_into(&self, path: impl AsRef<Path>, container: &Container) -> Result<()> {
        let config = self.load(path)?;
        container.load_config(config)
    }

    fn resolve_path(&self, path: &Path) -> PathBuf {
        match &self.base_path {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        }
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl Container {
    /// Apply a configuration: beans first, then definitions
    ///
    /// Stops at the first failing entry; entries applied before it stay.
    pub fn load_config(&self, config: ContainerConfig) -> Result<()> {
        let (bean_count, definition_count) = (config.beans.len(), config.definitions.len());

        for (key, value) in config.beans {
            match key.name() {
                Some(id) => self.set(id, value)?,
                None => return Err(ContainerError::InvalidBeanKey(key.to_string())),
            }
        }

        for (key, definition) in config.definitions {
            self.register_definition(definition, key.name())?;
        }

        info!(
            beans = bean_count,
            definitions = definition_count,
            "Applied container configuration"
        );
        Ok(())
    }
}
