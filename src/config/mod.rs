//! Container configuration
//!
//! A configuration has two optional sections:
//!
//! ```toml
//! [beans]
//! "config.name" = "acme"
//!
//! [definitions]
//! MailerInterface = "SmtpMailer"
//! ```
//!
//! `definitions` may also be an array of class names; array positions are
//! numeric keys, so those classes are only auto-indexed.

mod key;
pub mod loader;

pub use key::ConfigKey;
pub use loader::ConfigLoader;

use serde_json::{Map, Value};

use crate::errors::ConfigError;
use crate::infrastructure::container::{Bean, Definition};

pub const BEANS_SECTION: &str = "beans";
pub const DEFINITIONS_SECTION: &str = "definitions";

/// Already-parsed container configuration, in document order
#[derive(Debug, Clone, Default)]
pub struct ContainerConfig {
    pub beans: Vec<(ConfigKey, Bean)>,
    pub definitions: Vec<(ConfigKey, Definition)>,
}

impl ContainerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bean(mut self, key: impl Into<ConfigKey>, value: impl Into<Bean>) -> Self {
        self.beans.push((key.into(), value.into()));
        self
    }

    pub fn definition(mut self, key: impl Into<ConfigKey>, definition: impl Into<Definition>) -> Self {
        self.definitions.push((key.into(), definition.into()));
        self
    }

    /// Definition without an explicit identifier
    pub fn auto_definition(mut self, definition: impl Into<Definition>) -> Self {
        let index = self.definitions.len();
        self.definitions.push((ConfigKey::from(index), definition.into()));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.beans.is_empty() && self.definitions.is_empty()
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Self::from_toml_source("<inline>", text)
    }

    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        Self::from_json_source("<inline>", text)
    }

    pub(crate) fn from_toml_source(source: &str, text: &str) -> Result<Self, ConfigError> {
        let document: Value = toml::from_str(text)
            .map_err(|e| ConfigError::TomlParse(source.to_string(), e))?;
        Self::from_document(document)
    }

    pub(crate) fn from_json_source(source: &str, text: &str) -> Result<Self, ConfigError> {
        let document: Value = serde_json::from_str(text)
            .map_err(|e| ConfigError::JsonParse(source.to_string(), e))?;
        Self::from_document(document)
    }

    /// Build from a parsed document; unknown top-level keys are ignored
    pub fn from_document(document: Value) -> Result<Self, ConfigError> {
        let Value::Object(mut root) = document else {
            return Err(malformed("<root>", "expected a table"));
        };

        let mut config = Self::new();

        match root.remove(BEANS_SECTION) {
            None | Some(Value::Null) => {}
            Some(Value::Object(beans)) => {
                config.beans = beans
                    .into_iter()
                    .map(|(key, value)| (ConfigKey::parse(key), Bean::Data(value)))
                    .collect();
            }
            Some(Value::Array(beans)) => {
                config.beans = beans
                    .into_iter()
                    .enumerate()
                    .map(|(index, value)| (ConfigKey::from(index), Bean::Data(value)))
                    .collect();
            }
            Some(_) => return Err(malformed(BEANS_SECTION, "expected a table or an array")),
        }

        match root.remove(DEFINITIONS_SECTION) {
            None | Some(Value::Null) => {}
            Some(Value::Object(definitions)) => {
                config.definitions = parse_definitions(definitions)?;
            }
            Some(Value::Array(classes)) => {
                for (index, class) in classes.into_iter().enumerate() {
                    let class = class_name(&index.to_string(), class)?;
                    config.definitions.push((ConfigKey::from(index), Definition::Type(class)));
                }
            }
            Some(_) => {
                return Err(malformed(DEFINITIONS_SECTION, "expected a table or an array"))
            }
        }

        Ok(config)
    }
}

fn parse_definitions(entries: Map<String, Value>) -> Result<Vec<(ConfigKey, Definition)>, ConfigError> {
    entries
        .into_iter()
        .map(|(key, value)| {
            let class = class_name(&key, value)?;
            Ok((ConfigKey::parse(key), Definition::Type(class)))
        })
        .collect()
}

fn class_name(key: &str, value: Value) -> Result<String, ConfigError> {
    match value {
        Value::String(class) => Ok(class),
        other => Err(malformed(
            DEFINITIONS_SECTION,
            &format!("entry '{}' must be a class name, found {}", key, other),
        )),
    }
}

fn malformed(section: &str, reason: &str) -> ConfigError {
    ConfigError::MalformedSection {
        section: section.to_string(),
        reason: reason.to_string(),
    }
}
