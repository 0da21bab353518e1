//! Conversion configuration supplied by the caller

use crate::error::{ConversionError, IoResultExt, Result};
use crate::utils::helpers::is_contained_relative_path;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionConfig {
    /// Entry HTML document, relative to the bundle root
    pub start_url: String,

    /// Reserved keys (update behaviour, report path, ...), carried verbatim
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ConversionConfig {
    pub fn new(start_url: impl Into<String>) -> Self {
        Self {
            start_url: start_url.into(),
            extra: Map::new(),
        }
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)
            .map_err(|e| ConversionError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check that `start_url` names a file inside the app bundle
    pub fn validate(&self) -> Result<()> {
        if self.start_url.trim().is_empty() {
            return Err(ConversionError::InvalidConfig(
                "`start_url` must not be empty".to_string(),
            ));
        }
        if !is_contained_relative_path(Path::new(&self.start_url)) {
            return Err(ConversionError::InvalidConfig(format!(
                "`start_url` must be a relative path inside the app, got `{}`",
                self.start_url
            )));
        }
        Ok(())
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref()).at(path.as_ref())?;
        Self::from_json(&text)
    }

    /// Reference default configuration printed by `chrome2pwa config`
    pub fn reference(converter_name: &str) -> BTreeMap<&'static str, Value> {
        BTreeMap::from([
            ("start_url", Value::from("index.html")),
            ("name", Value::from("My App")),
            ("id", Value::from(-1)),
            ("root", Value::from("")),
            ("boilerplate-dir", Value::from(format!("/{converter_name}/"))),
            ("update-uris", Value::from(true)),
            ("enable-watch-sw", Value::from(true)),
            ("report-path", Value::from(format!("{converter_name}-report/"))),
        ])
    }

    /// Reference configuration as sorted, two-space indented JSON
    pub fn reference_json(converter_name: &str) -> String {
        // Map keys and JSON values always serialize
        serde_json::to_string_pretty(&Self::reference(converter_name)).unwrap_or_default()
    }
}
