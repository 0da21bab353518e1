//! Manifest data structures for Chrome Apps and progressive web apps

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Chrome App `manifest.json`, kept as a loose JSON object.
///
/// Chrome App manifests carry many keys with no web app equivalent, so only
/// the handful the converter understands get typed accessors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LegacyManifest {
    fields: Map<String, Value>,
}

impl LegacyManifest {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// String value of a key. Non-string values are rendered as compact JSON.
    pub fn get_text(&self, key: &str) -> Option<String> {
        self.fields.get(key).map(|value| match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }

    pub fn name(&self) -> Option<String> {
        self.get_text("name")
    }

    pub fn short_name(&self) -> Option<String> {
        self.get_text("short_name")
    }

    pub fn default_locale(&self) -> Option<String> {
        self.get_text("default_locale")
    }

    /// `icons` entries as `(size, path)` pairs in manifest order
    pub fn icons(&self) -> Vec<(String, String)> {
        match self.fields.get("icons") {
            Some(Value::Object(icons)) => icons
                .iter()
                .map(|(size, path)| {
                    let path = match path {
                        Value::String(s) => s.clone(),
                        other => other.to_string(),
                    };
                    (size.clone(), path)
                })
                .collect(),
            _ => Vec::new(),
        }
    }
}

impl From<Map<String, Value>> for LegacyManifest {
    fn from(fields: Map<String, Value>) -> Self {
        Self::new(fields)
    }
}

/// Web app manifest written as `manifest.webmanifest`.
///
/// Fields are declared in lexical order so serialization emits sorted keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetManifest {
    pub background_color: String,
    pub display: String,
    pub icons: Vec<Icon>,
    pub lang: String,
    pub name: String,
    pub orientation: String,
    pub prefer_related_applications: bool,
    pub related_applications: Vec<Value>,
    pub short_name: String,
    pub splash_screens: Vec<Value>,
    pub start_url: String,
    pub theme_color: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Icon {
    pub sizes: String,
    pub src: String,
}

impl TargetManifest {
    /// Serialize with sorted keys and four-space indentation
    pub fn to_pretty_json(&self) -> serde_json::Result<String> {
        let mut out = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
        self.serialize(&mut serializer)?;
        // serde_json only ever writes valid UTF-8
        Ok(String::from_utf8_lossy(&out).into_owned())
    }
}
