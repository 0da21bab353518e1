//! Structural validation of Chrome App manifests

use crate::error::{ConversionError, Result};
use crate::models::LegacyManifest;
use serde_json::Value;

/// Keys every Chrome App manifest must carry
pub const REQUIRED_KEYS: &[&str] = &["name"];

pub fn verify_manifest(manifest: &LegacyManifest) -> Result<()> {
    for key in REQUIRED_KEYS {
        if !manifest.contains_key(key) {
            return Err(ConversionError::MalformedManifest(format!(
                "manifest is missing required key `{key}`"
            )));
        }
    }

    match manifest.get("name") {
        Some(Value::String(name)) if !name.trim().is_empty() => {}
        _ => {
            return Err(ConversionError::MalformedManifest(
                "manifest `name` must be a non-empty string".to_string(),
            ))
        }
    }

    // Extensions share the manifest format; convert them anyway
    if !manifest.contains_key("app") {
        log::warn!("Manifest has no `app` section; this may not be a Chrome App.");
    }

    Ok(())
}
