//! Chrome App manifest parsing

use crate::error::{ConversionError, IoResultExt, Result};
use crate::models::LegacyManifest;
use crate::packager::staging::is_archive;
use serde_json::Value;
use std::fs;
use std::io::Read;
use std::path::Path;
use zip::ZipArchive;

/// Parse manifest.json from bytes. Comments are tolerated, as Chrome does.
pub fn parse_manifest(content: &[u8]) -> Result<LegacyManifest> {
    let content_str = std::str::from_utf8(content)
        .map_err(|_| ConversionError::MalformedManifest("invalid UTF-8".to_string()))?;
    // Chrome writes a BOM into some exported manifests
    let content_str = content_str.trim_start_matches('\u{feff}');

    let value: Value = json5::from_str(content_str)
        .map_err(|e| ConversionError::MalformedManifest(e.to_string()))?;

    match value {
        Value::Object(fields) => Ok(LegacyManifest::new(fields)),
        _ => Err(ConversionError::MalformedManifest(
            "top level is not a JSON object".to_string(),
        )),
    }
}

pub fn parse_manifest_from_str(content: &str) -> Result<LegacyManifest> {
    parse_manifest(content.as_bytes())
}

/// Read the legacy manifest from a bundle directory or zip archive
pub fn load_manifest(bundle: &Path, filename: &str) -> Result<LegacyManifest> {
    if bundle.is_dir() {
        let path = bundle.join(filename);
        if !path.is_file() {
            return Err(ConversionError::MissingManifest(path));
        }
        let content = fs::read(&path).at(&path)?;
        return parse_manifest(&content);
    }
    if !is_archive(bundle) {
        return Err(ConversionError::UnsupportedInput(bundle.to_path_buf()));
    }

    let file = fs::File::open(bundle).at(bundle)?;
    let mut archive = ZipArchive::new(file)?;
    let mut entry = match archive.by_name(filename) {
        Ok(entry) => entry,
        Err(zip::result::ZipError::FileNotFound) => {
            return Err(ConversionError::MissingManifest(bundle.join(filename)));
        }
        Err(e) => return Err(e.into()),
    };
    let mut content = Vec::new();
    entry.read_to_end(&mut content).at(bundle)?;
    parse_manifest(&content)
}
