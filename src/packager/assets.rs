//! Boilerplate assets copied into converted apps

use crate::error::{ConversionError, IoResultExt, Result};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Assets compiled into the binary, keyed by path relative to the asset root
static EMBEDDED_ASSETS: &[(&str, &str)] = &[
    ("register_sw.js", include_str!("../../js/register_sw.js")),
    ("sw_static.js", include_str!("../../js/sw_static.js")),
    ("polyfills/tts.polyfill.js", include_str!("../../js/polyfills/tts.polyfill.js")),
];

/// Where boilerplate scripts and polyfills are read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetSource {
    /// Scripts shipped inside the binary
    Embedded,
    /// An asset directory laid out like `js/` in this repository
    Directory(PathBuf),
}

impl AssetSource {
    pub fn read(&self, name: &str) -> Result<Vec<u8>> {
        match self {
            AssetSource::Embedded => EMBEDDED_ASSETS
                .iter()
                .find(|(asset, _)| *asset == name)
                .map(|(_, content)| content.as_bytes().to_vec())
                .ok_or_else(|| ConversionError::MissingAsset(name.to_string())),
            AssetSource::Directory(root) => {
                let path = root.join(name);
                match fs::read(&path) {
                    Ok(content) => Ok(content),
                    Err(e) if e.kind() == io::ErrorKind::NotFound => {
                        Err(ConversionError::MissingAsset(name.to_string()))
                    }
                    Err(e) => Err(e).at(&path),
                }
            }
        }
    }

    /// Copy an asset to `destination`
    pub fn copy_to(&self, name: &str, destination: &Path) -> Result<()> {
        let content = self.read(name)?;
        log::debug!("Writing `{}` to `{}`.", name, destination.display());
        fs::write(destination, content).at(destination)
    }
}

/// Asset name of a polyfill file, e.g. `polyfills/tts.polyfill.js`
pub fn polyfill_asset(filename: &str) -> String {
    format!("polyfills/{filename}")
}
