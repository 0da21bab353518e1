//! Fixed converter conventions, injected into the converter at construction

use crate::packager::assets::AssetSource;
use std::collections::BTreeSet;

/// Filenames, defaults and allow-lists the converter works against.
///
/// `ConverterSettings::default()` matches the shipped converter; tests build
/// variants with the `with_*` methods.
#[derive(Debug, Clone)]
pub struct ConverterSettings {
    /// Converter name, also the boilerplate directory name
    pub converter_name: String,
    /// Capabilities with a polyfill available
    pub polyfills: BTreeSet<String>,
    pub legacy_manifest_filename: String,
    pub target_manifest_filename: String,
    pub register_script_name: String,
    pub sw_script_name: String,
    pub sw_static_script_name: String,
    /// Exclusive upper bound of the cache version
    pub max_cache_version: u32,
    pub default_locale: String,
    pub default_color: String,
    pub display: String,
    pub orientation: String,
    pub assets: AssetSource,
}

impl Default for ConverterSettings {
    fn default() -> Self {
        Self {
            converter_name: "chrome2pwa".to_string(),
            polyfills: BTreeSet::from(["tts".to_string()]),
            legacy_manifest_filename: "manifest.json".to_string(),
            target_manifest_filename: "manifest.webmanifest".to_string(),
            register_script_name: "register_sw.js".to_string(),
            sw_script_name: "sw.js".to_string(),
            sw_static_script_name: "sw_static.js".to_string(),
            max_cache_version: 1_000_000,
            default_locale: "en".to_string(),
            default_color: "white".to_string(),
            display: "minimal-ui".to_string(),
            orientation: "any".to_string(),
            assets: AssetSource::Embedded,
        }
    }
}

impl ConverterSettings {
    pub fn with_polyfills<I, S>(mut self, polyfills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.polyfills = polyfills.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_assets(mut self, assets: AssetSource) -> Self {
        self.assets = assets;
        self
    }

    pub fn with_converter_name(mut self, name: impl Into<String>) -> Self {
        self.converter_name = name.into();
        self
    }

    pub fn with_max_cache_version(mut self, max: u32) -> Self {
        self.max_cache_version = max.max(1);
        self
    }

    pub fn is_polyfillable(&self, api: &str) -> bool {
        self.polyfills.contains(api)
    }

    /// Filename a capability's polyfill is staged under, e.g. `tts.polyfill.js`
    pub fn polyfill_filename(&self, api: &str) -> String {
        format!("{api}.polyfill.js")
    }

    /// Path of a boilerplate file relative to the app root, always `/`-separated.
    ///
    /// `relative_boilerplate_path("tts.polyfill.js") == "chrome2pwa/tts.polyfill.js"`
    pub fn relative_boilerplate_path(&self, filename: &str) -> String {
        format!("{}/{}", self.converter_name, filename)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = ConverterSettings::default();
        assert!(settings.is_polyfillable("tts"));
        assert!(!settings.is_polyfillable("usb"));
        assert_eq!(settings.max_cache_version, 1_000_000);
    }

    #[test]
    fn test_boilerplate_paths() {
        let settings = ConverterSettings::default();
        assert_eq!(settings.polyfill_filename("tts"), "tts.polyfill.js");
        assert_eq!(
            settings.relative_boilerplate_path("tts.polyfill.js"),
            "chrome2pwa/tts.polyfill.js"
        );
    }

    #[test]
    fn test_substitute_polyfill_set() {
        let settings = ConverterSettings::default().with_polyfills(["usb", "serial"]);
        assert!(settings.is_polyfillable("usb"));
        assert!(!settings.is_polyfillable("tts"));
    }
}
