//! Chrome App manifest to web app manifest translation

use crate::error::{ConversionError, Result};
use crate::models::{ConversionConfig, ConverterSettings, Icon, LegacyManifest, TargetManifest};

/// Legacy manifest keys the conversion makes use of
pub const MAPPED_KEYS: &[&str] = &[
    "name",
    "short_name",
    "default_locale",
    "icons",
    "description",
    "author",
];

pub struct ManifestTranslator<'a> {
    settings: &'a ConverterSettings,
}

impl<'a> ManifestTranslator<'a> {
    pub fn new(settings: &'a ConverterSettings) -> Self {
        Self { settings }
    }

    pub fn translate(
        &self,
        manifest: &LegacyManifest,
        config: &ConversionConfig,
    ) -> Result<TargetManifest> {
        let name = manifest.name().ok_or_else(|| {
            ConversionError::MalformedManifest("manifest is missing required key `name`".into())
        })?;

        Ok(TargetManifest {
            short_name: manifest.short_name().unwrap_or_else(|| name.clone()),
            lang: manifest
                .default_locale()
                .unwrap_or_else(|| self.settings.default_locale.clone()),
            splash_screens: Vec::new(),
            // TODO: guess display mode and start page from chrome.app.window.create calls
            display: self.settings.display.clone(),
            orientation: self.settings.orientation.clone(),
            start_url: config.start_url.clone(),
            theme_color: self.settings.default_color.clone(),
            background_color: self.settings.default_color.clone(),
            related_applications: Vec::new(),
            prefer_related_applications: false,
            icons: translate_icons(manifest),
            name,
        })
    }
}

fn translate_icons(manifest: &LegacyManifest) -> Vec<Icon> {
    manifest
        .icons()
        .into_iter()
        .map(|(size, src)| Icon {
            sizes: format!("{size}x{size}"),
            src,
        })
        .collect()
}

/// Legacy manifest keys with no counterpart in the web app manifest
pub fn unmapped_keys(manifest: &LegacyManifest) -> Vec<String> {
    manifest
        .keys()
        .filter(|key| !MAPPED_KEYS.contains(key))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::manifest::parse_manifest_from_str;
    use pretty_assertions::assert_eq;

    fn translate(json: &str) -> TargetManifest {
        let settings = ConverterSettings::default();
        let manifest = parse_manifest_from_str(json).unwrap();
        ManifestTranslator::new(&settings)
            .translate(&manifest, &ConversionConfig::new("index.html"))
            .unwrap()
    }

    #[test]
    fn test_name_only_manifest() {
        let target = translate(r#"{"name": "Demo"}"#);
        assert_eq!(
            target,
            TargetManifest {
                background_color: "white".into(),
                display: "minimal-ui".into(),
                icons: vec![],
                lang: "en".into(),
                name: "Demo".into(),
                orientation: "any".into(),
                prefer_related_applications: false,
                related_applications: vec![],
                short_name: "Demo".into(),
                splash_screens: vec![],
                start_url: "index.html".into(),
                theme_color: "white".into(),
            }
        );
    }

    #[test]
    fn test_short_name_and_locale_win() {
        let target = translate(r#"{"name": "Demo App", "short_name": "Demo", "default_locale": "fi"}"#);
        assert_eq!(target.short_name, "Demo");
        assert_eq!(target.lang, "fi");
    }

    #[test]
    fn test_icons() {
        let target = translate(r#"{"name": "Demo", "icons": {"48": "icon48.png", "128": "icon128.png"}}"#);
        assert_eq!(
            target.icons,
            vec![
                Icon { sizes: "48x48".into(), src: "icon48.png".into() },
                Icon { sizes: "128x128".into(), src: "icon128.png".into() },
            ]
        );
    }

    #[test]
    fn test_start_url_from_config() {
        let settings = ConverterSettings::default();
        let manifest = parse_manifest_from_str(r#"{"name": "Demo"}"#).unwrap();
        let target = ManifestTranslator::new(&settings)
            .translate(&manifest, &ConversionConfig::new("pages/main.html"))
            .unwrap();
        assert_eq!(target.start_url, "pages/main.html");
    }

    #[test]
    fn test_unmapped_keys() {
        let manifest = parse_manifest_from_str(
            r#"{"name": "Demo", "version": "1", "app": {}, "permissions": ["tts"], "icons": {}}"#,
        )
        .unwrap();
        assert_eq!(unmapped_keys(&manifest), vec!["version", "app", "permissions"]);
    }
}
