//! Polyfill staging for Chrome App APIs

use crate::error::Result;
use crate::models::{ConverterSettings, PolyfillSplit};
use crate::packager::assets::polyfill_asset;
use std::path::Path;

/// Copy polyfill scripts for `apis` into `directory`.
///
/// Returns the sorted APIs that were polyfilled and the sorted APIs that
/// have no polyfill. A polyfillable API whose script cannot be found is an
/// error, not an unpolyfilled API.
pub fn polyfill_apis<I, S>(
    apis: I,
    directory: &Path,
    settings: &ConverterSettings,
) -> Result<PolyfillSplit>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut split = PolyfillSplit::default();

    for api in apis {
        let api = api.as_ref();
        if !settings.is_polyfillable(api) {
            split.unresolved.push(api.to_string());
            continue;
        }

        let filename = settings.polyfill_filename(api);
        settings
            .assets
            .copy_to(&polyfill_asset(&filename), &directory.join(&filename))?;
        split.resolved.push(api.to_string());
    }

    split.resolved.sort();
    split.resolved.dedup();
    split.unresolved.sort();
    split.unresolved.dedup();
    Ok(split)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConversionError;
    use crate::packager::AssetSource;
    use std::collections::BTreeSet;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_split_is_sorted_and_total() {
        let temp_dir = TempDir::new().unwrap();
        let settings = ConverterSettings::default();
        let apis = ["usb", "tts", "app.window", "serial"];

        let split = polyfill_apis(apis, temp_dir.path(), &settings).unwrap();
        assert_eq!(split.resolved, vec!["tts"]);
        assert_eq!(split.unresolved, vec!["app.window", "serial", "usb"]);
        assert!(temp_dir.path().join("tts.polyfill.js").is_file());

        let union: BTreeSet<_> = split.resolved.iter().chain(&split.unresolved).collect();
        assert_eq!(union.len(), apis.len());
    }

    #[test]
    fn test_empty_input() {
        let temp_dir = TempDir::new().unwrap();
        let split =
            polyfill_apis(Vec::<String>::new(), temp_dir.path(), &ConverterSettings::default())
                .unwrap();
        assert_eq!(split, PolyfillSplit::default());
        assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_substituted_polyfill_set() {
        let assets = TempDir::new().unwrap();
        fs::create_dir(assets.path().join("polyfills")).unwrap();
        fs::write(assets.path().join("polyfills/usb.polyfill.js"), "// usb").unwrap();
        let settings = ConverterSettings::default()
            .with_polyfills(["usb"])
            .with_assets(AssetSource::Directory(assets.path().to_path_buf()));

        let out = TempDir::new().unwrap();
        let split = polyfill_apis(["tts", "usb"], out.path(), &settings).unwrap();
        assert_eq!(split.resolved, vec!["usb"]);
        assert_eq!(split.unresolved, vec!["tts"]);
        assert_eq!(fs::read_to_string(out.path().join("usb.polyfill.js")).unwrap(), "// usb");
    }

    #[test]
    fn test_declared_polyfill_without_source_is_fatal() {
        let settings = ConverterSettings::default().with_polyfills(["tts", "usb"]);
        let out = TempDir::new().unwrap();
        let err = polyfill_apis(["usb"], out.path(), &settings).unwrap_err();
        assert!(matches!(err, ConversionError::MissingAsset(_)));
    }
}
