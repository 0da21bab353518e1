//! Chrome App to Progressive Web App Converter
//!
//! A library for semi-automatically converting Chrome Apps into progressive
//! web apps. Handles manifest translation, API polyfills, start page tag
//! injection, TODO annotation of Chrome API calls and service worker
//! generation.

pub mod error;
pub mod models;
pub mod parser;
pub mod validator;
pub mod transformer;
pub mod packager;
pub mod report;
pub mod utils;

pub use error::{ConversionError, Result};
pub use models::{ConversionConfig, ConversionResult, ConverterSettings, LegacyManifest, TargetManifest};

use crate::error::IoResultExt;
use crate::transformer::{CacheVersionSource, HtmlInjector, ManifestTranslator, RandomCacheVersion};
use std::fs;
use std::path::Path;

/// Runs conversions with a fixed set of conventions
pub struct Converter {
    settings: ConverterSettings,
    versions: Box<dyn CacheVersionSource>,
}

impl Default for Converter {
    fn default() -> Self {
        Self::new(ConverterSettings::default())
    }
}

impl Converter {
    pub fn new(settings: ConverterSettings) -> Self {
        Self {
            settings,
            versions: Box::new(RandomCacheVersion),
        }
    }

    /// Replace the random cache version with another source
    pub fn with_cache_versions(mut self, versions: impl CacheVersionSource + 'static) -> Self {
        self.versions = Box::new(versions);
        self
    }

    pub fn settings(&self) -> &ConverterSettings {
        &self.settings
    }

    /// Convert the Chrome App at `input` (directory or zip) into a web app at `output_dir`.
    ///
    /// Any failure aborts the conversion; the output tree is then unusable.
    pub fn convert(
        &self,
        input: &Path,
        output_dir: &Path,
        config: &ConversionConfig,
        force: bool,
    ) -> Result<ConversionResult> {
        let settings = &self.settings;

        // 1. Read and check the inputs before touching the output tree
        config.validate()?;
        let manifest = parser::load_manifest(input, &settings.legacy_manifest_filename)?;
        validator::verify_manifest(&manifest)?;

        // 2. Copy everything across to the output directory
        let conv_dir = packager::setup_output_dir(input, output_dir, force, settings)?;

        // 3. Detect and polyfill Chrome Apps APIs
        let apis: Vec<String> = parser::app_apis(output_dir)?.into_iter().collect();
        if !apis.is_empty() {
            log::info!("Found Chrome APIs: {}", apis.join(", "));
        }
        let polyfills = transformer::polyfill_apis(&apis, &conv_dir, settings)?;
        if !polyfills.resolved.is_empty() {
            log::info!("Polyfilled Chrome APIs: {}", polyfills.resolved.join(", "));
        }
        if !polyfills.unresolved.is_empty() {
            log::warn!(
                "Could not polyfill Chrome APIs: {}",
                polyfills.unresolved.join(", ")
            );
        }

        // 4. Write the web app manifest
        let target = ManifestTranslator::new(settings).translate(&manifest, config)?;
        let unmapped = transformer::manifest::unmapped_keys(&manifest);
        if !unmapped.is_empty() {
            log::debug!("Manifest keys not carried over: {}", unmapped.join(", "));
        }
        let manifest_path = output_dir.join(&settings.target_manifest_filename);
        let manifest_json = target
            .to_pretty_json()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
            .at(&manifest_path)?;
        fs::write(&manifest_path, manifest_json).at(&manifest_path)?;
        log::debug!(
            "Wrote `{}` to `{}`.",
            settings.target_manifest_filename,
            manifest_path.display()
        );

        // 5. Inject tags into the start page
        let start_path = output_dir.join(&target.start_url);
        let start_html = fs::read_to_string(&start_path).at(&start_path)?;
        let start_html = HtmlInjector::new(settings).inject(
            &start_html,
            &manifest,
            &polyfills.resolved,
            &target.start_url,
        );
        log::debug!("Writing edited start page to `{}`.", start_path.display());
        fs::write(&start_path, start_html).at(&start_path)?;

        // 6. Flag remaining Chrome API calls, boilerplate scripts included
        transformer::copy_service_worker_scripts(output_dir, settings)?;
        let todos = transformer::insert_todos_into_directory(output_dir, &settings.converter_name)?;

        // 7. Service worker last, so it caches every other file
        let service_worker =
            transformer::add_service_worker(output_dir, settings, self.versions.as_ref())?;

        log::info!("Conversion complete.");

        Ok(ConversionResult {
            app_name: target.name.clone(),
            output_dir: output_dir.to_path_buf(),
            apis_found: apis,
            polyfills,
            manifest: target,
            unmapped_manifest_keys: unmapped,
            todos,
            cached_files: service_worker.cached_files,
            cache_version: service_worker.cache_version,
        })
    }
}

/// Convert a Chrome App with the default conventions
pub fn convert_app(
    input: &Path,
    output_dir: &Path,
    config: &ConversionConfig,
    force: bool,
) -> Result<ConversionResult> {
    Converter::default().convert(input, output_dir, config, force)
}
