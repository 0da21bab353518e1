//! Service worker generation
//!
//! The generated `sw.js` lists every file of the app as a cache entry, so it
//! must be generated after every other file has been written.

use crate::error::{IoResultExt, Result};
use crate::models::ConverterSettings;
use crate::packager::staging::boilerplate_dir;
use crate::utils::helpers::relative_slash_path;
use rand::Rng;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

/// Chooses the cache version embedded in a service worker
pub trait CacheVersionSource {
    /// A version in `0..max`, given the files being cached
    fn cache_version(&self, cached_files: &[String], max: u32) -> u32;
}

/// Uniformly random version; every conversion invalidates old caches
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomCacheVersion;

impl CacheVersionSource for RandomCacheVersion {
    fn cache_version(&self, _cached_files: &[String], max: u32) -> u32 {
        rand::thread_rng().gen_range(0..max.max(1))
    }
}

/// Always the same version
#[derive(Debug, Clone, Copy)]
pub struct FixedCacheVersion(pub u32);

impl CacheVersionSource for FixedCacheVersion {
    fn cache_version(&self, _cached_files: &[String], max: u32) -> u32 {
        self.0 % max.max(1)
    }
}

/// Version derived from the cached file list, for reproducible output
#[derive(Debug, Clone, Copy, Default)]
pub struct ContentHashCacheVersion;

impl CacheVersionSource for ContentHashCacheVersion {
    fn cache_version(&self, cached_files: &[String], max: u32) -> u32 {
        // FNV-1a
        let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
        for file in cached_files {
            for byte in file.bytes().chain(std::iter::once(b'\n')) {
                hash ^= u64::from(byte);
                hash = hash.wrapping_mul(0x0100_0000_01b3);
            }
        }
        (hash % u64::from(max.max(1))) as u32
    }
}

/// A generated service worker script
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceWorker {
    pub cache_version: u32,
    pub cached_files: Vec<String>,
    pub script: String,
}

/// Every file under `directory`, relative to it, `/`-separated and sorted
pub fn cached_files(directory: &Path) -> Result<Vec<String>> {
    log::debug!("Looking for files to cache.");
    let mut files = Vec::new();
    for entry in WalkDir::new(directory).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        if let Some(relative) = relative_slash_path(directory, entry.path()) {
            files.push(relative);
        }
    }
    files.sort();
    log::debug!("Cached files:\n\t{}", files.join("\n\t"));
    Ok(files)
}

/// Render the service worker source
pub fn render_service_worker(
    settings: &ConverterSettings,
    cache_version: u32,
    cached_files: &[String],
) -> String {
    let joined_filepaths = cached_files
        .iter()
        // JSON string literals are valid JavaScript string literals
        .map(|path| serde_json::Value::from(path.as_str()).to_string())
        .collect::<Vec<_>>()
        .join(",\n  ");

    format!(
        r#"/**
 * @file Service worker generated by {converter_name}.
 */

/**
 * @const Current cache version.
 *
 * Increment this to force cache to clear.
 */
var CACHE_VERSION = {cache_version};

/**
 * @const Object mapping a cache identifier to the actual, versioned cache name.
 */
var CACHES = {{
  'app': 'app-cache-v' + CACHE_VERSION
}};

/**
 * @const An array of filenames of cached files.
 */
var CACHED_FILES = [
  {joined_filepaths}
];

importScripts('{static_script}');
"#,
        converter_name = settings.converter_name,
        cache_version = cache_version,
        joined_filepaths = joined_filepaths,
        static_script = settings.relative_boilerplate_path(&settings.sw_static_script_name),
    )
}

/// Generate a service worker caching the current contents of `directory`
pub fn generate_service_worker(
    directory: &Path,
    settings: &ConverterSettings,
    versions: &dyn CacheVersionSource,
) -> Result<ServiceWorker> {
    let cached_files = cached_files(directory)?;
    let cache_version = versions.cache_version(&cached_files, settings.max_cache_version);
    log::debug!("Generating service worker.");
    let script = render_service_worker(settings, cache_version, &cached_files);
    Ok(ServiceWorker {
        cache_version,
        cached_files,
        script,
    })
}

/// Copy the registration and static caching scripts into the boilerplate directory.
///
/// Runs before TODO insertion so the copied scripts are annotated like app code.
pub fn copy_service_worker_scripts(directory: &Path, settings: &ConverterSettings) -> Result<()> {
    let conv_dir = boilerplate_dir(directory, settings);
    fs::create_dir_all(&conv_dir).at(&conv_dir)?;
    for script in [&settings.register_script_name, &settings.sw_static_script_name] {
        settings.assets.copy_to(script, &conv_dir.join(script))?;
    }
    Ok(())
}

/// Write `sw.js` at the app root, caching everything already in `directory`.
///
/// Must run after every other file has been written; `sw.js` itself is not cached.
pub fn add_service_worker(
    directory: &Path,
    settings: &ConverterSettings,
    versions: &dyn CacheVersionSource,
) -> Result<ServiceWorker> {
    let service_worker = generate_service_worker(directory, settings, versions)?;

    let sw_path = directory.join(&settings.sw_script_name);
    log::debug!("Writing service worker to `{}`.", sw_path.display());
    fs::write(&sw_path, &service_worker.script).at(&sw_path)?;
    Ok(service_worker)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_cached_files_are_relative() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path();
        fs::create_dir(dir.join("b")).unwrap();
        fs::write(dir.join("a.js"), "").unwrap();
        fs::write(dir.join("b/c.js"), "").unwrap();

        let files = cached_files(dir).unwrap();
        assert_eq!(files, vec!["a.js".to_string(), "b/c.js".to_string()]);
        assert!(files.iter().all(|f| !f.starts_with('/') && !f.contains("..")));
    }

    #[test]
    fn test_render_lists_files_once() {
        let settings = ConverterSettings::default();
        let files = vec!["a.js".to_string(), "b/c.js".to_string()];
        let script = render_service_worker(&settings, 42, &files);

        assert!(script.contains("var CACHE_VERSION = 42;"));
        assert!(script.contains("'app': 'app-cache-v' + CACHE_VERSION"));
        assert!(script.contains("var CACHED_FILES = [\n  \"a.js\",\n  \"b/c.js\"\n];"));
        assert_eq!(script.matches("\"a.js\"").count(), 1);
        assert_eq!(script.matches("\"b/c.js\"").count(), 1);
        assert!(script.contains("importScripts('chrome2pwa/sw_static.js');"));
    }

    #[test]
    fn test_render_escapes_quotes() {
        let settings = ConverterSettings::default();
        let script = render_service_worker(&settings, 1, &["we\"ird.png".to_string()]);
        assert!(script.contains(r#""we\"ird.png""#));
    }

    #[test]
    fn test_version_sources_respect_bound() {
        let files = vec!["index.html".to_string()];
        for _ in 0..100 {
            assert!(RandomCacheVersion.cache_version(&files, 10) < 10);
        }
        assert_eq!(FixedCacheVersion(7).cache_version(&files, 1_000_000), 7);
        let hashed = ContentHashCacheVersion.cache_version(&files, 1_000_000);
        assert!(hashed < 1_000_000);
        assert_eq!(hashed, ContentHashCacheVersion.cache_version(&files, 1_000_000));
    }

    #[test]
    fn test_add_service_worker_caches_boilerplate_but_not_itself() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path();
        fs::write(dir.join("index.html"), "<html></html>").unwrap();

        let settings = ConverterSettings::default();
        copy_service_worker_scripts(dir, &settings).unwrap();
        let sw = add_service_worker(dir, &settings, &FixedCacheVersion(3)).unwrap();

        assert_eq!(
            sw.cached_files,
            vec![
                "chrome2pwa/register_sw.js".to_string(),
                "chrome2pwa/sw_static.js".to_string(),
                "index.html".to_string(),
            ]
        );
        assert_eq!(sw.cache_version, 3);
        assert_eq!(fs::read_to_string(dir.join("sw.js")).unwrap(), sw.script);
        assert!(!sw.script.contains("\"sw.js\""));
    }
}
