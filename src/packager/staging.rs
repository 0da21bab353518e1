//! Output tree staging from app directories and archives

use crate::error::{ConversionError, IoResultExt, Result};
use crate::models::ConverterSettings;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;
use zip::ZipArchive;

/// Path to the converter's boilerplate directory within an app directory
pub fn boilerplate_dir(directory: &Path, settings: &ConverterSettings) -> PathBuf {
    directory.join(&settings.converter_name)
}

pub fn is_archive(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("zip"))
}

/// Set up the output tree.
///
/// Copies the input app (directory or zip archive) to `output_dir`, creates
/// the boilerplate directory and removes the Chrome App manifest, which has
/// no place in a web app. Returns the boilerplate directory.
pub fn setup_output_dir(
    input: &Path,
    output_dir: &Path,
    force: bool,
    settings: &ConverterSettings,
) -> Result<PathBuf> {
    if !input.is_dir() && !is_archive(input) {
        return Err(ConversionError::UnsupportedInput(input.to_path_buf()));
    }

    if output_dir.exists() {
        if !force {
            return Err(ConversionError::InvalidOutputTarget(output_dir.to_path_buf()));
        }
        log::debug!("Removing output directory tree `{}`.", output_dir.display());
        if output_dir.is_dir() {
            fs::remove_dir_all(output_dir).at(output_dir)?;
        } else {
            fs::remove_file(output_dir).at(output_dir)?;
        }
    }

    log::debug!(
        "Copying input `{}` to output tree `{}`.",
        input.display(),
        output_dir.display()
    );
    fs::create_dir_all(output_dir).at(output_dir)?;
    if input.is_dir() {
        copy_tree(input, output_dir)?;
    } else {
        extract_archive(input, output_dir)?;
    }

    let conv_path = boilerplate_dir(output_dir, settings);
    log::debug!(
        "Making {} directory `{}`.",
        settings.converter_name,
        conv_path.display()
    );
    fs::create_dir_all(&conv_path).at(&conv_path)?;

    let manifest_path = output_dir.join(&settings.legacy_manifest_filename);
    log::debug!("Removing file `{}`.", manifest_path.display());
    match fs::remove_file(&manifest_path) {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(ConversionError::MissingManifest(manifest_path));
        }
        Err(e) => return Err(e).at(&manifest_path),
    }

    log::debug!("Finished setting up output directory `{}`.", output_dir.display());
    Ok(conv_path)
}

/// Recursively copy `source` into the existing directory `destination`
pub fn copy_tree(source: &Path, destination: &Path) -> Result<()> {
    // Skip the destination when it is nested inside the source
    let skip = fs::canonicalize(destination).at(destination)?;

    let walker = WalkDir::new(source)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            fs::canonicalize(entry.path())
                .map(|path| path != skip)
                .unwrap_or(true)
        });

    for entry in walker {
        let entry = entry?;
        let relative = entry
            .path()
            .strip_prefix(source)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))
            .at(entry.path())?;
        let target = destination.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).at(&target)?;
        } else if entry.file_type().is_file() {
            fs::copy(entry.path(), &target).at(entry.path())?;
        } else {
            log::debug!("Skipping non-regular file `{}`.", entry.path().display());
        }
    }
    Ok(())
}

/// Extract a zip archive into the existing directory `destination`
pub fn extract_archive(archive_path: &Path, destination: &Path) -> Result<()> {
    let file = fs::File::open(archive_path).at(archive_path)?;
    let mut archive = ZipArchive::new(file)?;

    for i in 0..archive.len() {
        let mut entry = archive.by_index(i)?;
        let Some(relative) = entry.enclosed_name().map(Path::to_path_buf) else {
            log::warn!("Skipping archive entry `{}` outside the app root.", entry.name());
            continue;
        };
        let target = destination.join(relative);

        if entry.is_dir() {
            fs::create_dir_all(&target).at(&target)?;
            continue;
        }
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).at(parent)?;
        }
        let mut out = fs::File::create(&target).at(&target)?;
        io::copy(&mut entry, &mut out).at(&target)?;
    }
    Ok(())
}
