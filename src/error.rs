//! Error types for Chrome App conversion

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that abort a conversion
#[derive(Error, Debug)]
pub enum ConversionError {
    /// Output path already exists and overwriting was not forced
    #[error("Output directory `{}` already exists (use --force to overwrite)", .0.display())]
    InvalidOutputTarget(PathBuf),

    /// Input is neither a directory nor a zip archive
    #[error("Unsupported input `{}`: expected a directory or .zip archive", .0.display())]
    UnsupportedInput(PathBuf),

    /// No legacy manifest in the input bundle
    #[error("Manifest not found at `{}`", .0.display())]
    MissingManifest(PathBuf),

    /// Manifest failed to parse or lacks a required key
    #[error("Malformed manifest: {0}")]
    MalformedManifest(String),

    /// Conversion configuration is unusable
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A boilerplate asset (polyfill, service worker script) has no source
    #[error("Missing boilerplate asset `{0}`")]
    MissingAsset(String),

    /// Any read, write, copy or directory walk failure
    #[error("I/O failure on `{}`: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Zip archive could not be read
    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),
}

pub type Result<T> = std::result::Result<T, ConversionError>;

/// Attaches the offending path to an `io::Error`
pub trait IoResultExt<T> {
    fn at(self, path: impl AsRef<Path>) -> Result<T>;
}

impl<T> IoResultExt<T> for io::Result<T> {
    fn at(self, path: impl AsRef<Path>) -> Result<T> {
        self.map_err(|source| ConversionError::Io {
            path: path.as_ref().to_path_buf(),
            source,
        })
    }
}

impl From<walkdir::Error> for ConversionError {
    fn from(err: walkdir::Error) -> Self {
        let path = err.path().map(Path::to_path_buf).unwrap_or_default();
        let source = err
            .into_io_error()
            .unwrap_or_else(|| io::Error::new(io::ErrorKind::Other, "filesystem loop detected"));
        ConversionError::Io { path, source }
    }
}
