//! Parsing modules for manifests, scripts and HTML pages

pub mod manifest;
pub mod javascript;
pub mod html;

pub use manifest::{load_manifest, parse_manifest};
pub use javascript::{api_function_called, app_apis};
pub use html::{Document, Element, Node};
