//! Validation module

pub mod manifest;

pub use manifest::verify_manifest;
