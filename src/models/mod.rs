//! Core data models for Chrome App conversion

pub mod manifest;
pub mod config;
pub mod settings;
pub mod conversion;

pub use manifest::*;
pub use config::*;
pub use settings::*;
pub use conversion::*;
