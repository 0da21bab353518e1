//! Output tree staging and boilerplate assets

pub mod assets;
pub mod staging;

pub use assets::AssetSource;
pub use staging::{boilerplate_dir, setup_output_dir};
