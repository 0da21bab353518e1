//! Transformation stages for converting Chrome Apps to progressive web apps

pub mod manifest;
pub mod polyfill;
pub mod html;
pub mod todos;
pub mod service_worker;

pub use manifest::ManifestTranslator;
pub use polyfill::polyfill_apis;
pub use html::{HtmlInjector, Injection};
pub use todos::insert_todos_into_directory;
pub use service_worker::{
    add_service_worker, copy_service_worker_scripts, CacheVersionSource, ContentHashCacheVersion,
    FixedCacheVersion, RandomCacheVersion, ServiceWorker,
};
