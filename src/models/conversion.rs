//! Conversion intermediate values and results

use super::TargetManifest;
use std::path::PathBuf;

/// A Chrome App API call spotted on one line of script
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiCall {
    /// Capability the call belongs to, e.g. `tts` or `app.window`
    pub api: String,
    /// The called member as written, e.g. `chrome.tts.speak`
    pub call: String,
}

/// Capabilities split by polyfill availability. Both lists are sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PolyfillSplit {
    pub resolved: Vec<String>,
    pub unresolved: Vec<String>,
}

/// Location of an inserted TODO marker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoSite {
    /// Script path relative to the output root
    pub path: PathBuf,
    /// 1-based line number of the flagged call in the original script
    pub line: usize,
    pub call: String,
}

#[derive(Debug, Clone)]
pub struct ConversionResult {
    pub app_name: String,
    pub output_dir: PathBuf,
    pub apis_found: Vec<String>,
    pub polyfills: PolyfillSplit,
    pub manifest: TargetManifest,
    pub unmapped_manifest_keys: Vec<String>,
    pub todos: Vec<TodoSite>,
    pub cached_files: Vec<String>,
    pub cache_version: u32,
}

impl ConversionResult {
    pub fn manual_actions(&self) -> Vec<String> {
        let mut actions: Vec<String> = self
            .polyfills
            .unresolved
            .iter()
            .map(|api| format!("Replace uses of chrome.{api} (no polyfill available)"))
            .collect();
        actions.extend(self.todos.iter().map(|todo| {
            format!("{}:{}: remove {} call", todo.path.display(), todo.line, todo.call)
        }));
        actions
    }
}
