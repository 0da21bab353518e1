//! Chrome App API usage detection using regex patterns
//!
//! Detection is textual and line-based: aliased or dynamically dispatched
//! calls are missed, and matching text in strings or comments is reported.

use crate::error::{IoResultExt, Result};
use crate::models::ApiCall;
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Chrome Apps API namespaces, without the `chrome.` prefix
pub const CHROME_APP_APIS: &[&str] = &[
    "accessibilityFeatures",
    "alarms",
    "app.runtime",
    "app.window",
    "audio",
    "bluetooth",
    "bluetoothLowEnergy",
    "bluetoothSocket",
    "browser",
    "clipboard",
    "commands",
    "contextMenus",
    "documentScan",
    "events",
    "extensionTypes",
    "fileSystem",
    "fileSystemProvider",
    "gcm",
    "hid",
    "i18n",
    "identity",
    "idle",
    "instanceID",
    "mdns",
    "mediaGalleries",
    "networking.config",
    "notifications",
    "permissions",
    "power",
    "printerProvider",
    "runtime",
    "serial",
    "socket",
    "sockets.tcp",
    "sockets.tcpServer",
    "sockets.udp",
    "storage",
    "syncFileSystem",
    "system.cpu",
    "system.display",
    "system.memory",
    "system.network",
    "system.storage",
    "tts",
    "types",
    "usb",
    "virtualKeyboard",
    "vpnProvider",
    "wallpaper",
    "webViewRequest",
];

lazy_static! {
    // chrome.<member path>( with optional whitespace before the parenthesis
    static ref CHROME_CALL_PATTERN: Regex = Regex::new(
        r"\bchrome\.([a-zA-Z_][a-zA-Z0-9_]*(?:\.[a-zA-Z_][a-zA-Z0-9_]*)*)\s*\("
    ).unwrap();
}

/// Resolve a member path such as `app.window.create` to its API namespace.
///
/// The longest namespace that is a dotted prefix wins, so
/// `sockets.tcpServer.listen` resolves to `sockets.tcpServer`.
pub fn api_namespace(member_path: &str) -> Option<&'static str> {
    CHROME_APP_APIS
        .iter()
        .filter(|api| {
            member_path == **api
                || (member_path.starts_with(**api)
                    && member_path.as_bytes().get(api.len()) == Some(&b'.'))
        })
        .max_by_key(|api| api.len())
        .copied()
}

/// The first Chrome App API call on a line, if any
pub fn api_function_called(line: &str) -> Option<ApiCall> {
    CHROME_CALL_PATTERN.captures_iter(line).find_map(|cap| {
        let member_path = &cap[1];
        api_namespace(member_path).map(|api| ApiCall {
            api: api.to_string(),
            call: format!("chrome.{member_path}"),
        })
    })
}

/// Per-line detection result for a whole script
pub fn scan_source(source: &str) -> Vec<Option<ApiCall>> {
    source.lines().map(api_function_called).collect()
}

/// Distinct API namespaces used anywhere in a script
pub fn apis_in_source(source: &str) -> BTreeSet<String> {
    source
        .lines()
        .filter_map(api_function_called)
        .map(|call| call.api)
        .collect()
}

/// Whether a path names a script the scanner should look at
pub fn is_script(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some("js")
}

/// Every script file under a directory, in a stable order
pub fn script_files(directory: &Path) -> Result<Vec<PathBuf>> {
    let mut scripts = Vec::new();
    for entry in WalkDir::new(directory).sort_by_file_name() {
        let entry = entry?;
        if entry.file_type().is_file() && is_script(entry.path()) {
            scripts.push(entry.into_path());
        }
    }
    Ok(scripts)
}

/// Chrome App APIs used across every script of an app directory
pub fn app_apis(directory: &Path) -> Result<BTreeSet<String>> {
    let mut apis = BTreeSet::new();
    for path in script_files(directory)? {
        let bytes = fs::read(&path).at(&path)?;
        let source = String::from_utf8_lossy(&bytes);
        let found = apis_in_source(&source);
        if !found.is_empty() {
            log::debug!(
                "`{}` uses Chrome APIs: {}",
                path.display(),
                found.iter().cloned().collect::<Vec<_>>().join(", ")
            );
        }
        apis.extend(found);
    }
    Ok(apis)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use test_case::test_case;

    #[test_case("chrome.tts.speak('hello');", "tts", "chrome.tts.speak"; "simple call")]
    #[test_case("  chrome.app.window.create('index.html', {});", "app.window", "chrome.app.window.create"; "nested namespace")]
    #[test_case("chrome.app.runtime.onLaunched.addListener(launch);", "app.runtime", "chrome.app.runtime.onLaunched.addListener"; "event listener")]
    #[test_case("chrome.sockets.tcpServer.listen (id, addr);", "sockets.tcpServer", "chrome.sockets.tcpServer.listen"; "longest namespace wins")]
    fn test_detects_call(line: &str, api: &str, call: &str) {
        let found = api_function_called(line).unwrap();
        assert_eq!(found.api, api);
        assert_eq!(found.call, call);
    }

    #[test_case("var speak = chrome.tts.speak;"; "property access is not a call")]
    #[test_case("chrome.unknownThing.doIt();"; "unknown namespace")]
    #[test_case("notchrome.tts.speak();"; "prefix must be chrome")]
    #[test_case("console.log('hi');"; "no chrome at all")]
    fn test_ignores_line(line: &str) {
        assert_eq!(api_function_called(line), None);
    }

    #[test]
    fn test_first_match_only() {
        let found =
            api_function_called("chrome.storage.local.get('k', () => chrome.tts.speak('x'));")
                .unwrap();
        assert_eq!(found.api, "storage");
        assert_eq!(found.call, "chrome.storage.local.get");
    }

    #[test]
    fn test_first_known_api_on_line() {
        let found = api_function_called("chrome.bogus.x(); chrome.usb.getDevices({});").unwrap();
        assert_eq!(found.api, "usb");
    }

    #[test]
    fn test_scan_source_is_per_line() {
        let source = "let a = 1;\nchrome.tts.speak('a');\n\nchrome.usb.getDevices({}, cb);\n";
        let hits = scan_source(source);
        assert_eq!(hits.len(), 4);
        assert!(hits[0].is_none());
        assert_eq!(hits[1].as_ref().unwrap().api, "tts");
        assert!(hits[2].is_none());
        assert_eq!(hits[3].as_ref().unwrap().api, "usb");
    }

    #[test]
    fn test_app_apis_aggregates_and_dedupes() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path();
        fs::create_dir(dir.join("lib")).unwrap();
        fs::write(dir.join("main.js"), "chrome.tts.speak('a');\nchrome.tts.stop();\n").unwrap();
        fs::write(dir.join("lib/usb.js"), "chrome.usb.getDevices({}, f);\n").unwrap();
        fs::write(dir.join("notes.txt"), "chrome.serial.connect();\n").unwrap();

        let apis: Vec<_> = app_apis(dir).unwrap().into_iter().collect();
        assert_eq!(apis, vec!["tts".to_string(), "usb".to_string()]);
    }
}
