//! Markdown conversion report

use crate::models::ConversionResult;
use std::fmt::Write as _;

fn bullet_list(report: &mut String, items: &[String]) {
    for item in items {
        let _ = writeln!(report, "- {item}");
    }
    report.push('\n');
}

pub fn generate_markdown_report(result: &ConversionResult) -> String {
    let mut report = String::new();

    report.push_str("# Chrome App to Progressive Web App Conversion Report\n\n");

    // Summary
    report.push_str("## Summary\n\n");
    let _ = writeln!(report, "- **App**: {}", result.app_name);
    let _ = writeln!(report, "- **Output**: {}", result.output_dir.display());
    let _ = writeln!(report, "- **Chrome APIs Found**: {}", result.apis_found.len());
    let _ = writeln!(report, "- **APIs Polyfilled**: {}", result.polyfills.resolved.len());
    let _ = writeln!(report, "- **TODOs Inserted**: {}", result.todos.len());
    let _ = writeln!(report, "- **Cached Files**: {}", result.cached_files.len());
    let _ = writeln!(report, "- **Cache Version**: {}\n", result.cache_version);

    if !result.polyfills.resolved.is_empty() {
        report.push_str("## Polyfilled APIs\n\n");
        let apis: Vec<String> = result
            .polyfills
            .resolved
            .iter()
            .map(|api| format!("`chrome.{api}`"))
            .collect();
        bullet_list(&mut report, &apis);
    }

    if !result.polyfills.unresolved.is_empty() {
        report.push_str("## ⚠️ APIs Without Polyfills\n\n");
        let apis: Vec<String> = result
            .polyfills
            .unresolved
            .iter()
            .map(|api| format!("`chrome.{api}`"))
            .collect();
        bullet_list(&mut report, &apis);
    }

    if !result.unmapped_manifest_keys.is_empty() {
        report.push_str("## Manifest Keys Not Carried Over\n\n");
        let keys: Vec<String> = result
            .unmapped_manifest_keys
            .iter()
            .map(|key| format!("`{key}`"))
            .collect();
        bullet_list(&mut report, &keys);
    }

    let actions = result.manual_actions();
    if !actions.is_empty() {
        report.push_str("## ⚠️ Manual Actions Required\n\n");
        bullet_list(&mut report, &actions);
    }

    // Next Steps
    report.push_str("## Next Steps\n\n");
    report.push_str("1. Search the converted app for `TODO` comments and replace the flagged calls\n");
    report.push_str("2. Serve the app over HTTPS (or localhost) so the service worker can register\n");
    report.push_str("3. Check `manifest.webmanifest` colors, display mode and icons\n");
    report.push_str("4. Test offline behaviour after the first load\n");

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PolyfillSplit, TargetManifest, TodoSite};
    use std::path::PathBuf;

    fn result() -> ConversionResult {
        ConversionResult {
            app_name: "Demo".into(),
            output_dir: PathBuf::from("out"),
            apis_found: vec!["tts".into(), "usb".into()],
            polyfills: PolyfillSplit {
                resolved: vec!["tts".into()],
                unresolved: vec!["usb".into()],
            },
            manifest: TargetManifest {
                background_color: "white".into(),
                display: "minimal-ui".into(),
                icons: vec![],
                lang: "en".into(),
                name: "Demo".into(),
                orientation: "any".into(),
                prefer_related_applications: false,
                related_applications: vec![],
                short_name: "Demo".into(),
                splash_screens: vec![],
                start_url: "index.html".into(),
                theme_color: "white".into(),
            },
            unmapped_manifest_keys: vec!["app".into()],
            todos: vec![TodoSite {
                path: PathBuf::from("js/main.js"),
                line: 3,
                call: "chrome.usb.getDevices".into(),
            }],
            cached_files: vec!["index.html".into()],
            cache_version: 12,
        }
    }

    #[test]
    fn test_report_sections() {
        let report = generate_markdown_report(&result());
        assert!(report.contains("- **App**: Demo"));
        assert!(report.contains("## Polyfilled APIs\n\n- `chrome.tts`"));
        assert!(report.contains("## ⚠️ APIs Without Polyfills\n\n- `chrome.usb`"));
        assert!(report.contains("- `app`"));
        assert!(report.contains("- js/main.js:3: remove chrome.usb.getDevices call"));
        assert!(report.contains("- **Cache Version**: 12"));
    }
}
