//! Report generation

pub mod generator;

use crate::models::ConversionResult;
use std::path::{Path, PathBuf};

pub fn generate_report(result: &ConversionResult) -> String {
    generator::generate_markdown_report(result)
}

/// Where the report for `output_dir` goes: a sibling named `<output>.md`.
///
/// The path is resolved first, so `.` or `site/..` still name a real
/// directory; a filesystem root gets `report.md` inside it.
pub fn report_path(output_dir: &Path) -> PathBuf {
    let output_dir = output_dir
        .canonicalize()
        .unwrap_or_else(|_| output_dir.to_path_buf());
    match output_dir.file_name() {
        Some(name) => {
            let mut report_name = name.to_os_string();
            report_name.push(".md");
            output_dir.with_file_name(report_name)
        }
        None => output_dir.join("report.md"),
    }
}
