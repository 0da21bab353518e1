//! TODO comment insertion at Chrome App API call sites

use crate::error::{IoResultExt, Result};
use crate::models::TodoSite;
use crate::parser::javascript::{api_function_called, script_files};
use std::fs;
use std::path::Path;

/// Comment inserted above a flagged call
pub fn todo_comment(converter_name: &str, call: &str) -> String {
    format!("// TODO: ({converter_name}) Remove {call} call.")
}

/// Insert TODO comments above every line calling a Chrome App API.
///
/// Each comment takes the indentation and line ending of the line it flags.
/// Returns the new source and the `(line, call)` pairs flagged, with 1-based
/// line numbers into the original source.
pub fn insert_todos_into_source(source: &str, converter_name: &str) -> (String, Vec<(usize, String)>) {
    let mut out = String::with_capacity(source.len());
    let mut flagged = Vec::new();
    // An unterminated last line takes the file's first line ending
    let file_ending = match source.find('\n') {
        Some(end) if source[..end].ends_with('\r') => "\r\n",
        _ => "\n",
    };

    for (index, line) in source.split_inclusive('\n').enumerate() {
        if let Some(api_call) = api_function_called(line) {
            let indent_len = line.len() - line.trim_start_matches([' ', '\t']).len();
            let ending = if line.ends_with("\r\n") {
                "\r\n"
            } else if line.ends_with('\n') {
                "\n"
            } else {
                file_ending
            };
            out.push_str(&line[..indent_len]);
            out.push_str(&todo_comment(converter_name, &api_call.call));
            out.push_str(ending);
            flagged.push((index + 1, api_call.call));
        }
        out.push_str(line);
    }

    (out, flagged)
}

/// Insert TODO comments into one script, rewriting it only if anything was flagged
pub fn insert_todos_into_file(path: &Path, converter_name: &str) -> Result<Vec<(usize, String)>> {
    let bytes = fs::read(path).at(path)?;
    let Ok(source) = String::from_utf8(bytes) else {
        log::warn!("Skipping `{}`: not valid UTF-8.", path.display());
        return Ok(Vec::new());
    };

    let (annotated, flagged) = insert_todos_into_source(&source, converter_name);
    for (line, call) in &flagged {
        log::debug!("Inserting TODO in `{}:{}` for {}.", path.display(), line, call);
    }
    if !flagged.is_empty() {
        log::debug!("Writing modified file `{}`.", path.display());
        fs::write(path, annotated).at(path)?;
    }
    Ok(flagged)
}

/// Insert TODO comments into every script under `directory`
pub fn insert_todos_into_directory(directory: &Path, converter_name: &str) -> Result<Vec<TodoSite>> {
    log::debug!("Inserting TODOs.");
    let mut sites = Vec::new();
    for path in script_files(directory)? {
        let relative = path.strip_prefix(directory).unwrap_or(&path).to_path_buf();
        for (line, call) in insert_todos_into_file(&path, converter_name)? {
            sites.push(TodoSite {
                path: relative.clone(),
                line,
                call,
            });
        }
    }
    Ok(sites)
}
