//! Helper utility functions

use std::path::{Component, Path};

/// `path` relative to `root`, joined with `/` whatever the platform.
///
/// Returns `None` when `path` is not inside `root`.
pub fn relative_slash_path(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let mut parts = Vec::new();
    for component in relative.components() {
        match component {
            Component::Normal(part) => parts.push(part.to_string_lossy().into_owned()),
            Component::CurDir => {}
            _ => return None,
        }
    }
    if parts.is_empty() {
        None
    } else {
        Some(parts.join("/"))
    }
}

/// Whether `path` is relative and stays inside whatever directory it is joined to
pub fn is_contained_relative_path(path: &Path) -> bool {
    let mut has_part = false;
    for component in path.components() {
        match component {
            Component::Normal(_) => has_part = true,
            Component::CurDir => {}
            _ => return false,
        }
    }
    has_part
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_slash_path() {
        let root = Path::new("/out");
        assert_eq!(
            relative_slash_path(root, &root.join("b").join("c.js")).as_deref(),
            Some("b/c.js")
        );
        assert_eq!(relative_slash_path(root, Path::new("/elsewhere/a.js")), None);
        assert_eq!(relative_slash_path(root, root), None);
    }

    #[test]
    fn test_contained_relative_paths() {
        assert!(is_contained_relative_path(Path::new("index.html")));
        assert!(is_contained_relative_path(Path::new("./pages/main.html")));
        assert!(!is_contained_relative_path(Path::new("../victim.html")));
        assert!(!is_contained_relative_path(Path::new("pages/../../victim.html")));
        assert!(!is_contained_relative_path(Path::new("/etc/passwd")));
        assert!(!is_contained_relative_path(Path::new(".")));
        assert!(!is_contained_relative_path(Path::new("")));
    }
}
