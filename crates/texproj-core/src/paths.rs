//! Path canonicalization for comparison keys

use std::path::{Component, Path, PathBuf, is_separator};

/// Suffix appended to inclusion targets that do not already end in `tex`.
pub const TEX_EXTENSION: &str = ".tex";

/// Resolve `path` to an absolute, lexically normalized form, optionally
/// dropping the extension of the final segment.
///
/// Symlinks are not resolved and the file does not need to exist, so the
/// result is stable for a given input and working directory and can be used
/// as a map key for the duration of a run.
pub fn canonicalize(path: &Path, strip_extension: bool) -> PathBuf {
    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    let normalized = normalize_lexically(&absolute);

    if strip_extension {
        strip_final_extension(normalized)
    } else {
        normalized
    }
}

/// Collapse `.` and `..` components without touching the filesystem.
fn normalize_lexically(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

/// Remove everything from the last `.` onward, unless a separator follows it.
fn strip_final_extension(path: PathBuf) -> PathBuf {
    let Some(text) = path.to_str() else {
        return path;
    };

    match text.rfind('.') {
        Some(dot) if !text[dot + 1..].contains(is_separator) => PathBuf::from(&text[..dot]),
        _ => path,
    }
}

/// Target file of an inclusion directive, relative to the project root.
pub fn resolve_inclusion(root_dir: &Path, reference: &str) -> PathBuf {
    if reference.ends_with("tex") {
        root_dir.join(reference)
    } else {
        root_dir.join(format!("{reference}{TEX_EXTENSION}"))
    }
}

/// Target file of an asset reference, relative to the project root.
pub fn resolve_reference(root_dir: &Path, reference: &str) -> PathBuf {
    root_dir.join(reference)
}

/// Normalize a user supplied extension to carry a leading dot.
///
/// Returns `None` for blank input so that an empty exclusion list does not
/// turn into a bare `.` suffix.
pub fn normalize_extension(extension: &str) -> Option<String> {
    let extension = extension.trim();
    if extension.is_empty() {
        None
    } else if extension.starts_with('.') {
        Some(extension.to_string())
    } else {
        Some(format!(".{extension}"))
    }
}
