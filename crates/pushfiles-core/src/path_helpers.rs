use std::{borrow::Cow, path::Path};

use crate::error::{PushFilesError, Result};

/// Normalizes a path by replacing backslashes with forward slashes. Uses Cow
/// to avoid allocation when path is already normalized.
pub fn normalize_path(path: &str) -> Cow<'_, str> {
    if path.contains('\\') {
        Cow::Owned(path.replace('\\', "/"))
    } else {
        Cow::Borrowed(path)
    }
}

/// Normalizes a target directory inside the repository.
///
/// Returns None when the target is the repository root ("." or empty).
pub fn normalize_target(target: &str) -> Option<String> {
    let normalized = normalize_path(target.trim());
    let mut trimmed: &str = &normalized;

    while let Some(stripped) = trimmed.strip_prefix("./") {
        trimmed = stripped;
    }

    let trimmed = trimmed.trim_end_matches('/');

    if trimmed.is_empty() || trimmed == "." {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Forward-slash path of `file` relative to `root`.
///
/// Fails when `file` is not below `root` or its path is not valid UTF-8.
pub fn relative_path(root: &Path, file: &Path) -> Result<String> {
    let relative = file.strip_prefix(root).map_err(|_| {
        PushFilesError::invalid_input(format!(
            "file {} is outside of source path {}",
            file.display(),
            root.display()
        ))
    })?;

    let relative = relative.to_str().ok_or_else(|| {
        PushFilesError::invalid_input(format!(
            "file name is not valid UTF-8: {}",
            file.display()
        ))
    })?;

    Ok(normalize_path(relative).into_owned())
}

/// Repository path for a file placed under `target`.
pub fn repo_path(target: &str, relative: &str) -> String {
    match normalize_target(target) {
        Some(prefix) => format!("{prefix}/{relative}"),
        None => relative.to_string(),
    }
}
