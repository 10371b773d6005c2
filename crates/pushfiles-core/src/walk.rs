//! Recursive enumeration of the files to push.
use ignore::WalkBuilder;
use log::*;
use std::path::{Path, PathBuf};

use crate::{
    error::{PushFilesError, Result},
    path_helpers::relative_path,
};

/// A local file scheduled for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalFile {
    /// Absolute (or workspace-joined) path on disk.
    pub path: PathBuf,
    /// Forward-slash path relative to the source directory.
    pub relative: String,
}

/// Collect every file below `root`, sorted by relative path.
///
/// Hidden files are included and ignore files (.gitignore etc.) are not
/// consulted. Symbolic links are followed and directories are skipped.
pub fn collect_files(root: &Path) -> Result<Vec<LocalFile>> {
    if !root.is_dir() {
        return Err(PushFilesError::invalid_input(format!(
            "source path is not a directory: {}",
            root.display()
        )));
    }

    let mut builder = WalkBuilder::new(root);
    builder
        .hidden(false)
        .ignore(false)
        .parents(false)
        .git_ignore(false)
        .git_global(false)
        .git_exclude(false)
        .follow_links(true);

    let mut files = vec![];

    for entry in builder.build() {
        let entry = entry?;

        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }

        let path = entry.into_path();
        let relative = relative_path(root, &path)?;

        debug!("found file to push: {relative}");
        files.push(LocalFile { path, relative });
    }

    files.sort_by(|a, b| a.relative.cmp(&b.relative));

    Ok(files)
}
