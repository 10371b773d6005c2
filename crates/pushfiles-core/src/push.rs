//! Blob, tree, commit and ref pipeline that pushes a local directory into a
//! branch.
//!
//! Every file becomes a blob, the blobs are layered on top of the branch's
//! current tree, and the branch is moved to a new commit whose only parent
//! is the tip read at the start. Blob uploads run concurrently, every other
//! step is sequential. Any failure aborts the push; blobs that were already
//! uploaded are left unreferenced.
use futures_util::future::try_join_all;
use log::*;
use std::path::PathBuf;
use tokio::fs;

use crate::{
    error::{PushFilesError, Result},
    forge::{
        traits::GitData,
        types::{
            CreateCommitRequest, CreateTreeRequest, TreeEntry,
            UpdateBranchRequest,
        },
    },
    path_helpers::repo_path,
    walk::{LocalFile, collect_files},
};

/// Parameters of a single push.
#[derive(Debug, Clone)]
pub struct PushRequest {
    /// Existing branch to move.
    pub branch: String,
    /// Directory whose files are pushed.
    pub source_dir: PathBuf,
    /// Directory inside the repository the files are placed under.
    pub target_path: String,
    /// Commit message.
    pub message: String,
}

/// Objects created by a successful push.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushSummary {
    /// Branch tip before the push, parent of the new commit.
    pub parent_sha: String,
    /// Tree of the parent commit the new tree is layered on.
    pub base_tree_sha: String,
    pub tree_sha: String,
    pub commit_sha: String,
    /// Repository paths written, in tree order.
    pub paths: Vec<String>,
}

/// Push every file under `req.source_dir` to `req.branch` as one commit.
pub async fn push_files(
    forge: &dyn GitData,
    req: &PushRequest,
) -> Result<PushSummary> {
    let files = collect_files(&req.source_dir)?;

    if files.is_empty() {
        warn!(
            "no files found in {}: commit will not change the tree",
            req.source_dir.display()
        );
    }

    let parent_sha = forge.get_branch_sha(req.branch.clone()).await?;
    info!("branch {} is at {parent_sha}", req.branch);

    let parent = forge.get_commit(parent_sha.clone()).await?;
    let base_tree_sha = parent.tree.sha;

    info!("uploading {} blob(s)", files.len());
    let entries = upload_blobs(forge, &files, &req.target_path).await?;
    let paths = entries.iter().map(|e| e.path.clone()).collect::<Vec<_>>();

    let tree = forge
        .create_tree(CreateTreeRequest {
            base_tree: base_tree_sha.clone(),
            tree: entries,
        })
        .await?;

    let commit = forge
        .create_commit(CreateCommitRequest {
            message: req.message.clone(),
            tree: tree.sha.clone(),
            parents: vec![parent_sha.clone()],
        })
        .await?;

    // Not conditioned on parent_sha: a concurrent writer between the ref
    // read and this update is only caught by GitHub's fast-forward check.
    forge
        .update_branch(UpdateBranchRequest {
            branch: req.branch.clone(),
            sha: commit.sha.clone(),
            force: false,
        })
        .await?;

    Ok(PushSummary {
        parent_sha,
        base_tree_sha,
        tree_sha: tree.sha,
        commit_sha: commit.sha,
        paths,
    })
}

async fn upload_blobs(
    forge: &dyn GitData,
    files: &[LocalFile],
    target_path: &str,
) -> Result<Vec<TreeEntry>> {
    let uploads = files.iter().map(|file| async move {
        let content = fs::read(&file.path).await?;
        let blob = forge.create_blob(content).await?;
        let path = repo_path(target_path, &file.relative);
        debug!("{} -> {path} ({})", file.path.display(), blob.sha);
        Ok::<TreeEntry, PushFilesError>(TreeEntry::blob(path, blob.sha))
    });

    try_join_all(uploads).await
}
