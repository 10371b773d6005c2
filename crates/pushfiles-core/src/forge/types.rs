use serde::{Deserialize, Serialize};

/// File mode for regular (non-executable) files.
pub const TREE_BLOB_MODE: &str = "100644";
/// Tree entry type for file content.
pub const TREE_BLOB_TYPE: &str = "blob";
/// Encoding used when uploading blob content.
pub const BLOB_ENCODING: &str = "base64";

#[derive(Debug, Clone, Deserialize)]
/// Object a ref points at.
pub struct RefObject {
    pub sha: String,
}

#[derive(Debug, Clone, Deserialize)]
/// Response of a single ref lookup.
pub struct Reference {
    #[serde(rename = "ref")]
    pub name: String,
    pub object: RefObject,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Tree {
    pub sha: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Blob {
    pub sha: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Commit {
    pub sha: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
/// Commit as returned by a commit lookup; only the fields we read.
pub struct CommitDetails {
    pub sha: String,
    pub tree: Tree,
}

#[derive(Debug, Clone, Serialize)]
/// Body of a blob creation request.
pub struct CreateBlobRequest {
    pub content: String,
    pub encoding: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// A blob placed at a repository path.
pub struct TreeEntry {
    pub path: String,
    pub mode: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub sha: String,
}

impl TreeEntry {
    /// Regular file entry pointing at an uploaded blob.
    pub fn blob(path: impl Into<String>, sha: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            mode: TREE_BLOB_MODE.into(),
            kind: TREE_BLOB_TYPE.into(),
            sha: sha.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// Request to create a tree layered on top of `base_tree`.
pub struct CreateTreeRequest {
    pub base_tree: String,
    pub tree: Vec<TreeEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// Request to create a commit object.
pub struct CreateCommitRequest {
    pub message: String,
    pub tree: String,
    pub parents: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Request to move a branch to a new commit.
pub struct UpdateBranchRequest {
    pub branch: String,
    pub sha: String,
    pub force: bool,
}
