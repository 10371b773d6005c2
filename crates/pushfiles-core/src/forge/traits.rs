//! Traits related to remote git forges
use async_trait::async_trait;

use crate::{
    error::Result,
    forge::types::{
        Blob, Commit, CommitDetails, CreateCommitRequest, CreateTreeRequest,
        Tree, UpdateBranchRequest,
    },
};

/// Low-level Git Data operations against a single remote repository.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GitData: Send + Sync {
    /// Sha of the commit the branch currently points at.
    async fn get_branch_sha(&self, branch: String) -> Result<String>;
    async fn get_commit(&self, sha: String) -> Result<CommitDetails>;
    async fn create_blob(&self, content: Vec<u8>) -> Result<Blob>;
    async fn create_tree(&self, req: CreateTreeRequest) -> Result<Tree>;
    async fn create_commit(&self, req: CreateCommitRequest) -> Result<Commit>;
    async fn update_branch(&self, req: UpdateBranchRequest) -> Result<()>;
}
