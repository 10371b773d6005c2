//! Implements the GitData trait for Github
use async_trait::async_trait;
use base64::{Engine, engine::general_purpose::STANDARD};
use log::*;
use octocrab::Octocrab;
use reqwest::StatusCode;
use serde_json::json;
use url::Url;

use crate::{
    error::{PushFilesError, Result},
    forge::{
        config::RemoteConfig,
        traits::GitData,
        types::{
            BLOB_ENCODING, Blob, Commit, CommitDetails, CreateBlobRequest,
            CreateCommitRequest, CreateTreeRequest, Reference, Tree,
            UpdateBranchRequest,
        },
    },
};

/// GitHub Git Data client using Octocrab for blob, tree, commit and ref
/// operations.
pub struct Github {
    config: RemoteConfig,
    base_url: Url,
    instance: Octocrab,
}

impl Github {
    /// Create GitHub client with personal access token authentication and API
    /// base URL configuration.
    pub fn new(config: RemoteConfig) -> Result<Self> {
        // hyper-rustls enables both rustls providers, so one must be chosen
        // for the process. Later calls find it installed and are no-ops.
        let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();

        let base_url = Url::parse(&config.api_base_url)?;
        let builder = Octocrab::builder()
            .personal_token(config.token.clone())
            .base_uri(config.api_base_url.clone())?;
        let instance = builder.build()?;

        Ok(Self {
            config,
            base_url,
            instance,
        })
    }

    /// Git Data endpoint for this repository. Every segment is
    /// percent-encoded on its own.
    fn git_endpoint<'a>(
        &self,
        segments: impl IntoIterator<Item = &'a str>,
    ) -> Result<String> {
        let mut url = self.base_url.clone();

        url.path_segments_mut()
            .map_err(|_| {
                PushFilesError::invalid_config(format!(
                    "invalid api base url: {}",
                    self.base_url
                ))
            })?
            .pop_if_empty()
            .extend([
                "repos",
                self.config.owner.as_str(),
                self.config.repo.as_str(),
                "git",
            ])
            .extend(segments);

        Ok(url.to_string())
    }

    /// Endpoint of a branch ref. Slashes in the branch name stay path
    /// separators.
    fn branch_endpoint(&self, kind: &str, branch: &str) -> Result<String> {
        self.git_endpoint([kind, "heads"].into_iter().chain(branch.split('/')))
    }
}

#[async_trait]
impl GitData for Github {
    async fn get_branch_sha(&self, branch: String) -> Result<String> {
        let endpoint = self.branch_endpoint("ref", &branch)?;

        let result: octocrab::Result<Reference> =
            self.instance.get(endpoint, None::<&()>).await;

        match result {
            Err(octocrab::Error::GitHub { source, .. })
                if source.status_code == StatusCode::NOT_FOUND =>
            {
                error!("branch {branch} not found in {}", self.config.path());
                Err(PushFilesError::branch_not_found(
                    &self.config.owner,
                    &self.config.repo,
                    branch,
                ))
            }
            Err(err) => Err(err.into()),
            Ok(reference) => {
                debug!("{} points at {}", reference.name, reference.object.sha);
                Ok(reference.object.sha)
            }
        }
    }

    async fn get_commit(&self, sha: String) -> Result<CommitDetails> {
        let endpoint = self.git_endpoint(["commits", sha.as_str()])?;

        let commit: CommitDetails =
            self.instance.get(endpoint, None::<&()>).await?;

        Ok(commit)
    }

    async fn create_blob(&self, content: Vec<u8>) -> Result<Blob> {
        let endpoint = self.git_endpoint(["blobs"])?;

        let body = CreateBlobRequest {
            content: STANDARD.encode(&content),
            encoding: BLOB_ENCODING.into(),
        };

        let blob: Blob = self.instance.post(endpoint, Some(&body)).await?;

        debug!("created blob {} ({} bytes)", blob.sha, content.len());

        Ok(blob)
    }

    async fn create_tree(&self, req: CreateTreeRequest) -> Result<Tree> {
        let endpoint = self.git_endpoint(["trees"])?;

        info!("creating tree starting from: {}", req.base_tree);

        let tree: Tree = self.instance.post(endpoint, Some(&req)).await?;

        info!("created new tree: {}", tree.sha);

        Ok(tree)
    }

    async fn create_commit(&self, req: CreateCommitRequest) -> Result<Commit> {
        let endpoint = self.git_endpoint(["commits"])?;

        let commit: Commit = self.instance.post(endpoint, Some(&req)).await?;

        info!("created commit: {}", commit.sha);

        Ok(commit)
    }

    async fn update_branch(&self, req: UpdateBranchRequest) -> Result<()> {
        let endpoint = self.branch_endpoint("refs", &req.branch)?;

        info!("updating branch {} to {}", req.branch, req.sha);

        let _: serde_json::Value = self
            .instance
            .patch(
                endpoint,
                Some(&json!({
                  "sha": req.sha,
                  "force": req.force,
                })),
            )
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use secrecy::SecretString;

    use super::*;

    fn remote_config(api_base_url: &str) -> RemoteConfig {
        RemoteConfig {
            api_base_url: api_base_url.into(),
            owner: "my-org".into(),
            repo: "my-repo".into(),
            token: SecretString::from("token".to_string()),
        }
    }

    #[tokio::test]
    async fn builds_git_endpoints_from_base_url() {
        let github =
            Github::new(remote_config("https://api.github.com")).unwrap();
        assert_eq!(
            github.branch_endpoint("ref", "main").unwrap(),
            "https://api.github.com/repos/my-org/my-repo/git/ref/heads/main"
        );
        assert_eq!(
            github.git_endpoint(["commits", "abc123"]).unwrap(),
            "https://api.github.com/repos/my-org/my-repo/git/commits/abc123"
        );
    }

    #[tokio::test]
    async fn keeps_enterprise_api_prefix() {
        let github =
            Github::new(remote_config("https://ghe.example.com/api/v3"))
                .unwrap();
        assert_eq!(
            github.git_endpoint(["blobs"]).unwrap(),
            "https://ghe.example.com/api/v3/repos/my-org/my-repo/git/blobs"
        );
    }

    #[tokio::test]
    async fn encodes_branch_segments() {
        let github =
            Github::new(remote_config("https://api.github.com")).unwrap();
        assert_eq!(
            github.branch_endpoint("refs", "release/v1#hot?fix%2").unwrap(),
            "https://api.github.com/repos/my-org/my-repo/git/refs/heads/release/v1%23hot%3Ffix%252"
        );
    }

    #[tokio::test]
    async fn client_can_be_built_repeatedly() {
        let first = Github::new(remote_config("https://api.github.com"));
        let second = Github::new(remote_config("https://api.github.com"));
        assert!(first.is_ok());
        assert!(second.is_ok());
    }

    #[tokio::test]
    async fn rejects_unparseable_base_url() {
        let result = Github::new(remote_config("not a url"));
        assert!(matches!(result, Err(PushFilesError::UrlError(_))));
    }
}
