//! Configuration for remote repository connections.
use secrecy::SecretString;

use crate::{config::GithubIntegration, locator::RepoLocator};

/// Remote repository connection configuration for authenticating and
/// interacting with the Git Data API.
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    /// REST API base url, without trailing slash.
    pub api_base_url: String,
    /// Repository owner.
    pub owner: String,
    /// Repository name.
    pub repo: String,
    /// Access token for authentication.
    pub token: SecretString,
}

impl RemoteConfig {
    /// Combine a parsed locator with the integration chosen for its host.
    pub fn from_integration(
        locator: &RepoLocator,
        integration: &GithubIntegration,
    ) -> Self {
        Self {
            api_base_url: integration.api_base_url(),
            owner: locator.owner.clone(),
            repo: locator.repo.clone(),
            token: integration.token.clone(),
        }
    }

    /// "owner/repo" display path.
    pub fn path(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }
}
