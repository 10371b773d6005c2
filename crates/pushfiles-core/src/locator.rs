//! Repository locator parsing.
//!
//! Locators look like `github.com?owner=ORG&repo=REPO`. A scheme is
//! optional and defaults to https.
use url::Url;

use crate::error::{PushFilesError, Result};

const LOCATOR_HINT: &str =
    "repoUrl must look like 'https://github.com?owner=ORG&repo=REPO'";

/// Host and repository coordinates parsed from a `repoUrl` input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoLocator {
    /// Host, including a non-default port when one is given.
    pub host: String,
    pub owner: String,
    pub repo: String,
}

impl RepoLocator {
    /// Parse a locator string. Never performs network I/O.
    pub fn parse(repo_url: &str) -> Result<Self> {
        let full = if repo_url.starts_with("http") {
            repo_url.to_string()
        } else {
            format!("https://{repo_url}")
        };

        let url = Url::parse(&full).map_err(|err| {
            PushFilesError::invalid_input(format!("{LOCATOR_HINT}: {err}"))
        })?;

        let host = url
            .host_str()
            .ok_or_else(|| PushFilesError::invalid_input(LOCATOR_HINT))?;

        let host = match url.port() {
            Some(port) => format!("{host}:{port}"),
            None => host.to_string(),
        };

        let owner = query_param(&url, "owner")
            .ok_or_else(|| PushFilesError::invalid_input(LOCATOR_HINT))?;
        let repo = query_param(&url, "repo")
            .ok_or_else(|| PushFilesError::invalid_input(LOCATOR_HINT))?;

        Ok(Self { host, owner, repo })
    }
}

fn query_param(url: &Url, name: &str) -> Option<String> {
    url.query_pairs()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
}
