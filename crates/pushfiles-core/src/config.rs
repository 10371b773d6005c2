//! Integration configuration and credential resolution.
//!
//! Configuration is read from TOML in the shape:
//!
//! ```toml
//! [[integrations.github]]
//! host = "github.com"
//! token = "ghp_..."
//!
//! [[integrations.github]]
//! host = "ghe.example.com"
//! token = "..."
//! api_base_url = "https://ghe.example.com/api/v3"
//! ```
use log::*;
use secrecy::SecretString;
use serde::Deserialize;

use crate::error::{PushFilesError, Result};

/// Default filename the CLI host looks for.
pub const DEFAULT_CONFIG_FILE: &str = "app-config.toml";
/// Public GitHub host.
pub const GITHUB_DEFAULT_HOST: &str = "github.com";
/// REST API base for the public GitHub host.
pub const GITHUB_DEFAULT_API_BASE_URL: &str = "https://api.github.com";

/// A host-scoped GitHub credential.
#[derive(Debug, Clone, Deserialize)]
pub struct GithubIntegration {
    /// Host this integration applies to (e.g. "github.com").
    pub host: String,
    /// Access token used for API requests.
    pub token: SecretString,
    /// Optional REST API base url. Derived from `host` when omitted.
    pub api_base_url: Option<String>,
}

impl GithubIntegration {
    pub fn new(host: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            token: SecretString::from(token.into()),
            api_base_url: None,
        }
    }

    /// REST API base url for this integration, without a trailing slash.
    ///
    /// github.com maps to api.github.com, any other host is treated as a
    /// GitHub Enterprise instance serving the API under `/api/v3`.
    pub fn api_base_url(&self) -> String {
        if let Some(base) = &self.api_base_url {
            return base.trim_end_matches('/').to_string();
        }

        if self.host == GITHUB_DEFAULT_HOST {
            GITHUB_DEFAULT_API_BASE_URL.to_string()
        } else {
            format!("https://{}/api/v3", self.host)
        }
    }
}

/// Integrations grouped by provider.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct IntegrationsConfig {
    pub github: Vec<GithubIntegration>,
}

/// Root configuration consumed by the scaffolder module.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub integrations: IntegrationsConfig,
}

impl Config {
    /// Parse configuration from TOML content.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;

        for integration in config.integrations.github.iter() {
            if integration.host.trim().is_empty() {
                return Err(PushFilesError::invalid_config(
                    "integrations.github entries must set a host",
                ));
            }
        }

        Ok(config)
    }

    /// Pick the GitHub integration for `host`.
    ///
    /// Falls back to the first configured integration when no entry matches
    /// the host exactly.
    pub fn github_integration(&self, host: &str) -> Result<&GithubIntegration> {
        let integrations = &self.integrations.github;

        if let Some(integration) = integrations.iter().find(|i| i.host == host)
        {
            debug!("using github integration for host: {host}");
            return Ok(integration);
        }

        let fallback = integrations
            .first()
            .ok_or(PushFilesError::MissingIntegration)?;

        warn!(
            "no github integration configured for host {host}: falling back to {}",
            fallback.host
        );

        Ok(fallback)
    }
}
