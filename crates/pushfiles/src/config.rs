//! Loads the integrations config for the CLI host.
use log::*;
use pushfiles_core::config::{Config, GITHUB_DEFAULT_HOST, GithubIntegration};
use secrecy::SecretString;
use std::{env, fs, io, path::Path};

use crate::result::Result;

/// Env var consulted when no GitHub integration is configured.
pub const GITHUB_TOKEN_VAR: &str = "GITHUB_TOKEN";

/// Read the config at `path`, or an empty config when the file is absent.
///
/// When the file configures no GitHub integration and `GITHUB_TOKEN` is set,
/// a github.com integration using that token is added.
pub fn load_config(path: &Path) -> Result<Config> {
    let mut config = match fs::read_to_string(path) {
        Ok(content) => {
            debug!("loading config from {}", path.display());
            Config::from_toml(&content)?
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            debug!("{} not found: using empty config", path.display());
            Config::default()
        }
        Err(err) => return Err(err.into()),
    };

    if config.integrations.github.is_empty()
        && let Ok(token) = env::var(GITHUB_TOKEN_VAR)
        && !token.is_empty()
    {
        info!("using {GITHUB_TOKEN_VAR} for {GITHUB_DEFAULT_HOST}");
        config.integrations.github.push(GithubIntegration {
            host: GITHUB_DEFAULT_HOST.to_string(),
            token: SecretString::from(token),
            api_base_url: None,
        });
    }

    Ok(config)
}
