//! `github:multi-file-push`: push a workspace folder to a GitHub branch via
//! the REST API, without cloning.
use async_trait::async_trait;
use log::*;
use schemars::{JsonSchema, schema_for};
use serde::Deserialize;

use crate::{
    action::{ActionContext, ActionExample, TemplateAction},
    config::Config,
    error::{PushFilesError, Result},
    forge::{config::RemoteConfig, github::Github, traits::GitData},
    locator::RepoLocator,
    push::{PushRequest, push_files},
};

pub const ACTION_ID: &str = "github:multi-file-push";
pub const DEFAULT_TARGET_PATH: &str = ".";
pub const DEFAULT_COMMIT_MESSAGE: &str = "Scaffolder commit";

const DESCRIPTION: &str =
    "Pushes files or folders to GitHub via REST API (no git clone).";

const EXAMPLE: &str = r#"steps:
  - id: publish
    action: github:multi-file-push
    input:
      repoUrl: 'github.com?owner=my-org&repo=my-repo'
      branch: main
      sourcePath: ./dist
      targetPath: assets
      commitMessage: 'Deploy assets'
"#;

fn default_target_path() -> String {
    DEFAULT_TARGET_PATH.to_string()
}

fn default_commit_message() -> String {
    DEFAULT_COMMIT_MESSAGE.to_string()
}

/// Input accepted by `github:multi-file-push`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MultiFilePushInput {
    /// URL like github.com?owner=ORG&repo=REPO
    pub repo_url: String,
    /// Branch name (must already exist)
    pub branch: String,
    /// Folder in the workspace to upload
    pub source_path: String,
    /// Path inside the repo to place files
    #[serde(default = "default_target_path")]
    pub target_path: String,
    /// Commit message
    #[serde(default = "default_commit_message")]
    pub commit_message: String,
}

impl MultiFilePushInput {
    /// Deserialize and validate raw action input.
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        let input: Self = serde_json::from_value(value).map_err(|err| {
            PushFilesError::invalid_input(format!(
                "invalid {ACTION_ID} input: {err}"
            ))
        })?;

        input.validate()?;

        Ok(input)
    }

    fn validate(&self) -> Result<()> {
        let required = [
            ("repoUrl", &self.repo_url),
            ("branch", &self.branch),
            ("sourcePath", &self.source_path),
        ];

        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(PushFilesError::invalid_input(format!(
                    "{name} must not be empty"
                )));
            }
        }

        Ok(())
    }
}

/// Builds the Git Data client for a resolved remote.
pub type ForgeBuilder =
    Box<dyn Fn(RemoteConfig) -> Result<Box<dyn GitData>> + Send + Sync>;

fn github_forge(remote: RemoteConfig) -> Result<Box<dyn GitData>> {
    Ok(Box::new(Github::new(remote)?))
}

/// The `github:multi-file-push` action.
pub struct GithubMultiFilePush {
    config: Config,
    build_forge: ForgeBuilder,
}

impl GithubMultiFilePush {
    /// Action talking to GitHub with credentials from `config`.
    pub fn new(config: Config) -> Self {
        Self::with_forge_builder(config, Box::new(github_forge))
    }

    pub fn with_forge_builder(
        config: Config,
        build_forge: ForgeBuilder,
    ) -> Self {
        Self {
            config,
            build_forge,
        }
    }
}

#[async_trait]
impl TemplateAction for GithubMultiFilePush {
    fn id(&self) -> &str {
        ACTION_ID
    }

    fn description(&self) -> &str {
        DESCRIPTION
    }

    fn examples(&self) -> Vec<ActionExample> {
        vec![ActionExample {
            description: "Publish dist/ into the `assets/` folder on main"
                .into(),
            example: EXAMPLE.into(),
        }]
    }

    fn input_schema(&self) -> serde_json::Value {
        schema_for!(MultiFilePushInput).to_value()
    }

    async fn handler(&self, ctx: ActionContext) -> Result<()> {
        let input = MultiFilePushInput::from_value(ctx.input)?;
        let locator = RepoLocator::parse(&input.repo_url)?;
        let integration = self.config.github_integration(&locator.host)?;
        let remote = RemoteConfig::from_integration(&locator, integration);

        let forge = (self.build_forge)(remote)?;

        let req = PushRequest {
            branch: input.branch.clone(),
            source_dir: ctx.workspace_path.join(&input.source_path),
            target_path: input.target_path.clone(),
            message: input.commit_message.clone(),
        };

        let summary = push_files(forge.as_ref(), &req).await?;

        info!(
            "Pushed {} file(s) to {}/{}@{}/{}",
            summary.paths.len(),
            locator.owner,
            locator.repo,
            input.branch,
            input.target_path
        );

        Ok(())
    }
}
