//! Template actions: named units of work a host dispatches with JSON input.

/// Registry of actions keyed by id.
pub mod registry;

/// `github:multi-file-push` action.
pub mod multi_file_push;

use async_trait::async_trait;
use serde::Serialize;
use std::path::PathBuf;

use crate::error::Result;

/// Usage example shown alongside an action's description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionExample {
    pub description: String,
    pub example: String,
}

/// Everything an action receives for one invocation.
#[derive(Debug, Clone)]
pub struct ActionContext {
    /// Directory relative input paths are resolved against.
    pub workspace_path: PathBuf,
    /// Raw action input, validated by the action itself.
    pub input: serde_json::Value,
}

impl ActionContext {
    pub fn new(
        workspace_path: impl Into<PathBuf>,
        input: serde_json::Value,
    ) -> Self {
        Self {
            workspace_path: workspace_path.into(),
            input,
        }
    }
}

/// A scaffolder action that can be registered with a host.
#[async_trait]
pub trait TemplateAction: Send + Sync {
    fn id(&self) -> &str;
    fn description(&self) -> &str;
    fn examples(&self) -> Vec<ActionExample>;
    /// JSON schema of the accepted input.
    fn input_schema(&self) -> serde_json::Value;
    async fn handler(&self, ctx: ActionContext) -> Result<()>;
}
