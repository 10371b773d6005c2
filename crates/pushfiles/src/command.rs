//! Subcommand implementations.
use color_eyre::eyre::{WrapErr, eyre};
use log::*;
use pushfiles_core::{
    action::{ActionContext, TemplateAction, registry::ActionRegistry},
    config::Config,
    module,
};
use serde_json::{Value, json};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{args::Command, result::Result};

/// Registry holding every action this host ships.
pub fn build_registry(config: &Config) -> Result<ActionRegistry> {
    let mut registry = ActionRegistry::new();
    module::register(&mut registry, config)?;
    Ok(registry)
}

/// Dispatch a parsed subcommand.
pub async fn execute(command: Command, config: Config) -> Result<()> {
    let registry = build_registry(&config)?;

    match command {
        Command::List => {
            for action in registry.actions() {
                println!("{}\t{}", action.id(), action.description());
            }
            Ok(())
        }
        Command::Describe { action_id } => {
            let description = describe(&registry, &action_id)?;
            println!("{}", serde_json::to_string_pretty(&description)?);
            Ok(())
        }
        Command::Run {
            action_id,
            input,
            input_file,
            workspace,
        } => {
            run(
                &registry,
                &action_id,
                read_input(input.as_deref(), input_file.as_deref())?,
                workspace,
            )
            .await
        }
    }
}

/// Id, description, examples and input schema of a registered action.
pub fn describe(registry: &ActionRegistry, action_id: &str) -> Result<Value> {
    let action = registry
        .get(action_id)
        .ok_or_else(|| eyre!("unknown action: {action_id}"))?;

    Ok(describe_action(action))
}

fn describe_action(action: &dyn TemplateAction) -> Value {
    json!({
        "id": action.id(),
        "description": action.description(),
        "examples": action.examples(),
        "schema": { "input": action.input_schema() },
    })
}

/// Parse action input from an inline JSON string or a JSON file.
pub fn read_input(
    input: Option<&str>,
    input_file: Option<&Path>,
) -> Result<Value> {
    let content = match (input, input_file) {
        (Some(inline), None) => inline.to_string(),
        (None, Some(path)) => fs::read_to_string(path).wrap_err_with(|| {
            format!("failed to read input file {}", path.display())
        })?,
        (Some(_), Some(_)) => {
            return Err(eyre!("use either --input or --input-file, not both"));
        }
        (None, None) => {
            return Err(eyre!("action input required: --input or --input-file"));
        }
    };

    let value: Value = serde_json::from_str(&content)
        .wrap_err("action input must be valid JSON")?;

    if !value.is_object() {
        return Err(eyre!("action input must be a JSON object"));
    }

    Ok(value)
}

async fn run(
    registry: &ActionRegistry,
    action_id: &str,
    input: Value,
    workspace: PathBuf,
) -> Result<()> {
    debug!("workspace: {}", workspace.display());
    registry
        .execute(action_id, ActionContext::new(workspace, input))
        .await?;
    Ok(())
}
