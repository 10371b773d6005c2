//! Scaffolder module that contributes the GitHub push action to a host.
use log::*;

use crate::{
    action::{multi_file_push::GithubMultiFilePush, registry::ActionRegistry},
    config::Config,
    error::Result,
};

/// Plugin the module extends.
pub const PLUGIN_ID: &str = "scaffolder";
/// Identifier of this module within the plugin.
pub const MODULE_ID: &str = "github-push-files";

/// Register every action this module provides.
pub fn register(registry: &mut ActionRegistry, config: &Config) -> Result<()> {
    info!("registering module {PLUGIN_ID}/{MODULE_ID}");
    registry.add_action(Box::new(GithubMultiFilePush::new(config.clone())))
}
