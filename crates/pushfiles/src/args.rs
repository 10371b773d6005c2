//! CLI argument parsing.
use clap::{Parser, Subcommand};
use pushfiles_core::config::DEFAULT_CONFIG_FILE;
use std::path::PathBuf;

/// Run scaffolder actions that push local files to GitHub without a clone.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    #[arg(long, default_value = DEFAULT_CONFIG_FILE, global = true)]
    /// Integrations config file. Missing files are treated as empty.
    pub config: PathBuf,

    #[arg(long, default_value_t = false, global = true)]
    /// Enable debug logging.
    pub debug: bool,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List registered action ids.
    List,

    /// Print an action's description, examples and input schema as JSON.
    Describe {
        /// Action id, e.g. github:multi-file-push.
        action_id: String,
    },

    /// Run an action with JSON input.
    Run {
        /// Action id, e.g. github:multi-file-push.
        action_id: String,

        #[arg(long, conflicts_with = "input_file")]
        /// Action input as an inline JSON object.
        input: Option<String>,

        #[arg(long)]
        /// Path to a file containing the action input as JSON.
        input_file: Option<PathBuf>,

        #[arg(long, default_value = ".")]
        /// Directory relative input paths are resolved against.
        workspace: PathBuf,
    },
}
