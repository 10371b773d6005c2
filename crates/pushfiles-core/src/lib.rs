//! Push a local directory to an existing GitHub branch as a single commit,
//! using the Git Data REST API instead of a clone.
pub mod action;
pub mod config;
pub mod error;
pub mod forge;
pub mod locator;
pub mod module;
pub mod path_helpers;
pub mod push;
pub mod walk;

pub use error::{PushFilesError, Result};
