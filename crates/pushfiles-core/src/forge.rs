//! Git Data API abstraction used to write trees and commits without a clone.
//!
//! Provides token-based authentication and low-level blob, tree, commit and
//! ref operations behind a common trait.

/// Connection configuration for a remote repository.
pub mod config;

/// GitHub Git Data API client implementation.
pub mod github;

/// Common traits for forge abstraction.
pub mod traits;

/// Request and response types for Git Data operations.
pub mod types;
