//! Custom error types for pushfiles.

use reqwest::StatusCode;
use thiserror::Error;

/// Main error type for pushfiles operations.
#[derive(Error, Debug)]
pub enum PushFilesError {
    // Action input errors
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // Configuration errors
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("No GitHub integrations configured")]
    MissingIntegration,

    // Registry errors
    #[error("No action registered with id '{0}'")]
    UnknownAction(String),

    #[error("An action with id '{0}' is already registered")]
    DuplicateAction(String),

    // Forge errors
    #[error("Branch '{branch}' not found in {owner}/{repo}")]
    BranchNotFound {
        owner: String,
        repo: String,
        branch: String,
    },

    #[error("Forge operation failed: {0}")]
    ForgeError(String),

    #[error("API authentication failed: {0}")]
    AuthenticationError(String),

    #[error("API rate limit exceeded")]
    RateLimitExceeded,

    // Local file system errors
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to walk directory: {0}")]
    WalkError(#[from] ignore::Error),

    // Parsing errors
    #[error("URL parse error: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("JSON parse error: {0}")]
    JsonParseError(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(#[from] toml::de::Error),
}

/// Result type alias using PushFilesError
pub type Result<T> = std::result::Result<T, PushFilesError>;

impl PushFilesError {
    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create an invalid config error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Create a forge error with context
    pub fn forge(msg: impl Into<String>) -> Self {
        Self::ForgeError(msg.into())
    }

    /// Create a branch not found error
    pub fn branch_not_found(
        owner: impl Into<String>,
        repo: impl Into<String>,
        branch: impl Into<String>,
    ) -> Self {
        Self::BranchNotFound {
            owner: owner.into(),
            repo: repo.into(),
            branch: branch.into(),
        }
    }
}

// Implement From for octocrab errors (GitHub API)
impl From<octocrab::Error> for PushFilesError {
    fn from(err: octocrab::Error) -> Self {
        match &err {
            octocrab::Error::GitHub { source, .. }
                if source.message.contains("rate limit") =>
            {
                Self::RateLimitExceeded
            }
            octocrab::Error::GitHub { source, .. }
                if source.status_code == StatusCode::UNAUTHORIZED =>
            {
                Self::AuthenticationError(source.message.clone())
            }
            _ => Self::ForgeError(format!("GitHub API error: {}", err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_branch_not_found() {
        let err = PushFilesError::branch_not_found("org", "repo", "main");
        assert_eq!(err.to_string(), "Branch 'main' not found in org/repo");
    }

    #[test]
    fn wraps_io_errors() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: PushFilesError = io.into();
        assert!(matches!(err, PushFilesError::IoError(_)));
    }

    #[test]
    fn helper_constructors_set_messages() {
        assert_eq!(
            PushFilesError::invalid_input("bad").to_string(),
            "Invalid input: bad"
        );
        assert_eq!(
            PushFilesError::invalid_config("bad").to_string(),
            "Invalid configuration: bad"
        );
        assert_eq!(
            PushFilesError::forge("boom").to_string(),
            "Forge operation failed: boom"
        );
    }
}
