use std::path::PathBuf;

/// Boxed error returned by a [`crate::PathAction`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Git command failed: {0}")]
    GitCommandError(String),

    #[error("Invalid status output: {0}")]
    StatusParseError(String),

    #[error("Failed to query working tree status: {source}")]
    StatusQuery {
        #[source]
        source: Box<Error>,
    },

    #[error("Path action failed on {}: {source}", path.display())]
    PathAction {
        path: PathBuf,
        #[source]
        source: BoxError,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
