use std::path::PathBuf;

use ars_store::StoreError;

/// Errors from copying a single object.
#[derive(Debug, thiserror::Error)]
pub enum CopyError {
    /// The source object is not present in the store. Skippable.
    #[error("source object missing: {}", .0.display())]
    SourceMissing(PathBuf),

    /// Creating directories or writing the destination failed. Fatal to the
    /// manifest being restored.
    #[error("failed to copy {} to {}: {source}", src.display(), dst.display())]
    Io {
        src: PathBuf,
        dst: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors that stop a whole run.
#[derive(Debug, thiserror::Error)]
pub enum RestoreError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("invalid configuration {origin}: {reason}")]
    Config { origin: String, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The run was cancelled; the in-progress output set has been removed.
    #[error("restore interrupted")]
    Interrupted,
}

/// Result alias for run-level operations.
pub type RestoreResult<T> = Result<T, RestoreError>;
