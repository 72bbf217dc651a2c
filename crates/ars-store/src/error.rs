use std::path::PathBuf;

/// Errors from object store and assets layout operations.
///
/// Every variant is fatal to a run: nothing can be restored without a valid
/// assets layout.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The assets root itself does not exist or is not a directory.
    #[error("assets directory not found: {}", .0.display())]
    AssetsRootMissing(PathBuf),

    /// `<assets>/indexes` is missing.
    #[error("manifest directory not found: {}", .0.display())]
    IndexesMissing(PathBuf),

    /// `<assets>/objects` is missing.
    #[error("object directory not found: {}", .0.display())]
    ObjectsMissing(PathBuf),

    /// I/O error while listing the layout.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
