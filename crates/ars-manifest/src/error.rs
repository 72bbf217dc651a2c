//! Error types for the manifest crate.

use std::path::PathBuf;

/// Errors that make a whole manifest unusable.
///
/// Problems with individual entries are not errors; see
/// [`EntryDefect`](crate::EntryDefect).
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    /// The manifest file does not exist.
    #[error("manifest not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The document is not valid JSON or has the wrong shape.
    #[error("failed to parse manifest {origin}: {source}")]
    Parse {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    /// The document parsed but has no `objects` map.
    #[error("malformed manifest {origin}: {reason}")]
    Malformed { origin: String, reason: String },

    /// Reading the file failed for a reason other than absence.
    #[error("failed to read manifest {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience alias for manifest results.
pub type ManifestResult<T> = Result<T, ManifestError>;
