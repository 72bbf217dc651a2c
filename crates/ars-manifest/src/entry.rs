//! Manifest entry types.

use ars_types::{ByteSize, ObjectHash};
use serde::{Deserialize, Serialize};

/// A valid manifest entry: a logical path backed by a stored object.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    /// Relative path inside the output set, forward-slash separated.
    pub path: String,
    /// Content hash of the backing object.
    pub hash: ObjectHash,
    /// Declared size in bytes, if the manifest provides a usable one.
    pub size: Option<u64>,
}

impl ManifestEntry {
    pub fn new(path: impl Into<String>, hash: ObjectHash, size: Option<u64>) -> Self {
        Self {
            path: path.into(),
            hash,
            size,
        }
    }

    /// Declared size as a displayable [`ByteSize`].
    pub fn declared_size(&self) -> Option<ByteSize> {
        self.size.map(ByteSize)
    }
}

/// Why a manifest entry could not be used.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EntryDefect {
    /// The entry has no `hash` field (or it is `null`).
    #[error("missing hash")]
    MissingHash,

    /// The `hash` field is not a usable hash string.
    #[error("invalid hash: {0}")]
    InvalidHash(String),

    /// The entry value is not a JSON object.
    #[error("entry is not an object")]
    NotAnObject,

    /// The logical path would escape the output directory or collide with
    /// the mapping log.
    #[error("unsafe path: {0}")]
    UnsafePath(&'static str),
}

/// An entry that was declared but cannot be restored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RejectedEntry {
    pub path: String,
    pub defect: EntryDefect,
}

/// One declared item of a manifest, in declared order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ManifestItem {
    Entry(ManifestEntry),
    Rejected(RejectedEntry),
}

impl ManifestItem {
    /// The logical path this item was declared under.
    pub fn path(&self) -> &str {
        match self {
            Self::Entry(entry) => &entry.path,
            Self::Rejected(rejected) => &rejected.path,
        }
    }

    pub fn as_entry(&self) -> Option<&ManifestEntry> {
        match self {
            Self::Entry(entry) => Some(entry),
            Self::Rejected(_) => None,
        }
    }
}
