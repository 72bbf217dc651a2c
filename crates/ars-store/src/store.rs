use std::path::{Path, PathBuf};

use ars_types::ObjectHash;

use crate::resolver::resolve;

/// Read-only view of a sharded object directory.
///
/// The store trusts that the file at a hash's path contains exactly the bytes
/// with that hash. Contents are never read or verified here.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ObjectStore {
    root: PathBuf,
}

impl ObjectStore {
    /// Open a store rooted at `root`. No I/O is performed.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Location of the blob for `hash`, whether or not it exists.
    pub fn path_of(&self, hash: &ObjectHash) -> PathBuf {
        resolve(&self.root, hash)
    }
}
