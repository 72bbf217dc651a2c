use std::path::{Path, PathBuf};

use crate::error::{StoreError, StoreResult};
use crate::store::ObjectStore;

/// File suffix of manifest documents inside `indexes/`.
pub const MANIFEST_SUFFIX: &str = ".json";

const INDEXES_DIR: &str = "indexes";
const OBJECTS_DIR: &str = "objects";

/// Check that a manifest name is a single plain directory name.
///
/// The name becomes `<result>/<name>`, so it must not be empty, `.` or `..`,
/// and must not contain separators or NUL. Returns a short reason on rejection.
pub fn check_manifest_name(name: &str) -> Result<(), &'static str> {
    match name {
        "" => Err("empty name"),
        "." | ".." => Err("relative name"),
        _ if name.contains(['/', '\\']) => Err("path separator"),
        _ if name.contains('\0') => Err("NUL byte"),
        _ => Ok(()),
    }
}

/// A validated assets directory: `indexes/` with manifests and `objects/`
/// with the sharded blob store.
#[derive(Clone, Debug)]
pub struct AssetsDir {
    root: PathBuf,
    indexes: PathBuf,
    objects: ObjectStore,
}

impl AssetsDir {
    /// Open an assets directory, checking that the root and both
    /// subdirectories exist.
    pub fn open(root: impl Into<PathBuf>) -> StoreResult<Self> {
        let root = root.into();
        if !root.is_dir() {
            return Err(StoreError::AssetsRootMissing(root));
        }
        let indexes = root.join(INDEXES_DIR);
        if !indexes.is_dir() {
            return Err(StoreError::IndexesMissing(indexes));
        }
        let objects = root.join(OBJECTS_DIR);
        if !objects.is_dir() {
            return Err(StoreError::ObjectsMissing(objects));
        }
        tracing::debug!(root = %root.display(), "opened assets directory");
        Ok(Self {
            root,
            indexes,
            objects: ObjectStore::new(objects),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn indexes_dir(&self) -> &Path {
        &self.indexes
    }

    pub fn objects(&self) -> &ObjectStore {
        &self.objects
    }

    /// Path of the manifest document for `name` (`indexes/<name>.json`).
    pub fn manifest_path(&self, name: &str) -> PathBuf {
        self.indexes.join(format!("{name}{MANIFEST_SUFFIX}"))
    }

    /// Whether a manifest document named `name` exists.
    pub fn has_manifest(&self, name: &str) -> bool {
        check_manifest_name(name).is_ok() && self.manifest_path(name).is_file()
    }

    /// Names of all manifests in `indexes/`, suffix stripped, sorted.
    ///
    /// Non-UTF-8 file names and subdirectories are ignored. Names rejected by
    /// [`check_manifest_name`] are reported and left out.
    pub fn list_manifests(&self) -> StoreResult<Vec<String>> {
        let mut names = Vec::new();
        for entry in std::fs::read_dir(&self.indexes)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let file_name = entry.file_name();
            let Some(file_name) = file_name.to_str() else {
                tracing::debug!(name = ?entry.file_name(), "skipping non-UTF-8 manifest name");
                continue;
            };
            let Some(name) = file_name.strip_suffix(MANIFEST_SUFFIX) else {
                continue;
            };
            if let Err(reason) = check_manifest_name(name) {
                tracing::warn!(file = file_name, reason, "ignoring manifest with unusable name");
                continue;
            }
            names.push(name.to_string());
        }
        names.sort();
        Ok(names)
    }
}
