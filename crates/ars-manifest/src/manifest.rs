//! Manifest parsing and loading.

use std::path::Path;

use ars_store::MANIFEST_SUFFIX;
use ars_types::ObjectHash;
use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::entry::{EntryDefect, ManifestEntry, ManifestItem, RejectedEntry};
use crate::error::{ManifestError, ManifestResult};
use crate::path::check_logical_path;

/// Top-level document shape. Keys other than `objects` are ignored.
#[derive(Deserialize)]
struct RawManifest {
    objects: Option<IndexMap<String, Value>>,
}

/// A loaded manifest. Immutable once loaded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Manifest {
    name: String,
    items: Vec<ManifestItem>,
}

impl Manifest {
    /// Load a manifest from disk. The name is the file name minus `.json`.
    pub fn load(path: &Path) -> ManifestResult<Self> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ManifestError::NotFound(path.to_path_buf()));
            }
            Err(source) => {
                return Err(ManifestError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let name = file_name
            .strip_suffix(MANIFEST_SUFFIX)
            .unwrap_or(&file_name)
            .to_string();
        Self::parse(name, &text)
    }

    /// Parse a manifest document held in memory.
    pub fn parse(name: impl Into<String>, text: &str) -> ManifestResult<Self> {
        let name = name.into();
        let raw: RawManifest = serde_json::from_str(text).map_err(|source| ManifestError::Parse {
            origin: name.clone(),
            source,
        })?;
        let objects = raw.objects.ok_or_else(|| ManifestError::Malformed {
            origin: name.clone(),
            reason: "no \"objects\" map".into(),
        })?;

        let items: Vec<ManifestItem> = objects
            .into_iter()
            .map(|(path, value)| decode_item(&name, path, &value))
            .collect();

        debug!(manifest = %name, items = items.len(), "parsed manifest");
        Ok(Self { name, items })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// All declared items in declared order.
    pub fn items(&self) -> &[ManifestItem] {
        &self.items
    }

    /// Number of declared items, valid or not.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the `objects` map is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Valid entries in declared order.
    pub fn entries(&self) -> impl Iterator<Item = &ManifestEntry> {
        self.items.iter().filter_map(ManifestItem::as_entry)
    }

    /// Rejected entries in declared order.
    pub fn rejected(&self) -> impl Iterator<Item = &RejectedEntry> {
        self.items.iter().filter_map(|item| match item {
            ManifestItem::Rejected(rejected) => Some(rejected),
            ManifestItem::Entry(_) => None,
        })
    }

    /// Sum of declared sizes of valid entries.
    pub fn declared_bytes(&self) -> u64 {
        self.entries().filter_map(|e| e.size).sum()
    }
}

fn decode_item(manifest: &str, path: String, value: &Value) -> ManifestItem {
    match decode_entry(&path, value) {
        Ok(entry) => ManifestItem::Entry(entry),
        Err(defect) => {
            warn!(manifest, path = %path, %defect, "skipping manifest entry");
            ManifestItem::Rejected(RejectedEntry { path, defect })
        }
    }
}

fn decode_entry(path: &str, value: &Value) -> Result<ManifestEntry, EntryDefect> {
    check_logical_path(path).map_err(EntryDefect::UnsafePath)?;
    let fields = value.as_object().ok_or(EntryDefect::NotAnObject)?;

    let hash = match fields.get("hash") {
        None | Some(Value::Null) => return Err(EntryDefect::MissingHash),
        Some(Value::String(s)) => {
            ObjectHash::new(s.as_str()).map_err(|e| EntryDefect::InvalidHash(e.to_string()))?
        }
        Some(other) => {
            return Err(EntryDefect::InvalidHash(format!("expected string, got {other}")));
        }
    };
    let size = fields.get("size").and_then(Value::as_u64);

    Ok(ManifestEntry {
        path: path.to_string(),
        hash,
        size,
    })
}
