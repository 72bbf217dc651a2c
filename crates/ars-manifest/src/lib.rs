//! Index manifest loader for asset restore.
//!
//! A manifest maps logical relative paths to content hashes:
//!
//! ```json
//! { "objects": { "sound/a.ogg": { "hash": "aa11...", "size": 2048 } } }
//! ```
//!
//! Loading validates each entry explicitly. A bad entry (missing hash,
//! malformed hash, unsafe or reserved path) never fails the manifest; it is kept as a
//! [`RejectedEntry`] in declared order so callers can report it.
//!
//! # Key Types
//!
//! - [`Manifest`] -- A loaded manifest with its items in declared order
//! - [`ManifestItem`] -- Either a valid [`ManifestEntry`] or a [`RejectedEntry`]
//! - [`EntryDefect`] -- Why an entry was rejected

pub mod entry;
pub mod error;
pub mod manifest;
pub mod path;

pub use entry::{EntryDefect, ManifestEntry, ManifestItem, RejectedEntry};
pub use error::{ManifestError, ManifestResult};
pub use manifest::Manifest;
pub use path::{check_logical_path, MAP_FILE_NAME};
