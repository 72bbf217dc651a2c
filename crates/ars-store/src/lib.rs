//! Content-addressed object storage layout for asset restore.
//!
//! An assets directory holds two subdirectories:
//!
//! ```text
//! <assets>/indexes/<name>.json      manifests (logical path -> hash)
//! <assets>/objects/<hh>/<hash>      blobs, sharded by the first two hash characters
//! ```
//!
//! This crate never reads blob contents and never recomputes hashes. It only
//! knows where things live.
//!
//! # Key Types
//!
//! - [`resolve`] -- pure hash-to-path sharding
//! - [`ObjectStore`] -- a store root that maps hashes to blob paths
//! - [`AssetsDir`] -- validated assets layout and manifest discovery

pub mod assets;
pub mod error;
pub mod resolver;
pub mod store;

pub use assets::{check_manifest_name, AssetsDir, MANIFEST_SUFFIX};
pub use error::{StoreError, StoreResult};
pub use resolver::resolve;
pub use store::ObjectStore;
