//! Foundation types for asset restore.
//!
//! Every other `ars-*` crate depends on `ars-types`.
//!
//! # Key Types
//!
//! - [`ObjectHash`] -- Content hash naming a blob in the object store
//! - [`ByteSize`] -- Byte count with a human-readable `Display`

pub mod error;
pub mod hash;
pub mod size;

pub use error::TypeError;
pub use hash::ObjectHash;
pub use size::ByteSize;
