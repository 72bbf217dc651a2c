//! Index-driven restore pipeline.
//!
//! For each selected manifest the [`Restorer`] loads the manifest, resolves
//! every logical path to its sharded object, copies the object into
//! `<result>/<manifest>/<path>`, and finally writes a `.map.txt` mapping log.
//!
//! # Failure scopes
//!
//! | Scope      | Causes                                         | Effect                         |
//! |------------|------------------------------------------------|--------------------------------|
//! | entry      | rejected entry, missing source object          | entry skipped, warning         |
//! | manifest   | load failure, empty manifest, copy I/O failure | output set removed, run goes on |
//! | run        | assets layout missing, bad config, interrupt   | run stops                      |
//!
//! A mapping log write failure is reported but keeps the copied files.
//!
//! # Key Types
//!
//! - [`Restorer`] -- the run orchestrator
//! - [`RunState`] -- the in-progress slot shared with an interrupt handler
//! - [`RestoreObserver`] -- pluggable progress reporting
//! - [`MappingRecorder`] -- accumulates and writes the mapping log
//! - [`copy_object`] -- the copy engine

pub mod config;
pub mod copy;
pub mod error;
pub mod mapping;
pub mod observer;
pub mod orchestrator;
pub mod outcome;
pub mod state;

pub use config::RestoreConfig;
pub use copy::{copy_object, CopyReport};
pub use error::{CopyError, RestoreError, RestoreResult};
pub use ars_manifest::MAP_FILE_NAME;
pub use mapping::MappingRecorder;
pub use observer::{NoopObserver, RestoreEvent, RestoreObserver};
pub use orchestrator::Restorer;
pub use outcome::{ManifestOutcome, ManifestSkip, RunSummary, SkipReason};
pub use state::RunState;
