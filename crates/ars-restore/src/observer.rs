use ars_types::ObjectHash;

use crate::outcome::{ManifestOutcome, RunSummary, SkipReason};

/// Structured progress events emitted by the [`Restorer`](crate::Restorer).
#[derive(Debug)]
pub enum RestoreEvent<'a> {
    RunStarted {
        manifests: &'a [String],
    },
    /// A requested manifest name has no manifest file; it is left out.
    UnknownManifest {
        name: &'a str,
    },
    ManifestStarted {
        name: &'a str,
        index: usize,
        total: usize,
    },
    EntryCopied {
        manifest: &'a str,
        path: &'a str,
        hash: &'a ObjectHash,
        bytes: u64,
        /// Position of this entry among the manifest's declared items.
        done: usize,
        total: usize,
    },
    EntrySkipped {
        manifest: &'a str,
        path: &'a str,
        reason: &'a SkipReason,
    },
    MappingWriteFailed {
        manifest: &'a str,
        error: &'a std::io::Error,
    },
    ManifestFinished {
        name: &'a str,
        outcome: &'a ManifestOutcome,
    },
    RunFinished {
        summary: &'a RunSummary,
    },
}

/// Receives progress events. Called synchronously from the restoring thread.
pub trait RestoreObserver: Send + Sync {
    fn on_event(&self, event: &RestoreEvent<'_>);
}

/// Ignores every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopObserver;

impl RestoreObserver for NoopObserver {
    fn on_event(&self, _event: &RestoreEvent<'_>) {}
}
