use std::path::PathBuf;

use ars_manifest::{EntryDefect, ManifestError};

use crate::error::CopyError;

/// Why a single entry was skipped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SkipReason {
    /// The manifest entry itself is unusable.
    Rejected(EntryDefect),
    /// The referenced object is not in the store.
    SourceMissing(PathBuf),
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Rejected(defect) => write!(f, "{defect}"),
            Self::SourceMissing(path) => write!(f, "object missing at {}", path.display()),
        }
    }
}

/// Why a whole manifest produced no output set.
#[derive(Debug)]
pub enum ManifestSkip {
    /// The name cannot be used as an output directory.
    InvalidName(&'static str),
    /// The manifest could not be read or parsed.
    Load(ManifestError),
    /// The manifest declares no objects.
    Empty,
    /// Every entry was skipped.
    NothingCopied { skipped: usize },
}

impl std::fmt::Display for ManifestSkip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidName(reason) => write!(f, "unusable manifest name: {reason}"),
            Self::Load(e) => write!(f, "{e}"),
            Self::Empty => write!(f, "manifest declares no objects"),
            Self::NothingCopied { skipped } => {
                write!(f, "no entry could be restored ({skipped} skipped)")
            }
        }
    }
}

/// Terminal state of one manifest.
#[derive(Debug)]
pub enum ManifestOutcome {
    /// The output set is complete.
    Completed {
        copied: usize,
        skipped: usize,
        bytes: u64,
        /// `false` if the mapping log could not be written.
        map_written: bool,
    },
    /// Nothing to restore; no output set remains.
    Skipped(ManifestSkip),
    /// A copy failed; the output set was removed.
    Aborted { path: String, error: CopyError },
}

impl ManifestOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed { .. })
    }

    /// Entries copied into the output set (zero unless completed).
    pub fn copied(&self) -> usize {
        match self {
            Self::Completed { copied, .. } => *copied,
            _ => 0,
        }
    }
}

/// Outcomes of a run, in processing order.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub outcomes: Vec<(String, ManifestOutcome)>,
}

impl RunSummary {
    pub fn push(&mut self, name: impl Into<String>, outcome: ManifestOutcome) {
        self.outcomes.push((name.into(), outcome));
    }

    /// Returns `true` if no manifest was processed.
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn outcome(&self, name: &str) -> Option<&ManifestOutcome> {
        self.outcomes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, outcome)| outcome)
    }

    pub fn completed(&self) -> impl Iterator<Item = &str> {
        self.names_where(|o| matches!(o, ManifestOutcome::Completed { .. }))
    }

    pub fn skipped(&self) -> impl Iterator<Item = &str> {
        self.names_where(|o| matches!(o, ManifestOutcome::Skipped(_)))
    }

    pub fn aborted(&self) -> impl Iterator<Item = &str> {
        self.names_where(|o| matches!(o, ManifestOutcome::Aborted { .. }))
    }

    /// Total entries copied across all manifests.
    pub fn files_copied(&self) -> usize {
        self.outcomes.iter().map(|(_, o)| o.copied()).sum()
    }

    /// Total entries skipped inside completed or fully-skipped manifests.
    pub fn entries_skipped(&self) -> usize {
        self.outcomes
            .iter()
            .map(|(_, o)| match o {
                ManifestOutcome::Completed { skipped, .. } => *skipped,
                ManifestOutcome::Skipped(ManifestSkip::NothingCopied { skipped }) => *skipped,
                _ => 0,
            })
            .sum()
    }

    fn names_where(&self, pred: fn(&ManifestOutcome) -> bool) -> impl Iterator<Item = &str> {
        self.outcomes
            .iter()
            .filter(move |(_, o)| pred(o))
            .map(|(n, _)| n.as_str())
    }
}
