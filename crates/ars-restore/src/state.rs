use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, warn};

#[derive(Debug, Default)]
struct Slot {
    in_progress: Option<PathBuf>,
    interrupted: bool,
}

/// The in-progress output set of a run, shared with an interrupt handler.
///
/// Clones share one slot. Every update is a single assignment under the
/// lock, so a handler never observes a half-written value. Units of work run
/// through [`RunState::guarded`] hold the same lock, which keeps
/// [`RunState::interrupt`] from deleting a directory while a copy is writing
/// into it and stops any further work once the flag is set.
#[derive(Clone, Debug, Default)]
pub struct RunState {
    slot: Arc<Mutex<Slot>>,
}

impl RunState {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Slot> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Mark `dir` as the in-progress output set. Returns `false` if the run
    /// has already been interrupted.
    pub fn begin(&self, dir: PathBuf) -> bool {
        let mut slot = self.lock();
        if slot.interrupted {
            return false;
        }
        slot.in_progress = Some(dir);
        true
    }

    /// Clear the in-progress marker; the output set is final.
    pub fn finish(&self) {
        self.lock().in_progress = None;
    }

    /// Remove the in-progress output set and clear the marker.
    ///
    /// Returns the removed path, if one was marked.
    pub fn discard(&self) -> Option<PathBuf> {
        let mut slot = self.lock();
        let dir = slot.in_progress.take()?;
        remove_output_dir(&dir);
        Some(dir)
    }

    /// The currently marked output set, if any.
    pub fn current(&self) -> Option<PathBuf> {
        self.lock().in_progress.clone()
    }

    pub fn is_interrupted(&self) -> bool {
        self.lock().interrupted
    }

    /// Cancel the run: set the interrupted flag and remove the in-progress
    /// output set. Safe to call at any time and more than once.
    pub fn interrupt(&self) -> Option<PathBuf> {
        let mut slot = self.lock();
        slot.interrupted = true;
        let dir = slot.in_progress.take()?;
        remove_output_dir(&dir);
        Some(dir)
    }

    /// Run one unit of work unless the run was interrupted.
    pub fn guarded<T>(&self, work: impl FnOnce() -> T) -> Option<T> {
        let slot = self.lock();
        if slot.interrupted {
            return None;
        }
        let out = work();
        drop(slot);
        Some(out)
    }
}

/// Recursively delete an output set. A directory that is already gone is
/// not an error; other failures are logged.
fn remove_output_dir(dir: &Path) {
    match std::fs::remove_dir_all(dir) {
        Ok(()) => debug!(dir = %dir.display(), "removed output set"),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => warn!(dir = %dir.display(), error = %e, "failed to remove output set"),
    }
}
