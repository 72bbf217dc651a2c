//! The run orchestrator: drives load → copy → record for each manifest.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use ars_manifest::{Manifest, ManifestItem};
use ars_store::{check_manifest_name, AssetsDir, MANIFEST_SUFFIX};
use ars_types::ByteSize;
use tracing::{debug, info, warn};

use crate::config::RestoreConfig;
use crate::copy::copy_object;
use crate::error::{CopyError, RestoreError, RestoreResult};
use crate::mapping::MappingRecorder;
use crate::observer::{NoopObserver, RestoreEvent, RestoreObserver};
use crate::outcome::{ManifestOutcome, ManifestSkip, RunSummary, SkipReason};
use crate::state::RunState;

/// Restores output sets from an assets directory, one manifest at a time.
///
/// Manifests are processed strictly in sequence, entries strictly in
/// declared order. Each manifest ends Completed, Skipped or Aborted; only
/// an interrupt stops the run.
pub struct Restorer {
    assets: AssetsDir,
    result_root: PathBuf,
    preserve_metadata: bool,
    state: RunState,
    observer: Arc<dyn RestoreObserver>,
}

impl std::fmt::Debug for Restorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Restorer")
            .field("assets", &self.assets.root())
            .field("result_root", &self.result_root)
            .field("preserve_metadata", &self.preserve_metadata)
            .field("in_progress", &self.state.current())
            .finish()
    }
}

impl Restorer {
    pub fn new(assets: AssetsDir, result_root: impl Into<PathBuf>) -> Self {
        Self {
            assets,
            result_root: result_root.into(),
            preserve_metadata: true,
            state: RunState::new(),
            observer: Arc::new(NoopObserver),
        }
    }

    /// Open the configured assets directory and build a restorer for it.
    pub fn from_config(config: &RestoreConfig) -> RestoreResult<Self> {
        let assets = AssetsDir::open(&config.assets_dir)?;
        Ok(Self::new(assets, config.effective_result_dir()).preserve_metadata(config.preserve_metadata))
    }

    pub fn with_observer(mut self, observer: Arc<dyn RestoreObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Share an existing run state, typically one an interrupt handler holds.
    pub fn with_state(mut self, state: RunState) -> Self {
        self.state = state;
        self
    }

    pub fn preserve_metadata(mut self, preserve: bool) -> Self {
        self.preserve_metadata = preserve;
        self
    }

    pub fn state(&self) -> &RunState {
        &self.state
    }

    pub fn assets(&self) -> &AssetsDir {
        &self.assets
    }

    pub fn result_root(&self) -> &Path {
        &self.result_root
    }

    /// Output set directory for manifest `name`.
    pub fn output_dir(&self, name: &str) -> PathBuf {
        self.result_root.join(name)
    }

    /// Output set directory for `name`, provided it is a direct child of the
    /// result root. Cleanup removes this directory recursively.
    fn checked_output_dir(&self, name: &str) -> Result<PathBuf, &'static str> {
        check_manifest_name(name)?;
        let dir = self.output_dir(name);
        if dir.parent() != Some(self.result_root.as_path()) {
            return Err("outside the result directory");
        }
        Ok(dir)
    }

    /// Resolve the run set.
    ///
    /// `None` selects every manifest in `indexes/`, sorted by name. Otherwise
    /// the requested names are kept in the given order; names without a
    /// manifest file are reported and dropped, as are duplicates. A trailing
    /// `.json` is accepted.
    pub fn select(&self, requested: Option<&[String]>) -> RestoreResult<Vec<String>> {
        let Some(requested) = requested else {
            return Ok(self.assets.list_manifests()?);
        };

        let mut selected: Vec<String> = Vec::new();
        for raw in requested {
            let name = raw.trim();
            let name = name.strip_suffix(MANIFEST_SUFFIX).unwrap_or(name);
            if name.is_empty() {
                continue;
            }
            if !self.assets.has_manifest(name) {
                warn!(manifest = name, "no such manifest; ignoring");
                self.observer.on_event(&RestoreEvent::UnknownManifest { name });
                continue;
            }
            if !selected.iter().any(|s| s == name) {
                selected.push(name.to_string());
            }
        }
        Ok(selected)
    }

    /// Restore every selected manifest in sequence.
    ///
    /// Returns [`RestoreError::Interrupted`] if the run state is interrupted;
    /// per-manifest failures are reported in the [`RunSummary`] instead.
    pub fn run(&self, requested: Option<&[String]>) -> RestoreResult<RunSummary> {
        let selected = self.select(requested)?;
        self.observer.on_event(&RestoreEvent::RunStarted {
            manifests: &selected,
        });
        if selected.is_empty() {
            info!("no manifests selected; nothing to do");
        }

        let mut summary = RunSummary::default();
        let total = selected.len();
        for (i, name) in selected.iter().enumerate() {
            let outcome = self.restore_one(name, i + 1, total)?;
            summary.push(name.clone(), outcome);
        }

        self.observer.on_event(&RestoreEvent::RunFinished { summary: &summary });
        Ok(summary)
    }

    /// Restore a single manifest by name.
    pub fn restore_manifest(&self, name: &str) -> RestoreResult<ManifestOutcome> {
        self.restore_one(name, 1, 1)
    }

    fn restore_one(&self, name: &str, index: usize, total: usize) -> RestoreResult<ManifestOutcome> {
        let output_dir = match self.checked_output_dir(name) {
            Ok(dir) => dir,
            Err(reason) => {
                warn!(manifest = name, reason, "refusing manifest name");
                let outcome = ManifestOutcome::Skipped(ManifestSkip::InvalidName(reason));
                self.observer.on_event(&RestoreEvent::ManifestStarted { name, index, total });
                self.observer.on_event(&RestoreEvent::ManifestFinished {
                    name,
                    outcome: &outcome,
                });
                return Ok(outcome);
            }
        };
        if !self.state.begin(output_dir.clone()) {
            return Err(RestoreError::Interrupted);
        }
        self.observer.on_event(&RestoreEvent::ManifestStarted { name, index, total });

        let outcome = self.process(name, &output_dir)?;
        if outcome.is_completed() {
            self.state.finish();
        } else if let Some(dir) = self.state.discard() {
            debug!(manifest = name, dir = %dir.display(), "discarded output set");
        }

        self.observer.on_event(&RestoreEvent::ManifestFinished {
            name,
            outcome: &outcome,
        });
        Ok(outcome)
    }

    fn process(&self, name: &str, output_dir: &Path) -> RestoreResult<ManifestOutcome> {
        let manifest = match Manifest::load(&self.assets.manifest_path(name)) {
            Ok(manifest) => manifest,
            Err(e) => {
                warn!(manifest = name, error = %e, "skipping manifest");
                return Ok(ManifestOutcome::Skipped(ManifestSkip::Load(e)));
            }
        };
        if manifest.is_empty() {
            warn!(manifest = name, "manifest declares no objects; skipping");
            return Ok(ManifestOutcome::Skipped(ManifestSkip::Empty));
        }

        let total = manifest.len();
        debug!(
            manifest = manifest.name(),
            items = total,
            declared = %ByteSize(manifest.declared_bytes()),
            "manifest loaded"
        );
        let mut recorder = MappingRecorder::new(manifest.name());
        let mut skipped = 0;
        let mut bytes = 0;

        for (i, item) in manifest.items().iter().enumerate() {
            let entry = match item {
                ManifestItem::Entry(entry) => entry,
                ManifestItem::Rejected(rejected) => {
                    skipped += 1;
                    let reason = SkipReason::Rejected(rejected.defect.clone());
                    self.observer.on_event(&RestoreEvent::EntrySkipped {
                        manifest: name,
                        path: &rejected.path,
                        reason: &reason,
                    });
                    continue;
                }
            };

            let src = self.assets.objects().path_of(&entry.hash);
            let dst = output_dir.join(&entry.path);
            let copied = self
                .state
                .guarded(|| copy_object(&src, &dst, self.preserve_metadata))
                .ok_or(RestoreError::Interrupted)?;

            match copied {
                Ok(report) => {
                    debug!(manifest = name, path = %entry.path, hash = %entry.hash, bytes = report.bytes, "copied");
                    recorder.record(entry, report.bytes);
                    bytes += report.bytes;
                    self.observer.on_event(&RestoreEvent::EntryCopied {
                        manifest: name,
                        path: &entry.path,
                        hash: &entry.hash,
                        bytes: report.bytes,
                        done: i + 1,
                        total,
                    });
                }
                Err(CopyError::SourceMissing(missing)) => {
                    skipped += 1;
                    warn!(manifest = name, path = %entry.path, hash = %entry.hash, "object missing; skipping entry");
                    let reason = SkipReason::SourceMissing(missing);
                    self.observer.on_event(&RestoreEvent::EntrySkipped {
                        manifest: name,
                        path: &entry.path,
                        reason: &reason,
                    });
                }
                Err(error) => {
                    warn!(manifest = name, path = %entry.path, %error, "copy failed; aborting manifest");
                    return Ok(ManifestOutcome::Aborted {
                        path: entry.path.clone(),
                        error,
                    });
                }
            }
        }

        if recorder.is_empty() {
            warn!(manifest = name, skipped, "no entry restored; discarding output set");
            return Ok(ManifestOutcome::Skipped(ManifestSkip::NothingCopied { skipped }));
        }

        let flushed = self
            .state
            .guarded(|| recorder.flush(output_dir))
            .ok_or(RestoreError::Interrupted)?;
        let map_written = match flushed {
            Ok(path) => {
                debug!(manifest = name, map = %path.display(), "mapping log written");
                true
            }
            Err(error) => {
                warn!(manifest = name, %error, "failed to write mapping log; keeping copied files");
                self.observer.on_event(&RestoreEvent::MappingWriteFailed {
                    manifest: name,
                    error: &error,
                });
                false
            }
        };

        info!(manifest = name, copied = recorder.len(), skipped, "manifest restored");
        Ok(ManifestOutcome::Completed {
            copied: recorder.len(),
            skipped,
            bytes,
            map_written,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use std::fs;
    use std::sync::Mutex;

    use tempfile::TempDir;

    fn h(prefix: &str) -> String {
        format!("{prefix:0<40}")
    }

    struct Fixture {
        dir: TempDir,
    }

    impl Fixture {
        fn new() -> Self {
            let dir = tempfile::tempdir().unwrap();
            fs::create_dir_all(dir.path().join("assets/indexes")).unwrap();
            fs::create_dir_all(dir.path().join("assets/objects")).unwrap();
            Self { dir }
        }

        fn assets(&self) -> PathBuf {
            self.dir.path().join("assets")
        }

        fn result(&self) -> PathBuf {
            self.dir.path().join("result")
        }

        fn object(&self, hash: &str, data: &[u8]) {
            let shard = self.assets().join("objects").join(&hash[..2]);
            fs::create_dir_all(&shard).unwrap();
            fs::write(shard.join(hash), data).unwrap();
        }

        fn manifest(&self, name: &str, json: &str) {
            fs::write(self.assets().join("indexes").join(format!("{name}.json")), json).unwrap();
        }

        fn restorer(&self) -> Restorer {
            Restorer::new(AssetsDir::open(self.assets()).unwrap(), self.result())
        }
    }

    #[derive(Default)]
    struct Recorder {
        events: Mutex<Vec<String>>,
    }

    impl Recorder {
        fn events(&self) -> Vec<String> {
            self.events.lock().unwrap().clone()
        }
    }

    impl RestoreObserver for Recorder {
        fn on_event(&self, event: &RestoreEvent<'_>) {
            let line = match event {
                RestoreEvent::RunStarted { manifests } => format!("run:{}", manifests.len()),
                RestoreEvent::UnknownManifest { name } => format!("unknown:{name}"),
                RestoreEvent::ManifestStarted { name, index, total } => {
                    format!("start:{name}:{index}/{total}")
                }
                RestoreEvent::EntryCopied { path, done, total, .. } => {
                    format!("copied:{path}:{done}/{total}")
                }
                RestoreEvent::EntrySkipped { path, .. } => format!("skipped:{path}"),
                RestoreEvent::MappingWriteFailed { manifest, .. } => format!("mapfail:{manifest}"),
                RestoreEvent::ManifestFinished { name, outcome } => {
                    let state = match outcome {
                        ManifestOutcome::Completed { .. } => "completed",
                        ManifestOutcome::Skipped(_) => "skipped",
                        ManifestOutcome::Aborted { .. } => "aborted",
                    };
                    format!("finish:{name}:{state}")
                }
                RestoreEvent::RunFinished { .. } => "done".to_string(),
            };
            self.events.lock().unwrap().push(line);
        }
    }

    /// Interrupts the shared run state after the first copy in `manifest`.
    struct InterruptOn {
        state: RunState,
        manifest: &'static str,
    }

    impl RestoreObserver for InterruptOn {
        fn on_event(&self, event: &RestoreEvent<'_>) {
            if let RestoreEvent::EntryCopied { manifest, .. } = event {
                if *manifest == self.manifest {
                    self.state.interrupt();
                }
            }
        }
    }

    /// Interrupts the shared run state right after the last declared entry of
    /// `manifest` is copied, before the mapping log is written.
    struct InterruptAfterLast {
        state: RunState,
        manifest: &'static str,
    }

    impl RestoreObserver for InterruptAfterLast {
        fn on_event(&self, event: &RestoreEvent<'_>) {
            if let RestoreEvent::EntryCopied {
                manifest,
                done,
                total,
                ..
            } = event
            {
                if *manifest == self.manifest && done == total {
                    self.state.interrupt();
                }
            }
        }
    }

    fn snapshot(root: &Path) -> BTreeMap<PathBuf, Vec<u8>> {
        walkdir::WalkDir::new(root)
            .into_iter()
            .map(|e| e.unwrap())
            .filter(|e| e.file_type().is_file())
            .map(|e| {
                let rel = e.path().strip_prefix(root).unwrap().to_path_buf();
                (rel, fs::read(e.path()).unwrap())
            })
            .collect()
    }

    fn single_entry_manifest(hash: &str) -> String {
        format!(r#"{{"objects": {{"sound/a.ogg": {{"hash": "{hash}", "size": 2048}}}}}}"#)
    }

    #[test]
    fn restores_single_entry_with_mapping_line() {
        let fx = Fixture::new();
        let hash = h("aa11");
        let data = vec![7u8; 2048];
        fx.object(&hash, &data);
        fx.manifest("1.8", &single_entry_manifest(&hash));

        let summary = fx.restorer().run(None).unwrap();
        assert_eq!(summary.completed().collect::<Vec<_>>(), vec!["1.8"]);

        let out = fx.result().join("1.8");
        assert_eq!(fs::read(out.join("sound/a.ogg")).unwrap(), data);
        let map = fs::read_to_string(out.join(".map.txt")).unwrap();
        assert_eq!(map.lines().count(), 1);
        assert!(map.contains("sound/a.ogg"));
        assert!(map.contains(&hash));
        assert!(map.contains("2.00KB"));
    }

    #[test]
    fn missing_object_leaves_no_output_set() {
        let fx = Fixture::new();
        fx.manifest("1.8", &single_entry_manifest(&h("aa11")));
        let recorder = Arc::new(Recorder::default());

        let summary = fx.restorer().with_observer(recorder.clone()).run(None).unwrap();
        assert!(matches!(
            summary.outcome("1.8"),
            Some(ManifestOutcome::Skipped(ManifestSkip::NothingCopied { skipped: 1 }))
        ));
        assert!(!fx.result().join("1.8").exists());
        assert!(recorder.events().contains(&"skipped:sound/a.ogg".to_string()));
    }

    #[test]
    fn mapping_counts_only_copied_entries() {
        let fx = Fixture::new();
        let (a, b, c) = (h("a1"), h("b2"), h("c3"));
        fx.object(&a, b"alpha");
        fx.object(&c, b"gamma");
        fx.manifest(
            "m",
            &format!(
                r#"{{"objects": {{
                    "z/first.txt": {{"hash": "{a}", "size": 5}},
                    "nohash.txt": {{"size": 3}},
                    "missing.txt": {{"hash": "{b}", "size": 1}},
                    "a/last.txt": {{"hash": "{c}", "size": 5}}
                }}}}"#
            ),
        );

        let outcome = fx.restorer().restore_manifest("m").unwrap();
        match outcome {
            ManifestOutcome::Completed {
                copied,
                skipped,
                bytes,
                map_written,
            } => {
                assert_eq!(copied, 2);
                assert_eq!(skipped, 2);
                assert_eq!(bytes, 10);
                assert!(map_written);
            }
            other => panic!("unexpected outcome: {other:?}"),
        }

        let map = fs::read_to_string(fx.result().join("m/.map.txt")).unwrap();
        let lines: Vec<&str> = map.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("z/first.txt"));
        assert!(lines[1].contains("a/last.txt"));
        assert!(!fx.result().join("m/nohash.txt").exists());
        assert!(!fx.result().join("m/missing.txt").exists());
    }

    #[test]
    fn empty_manifest_is_skipped_and_cleaned() {
        let fx = Fixture::new();
        fx.manifest("empty", r#"{"objects": {}}"#);
        fs::create_dir_all(fx.result().join("empty/stale")).unwrap();

        let summary = fx.restorer().run(None).unwrap();
        assert!(matches!(
            summary.outcome("empty"),
            Some(ManifestOutcome::Skipped(ManifestSkip::Empty))
        ));
        assert!(!fx.result().join("empty").exists());
    }

    #[test]
    fn unparseable_manifest_does_not_stop_the_run() {
        let fx = Fixture::new();
        let hash = h("dd44");
        fx.object(&hash, b"ok");
        fx.manifest("a-broken", "{ not json");
        fx.manifest("b-good", &single_entry_manifest(&hash));

        let summary = fx.restorer().run(None).unwrap();
        assert!(matches!(
            summary.outcome("a-broken"),
            Some(ManifestOutcome::Skipped(ManifestSkip::Load(_)))
        ));
        assert!(summary.outcome("b-good").unwrap().is_completed());
        assert!(!fx.result().join("a-broken").exists());
        assert!(fx.result().join("b-good/sound/a.ogg").is_file());
    }

    #[test]
    fn copy_failure_aborts_only_that_manifest() {
        let fx = Fixture::new();
        let hash = h("ee55");
        fx.object(&hash, b"payload");
        for name in ["a", "b", "c"] {
            fx.manifest(
                name,
                &format!(
                    r#"{{"objects": {{
                        "top.txt": {{"hash": "{hash}"}},
                        "sound/a.ogg": {{"hash": "{hash}"}}
                    }}}}"#
                ),
            );
        }
        // A file where manifest b needs a directory.
        fs::create_dir_all(fx.result().join("b")).unwrap();
        fs::write(fx.result().join("b/sound"), b"blocker").unwrap();

        let summary = fx.restorer().run(None).unwrap();
        assert_eq!(summary.completed().collect::<Vec<_>>(), vec!["a", "c"]);
        match summary.outcome("b") {
            Some(ManifestOutcome::Aborted { path, error }) => {
                assert_eq!(path, "sound/a.ogg");
                assert!(matches!(error, CopyError::Io { .. }));
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
        assert!(!fx.result().join("b").exists());
        assert!(fx.result().join("a/sound/a.ogg").is_file());
        assert!(fx.result().join("c/sound/a.ogg").is_file());
    }

    #[test]
    fn second_run_is_byte_identical() {
        let fx = Fixture::new();
        let (a, b) = (h("1a"), h("2b"));
        fx.object(&a, b"first");
        fx.object(&b, b"second");
        fx.manifest(
            "m",
            &format!(
                r#"{{"objects": {{
                    "x/y/z.txt": {{"hash": "{a}", "size": 5}},
                    "b.txt": {{"hash": "{b}", "size": 6}},
                    "a.txt": {{"hash": "{a}", "size": 5}}
                }}}}"#
            ),
        );

        fx.restorer().run(None).unwrap();
        let first = snapshot(&fx.result());
        fx.restorer().run(None).unwrap();
        let second = snapshot(&fx.result());

        assert_eq!(first, second);
        assert_eq!(first.len(), 4);
        let map = String::from_utf8(first[&PathBuf::from("m/.map.txt")].clone()).unwrap();
        let order: Vec<&str> = map
            .lines()
            .map(|l| l.split("->").nth(1).unwrap().split(' ').next().unwrap())
            .collect();
        assert_eq!(order, vec!["x/y/z.txt", "b.txt", "a.txt"]);
    }

    #[test]
    fn interrupt_discards_in_flight_manifest_only() {
        let fx = Fixture::new();
        let hash = h("ff66");
        fx.object(&hash, b"data");
        for name in ["a", "b", "c"] {
            fx.manifest(
                name,
                &format!(
                    r#"{{"objects": {{
                        "one.txt": {{"hash": "{hash}"}},
                        "two.txt": {{"hash": "{hash}"}}
                    }}}}"#
                ),
            );
        }

        let state = RunState::new();
        let observer = Arc::new(InterruptOn {
            state: state.clone(),
            manifest: "b",
        });
        let err = fx
            .restorer()
            .with_state(state.clone())
            .with_observer(observer)
            .run(None)
            .unwrap_err();

        assert!(matches!(err, RestoreError::Interrupted));
        assert!(fx.result().join("a/one.txt").is_file());
        assert!(fx.result().join("a/.map.txt").is_file());
        assert!(!fx.result().join("b").exists());
        assert!(!fx.result().join("c").exists());
        assert!(state.is_interrupted());
    }

    #[test]
    fn interrupt_before_mapping_log_discards_output_set() {
        let fx = Fixture::new();
        let hash = h("fa");
        fx.object(&hash, b"data");
        fx.manifest(
            "m",
            &format!(
                r#"{{"objects": {{
                    "one.txt": {{"hash": "{hash}"}},
                    "two.txt": {{"hash": "{hash}"}}
                }}}}"#
            ),
        );

        let state = RunState::new();
        let observer = Arc::new(InterruptAfterLast {
            state: state.clone(),
            manifest: "m",
        });
        let err = fx
            .restorer()
            .with_state(state.clone())
            .with_observer(observer)
            .run(None)
            .unwrap_err();

        assert!(matches!(err, RestoreError::Interrupted));
        assert!(!fx.result().join("m/.map.txt").exists());
        assert!(!fx.result().join("m").exists());
        assert!(state.current().is_none());
    }

    #[test]
    fn interrupted_state_refuses_new_manifests() {
        let fx = Fixture::new();
        fx.manifest("m", &single_entry_manifest(&h("ab")));
        let state = RunState::new();
        state.interrupt();

        let err = fx.restorer().with_state(state).restore_manifest("m").unwrap_err();
        assert!(matches!(err, RestoreError::Interrupted));
    }

    #[test]
    fn mapping_write_failure_keeps_files() {
        let fx = Fixture::new();
        let hash = h("9c");
        fx.object(&hash, b"kept");
        fx.manifest("m", &single_entry_manifest(&hash));
        fs::create_dir_all(fx.result().join("m/.map.txt")).unwrap();
        let recorder = Arc::new(Recorder::default());

        let outcome = fx
            .restorer()
            .with_observer(recorder.clone())
            .restore_manifest("m")
            .unwrap();
        assert!(matches!(
            outcome,
            ManifestOutcome::Completed {
                map_written: false,
                copied: 1,
                ..
            }
        ));
        assert_eq!(fs::read(fx.result().join("m/sound/a.ogg")).unwrap(), b"kept");
        assert!(recorder.events().contains(&"mapfail:m".to_string()));
    }

    #[test]
    fn unsafe_paths_never_leave_the_output_set() {
        let fx = Fixture::new();
        let hash = h("5e");
        fx.object(&hash, b"x");
        fx.manifest(
            "m",
            &format!(
                r#"{{"objects": {{
                    "../escaped.txt": {{"hash": "{hash}"}},
                    "/abs.txt": {{"hash": "{hash}"}},
                    "inside.txt": {{"hash": "{hash}"}}
                }}}}"#
            ),
        );

        let outcome = fx.restorer().restore_manifest("m").unwrap();
        assert_eq!(outcome.copied(), 1);
        assert!(!fx.result().join("escaped.txt").exists());
        assert!(fx.result().join("m/inside.txt").is_file());
    }

    #[test]
    fn mapping_log_name_cannot_be_an_entry() {
        let fx = Fixture::new();
        let hash = h("aa11");
        fx.object(&hash, b"PAYLOAD");
        fx.manifest(
            "m",
            &format!(
                r#"{{"objects": {{
                    ".map.txt": {{"hash": "{hash}", "size": 7}},
                    "a.txt": {{"hash": "{hash}", "size": 7}}
                }}}}"#
            ),
        );

        let outcome = fx.restorer().restore_manifest("m").unwrap();
        assert_eq!(outcome.copied(), 1);
        assert_eq!(fs::read(fx.result().join("m/a.txt")).unwrap(), b"PAYLOAD");
        let map = fs::read_to_string(fx.result().join("m/.map.txt")).unwrap();
        assert_eq!(map, format!("m:{hash}->a.txt (7B)\n"));
    }

    #[test]
    fn parent_dir_manifest_never_touches_the_store() {
        let fx = Fixture::new();
        let hash = h("b0");
        fx.object(&hash, b"blob");
        // `...json` would name a manifest `..`, one level above the results.
        fx.manifest("..", "{ not json");
        let result = fx.assets().join("result");
        fs::create_dir_all(&result).unwrap();
        let restorer = Restorer::new(AssetsDir::open(fx.assets()).unwrap(), &result);

        let summary = restorer.run(None).unwrap();
        assert!(summary.is_empty());
        assert!(matches!(
            restorer.restore_manifest("..").unwrap(),
            ManifestOutcome::Skipped(ManifestSkip::InvalidName(_))
        ));
        assert!(fx.assets().join("objects").join(&hash[..2]).join(&hash).is_file());
        assert!(result.is_dir());
    }

    #[test]
    fn current_dir_manifest_keeps_completed_siblings() {
        let fx = Fixture::new();
        let hash = h("c0");
        fx.object(&hash, b"sibling");
        fx.manifest("1.8", &single_entry_manifest(&hash));
        // `..json` would name a manifest `.`, the result root itself.
        fx.manifest(".", r#"{"objects": {}}"#);
        let recorder = Arc::new(Recorder::default());

        let requested = vec!["1.8".to_string(), ".".to_string()];
        let summary = fx
            .restorer()
            .with_observer(recorder.clone())
            .run(Some(&requested))
            .unwrap();

        assert_eq!(summary.completed().collect::<Vec<_>>(), vec!["1.8"]);
        assert!(recorder.events().contains(&"unknown:.".to_string()));
        assert_eq!(
            fs::read(fx.result().join("1.8/sound/a.ogg")).unwrap(),
            b"sibling"
        );
        assert!(matches!(
            fx.restorer().restore_manifest(".").unwrap(),
            ManifestOutcome::Skipped(ManifestSkip::InvalidName(_))
        ));
        assert!(fx.result().join("1.8/.map.txt").is_file());
    }

    #[test]
    fn selection_filters_unknown_names() {
        let fx = Fixture::new();
        let hash = h("77");
        fx.object(&hash, b"x");
        fx.manifest("1.8", &single_entry_manifest(&hash));
        fx.manifest("1.12", &single_entry_manifest(&hash));
        let recorder = Arc::new(Recorder::default());
        let restorer = fx.restorer().with_observer(recorder.clone());

        let requested = vec![
            "1.12".to_string(),
            "nope".to_string(),
            "1.8.json".to_string(),
            "1.12".to_string(),
            " ".to_string(),
        ];
        assert_eq!(restorer.select(Some(&requested)).unwrap(), vec!["1.12", "1.8"]);
        assert_eq!(restorer.select(None).unwrap(), vec!["1.12", "1.8"]);
        assert!(recorder.events().contains(&"unknown:nope".to_string()));
    }

    #[test]
    fn nothing_to_do_is_not_an_error() {
        let fx = Fixture::new();
        let recorder = Arc::new(Recorder::default());
        let requested = vec!["missing".to_string()];

        let summary = fx
            .restorer()
            .with_observer(recorder.clone())
            .run(Some(&requested))
            .unwrap();
        assert!(summary.is_empty());
        assert!(!fx.result().exists());
        assert_eq!(recorder.events(), vec!["unknown:missing", "run:0", "done"]);
    }

    #[test]
    fn event_sequence_for_one_manifest() {
        let fx = Fixture::new();
        let hash = h("42");
        fx.object(&hash, b"x");
        fx.manifest(
            "m",
            &format!(r#"{{"objects": {{"a": {{"hash": "{hash}"}}, "b": {{}}}}}}"#),
        );
        let recorder = Arc::new(Recorder::default());

        fx.restorer().with_observer(recorder.clone()).run(None).unwrap();
        assert_eq!(
            recorder.events(),
            vec![
                "run:1",
                "start:m:1/1",
                "copied:a:1/2",
                "skipped:b",
                "finish:m:completed",
                "done",
            ]
        );
    }

    #[test]
    fn missing_assets_root_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let config = RestoreConfig {
            assets_dir: dir.path().join("nowhere"),
            ..RestoreConfig::default()
        };
        let err = Restorer::from_config(&config).unwrap_err();
        assert!(matches!(err, RestoreError::Store(_)));
    }

    #[test]
    fn from_config_defaults_result_under_assets() {
        let fx = Fixture::new();
        let config = RestoreConfig {
            assets_dir: fx.assets(),
            ..RestoreConfig::default()
        };
        let restorer = Restorer::from_config(&config).unwrap();
        assert_eq!(restorer.result_root(), fx.assets().join("result"));
        assert_eq!(restorer.output_dir("1.8"), fx.assets().join("result/1.8"));
    }
}
