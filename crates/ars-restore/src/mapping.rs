use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use ars_manifest::{ManifestEntry, MAP_FILE_NAME};
use ars_types::{ByteSize, ObjectHash};

/// One restored entry, as written to the mapping log.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MappingLine {
    pub path: String,
    pub hash: ObjectHash,
    pub size: ByteSize,
}

/// Accumulates the mapping log for one manifest.
///
/// Lines are kept in memory in record order and written in one go by
/// [`MappingRecorder::flush`]. Each line reads
/// `<manifest>:<hash>-><path> (<size>)`.
#[derive(Clone, Debug)]
pub struct MappingRecorder {
    manifest: String,
    lines: Vec<MappingLine>,
}

impl MappingRecorder {
    pub fn new(manifest: impl Into<String>) -> Self {
        Self {
            manifest: manifest.into(),
            lines: Vec::new(),
        }
    }

    /// Record a copied entry. The declared size wins over the copied length.
    pub fn record(&mut self, entry: &ManifestEntry, bytes_copied: u64) {
        self.lines.push(MappingLine {
            path: entry.path.clone(),
            hash: entry.hash.clone(),
            size: entry.declared_size().unwrap_or(ByteSize(bytes_copied)),
        });
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn lines(&self) -> &[MappingLine] {
        &self.lines
    }

    /// The full log text, one newline-terminated line per entry.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for line in &self.lines {
            let _ = writeln!(
                out,
                "{}:{}->{} ({})",
                self.manifest, line.hash, line.path, line.size
            );
        }
        out
    }

    /// Write the log to `<output_dir>/.map.txt`, replacing any prior log.
    pub fn flush(&self, output_dir: &Path) -> std::io::Result<PathBuf> {
        let path = output_dir.join(MAP_FILE_NAME);
        std::fs::write(&path, self.render())?;
        Ok(path)
    }
}
