use std::fs;
use std::io;
use std::path::Path;

use filetime::FileTime;
use tracing::warn;

use crate::error::CopyError;

/// Result of a successful object copy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CopyReport {
    /// Bytes written to the destination.
    pub bytes: u64,
    /// Whether permission bits and modification time were carried over.
    pub metadata_preserved: bool,
}

/// Copy one object from the store into an output set.
///
/// Missing ancestors of `dst` are created; existing directories are fine, a
/// non-directory in the way is an error. An existing file at `dst` is
/// replaced. The copy is whole-file.
///
/// A missing (or non-file) source yields [`CopyError::SourceMissing`]; every
/// other failure to produce the destination bytes is [`CopyError::Io`].
/// Failing to carry over metadata is logged and reported in the
/// [`CopyReport`], never returned as an error.
pub fn copy_object(src: &Path, dst: &Path, preserve_metadata: bool) -> Result<CopyReport, CopyError> {
    let io_err = |source: io::Error| CopyError::Io {
        src: src.to_path_buf(),
        dst: dst.to_path_buf(),
        source,
    };

    let src_meta = match fs::metadata(src) {
        Ok(meta) if meta.is_file() => meta,
        Ok(_) => return Err(CopyError::SourceMissing(src.to_path_buf())),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(CopyError::SourceMissing(src.to_path_buf()));
        }
        Err(e) => return Err(io_err(e)),
    };

    if let Some(parent) = dst.parent() {
        fs::create_dir_all(parent).map_err(io_err)?;
    }

    // Replace rather than write through: the old file may be read-only or a link.
    match fs::symlink_metadata(dst) {
        Ok(meta) if !meta.is_dir() => fs::remove_file(dst).map_err(io_err)?,
        Ok(_) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(io_err(e)),
    }

    let bytes = fs::copy(src, dst).map_err(io_err)?;

    let metadata_preserved = preserve_metadata && carry_metadata(&src_meta, dst);
    Ok(CopyReport {
        bytes,
        metadata_preserved,
    })
}

fn carry_metadata(src_meta: &fs::Metadata, dst: &Path) -> bool {
    let mut preserved = true;
    if let Err(e) = fs::set_permissions(dst, src_meta.permissions()) {
        warn!(dst = %dst.display(), error = %e, "could not preserve permissions");
        preserved = false;
    }
    let mtime = FileTime::from_last_modification_time(src_meta);
    if let Err(e) = filetime::set_file_mtime(dst, mtime) {
        warn!(dst = %dst.display(), error = %e, "could not preserve modification time");
        preserved = false;
    }
    preserved
}
