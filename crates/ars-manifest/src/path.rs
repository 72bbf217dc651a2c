/// File name of the mapping log written at the top of every output set.
pub const MAP_FILE_NAME: &str = ".map.txt";

/// Check that a logical path stays inside its output directory.
///
/// Accepted paths are relative, forward-slash separated, and have no empty,
/// `.` or `..` segments. The top-level [`MAP_FILE_NAME`] is reserved for the
/// mapping log. Returns a short reason on rejection.
pub fn check_logical_path(path: &str) -> Result<(), &'static str> {
    if path.is_empty() {
        return Err("empty path");
    }
    if path.starts_with('/') {
        return Err("absolute path");
    }
    if path.contains('\\') {
        return Err("backslash separator");
    }
    if path.contains('\0') {
        return Err("NUL byte");
    }
    if path.as_bytes().get(1) == Some(&b':') {
        return Err("drive prefix");
    }
    for segment in path.split('/') {
        match segment {
            "" => return Err("empty segment"),
            "." | ".." => return Err("relative segment"),
            _ => {}
        }
    }
    // Case-folding filesystems map `.MAP.TXT` onto the log as well.
    if path.eq_ignore_ascii_case(MAP_FILE_NAME) {
        return Err("reserved name");
    }
    Ok(())
}
