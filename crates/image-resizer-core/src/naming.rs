use std::path::{Path, PathBuf};

/// Output path for `source` scaled to `width`: `<dir>/<width>_<file name>`.
///
/// The same name doubles as the "already resized" marker, so a second run
/// over the same files finds and skips its earlier outputs.
pub fn new_file_name(source: &Path, width: u32) -> PathBuf {
    let file_name = source
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let new_name = format!("{}_{}", width, file_name);

    match source.parent() {
        Some(dir) => dir.join(new_name),
        None => PathBuf::from(new_name),
    }
}
