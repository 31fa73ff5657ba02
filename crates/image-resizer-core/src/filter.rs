use std::path::Path;

use crate::config::Config;

/// Name patterns a folder scan starts from. The last one is a literal file
/// name, not a wildcard, so plain `*.jpeg` files never match it.
const SCAN_PATTERNS: &[&str] = &["*.png", "*.jpg", ".jpeg"];

/// Decides which paths are images to resize and which are folders to expand
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PathFilter {
    accept_jpeg: bool,
}

impl PathFilter {
    /// Filter accepting only `png` and `jpg` suffixes
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter that also accepts the `jpeg` suffix in both checks
    pub fn with_jpeg() -> Self {
        Self { accept_jpeg: true }
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            accept_jpeg: config.accept_jpeg_extension,
        }
    }

    /// True if the path currently resolves to a directory
    pub fn is_directory(path: &Path) -> bool {
        path.is_dir()
    }

    /// True if the path's suffix is exactly `png` or `jpg` (case-sensitive)
    pub fn is_eligible_file(&self, path: &Path) -> bool {
        match suffix(path) {
            Some("png") | Some("jpg") => true,
            Some("jpeg") => self.accept_jpeg,
            _ => false,
        }
    }

    /// True if a folder scan picks the file up before the eligibility check
    pub fn matches_scan_pattern(&self, path: &Path) -> bool {
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            return false;
        };
        let name = name.to_lowercase();

        if self.accept_jpeg && name.ends_with(".jpeg") {
            return true;
        }

        SCAN_PATTERNS.iter().any(|pattern| match pattern.strip_prefix('*') {
            Some(tail) => name.ends_with(tail),
            None => name == *pattern,
        })
    }

    /// Whether a file found inside a scanned folder goes into the file set
    pub fn accepts_scanned(&self, path: &Path) -> bool {
        self.matches_scan_pattern(path) && self.is_eligible_file(path)
    }
}

/// Everything after the last `.` of the file name
fn suffix(path: &Path) -> Option<&str> {
    let name = path.file_name()?.to_str()?;
    name.rfind('.').map(|idx| &name[idx + 1..])
}
