use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// A path as the user supplied it.
///
/// Equality is exact string equality, so `a/b.png` and `a//b.png` are two
/// different entries even though they name the same file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImagePath(String);

impl ImagePath {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_path(&self) -> &Path {
        Path::new(&self.0)
    }
}

impl fmt::Display for ImagePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ImagePath {
    fn from(path: &str) -> Self {
        Self(path.to_string())
    }
}

impl From<String> for ImagePath {
    fn from(path: String) -> Self {
        Self(path)
    }
}

impl From<&Path> for ImagePath {
    fn from(path: &Path) -> Self {
        Self(path.to_string_lossy().into_owned())
    }
}

impl From<PathBuf> for ImagePath {
    fn from(path: PathBuf) -> Self {
        Self::from(path.as_path())
    }
}

impl AsRef<Path> for ImagePath {
    fn as_ref(&self) -> &Path {
        self.as_path()
    }
}

/// What happened to one (source file, target width) pair during a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResizeOutcome {
    /// The output file was already on disk
    SkippedExists,

    /// Source not wider than the target and upscaling is off
    SkippedTooSmall,

    /// A new output file was written
    Resized,

    /// Decoding, scaling or writing failed
    Failed,
}

/// Tally of outcomes for one run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub resized: usize,
    pub skipped_exists: usize,
    pub skipped_too_small: usize,
    pub failed: usize,

    /// Whether the run stopped early on request
    pub cancelled: bool,
}

impl RunSummary {
    pub fn record(&mut self, outcome: ResizeOutcome) {
        match outcome {
            ResizeOutcome::SkippedExists => self.skipped_exists += 1,
            ResizeOutcome::SkippedTooSmall => self.skipped_too_small += 1,
            ResizeOutcome::Resized => self.resized += 1,
            ResizeOutcome::Failed => self.failed += 1,
        }
    }

    /// Number of pairs that were evaluated
    pub fn total(&self) -> usize {
        self.resized + self.skipped_exists + self.skipped_too_small + self.failed
    }
}
