use log::{debug, warn};
use std::path::Path;
use walkdir::WalkDir;

use crate::activity::ActivitySink;
use crate::filter::PathFilter;
use crate::types::ImagePath;

/// Ordered collection of files queued for resizing, without duplicates
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileSet {
    entries: Vec<ImagePath>,
}

impl FileSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a path unless it is already present.
    ///
    /// Returns whether the path was inserted.
    pub fn add(&mut self, path: impl Into<ImagePath>, log: &mut dyn ActivitySink) -> bool {
        let path = path.into();

        if self.contains(&path) {
            log.append(format!("\"{}\"already in the list", path));
            return false;
        }

        log.append(format!("Adding \"{}\"", path));
        self.entries.push(path);
        true
    }

    /// Recursively add every eligible image below `dir`, in walk order.
    ///
    /// A directory that doesn't exist simply contributes nothing.
    /// Returns the number of newly inserted paths.
    pub fn add_folder(
        &mut self,
        dir: &Path,
        filter: &PathFilter,
        max_depth: Option<usize>,
        log: &mut dyn ActivitySink,
    ) -> usize {
        let max_depth = max_depth.unwrap_or(usize::MAX);
        let mut added = 0;

        for entry in WalkDir::new(dir).max_depth(max_depth) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable entry under {}: {}", dir.display(), e);
                    continue;
                }
            };

            // Links aren't followed, but a link to a file still counts as one
            let is_file = entry.file_type().is_file()
                || (entry.path_is_symlink() && entry.path().is_file());
            if !is_file {
                continue;
            }

            let path = entry.path();
            if filter.accepts_scanned(path) {
                if self.add(path, log) {
                    added += 1;
                }
            } else {
                debug!("Ignoring {}", path.display());
            }
        }

        added
    }

    /// Remove the entries at the given positions.
    ///
    /// Indices refer to positions before removal; unknown indices are ignored.
    pub fn remove_selected(&mut self, indices: &[usize]) {
        if indices.is_empty() {
            return;
        }

        let mut position = 0;
        self.entries.retain(|_| {
            let keep = !indices.contains(&position);
            position += 1;
            keep
        });
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ImagePath> {
        self.entries.get(index)
    }

    pub fn contains(&self, path: &ImagePath) -> bool {
        self.entries.iter().any(|entry| entry == path)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ImagePath> {
        self.entries.iter()
    }
}
