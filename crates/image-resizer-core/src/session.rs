//! The resizing session: everything a host shell holds between clicks.
//!
//! A [`Session`] owns the file list, the activity log, the width selection and
//! the upscale switch. Hosts call it for every user action and read the log
//! back for display. Runs can be synchronous ([`Session::process`]) or happen
//! on a worker thread ([`Session::spawn_process`]) while the host keeps
//! draining log lines.

use crossbeam::channel::{unbounded, Receiver};
use log::info;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;

use crate::activity::{ActivityLog, ActivitySink, ChannelSink};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::executor::ResizeExecutor;
use crate::file_set::FileSet;
use crate::filter::PathFilter;
use crate::imaging::{ImageBackend, OutputSettings};
use crate::types::{ImagePath, RunSummary};
use crate::widths::WidthSelection;

/// A resize run executing on a worker thread
pub struct BackgroundRun {
    handle: JoinHandle<RunSummary>,
    events: Receiver<String>,
    cancel: Arc<AtomicBool>,
}

impl BackgroundRun {
    /// Ask the worker to stop before its next (file, width) pair
    pub fn cancel(&self) {
        self.cancel.store(true, Ordering::Relaxed);
    }

    /// Shared cancel flag, e.g. for a Ctrl-C handler
    pub fn cancel_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancel)
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

/// State of one interactive resizing session
#[derive(Debug, Clone, Default)]
pub struct Session {
    config: Config,
    filter: PathFilter,
    files: FileSet,
    log: ActivityLog,
    widths: WidthSelection,
    upscale: bool,
}

impl Session {
    pub fn new(config: Config) -> Self {
        Self {
            filter: PathFilter::from_config(&config),
            upscale: config.default_upscale,
            config,
            files: FileSet::new(),
            log: ActivityLog::new(),
            widths: WidthSelection::new(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn files(&self) -> &FileSet {
        &self.files
    }

    pub fn log(&self) -> &ActivityLog {
        &self.log
    }

    pub fn widths(&self) -> &WidthSelection {
        &self.widths
    }

    pub fn widths_mut(&mut self) -> &mut WidthSelection {
        &mut self.widths
    }

    pub fn upscale(&self) -> bool {
        self.upscale
    }

    pub fn set_upscale(&mut self, allowed: bool) {
        self.upscale = allowed;
    }

    /// Add one picked file
    pub fn add_file(&mut self, path: impl Into<ImagePath>) -> bool {
        self.files.add(path, &mut self.log)
    }

    /// Add picked files in order; returns how many were new
    pub fn add_files<I, P>(&mut self, paths: I) -> usize
    where
        I: IntoIterator<Item = P>,
        P: Into<ImagePath>,
    {
        paths
            .into_iter()
            .map(|path| self.add_file(path))
            .filter(|added| *added)
            .count()
    }

    /// Add every eligible image below `dir`
    pub fn add_folder(&mut self, dir: &Path) -> usize {
        self.files
            .add_folder(dir, &self.filter, self.config.max_depth, &mut self.log)
    }

    /// Whether a drag carrying `paths` should be accepted: every path must be
    /// a folder or an eligible image
    pub fn accepts_drop<P: AsRef<Path>>(&self, paths: &[P]) -> bool {
        !paths.is_empty()
            && paths.iter().all(|path| {
                let path = path.as_ref();
                PathFilter::is_directory(path) || self.filter.is_eligible_file(path)
            })
    }

    /// Handle dropped paths: folders are expanded, anything else is added as is
    pub fn drop_paths<P: AsRef<Path>>(&mut self, paths: &[P]) -> usize {
        let mut added = 0;
        for path in paths {
            let path = path.as_ref();
            if PathFilter::is_directory(path) {
                added += self.add_folder(path);
            } else if self.add_file(path) {
                added += 1;
            }
        }
        added
    }

    pub fn remove_selected(&mut self, indices: &[usize]) {
        self.files.remove_selected(indices);
    }

    pub fn clear_files(&mut self) {
        self.files.clear();
    }

    pub fn clear_log(&mut self) {
        self.log.clear();
    }

    pub fn output_settings(&self) -> OutputSettings {
        OutputSettings {
            quality: self.config.quality,
            atomic_writes: self.config.atomic_writes,
        }
    }

    /// Run the resize pipeline on the calling thread
    pub fn process<B: ImageBackend>(&mut self, backend: &B) -> RunSummary {
        ResizeExecutor::new(backend, self.output_settings()).process(
            &self.files,
            &self.widths,
            self.upscale,
            &mut self.log,
        )
    }

    /// Run the resize pipeline on a worker thread.
    ///
    /// The worker gets a snapshot of the file list and width selection, so the
    /// session stays free to use. Log lines come back through [`Session::drain`]
    /// and [`Session::finish`] in the order the worker produced them.
    pub fn spawn_process<B>(&self, backend: Arc<B>) -> Result<BackgroundRun>
    where
        B: ImageBackend + Send + Sync + 'static,
    {
        let files = self.files.clone();
        let widths = self.widths.clone();
        let upscale = self.upscale;
        let settings = self.output_settings();

        let (tx, events) = unbounded();
        let cancel = Arc::new(AtomicBool::new(false));
        let worker_cancel = Arc::clone(&cancel);

        info!("Starting background resize of {} files", files.len());
        let handle = std::thread::Builder::new()
            .name("resize-worker".to_string())
            .spawn(move || {
                let mut sink = ChannelSink::new(tx);
                ResizeExecutor::new(backend.as_ref(), settings)
                    .with_cancel_flag(&worker_cancel)
                    .process(&files, &widths, upscale, &mut sink)
            })?;

        Ok(BackgroundRun {
            handle,
            events,
            cancel,
        })
    }

    /// Move lines the worker has produced so far into the log.
    ///
    /// Returns the newly appended lines.
    pub fn drain(&mut self, run: &BackgroundRun) -> &[String] {
        let before = self.log.len();
        for line in run.events.try_iter() {
            self.log.append(line);
        }
        &self.log.entries()[before..]
    }

    /// Wait for the worker, collect its remaining lines and return its summary
    pub fn finish(&mut self, run: BackgroundRun) -> Result<RunSummary> {
        let BackgroundRun { handle, events, .. } = run;
        let summary = handle
            .join()
            .map_err(|_| Error::Worker("resize worker panicked".to_string()))?;

        // The worker's sender is gone now, so this sees every remaining line
        for line in events.try_iter() {
            self.log.append(line);
        }
        Ok(summary)
    }
}
