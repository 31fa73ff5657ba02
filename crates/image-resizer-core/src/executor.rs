use log::info;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::activity::ActivitySink;
use crate::file_set::FileSet;
use crate::imaging::{BackendError, Decoded, ImageBackend, OutputSettings};
use crate::logging::{log_file_error, log_fs_modification};
use crate::naming::new_file_name;
use crate::policy::{Decision, ResizePolicy};
use crate::types::{ImagePath, ResizeOutcome, RunSummary};
use crate::widths::WidthSelection;

/// Drives a resize run over a file set
pub struct ResizeExecutor<'a, B: ImageBackend> {
    backend: &'a B,
    settings: OutputSettings,
    cancel: Option<&'a AtomicBool>,
}

impl<'a, B: ImageBackend> ResizeExecutor<'a, B> {
    pub fn new(backend: &'a B, settings: OutputSettings) -> Self {
        Self {
            backend,
            settings,
            cancel: None,
        }
    }

    /// Stop between pairs once `flag` is set. Outputs already written stay.
    pub fn with_cancel_flag(mut self, flag: &'a AtomicBool) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// Resize every file to every selected width.
    ///
    /// Does nothing, not even logging, when `files` is empty. Otherwise the
    /// log always ends with `Done` (or `Cancelled`) and a blank line; single
    /// failures are logged and the run moves on.
    pub fn process(
        &self,
        files: &FileSet,
        widths: &WidthSelection,
        upscale_allowed: bool,
        log: &mut dyn ActivitySink,
    ) -> RunSummary {
        let mut summary = RunSummary::default();
        if files.is_empty() {
            return summary;
        }

        let targets = widths.effective_widths();
        let policy = ResizePolicy::new(upscale_allowed);

        log.append("Resizing images...".to_string());

        'files: for source in files.iter() {
            if targets.is_empty() {
                break;
            }
            if self.is_cancelled() {
                summary.cancelled = true;
                break;
            }

            let decoded = match self.backend.decode(source.as_path()) {
                Ok(decoded) => decoded,
                Err(e) => {
                    log_file_error(source.as_path(), "decode", &e);
                    self.report_unreadable(source, &targets, &e, &mut summary, log);
                    continue;
                }
            };

            for &width in &targets {
                if self.is_cancelled() {
                    summary.cancelled = true;
                    break 'files;
                }
                let outcome = self.resize_pair(source, &decoded, width, &policy, log);
                summary.record(outcome);
            }
        }

        if summary.cancelled {
            log.append("Cancelled".to_string());
        } else {
            log.append("Done".to_string());
        }
        log.append(String::new());

        info!(
            "Run finished: {} resized, {} already existed, {} too small, {} failed",
            summary.resized, summary.skipped_exists, summary.skipped_too_small, summary.failed
        );
        summary
    }

    fn resize_pair(
        &self,
        source: &ImagePath,
        decoded: &Decoded<B::Image>,
        width: u32,
        policy: &ResizePolicy,
        log: &mut dyn ActivitySink,
    ) -> ResizeOutcome {
        let verdict = policy.evaluate(source.as_path(), decoded.dimensions.width, width);

        if let Some(outcome) = verdict.decision.skipped_outcome() {
            if let Some(message) = verdict.decision.skip_message(source) {
                log.append(message);
            }
            return outcome;
        }

        let output = &verdict.output;
        let written = self
            .backend
            .resample_to_width(&decoded.image, width)
            .and_then(|scaled| self.backend.encode_and_write(&scaled, output, &self.settings));

        match written {
            Ok(()) => {
                log_fs_modification("create", output, Some(&format!("{} pixels wide", width)));
                log.append(format!(
                    "Resized \"{}\" to {} pixels wide",
                    output.display(),
                    width
                ));
                ResizeOutcome::Resized
            }
            Err(e) => {
                log_file_error(output, "resize", &e);
                log.append(format!("Failed to resize \"{}\": {}", output.display(), e));
                ResizeOutcome::Failed
            }
        }
    }

    /// Outputs already on disk are still reported as existing; every other
    /// width of an unreadable source counts as failed, under one log line.
    fn report_unreadable(
        &self,
        source: &ImagePath,
        targets: &[u32],
        error: &BackendError,
        summary: &mut RunSummary,
        log: &mut dyn ActivitySink,
    ) {
        let mut reported = false;
        for &width in targets {
            if new_file_name(source.as_path(), width).exists() {
                if let Some(message) = Decision::SkipExists.skip_message(source) {
                    log.append(message);
                }
                summary.record(ResizeOutcome::SkippedExists);
                continue;
            }
            if !reported {
                log.append(format!("Failed to open \"{}\": {}", source, error));
                reported = true;
            }
            summary.record(ResizeOutcome::Failed);
        }
    }

    fn is_cancelled(&self) -> bool {
        self.cancel
            .map(|flag| flag.load(Ordering::Relaxed))
            .unwrap_or(false)
    }
}
