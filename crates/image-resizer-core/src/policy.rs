use log::debug;
use std::path::{Path, PathBuf};

use crate::naming::new_file_name;
use crate::types::{ImagePath, ResizeOutcome};

/// Verdict for one (source, width) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Output already on disk
    SkipExists,

    /// Source is not wider than the target and upscaling is off
    SkipTooSmall,

    /// Go ahead and resize
    Proceed,
}

impl Decision {
    /// Outcome recorded for a skip, `None` when the pair goes ahead
    pub fn skipped_outcome(self) -> Option<ResizeOutcome> {
        match self {
            Self::SkipExists => Some(ResizeOutcome::SkippedExists),
            Self::SkipTooSmall => Some(ResizeOutcome::SkippedTooSmall),
            Self::Proceed => None,
        }
    }

    /// Activity line explaining a skip
    pub fn skip_message(self, source: &ImagePath) -> Option<String> {
        match self {
            Self::SkipExists => Some(format!("File Already Exists: \"{}\"", source)),
            Self::SkipTooSmall => Some(format!(
                "File Too Small: \"{}\". Upscaling is turned off",
                source
            )),
            Self::Proceed => None,
        }
    }
}

/// Decision plus the output path it was based on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub output: PathBuf,
    pub decision: Decision,
}

/// Decides whether a (source, width) pair needs work.
///
/// Each pair is judged on its own; nothing carries over between pairs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResizePolicy {
    upscale_allowed: bool,
}

impl ResizePolicy {
    pub fn new(upscale_allowed: bool) -> Self {
        Self { upscale_allowed }
    }

    /// Judge `source` (intrinsically `source_width` pixels wide) at `target_width`
    pub fn evaluate(&self, source: &Path, source_width: u32, target_width: u32) -> Verdict {
        let output = new_file_name(source, target_width);
        let decision = self.decide(&output, source_width, target_width);
        debug!(
            "{} at {}px -> {:?} ({})",
            source.display(),
            target_width,
            decision,
            output.display()
        );
        Verdict { output, decision }
    }

    /// The existence check wins over the width check
    pub fn decide(&self, output: &Path, source_width: u32, target_width: u32) -> Decision {
        if output.exists() {
            Decision::SkipExists
        } else if source_width <= target_width && !self.upscale_allowed {
            Decision::SkipTooSmall
        } else {
            Decision::Proceed
        }
    }
}
