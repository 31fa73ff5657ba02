//! Core functionality for batch-resizing images to fixed target widths.
//!
//! This library provides the building blocks behind the resizer:
//! - File list management with recursive folder expansion
//! - Output naming and the skip/resize policy
//! - The resize run itself, reporting through an append-only activity log
//! - A session controller that a host shell drives

// -- Internal Modules --
mod error;

// -- Public Re-exports --
pub use activity::{ActivityLog, ActivitySink, ChannelSink};
pub use config::{Config, ResampleFilter};
pub use error::{Error, Result};
pub use executor::ResizeExecutor;
pub use file_set::FileSet;
pub use filter::PathFilter;
pub use imaging::{BackendError, ImageBackend, OutputSettings, RasterBackend};
pub use naming::new_file_name;
pub use policy::{Decision, ResizePolicy};
pub use session::{BackgroundRun, Session};
pub use types::*;
pub use widths::{Preset, WidthSelection};

// -- Public Modules --
pub mod activity;
pub mod config;
pub mod executor;
pub mod file_set;
pub mod filter;
pub mod imaging;
pub mod logging;
pub mod naming;
pub mod policy;
pub mod session;
pub mod types;
pub mod widths;
