use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Resampling filter used when scaling to a target width
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResampleFilter {
    /// Nearest neighbour, blocky but fast
    Nearest,

    /// Bilinear filtering
    Triangle,

    /// Cubic filtering
    CatmullRom,

    /// Gaussian filtering
    Gaussian,

    /// Lanczos with window 3, sharpest
    Lanczos3,
}

impl ResampleFilter {
    pub(crate) fn to_image_filter(self) -> image::imageops::FilterType {
        use image::imageops::FilterType;
        match self {
            Self::Nearest => FilterType::Nearest,
            Self::Triangle => FilterType::Triangle,
            Self::CatmullRom => FilterType::CatmullRom,
            Self::Gaussian => FilterType::Gaussian,
            Self::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

/// Configuration for a resizing session
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Initial state of the "allow upscaling" switch
    pub default_upscale: bool,

    /// Treat `.jpeg` files as eligible alongside `.png` and `.jpg`
    pub accept_jpeg_extension: bool,

    /// Output encoding quality (1-100)
    pub quality: u8,

    /// Filter used to scale images down (or up)
    pub filter: ResampleFilter,

    /// Write outputs to a temporary file and rename into place on success
    pub atomic_writes: bool,

    /// Maximum directory depth when expanding folders
    pub max_depth: Option<usize>,

    /// Directory for the rotating log file
    pub log_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_upscale: false,
            accept_jpeg_extension: false,
            quality: 100,
            filter: ResampleFilter::Triangle,
            atomic_writes: true,
            max_depth: None,
            log_dir: None,
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path)
            .map_err(|e| Error::Configuration(format!("Failed to open config file: {}", e)))?;

        let config: Config = serde_json::from_reader(file)
            .map_err(|e| Error::Configuration(format!("Failed to parse config file: {}", e)))?;

        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.quality == 0 || self.quality > 100 {
            return Err(Error::Configuration(
                "Quality must be between 1 and 100".to_string(),
            ));
        }

        // A depth of 0 would only ever yield the folder itself
        if self.max_depth == Some(0) {
            return Err(Error::Configuration(
                "Maximum folder depth must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}
