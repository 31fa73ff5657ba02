//! Image service trait and shared types.
//!
//! The resizer only ever needs three things from an image library: decode a
//! file (and learn its size), scale it to a width, and write it back out. The
//! [`ImageBackend`] trait is that boundary; the production implementation is
//! [`RasterBackend`](super::raster::RasterBackend).

use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("Processing failed: {0}")]
    ProcessingFailed(String),
}

/// Pixel size of an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// A decoded image together with its intrinsic size.
#[derive(Debug, Clone)]
pub struct Decoded<I> {
    pub dimensions: Dimensions,
    pub image: I,
}

/// How outputs are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputSettings {
    /// Encoding quality, 1-100. For PNG this trades file size for encode speed.
    pub quality: u8,
    /// Encode to a temporary file and rename into place on success.
    pub atomic_writes: bool,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            quality: 100,
            atomic_writes: true,
        }
    }
}

/// Height that keeps the aspect ratio when scaling `source` to `width`.
pub fn scaled_height(source: Dimensions, width: u32) -> u32 {
    if source.width == 0 {
        return 1;
    }
    let height = (source.height as f64 * width as f64 / source.width as f64).round();
    (height as u32).max(1)
}

/// Decode, scale and encode primitives the resizer drives.
pub trait ImageBackend {
    /// Decoded image handle.
    type Image;

    /// Read and decode an image file.
    fn decode(&self, path: &Path) -> Result<Decoded<Self::Image>, BackendError>;

    /// Scale to `width`, keeping the aspect ratio.
    fn resample_to_width(&self, image: &Self::Image, width: u32)
        -> Result<Self::Image, BackendError>;

    /// Encode as PNG and write to `output`.
    fn encode_and_write(
        &self,
        image: &Self::Image,
        output: &Path,
        settings: &OutputSettings,
    ) -> Result<(), BackendError>;
}
