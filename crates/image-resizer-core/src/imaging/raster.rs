//! [`ImageBackend`] built on the `image` crate.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (PNG, JPEG) | `image::io::Reader` with format sniffing |
//! | Resample | `DynamicImage::resize_exact` with the configured filter |
//! | Encode | `image::codecs::png::PngEncoder` |
//! | Atomic write | `tempfile::NamedTempFile::persist` |

use image::codecs::png::{CompressionType, FilterType as PngFilter, PngEncoder};
use image::{DynamicImage, GenericImageView, ImageEncoder};
use std::borrow::Cow;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use super::backend::{
    scaled_height, BackendError, Decoded, Dimensions, ImageBackend, OutputSettings,
};
use crate::config::{Config, ResampleFilter};

/// Production backend using the `image` crate
#[derive(Debug, Clone, Copy)]
pub struct RasterBackend {
    filter: ResampleFilter,
}

impl RasterBackend {
    pub fn new(filter: ResampleFilter) -> Self {
        Self { filter }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.filter)
    }
}

impl Default for RasterBackend {
    fn default() -> Self {
        Self::new(ResampleFilter::Triangle)
    }
}

impl ImageBackend for RasterBackend {
    type Image = DynamicImage;

    fn decode(&self, path: &Path) -> Result<Decoded<DynamicImage>, BackendError> {
        let image = image::io::Reader::open(path)?
            .with_guessed_format()?
            .decode()?;
        let (width, height) = image.dimensions();

        Ok(Decoded {
            dimensions: Dimensions { width, height },
            image,
        })
    }

    fn resample_to_width(
        &self,
        image: &DynamicImage,
        width: u32,
    ) -> Result<DynamicImage, BackendError> {
        if width == 0 {
            return Err(BackendError::ProcessingFailed(
                "target width must be positive".to_string(),
            ));
        }

        let (src_width, src_height) = image.dimensions();
        let height = scaled_height(
            Dimensions {
                width: src_width,
                height: src_height,
            },
            width,
        );

        let needed = resample_allocation(src_width, width, height);
        let budget = image::io::Limits::default().max_alloc.unwrap_or(u64::MAX);
        match needed {
            Some(bytes) if bytes <= budget => {}
            _ => {
                return Err(BackendError::ProcessingFailed(format!(
                    "{}x{} output exceeds the {} byte memory limit",
                    width, height, budget
                )))
            }
        }

        Ok(image.resize_exact(width, height, self.filter.to_image_filter()))
    }

    fn encode_and_write(
        &self,
        image: &DynamicImage,
        output: &Path,
        settings: &OutputSettings,
    ) -> Result<(), BackendError> {
        let bytes = encode_png(image, settings.quality)?;

        if !settings.atomic_writes {
            let mut file = File::create(output)?;
            file.write_all(&bytes)?;
            return Ok(());
        }

        // Stage next to the target so the final rename stays on one filesystem
        let dir = match output.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut staged = tempfile::Builder::new()
            .prefix(".resizing-")
            .suffix(".part")
            .tempfile_in(dir)?;
        staged.write_all(&bytes)?;
        staged.as_file().sync_all()?;
        staged.persist(output).map_err(|e| BackendError::Io(e.error))?;

        Ok(())
    }
}

/// Bytes the resampler holds at its peak. Both passes work on `f32` RGBA
/// pixels, the first one still at the source width.
fn resample_allocation(src_width: u32, width: u32, height: u32) -> Option<u64> {
    const F32_RGBA_BYTES: u64 = 16;
    u64::from(src_width.max(width))
        .checked_mul(u64::from(height))?
        .checked_mul(F32_RGBA_BYTES)
}

/// PNG compression for a 1-100 quality value. Higher quality spends less
/// effort compressing; PNG is lossless either way.
fn png_compression(quality: u8) -> CompressionType {
    match quality {
        67..=u8::MAX => CompressionType::Fast,
        34..=66 => CompressionType::Default,
        _ => CompressionType::Best,
    }
}

fn encode_png(image: &DynamicImage, quality: u8) -> Result<Vec<u8>, BackendError> {
    // PNG has no float samples
    let image: Cow<'_, DynamicImage> = match image {
        DynamicImage::ImageRgb32F(_) | DynamicImage::ImageRgba32F(_) => {
            Cow::Owned(DynamicImage::ImageRgba16(image.to_rgba16()))
        }
        other => Cow::Borrowed(other),
    };

    let mut bytes = Vec::new();
    let (width, height) = image.dimensions();
    PngEncoder::new_with_quality(&mut bytes, png_compression(quality), PngFilter::Adaptive)
        .write_image(image.as_bytes(), width, height, image.color())?;

    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};
    use tempfile::tempdir;

    fn write_source(dir: &Path, name: &str, width: u32, height: u32) -> std::path::PathBuf {
        let path = dir.join(name);
        RgbImage::from_pixel(width, height, Rgb([200, 40, 90]))
            .save(&path)
            .unwrap();
        path
    }

    #[test]
    fn test_decode_reports_dimensions() {
        let dir = tempdir().unwrap();
        let source = write_source(dir.path(), "a.png", 80, 60);

        let decoded = RasterBackend::default().decode(&source).unwrap();
        assert_eq!(
            decoded.dimensions,
            Dimensions {
                width: 80,
                height: 60
            }
        );
    }

    #[test]
    fn test_decode_rejects_garbage() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.png");
        std::fs::write(&path, b"DUMMY IMAGE DATA").unwrap();

        assert!(RasterBackend::default().decode(&path).is_err());
    }

    #[test]
    fn test_decode_missing_file_is_io_error() {
        let result = RasterBackend::default().decode(Path::new("/nonexistent/a.png"));
        assert!(matches!(result, Err(BackendError::Io(_))));
    }

    #[test]
    fn test_resample_keeps_aspect_ratio() {
        let backend = RasterBackend::new(ResampleFilter::Lanczos3);
        let image = DynamicImage::ImageRgb8(RgbImage::new(80, 60));

        let scaled = backend.resample_to_width(&image, 40).unwrap();
        assert_eq!(scaled.dimensions(), (40, 30));

        let upscaled = backend.resample_to_width(&image, 160).unwrap();
        assert_eq!(upscaled.dimensions(), (160, 120));

        assert!(backend.resample_to_width(&image, 0).is_err());
    }

    #[test]
    fn test_resample_refuses_oversized_output() {
        let backend = RasterBackend::default();
        let image = DynamicImage::ImageRgb8(RgbImage::new(800, 600));

        let result = backend.resample_to_width(&image, 4_000_000_000);
        assert!(matches!(result, Err(BackendError::ProcessingFailed(_))));

        let result = backend.resample_to_width(&image, 100_000);
        assert!(matches!(result, Err(BackendError::ProcessingFailed(_))));
    }

    #[test]
    fn test_resample_allocation() {
        assert_eq!(resample_allocation(800, 64, 48), Some(800 * 48 * 16));
        assert_eq!(resample_allocation(50, 100, 50), Some(100 * 50 * 16));
        assert_eq!(resample_allocation(u32::MAX, u32::MAX, u32::MAX), None);
    }

    #[test]
    fn test_write_produces_png_and_no_leftovers() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("64_a.jpg");
        let image = DynamicImage::ImageRgb8(RgbImage::new(64, 48));

        RasterBackend::default()
            .encode_and_write(&image, &output, &OutputSettings::default())
            .unwrap();

        // Always PNG, whatever the name says
        let bytes = std::fs::read(&output).unwrap();
        assert_eq!(
            image::guess_format(&bytes).unwrap(),
            image::ImageFormat::Png
        );
        assert_eq!(image::load_from_memory(&bytes).unwrap().dimensions(), (64, 48));

        let leftovers: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".part"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn test_non_atomic_write() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("out.png");
        let image = DynamicImage::ImageRgb8(RgbImage::new(4, 4));
        let settings = OutputSettings {
            quality: 10,
            atomic_writes: false,
        };

        RasterBackend::default()
            .encode_and_write(&image, &output, &settings)
            .unwrap();
        assert!(output.exists());
    }

    #[test]
    fn test_write_into_missing_directory_fails() {
        let image = DynamicImage::ImageRgb8(RgbImage::new(4, 4));
        let result = RasterBackend::default().encode_and_write(
            &image,
            Path::new("/nonexistent/dir/out.png"),
            &OutputSettings::default(),
        );
        assert!(matches!(result, Err(BackendError::Io(_))));
    }

    #[test]
    fn test_png_compression_mapping() {
        assert!(matches!(png_compression(100), CompressionType::Fast));
        assert!(matches!(png_compression(50), CompressionType::Default));
        assert!(matches!(png_compression(1), CompressionType::Best));
    }
}
