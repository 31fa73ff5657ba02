//! Image decode, resample and encode behind a narrow trait.
//!
//! - **Backend**: [`ImageBackend`] trait, shared types, and a recording mock for tests
//! - **Raster**: [`RasterBackend`], the `image`-crate implementation

pub mod backend;
pub mod raster;

pub use backend::{
    scaled_height, BackendError, Decoded, Dimensions, ImageBackend, OutputSettings,
};
pub use raster::RasterBackend;
