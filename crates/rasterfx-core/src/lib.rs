//! Rasterfx Core - Parallel raster pixel-transformation engine
//!
//! This crate provides the core image processing functionality for
//! Rasterfx: an immutable packed-ARGB pixel grid, a scanline-parallel
//! transform engine, neighborhood convolution with an explicit border
//! policy, the filter library (grayscale, negative, brightness, sepia,
//! vignette, sharpen), watermark compositing, and the file codec boundary.
//!
//! Every operator reads an immutable [`PixelGrid`] and returns a freshly
//! allocated one; results are bit-identical regardless of how many worker
//! bands the engine uses.

pub mod codec;
pub mod convolve;
pub mod engine;
pub mod error;
pub mod filters;
pub mod grid;
pub mod session;
pub mod watermark;

pub use convolve::{convolve, Kernel};
pub use engine::{map_colors, map_colors_positional};
pub use error::Error;
pub use filters::{brightness, grayscale, negative, sepia, sharpen, sharpen_kernel, vignette};
pub use grid::{pack, unpack, PixelGrid};
pub use session::{EditSession, Operation};
pub use watermark::{apply_watermark, scale_nearest, WatermarkOptions};
