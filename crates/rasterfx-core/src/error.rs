//! Error types shared across the engine.
//!
//! Every operation validates its preconditions synchronously and fails
//! before touching the result buffer, so a returned error never comes with
//! a partially written grid. Callers branch on the variant; nothing here is
//! fatal to the process.

use thiserror::Error;

/// Errors surfaced by grid construction, transforms, compositing, the
/// codec boundary, and the edit session.
#[derive(Debug, Error)]
pub enum Error {
    /// Sample buffer length doesn't match the declared dimensions.
    #[error("invalid pixel buffer for {width}x{height}: got {actual} samples")]
    InvalidBuffer {
        width: u32,
        height: u32,
        actual: usize,
    },

    /// Kernel size is even or zero, or the weight count doesn't match.
    #[error("invalid kernel: size {size} must be odd and non-zero and match {len} weights")]
    InvalidKernel { size: usize, len: usize },

    /// Watermark scale outside the supported (0, 1] range.
    #[error("invalid watermark scale: {0} is outside (0, 1]")]
    InvalidScale(f64),

    /// An operation was requested before any image was loaded.
    #[error("no image loaded")]
    NoImageLoaded,

    /// Watermark placement would exceed the base grid.
    #[error(
        "watermark does not fit: {mark_width}x{mark_height} plus margin {margin} \
         exceeds base {base_width}x{base_height}"
    )]
    OutOfBounds {
        base_width: u32,
        base_height: u32,
        mark_width: u32,
        mark_height: u32,
        margin: u32,
    },

    /// File extension outside the supported set for the operation.
    #[error("unsupported image format: {0}")]
    UnsupportedFormat(String),

    /// Read or write failure at the codec boundary.
    #[error("i/o failure: {0}")]
    Io(String),
}
