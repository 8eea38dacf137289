//! Packed ARGB pixel grids.
//!
//! A [`PixelGrid`] is the in-memory raster every operator consumes and
//! produces: a row-major sequence of 32-bit samples, each packing four 8-bit
//! channels as `(alpha << 24) | (red << 16) | (green << 8) | blue`. Grids
//! are immutable once constructed; operators allocate a fresh grid rather
//! than mutating their input.

use crate::error::Error;

/// Pack four 8-bit channels into one ARGB sample.
#[inline]
pub fn pack(a: u8, r: u8, g: u8, b: u8) -> u32 {
    ((a as u32) << 24) | ((r as u32) << 16) | ((g as u32) << 8) | (b as u32)
}

/// Unpack an ARGB sample into `(alpha, red, green, blue)`.
#[inline]
pub fn unpack(sample: u32) -> (u8, u8, u8, u8) {
    (
        (sample >> 24) as u8,
        (sample >> 16) as u8,
        (sample >> 8) as u8,
        sample as u8,
    )
}

/// An immutable rectangular grid of packed ARGB samples.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    width: u32,
    height: u32,
    samples: Vec<u32>,
}

impl PixelGrid {
    /// Create a grid from a flat row-major sample buffer.
    ///
    /// Fails with [`Error::InvalidBuffer`] when the buffer length doesn't
    /// match `width * height`.
    pub fn from_samples(width: u32, height: u32, samples: Vec<u32>) -> Result<Self, Error> {
        let expected = width as usize * height as usize;
        if samples.len() != expected {
            return Err(Error::InvalidBuffer {
                width,
                height,
                actual: samples.len(),
            });
        }
        Ok(Self {
            width,
            height,
            samples,
        })
    }

    /// Construct from a buffer whose length is correct by construction.
    ///
    /// Used by the engines for freshly allocated result buffers.
    pub(crate) fn from_vec(width: u32, height: u32, samples: Vec<u32>) -> Self {
        debug_assert_eq!(
            samples.len(),
            width as usize * height as usize,
            "sample buffer size mismatch"
        );
        Self {
            width,
            height,
            samples,
        }
    }

    /// Grid width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Grid height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The flat row-major sample buffer.
    #[inline]
    pub fn samples(&self) -> &[u32] {
        &self.samples
    }

    /// The sample at `(x, y)`. Panics when the coordinate is out of range,
    /// like slice indexing.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> u32 {
        assert!(x < self.width && y < self.height, "pixel out of range");
        self.samples[y as usize * self.width as usize + x as usize]
    }

    /// Total number of pixels.
    pub fn pixel_count(&self) -> usize {
        self.samples.len()
    }

    /// True when the grid holds no pixels.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}
