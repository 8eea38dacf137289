//! Neighborhood convolution with an explicit border policy.
//!
//! A [`Kernel`] is an odd-sized square weight matrix. Interior pixels get
//! the weighted sum of their neighborhood per channel, clamped to [0, 255],
//! with alpha forced opaque. Pixels within `radius` of any edge have no full
//! neighborhood and pass through from the source unchanged, alpha included.
//!
//! Rows are partitioned into bands like the per-pixel engine; every worker
//! reads a halo of `radius` rows beyond its own band from the shared
//! immutable source, which needs no synchronization because the source is
//! never written.

use rayon::prelude::*;

use crate::engine::clamp_channel;
use crate::error::Error;
use crate::grid::{pack, unpack, PixelGrid};

/// A square convolution kernel with odd size.
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel {
    size: usize,
    weights: Vec<f32>,
}

impl Kernel {
    /// Create a kernel from row-major weights.
    ///
    /// Fails with [`Error::InvalidKernel`] unless `size` is odd and
    /// non-zero and `weights.len() == size * size`.
    pub fn new(size: usize, weights: Vec<f32>) -> Result<Self, Error> {
        if size == 0 || size % 2 == 0 || weights.len() != size * size {
            return Err(Error::InvalidKernel {
                size,
                len: weights.len(),
            });
        }
        Ok(Self { size, weights })
    }

    /// Construct a kernel whose shape is known to be valid.
    pub(crate) fn from_parts(size: usize, weights: Vec<f32>) -> Self {
        debug_assert!(size % 2 == 1 && weights.len() == size * size);
        Self { size, weights }
    }

    /// Kernel side length.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of border rows/columns without a full neighborhood.
    #[inline]
    pub fn radius(&self) -> usize {
        (self.size - 1) / 2
    }

    /// Row-major weights.
    #[inline]
    pub fn weights(&self) -> &[f32] {
        &self.weights
    }
}

/// Convolve a grid with a kernel, producing a grid of identical dimensions.
///
/// Grids too small to contain any interior pixel are copied through whole.
pub fn convolve(src: &PixelGrid, kernel: &Kernel) -> PixelGrid {
    convolve_banded(src, kernel, rayon::current_num_threads())
}

pub(crate) fn convolve_banded(src: &PixelGrid, kernel: &Kernel, bands: usize) -> PixelGrid {
    let width = src.width() as usize;
    let height = src.height() as usize;
    if width == 0 || height == 0 {
        return src.clone();
    }

    let radius = kernel.radius();
    let size = kernel.size();
    let weights = kernel.weights();
    let samples = src.samples();

    let rows_per_band = height.div_ceil(bands.max(1));
    let band_len = rows_per_band * width;
    let mut out = vec![0u32; samples.len()];

    out.par_chunks_mut(band_len)
        .enumerate()
        .for_each(|(band, dst)| {
            let first_row = band * rows_per_band;
            for (i, slot) in dst.iter_mut().enumerate() {
                let y = first_row + i / width;
                let x = i % width;

                // Border policy: pass the source pixel through untouched.
                if x < radius || y < radius || x + radius >= width || y + radius >= height {
                    *slot = samples[y * width + x];
                    continue;
                }

                let mut acc_r = 0.0f32;
                let mut acc_g = 0.0f32;
                let mut acc_b = 0.0f32;
                for ky in 0..size {
                    let row = (y + ky - radius) * width;
                    for kx in 0..size {
                        let (_, r, g, b) = unpack(samples[row + (x + kx - radius)]);
                        let w = weights[ky * size + kx];
                        acc_r += r as f32 * w;
                        acc_g += g as f32 * w;
                        acc_b += b as f32 * w;
                    }
                }

                *slot = pack(
                    255,
                    clamp_channel(acc_r.round() as i32),
                    clamp_channel(acc_g.round() as i32),
                    clamp_channel(acc_b.round() as i32),
                );
            }
        });

    PixelGrid::from_vec(src.width(), src.height(), out)
}
