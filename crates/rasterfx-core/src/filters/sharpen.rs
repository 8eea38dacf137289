//! Sharpening via a 3x3 convolution kernel.

use crate::convolve::{convolve, Kernel};
use crate::grid::PixelGrid;

/// Build the 3x3 sharpening kernel for `factor`: center weight `5 * factor`,
/// four edge neighbors `-factor`, corners zero. At factor 1 the weights sum
/// to 1, so flat regions are unchanged while edges get amplified.
pub fn sharpen_kernel(factor: f32) -> Kernel {
    let k = factor;
    Kernel::from_parts(
        3,
        vec![0.0, -k, 0.0, -k, 5.0 * k, -k, 0.0, -k, 0.0],
    )
}

/// Sharpen a grid by convolving with [`sharpen_kernel`].
///
/// Border pixels follow the convolution engine's pass-through policy.
pub fn sharpen(src: &PixelGrid, factor: f32) -> PixelGrid {
    convolve(src, &sharpen_kernel(factor))
}
