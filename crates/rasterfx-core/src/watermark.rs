//! Watermark compositing.
//!
//! A two-stage pipeline: downscale the watermark grid with nearest-neighbor
//! sampling, then alpha-blend it into a copy of the base grid, anchored at
//! the bottom-right corner. The watermark is always an explicit argument;
//! nothing here holds watermark state between calls.

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::grid::{pack, unpack, PixelGrid};

/// Placement and blending options for [`apply_watermark`].
///
/// Defaults match the reference behavior: scale 0.3, opacity 128 (half),
/// 10-pixel margin from the bottom-right edges.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WatermarkOptions {
    /// Downscale factor applied to the watermark, in (0, 1].
    pub scale: f64,
    /// Blend opacity, 0 (invisible) to 255 (fully opaque).
    pub opacity: u8,
    /// Distance in pixels from the right and bottom edges of the base.
    pub margin: u32,
}

impl Default for WatermarkOptions {
    fn default() -> Self {
        Self {
            scale: 0.3,
            opacity: 128,
            margin: 10,
        }
    }
}

/// Downscale a grid with nearest-neighbor sampling.
///
/// Output dimensions are `round(dim * scale)`; output pixel `(x, y)` copies
/// input pixel `(floor(x / scale), floor(y / scale))`.
pub fn scale_nearest(src: &PixelGrid, scale: f64) -> PixelGrid {
    let out_width = (src.width() as f64 * scale).round() as u32;
    let out_height = (src.height() as f64 * scale).round() as u32;
    if out_width == 0 || out_height == 0 || src.is_empty() {
        // Zero pixels either way; keep the rounded dimensions
        return PixelGrid::from_vec(out_width, out_height, Vec::new());
    }

    let mut samples = Vec::with_capacity(out_width as usize * out_height as usize);
    for y in 0..out_height {
        let src_y = ((y as f64 / scale) as u32).min(src.height() - 1);
        for x in 0..out_width {
            let src_x = ((x as f64 / scale) as u32).min(src.width() - 1);
            samples.push(src.get(src_x, src_y));
        }
    }
    PixelGrid::from_vec(out_width, out_height, samples)
}

/// Overlay a scaled, alpha-blended watermark onto the bottom-right corner
/// of `base`, returning a new grid of the base's dimensions.
///
/// Watermark pixels with alpha 0 leave the base untouched; all others blend
/// `(base * (255 - opacity) + mark * opacity) / 255` per channel with
/// integer division, and the blended pixel's alpha is forced to 255.
///
/// Fails with [`Error::InvalidScale`] when `options.scale` is outside
/// (0, 1], and with [`Error::OutOfBounds`] when the scaled watermark plus
/// margin doesn't fit inside the base.
pub fn apply_watermark(
    base: &PixelGrid,
    mark: &PixelGrid,
    options: &WatermarkOptions,
) -> Result<PixelGrid, Error> {
    if !(options.scale > 0.0 && options.scale <= 1.0) {
        return Err(Error::InvalidScale(options.scale));
    }

    let scaled = scale_nearest(mark, options.scale);
    let pos_x = base.width() as i64 - scaled.width() as i64 - options.margin as i64;
    let pos_y = base.height() as i64 - scaled.height() as i64 - options.margin as i64;
    if pos_x < 0 || pos_y < 0 {
        return Err(Error::OutOfBounds {
            base_width: base.width(),
            base_height: base.height(),
            mark_width: scaled.width(),
            mark_height: scaled.height(),
            margin: options.margin,
        });
    }

    let opacity = options.opacity as u32;
    let inverse = 255 - opacity;
    let width = base.width() as usize;
    let mut samples = base.samples().to_vec();

    for y in 0..scaled.height() {
        for x in 0..scaled.width() {
            let (mark_a, mark_r, mark_g, mark_b) = unpack(scaled.get(x, y));
            if mark_a == 0 {
                continue;
            }
            let index = (pos_y as usize + y as usize) * width + pos_x as usize + x as usize;
            let (_, base_r, base_g, base_b) = unpack(samples[index]);
            let blend = |b: u8, m: u8| ((b as u32 * inverse + m as u32 * opacity) / 255) as u8;
            samples[index] = pack(
                255,
                blend(base_r, mark_r),
                blend(base_g, mark_g),
                blend(base_b, mark_b),
            );
        }
    }

    Ok(PixelGrid::from_vec(base.width(), base.height(), samples))
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: blended channels follow the integer formula exactly.
        #[test]
        fn prop_blend_formula(
            base_c in 0u8..=255,
            mark_c in 0u8..=255,
            opacity in 0u8..=255,
        ) {
            let base = PixelGrid::from_samples(4, 4, vec![pack(255, base_c, base_c, base_c); 16]).unwrap();
            let mark = PixelGrid::from_samples(2, 2, vec![pack(255, mark_c, mark_c, mark_c); 4]).unwrap();
            let options = WatermarkOptions { scale: 1.0, opacity, margin: 0 };
            let result = apply_watermark(&base, &mark, &options).unwrap();

            let expected = ((base_c as u32 * (255 - opacity as u32)
                + mark_c as u32 * opacity as u32)
                / 255) as u8;
            let (a, r, g, b) = unpack(result.get(3, 3));
            prop_assert_eq!((a, r, g, b), (255, expected, expected, expected));
        }

        /// Property: scaled dimensions match the rounding contract.
        #[test]
        fn prop_scale_dimensions(
            width in 1u32..=64,
            height in 1u32..=64,
            scale in 0.05f64..=1.0,
        ) {
            let src = PixelGrid::from_samples(
                width,
                height,
                vec![0u32; (width * height) as usize],
            ).unwrap();
            let scaled = scale_nearest(&src, scale);
            prop_assert_eq!(scaled.width(), (width as f64 * scale).round() as u32);
            prop_assert_eq!(scaled.height(), (height as f64 * scale).round() as u32);
        }

        /// Property: every scaled pixel exists somewhere in the source.
        #[test]
        fn prop_scaled_pixels_come_from_source(
            width in 2u32..=16,
            height in 2u32..=16,
            scale in 0.2f64..=1.0,
        ) {
            let samples: Vec<u32> = (0..(width * height)).collect();
            let src = PixelGrid::from_samples(width, height, samples.clone()).unwrap();
            let scaled = scale_nearest(&src, scale);
            for &s in scaled.samples() {
                prop_assert!(samples.contains(&s));
            }
        }
    }
}
