//! Per-pixel color filters: grayscale, negative, brightness, sepia.

use crate::engine::map_colors;
use crate::grid::PixelGrid;

/// Luma weights for the grayscale conversion.
const GRAY_R: f64 = 0.3;
const GRAY_G: f64 = 0.59;
const GRAY_B: f64 = 0.11;

/// Sepia mix matrix, one row per output channel.
const SEPIA_R: [f64; 3] = [0.393, 0.769, 0.189];
const SEPIA_G: [f64; 3] = [0.349, 0.686, 0.168];
const SEPIA_B: [f64; 3] = [0.272, 0.534, 0.131];

/// Convert to grayscale: `gray = 0.3 r + 0.59 g + 0.11 b` written to all
/// three color channels. Idempotent.
pub fn grayscale(src: &PixelGrid) -> PixelGrid {
    map_colors(src, |r, g, b| {
        let gray = (GRAY_R * r as f64 + GRAY_G * g as f64 + GRAY_B * b as f64).round() as i32;
        (gray, gray, gray)
    })
}

/// Invert every color channel: `255 - c`. An involution; alpha unchanged.
pub fn negative(src: &PixelGrid) -> PixelGrid {
    map_colors(src, |r, g, b| (255 - r, 255 - g, 255 - b))
}

/// Shift every color channel by `delta`, clamping to [0, 255] at write.
pub fn brightness(src: &PixelGrid, delta: i32) -> PixelGrid {
    map_colors(src, move |r, g, b| (r + delta, g + delta, b + delta))
}

#[inline]
fn mix(row: &[f64; 3], r: f64, g: f64, b: f64) -> f64 {
    row[0] * r + row[1] * g + row[2] * b
}

/// Blend toward the sepia tone: `c (1 - s) + (row . [r, g, b]) s` per
/// channel. `strength` is clamped to [0, 1]; strength 0 is the identity.
pub fn sepia(src: &PixelGrid, strength: f64) -> PixelGrid {
    let s = strength.clamp(0.0, 1.0);
    if s == 0.0 {
        return src.clone();
    }
    map_colors(src, move |r, g, b| {
        let (rf, gf, bf) = (r as f64, g as f64, b as f64);
        (
            (rf * (1.0 - s) + mix(&SEPIA_R, rf, gf, bf) * s).round() as i32,
            (gf * (1.0 - s) + mix(&SEPIA_G, rf, gf, bf) * s).round() as i32,
            (bf * (1.0 - s) + mix(&SEPIA_B, rf, gf, bf) * s).round() as i32,
        )
    })
}
