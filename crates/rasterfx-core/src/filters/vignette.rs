//! Vignette: a positional darkening falloff toward the corners.

use crate::engine::map_colors_positional;
use crate::grid::PixelGrid;

/// Darken pixels by their distance from the center pixel coordinate.
///
/// `factor = 1 - min(dist / max_dist, 1) * strength`, where `dist` is the
/// Euclidean distance from the pixel to the center `((w-1)/2, (h-1)/2)` and
/// `max_dist` the center-to-corner distance. `strength` is clamped to
/// [0, 1], so the factor stays within `[1 - strength, 1]` and no channel
/// clamp can trigger. The center pixel of an odd-dimensioned grid is
/// unchanged at any strength.
pub fn vignette(src: &PixelGrid, strength: f64) -> PixelGrid {
    let s = strength.clamp(0.0, 1.0);
    let center_x = src.width().saturating_sub(1) as f64 / 2.0;
    let center_y = src.height().saturating_sub(1) as f64 / 2.0;
    let max_dist = (center_x * center_x + center_y * center_y).sqrt();

    map_colors_positional(src, move |x, y, r, g, b| {
        let dx = x as f64 - center_x;
        let dy = y as f64 - center_y;
        let dist = (dx * dx + dy * dy).sqrt();
        // A 1x1 grid has no falloff at all
        let ratio = if max_dist > 0.0 {
            (dist / max_dist).min(1.0)
        } else {
            0.0
        };
        let factor = 1.0 - ratio * s;
        (
            (r as f64 * factor).round() as i32,
            (g as f64 * factor).round() as i32,
            (b as f64 * factor).round() as i32,
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{pack, unpack};

    fn uniform_grid(width: u32, height: u32, value: u8) -> PixelGrid {
        let samples = vec![pack(255, value, value, value); (width * height) as usize];
        PixelGrid::from_samples(width, height, samples).unwrap()
    }

    #[test]
    fn test_center_pixel_unchanged() {
        let grid = uniform_grid(5, 5, 180);
        for strength in [0.0, 0.3, 0.7, 1.0] {
            let result = vignette(&grid, strength);
            assert_eq!(
                unpack(result.get(2, 2)),
                (255, 180, 180, 180),
                "strength {strength}"
            );
        }
    }

    #[test]
    fn test_corner_fully_darkened_at_full_strength() {
        let grid = uniform_grid(5, 5, 200);
        let result = vignette(&grid, 1.0);
        // Corners sit at max_dist, so factor = 0
        for (x, y) in [(0, 0), (4, 0), (0, 4), (4, 4)] {
            assert_eq!(unpack(result.get(x, y)), (255, 0, 0, 0), "corner ({x}, {y})");
        }
    }

    #[test]
    fn test_zero_strength_is_identity() {
        let grid = uniform_grid(6, 4, 123);
        assert_eq!(vignette(&grid, 0.0), grid);
    }

    #[test]
    fn test_falloff_monotonic_from_center() {
        let grid = uniform_grid(9, 9, 240);
        let result = vignette(&grid, 0.8);
        let value_at = |x, y| unpack(result.get(x, y)).1;
        // Walking along the middle row away from the center only darkens
        let center = value_at(4, 4);
        assert!(value_at(5, 4) <= center);
        assert!(value_at(6, 4) <= value_at(5, 4));
        assert!(value_at(7, 4) <= value_at(6, 4));
        assert!(value_at(8, 4) <= value_at(7, 4));
    }

    #[test]
    fn test_single_pixel_grid_unchanged() {
        let grid = uniform_grid(1, 1, 99);
        assert_eq!(vignette(&grid, 1.0), grid);
    }

    #[test]
    fn test_alpha_preserved() {
        let grid =
            PixelGrid::from_samples(3, 3, vec![pack(33, 200, 200, 200); 9]).unwrap();
        let result = vignette(&grid, 1.0);
        for &s in result.samples() {
            assert_eq!(s >> 24, 33);
        }
    }

    #[test]
    fn test_strength_clamped_to_one() {
        let grid = uniform_grid(5, 5, 210);
        assert_eq!(vignette(&grid, 5.0), vignette(&grid, 1.0));
    }
}
