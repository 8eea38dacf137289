//! File decode/encode boundary.
//!
//! Maps between image files and packed-ARGB [`PixelGrid`]s via the `image`
//! crate. The supported set is keyed off the file extension: decode accepts
//! png, jpg/jpeg, bmp, gif and tiff; encode accepts the same minus gif.
//! Everything else fails with `UnsupportedFormat` before any I/O happens.

use std::path::Path;

use image::{DynamicImage, ImageFormat, RgbImage, RgbaImage};
use tracing::debug;

use crate::error::Error;
use crate::grid::{pack, unpack, PixelGrid};

fn extension(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase()
}

fn decode_format(ext: &str) -> Result<ImageFormat, Error> {
    match ext {
        "png" => Ok(ImageFormat::Png),
        "jpg" | "jpeg" => Ok(ImageFormat::Jpeg),
        "bmp" => Ok(ImageFormat::Bmp),
        "gif" => Ok(ImageFormat::Gif),
        "tiff" => Ok(ImageFormat::Tiff),
        other => Err(Error::UnsupportedFormat(other.to_string())),
    }
}

fn encode_format(ext: &str) -> Result<ImageFormat, Error> {
    match ext {
        "png" => Ok(ImageFormat::Png),
        "jpg" | "jpeg" => Ok(ImageFormat::Jpeg),
        "bmp" => Ok(ImageFormat::Bmp),
        "tiff" => Ok(ImageFormat::Tiff),
        other => Err(Error::UnsupportedFormat(other.to_string())),
    }
}

/// Decode an image file into a [`PixelGrid`].
///
/// The format comes from the file extension; the pixel data is converted
/// to 8-bit RGBA and repacked as ARGB samples.
pub fn decode(path: impl AsRef<Path>) -> Result<PixelGrid, Error> {
    let path = path.as_ref();
    let format = decode_format(&extension(path))?;

    let bytes = std::fs::read(path).map_err(|e| Error::Io(e.to_string()))?;
    let decoded = image::load_from_memory_with_format(&bytes, format)
        .map_err(|e| Error::Io(e.to_string()))?;
    let rgba = decoded.to_rgba8();
    let (width, height) = rgba.dimensions();
    debug!(path = %path.display(), width, height, "decoded image");

    let samples = rgba
        .as_raw()
        .chunks_exact(4)
        .map(|px| pack(px[3], px[0], px[1], px[2]))
        .collect();
    Ok(PixelGrid::from_vec(width, height, samples))
}

/// Encode a [`PixelGrid`] to a file, inferring the format from the
/// extension. JPEG output drops the alpha channel; every other format
/// keeps full RGBA.
pub fn encode(grid: &PixelGrid, path: impl AsRef<Path>) -> Result<(), Error> {
    let path = path.as_ref();
    let format = encode_format(&extension(path))?;
    debug!(path = %path.display(), width = grid.width(), height = grid.height(), "encoding image");

    let img = if format == ImageFormat::Jpeg {
        let mut rgb = Vec::with_capacity(grid.pixel_count() * 3);
        for &sample in grid.samples() {
            let (_, r, g, b) = unpack(sample);
            rgb.extend_from_slice(&[r, g, b]);
        }
        RgbImage::from_raw(grid.width(), grid.height(), rgb)
            .map(DynamicImage::ImageRgb8)
            .ok_or(Error::InvalidBuffer {
                width: grid.width(),
                height: grid.height(),
                actual: grid.pixel_count(),
            })?
    } else {
        let mut rgba = Vec::with_capacity(grid.pixel_count() * 4);
        for &sample in grid.samples() {
            let (a, r, g, b) = unpack(sample);
            rgba.extend_from_slice(&[r, g, b, a]);
        }
        RgbaImage::from_raw(grid.width(), grid.height(), rgba)
            .map(DynamicImage::ImageRgba8)
            .ok_or(Error::InvalidBuffer {
                width: grid.width(),
                height: grid.height(),
                actual: grid.pixel_count(),
            })?
    };

    img.save_with_format(path, format)
        .map_err(|e| Error::Io(e.to_string()))
}
