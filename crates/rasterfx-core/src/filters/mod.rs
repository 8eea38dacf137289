//! The filter library.
//!
//! Concrete color and positional transforms built on the scanline engine,
//! plus sharpening via the convolution engine:
//! - Color: grayscale, negative, brightness, sepia
//! - Positional: vignette
//! - Neighborhood: sharpen
//!
//! Every filter consumes an immutable grid and returns a new one. Float
//! math runs in f64 and rounds at write, so e.g. grayscale is exactly
//! idempotent and sepia at strength 1 on pure red lands on (100, 89, 69).

mod color;
mod sharpen;
mod vignette;

pub use color::{brightness, grayscale, negative, sepia};
pub use sharpen::{sharpen, sharpen_kernel};
pub use vignette::vignette;
