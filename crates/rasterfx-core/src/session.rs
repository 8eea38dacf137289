//! Edit session state.
//!
//! Holds the loaded original image and the most recent transform result,
//! and dispatches [`Operation`]s against whichever of the two is selected
//! as the working image. This is the seam the interaction layer drives;
//! it owns no UI and no dispatch tables. Watermark operations carry their
//! watermark grid explicitly, so the session never stores one.

use tracing::debug;

use crate::error::Error;
use crate::filters;
use crate::grid::PixelGrid;
use crate::watermark::{apply_watermark, WatermarkOptions};

/// One operator invocation with its slider-derived parameters.
#[derive(Debug, Clone)]
pub enum Operation {
    Grayscale,
    Negative,
    Brightness(i32),
    Sepia(f64),
    Vignette(f64),
    Sharpen(f32),
    Watermark {
        mark: PixelGrid,
        options: WatermarkOptions,
    },
}

impl Operation {
    fn name(&self) -> &'static str {
        match self {
            Operation::Grayscale => "grayscale",
            Operation::Negative => "negative",
            Operation::Brightness(_) => "brightness",
            Operation::Sepia(_) => "sepia",
            Operation::Vignette(_) => "vignette",
            Operation::Sharpen(_) => "sharpen",
            Operation::Watermark { .. } => "watermark",
        }
    }
}

/// The original/modified image pair an editing front-end works against.
#[derive(Debug)]
pub struct EditSession {
    original: Option<PixelGrid>,
    modified: Option<PixelGrid>,
    edit_original: bool,
}

impl Default for EditSession {
    fn default() -> Self {
        Self::new()
    }
}

impl EditSession {
    /// Create an empty session that edits from the original image.
    pub fn new() -> Self {
        Self {
            original: None,
            modified: None,
            edit_original: true,
        }
    }

    /// Load an image as the session original, dropping any prior result.
    pub fn load(&mut self, grid: PixelGrid) {
        debug!(width = grid.width(), height = grid.height(), "image loaded");
        self.original = Some(grid);
        self.modified = None;
    }

    /// Drop both images and reset to editing from the original.
    pub fn clear(&mut self) {
        self.original = None;
        self.modified = None;
        self.edit_original = true;
    }

    /// Choose whether operations read the original image (true) or the
    /// latest modified result (false, falling back to the original).
    pub fn set_edit_original(&mut self, edit_original: bool) {
        self.edit_original = edit_original;
    }

    /// The loaded original, if any.
    pub fn original(&self) -> Option<&PixelGrid> {
        self.original.as_ref()
    }

    /// The latest transform result, if any.
    pub fn modified(&self) -> Option<&PixelGrid> {
        self.modified.as_ref()
    }

    /// The image the next operation will read.
    ///
    /// Fails with [`Error::NoImageLoaded`] when nothing is loaded.
    pub fn current(&self) -> Result<&PixelGrid, Error> {
        let source = if self.edit_original {
            self.original.as_ref()
        } else {
            self.modified.as_ref().or(self.original.as_ref())
        };
        source.ok_or(Error::NoImageLoaded)
    }

    /// Run one operation against the current image and store the result as
    /// the modified image. Prior state is untouched when the operation
    /// fails.
    pub fn apply(&mut self, operation: &Operation) -> Result<&PixelGrid, Error> {
        let source = self.current()?;
        debug!(operation = operation.name(), "applying operation");
        let result = match operation {
            Operation::Grayscale => filters::grayscale(source),
            Operation::Negative => filters::negative(source),
            Operation::Brightness(delta) => filters::brightness(source, *delta),
            Operation::Sepia(strength) => filters::sepia(source, *strength),
            Operation::Vignette(strength) => filters::vignette(source, *strength),
            Operation::Sharpen(factor) => filters::sharpen(source, *factor),
            Operation::Watermark { mark, options } => apply_watermark(source, mark, options)?,
        };
        Ok(&*self.modified.insert(result))
    }
}
