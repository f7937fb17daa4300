use tracing::debug;

use crate::capture_pipeline::common::error::Result;
use crate::capture_pipeline::common::Matrix;
use crate::capture_pipeline::magnifier::geometry::{compute_source_rect, image_region, place_anchor, SourceRect};
use crate::capture_pipeline::magnifier::stats::MagnifierStats;
use crate::capture_pipeline::pixmap::Pixmap;
use crate::capture_pipeline::view_model::{ConversionFn, ViewerConfig};

pub const LABEL_WIDTH: usize = 120;
pub const LABEL_HEIGHT: usize = 60;
pub const LABEL_PADDING: usize = 10;

/// What the magnifier looks at: the rendered image and the raw matrix behind it.
#[derive(Clone)]
pub struct MagnifierSource {
    pub image: Pixmap,
    pub matrix: Matrix,
    pub conversion: Option<ConversionFn>,
}

/// Magnified view of the neighbourhood of one pixel.
pub struct MagnifierOverlay {
    source: Option<MagnifierSource>,
    pixel_pos: Option<(usize, usize)>,
    factor: f64,
    display_size: usize,
    min_effective_side: usize,
    min_factor: f64,
    max_factor: f64,
    step: f64,
}

impl MagnifierOverlay {
    pub fn new(config: &ViewerConfig) -> Self {
        let mut overlay = Self {
            source: None,
            pixel_pos: None,
            factor: config.initial_magnification,
            display_size: config.magnifier_display_size,
            min_effective_side: config.min_effective_side,
            min_factor: config.min_magnification,
            max_factor: config.max_magnification,
            step: config.magnification_step,
        };
        overlay.set_magnification_factor(config.initial_magnification);
        overlay
    }

    pub fn set_source_data(&mut self, source: MagnifierSource) {
        // Keep the cursor inside the new matrix.
        let pos = self.pixel_pos;
        self.source = Some(source);
        if let Some((row, col)) = pos {
            self.set_pixel_pos(row, col);
        }
    }

    pub fn source(&self) -> Option<&MagnifierSource> {
        self.source.as_ref()
    }

    /// Moves the magnifier to `(row, col)`, clamped into the matrix. Ignored until
    /// source data is set.
    pub fn set_pixel_pos(&mut self, row: usize, col: usize) {
        let Some(source) = &self.source else {
            return;
        };
        let (rows, cols) = source.matrix.dim();
        if rows == 0 || cols == 0 {
            self.pixel_pos = None;
            return;
        }
        self.pixel_pos = Some((row.min(rows - 1), col.min(cols - 1)));
    }

    pub fn pixel_pos(&self) -> Option<(usize, usize)> {
        self.pixel_pos
    }

    pub fn magnification_factor(&self) -> f64 {
        self.factor
    }

    /// Sets the factor, clamped to the configured bounds.
    pub fn set_magnification_factor(&mut self, factor: f64) {
        self.factor = factor.max(self.min_factor).min(self.max_factor);
        debug!(factor = self.factor, "Magnification changed");
    }

    pub fn zoom_in(&mut self) {
        self.set_magnification_factor(self.factor + self.step);
    }

    pub fn zoom_out(&mut self) {
        self.set_magnification_factor(self.factor - self.step);
    }

    /// Wheel input in whole notches; positive zooms in.
    pub fn wheel(&mut self, notches: i32) {
        self.set_magnification_factor(self.factor + notches as f64 * self.step);
    }

    pub fn display_size(&self) -> usize {
        self.display_size
    }

    /// Matrix cells currently magnified (`x` = column, `y` = row).
    pub fn source_rect(&self) -> Option<SourceRect> {
        let source = self.source.as_ref()?;
        let (row, col) = self.pixel_pos?;
        let (rows, cols) = source.matrix.dim();
        Some(compute_source_rect(
            cols,
            rows,
            row,
            col,
            self.factor,
            self.display_size,
            self.min_effective_side,
        ))
    }

    /// NaN statistics while there is nothing to look at.
    pub fn stats(&self) -> MagnifierStats {
        match (&self.source, self.pixel_pos, self.source_rect()) {
            (Some(source), Some(pos), Some(rect)) => {
                MagnifierStats::compute(&source.matrix, rect, pos, source.conversion.as_ref())
            }
            _ => MagnifierStats::default(),
        }
    }

    /// Magnified image scaled to the display size, if there is a cursor position.
    pub fn magnified_image(&self) -> Result<Option<Pixmap>> {
        let (Some(source), Some(rect)) = (&self.source, self.source_rect()) else {
            return Ok(None);
        };
        let region = image_region(rect, source.matrix.dim(), (source.image.width, source.image.height));
        let image = source.image.resample_region(
            region.x,
            region.y,
            region.width,
            region.height,
            self.display_size,
            self.display_size,
        )?;
        Ok(Some(image))
    }

    /// Width and height of the magnifier including its labels. Zero without source data.
    pub fn bounding_size(&self) -> (usize, usize) {
        if self.source.is_none() {
            return (0, 0);
        }
        (
            self.display_size + LABEL_PADDING + LABEL_WIDTH,
            self.display_size.max(LABEL_HEIGHT),
        )
    }

    /// Where to draw the magnifier for a cursor at `cursor` (x, y) on a `view` sized image.
    pub fn anchor(&self, cursor: (usize, usize), view: (usize, usize)) -> (usize, usize) {
        place_anchor(cursor, self.bounding_size(), view)
    }
}
