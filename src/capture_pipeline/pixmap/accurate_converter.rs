//! Colormap-accurate converter.
//!
//! Values are normalized with the matrix' own minimum and maximum, pushed through the
//! selected [`Colormap`] and rendered as RGB at `dpi / 100` scale.

use tracing::{debug, instrument};

use crate::capture_pipeline::common::error::{PipelineError, Result};
use crate::capture_pipeline::common::{min_max, Matrix};
use crate::capture_pipeline::pixmap::colormap::Colormap;
use crate::capture_pipeline::pixmap::converter::PixmapConverter;
use crate::capture_pipeline::pixmap::types::{Pixmap, PixmapData};

/// Renders one output pixel per matrix cell at this DPI.
pub const BASE_DPI: u32 = 100;

#[derive(Debug, Clone)]
pub struct AccurateConverter {
    colormap: String,
    dpi: u32,
}

impl Default for AccurateConverter {
    fn default() -> Self {
        Self::new("Greys_r", BASE_DPI)
    }
}

impl AccurateConverter {
    /// The colormap name is resolved at conversion time, so an unknown name is only
    /// reported by [`PixmapConverter::convert`].
    pub fn new(colormap: impl Into<String>, dpi: u32) -> Self {
        Self {
            colormap: colormap.into(),
            dpi,
        }
    }

    pub fn colormap(&self) -> &str {
        &self.colormap
    }

    pub fn dpi(&self) -> u32 {
        self.dpi
    }

    /// Output size for a `rows x cols` matrix.
    pub fn output_size(&self, rows: usize, cols: usize) -> (usize, usize) {
        let scale = self.dpi as f64 / BASE_DPI as f64;
        let width = ((cols as f64 * scale).round() as usize).max(1);
        let height = ((rows as f64 * scale).round() as usize).max(1);
        (width, height)
    }
}

impl PixmapConverter for AccurateConverter {
    #[instrument(skip_all, fields(colormap = %self.colormap, dpi = self.dpi))]
    fn convert(&self, matrix: &Matrix) -> Result<Pixmap> {
        let colormap = Colormap::from_name(&self.colormap)?;
        let (rows, cols) = matrix.dim();
        if rows == 0 || cols == 0 {
            return Err(PipelineError::InvalidDimensions(cols, rows));
        }
        if self.dpi == 0 {
            return Err(PipelineError::InvalidConfiguration("dpi must be positive".to_string()));
        }

        let (vmin, vmax) = min_max(matrix);
        let span = vmax - vmin;
        let (width, height) = self.output_size(rows, cols);
        debug!(vmin, vmax, width, height, "Rendering through colormap");

        // Colour per cell first; upscaling only repeats them.
        let cell_colors: Vec<[u8; 3]> = matrix
            .iter()
            .map(|&v| {
                let t = if span > 0.0 { (v - vmin) / span } else { 0.0 };
                colormap.apply(t)
            })
            .collect();

        let mut data = Vec::with_capacity(width * height * 3);
        for y in 0..height {
            let row = (y * rows / height).min(rows - 1);
            for x in 0..width {
                let col = (x * cols / width).min(cols - 1);
                data.extend_from_slice(&cell_colors[row * cols + col]);
            }
        }

        Pixmap::new(width, height, PixmapData::Rgb8(data))
    }

    fn is_fast(&self) -> bool {
        false
    }

    fn set_colormap(&mut self, name: &str) {
        self.colormap = name.to_string();
    }
}
