use tracing::instrument;

use crate::capture_pipeline::common::error::{PipelineError, Result};
use crate::capture_pipeline::common::Matrix;
use crate::capture_pipeline::pixmap::converter::PixmapConverter;
use crate::capture_pipeline::pixmap::types::{GrayDepth, Pixmap, PixmapData};

/// Direct grayscale mapping without a colormap.
///
/// Negative values (and NaN) are clipped to 0, then everything is scaled linearly so the
/// largest value becomes full white. Meant to stay well under 25 ms for a 3200x550 frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct FastConverter {
    depth: GrayDepth,
}

impl FastConverter {
    pub fn new(depth: GrayDepth) -> Self {
        Self { depth }
    }

    pub fn depth(&self) -> GrayDepth {
        self.depth
    }
}

impl PixmapConverter for FastConverter {
    #[instrument(skip_all, fields(depth = ?self.depth))]
    fn convert(&self, matrix: &Matrix) -> Result<Pixmap> {
        let (rows, cols) = matrix.dim();
        if rows == 0 || cols == 0 {
            return Err(PipelineError::InvalidDimensions(cols, rows));
        }

        let clip = |v: f64| if v > 0.0 { v } else { 0.0 };
        let max = matrix.iter().fold(0.0_f64, |acc, &v| acc.max(clip(v)));
        let full = self.depth.max_value();
        let level = |v: f64| if max > 0.0 { clip(v) / max * full } else { 0.0 };

        // Iteration is row-major whatever the matrix layout.
        let data = match self.depth {
            GrayDepth::Eight => PixmapData::Gray8(matrix.iter().map(|&v| level(v) as u8).collect()),
            GrayDepth::Sixteen => PixmapData::Gray16(matrix.iter().map(|&v| level(v) as u16).collect()),
        };

        Pixmap::new(cols, rows, data)
    }

    fn is_fast(&self) -> bool {
        true
    }
}
