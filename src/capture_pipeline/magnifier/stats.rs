use std::fmt;

use crate::capture_pipeline::common::Matrix;
use crate::capture_pipeline::magnifier::geometry::SourceRect;
use crate::capture_pipeline::view_model::ConversionFn;

/// Figures shown next to the magnified image, already converted for display.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MagnifierStats {
    pub min: f64,
    pub max: f64,
    pub center: f64,
}

impl Default for MagnifierStats {
    fn default() -> Self {
        Self {
            min: f64::NAN,
            max: f64::NAN,
            center: f64::NAN,
        }
    }
}

impl MagnifierStats {
    /// Statistics of `rect` in `matrix` and of the value at `cursor` (row, col).
    ///
    /// The rectangle is clipped to the matrix; an empty region yields NaN everywhere.
    pub fn compute(matrix: &Matrix, rect: SourceRect, cursor: (usize, usize), conversion: Option<&ConversionFn>) -> Self {
        let (rows, cols) = matrix.dim();
        let row_end = (rect.y + rect.height).min(rows);
        let col_end = (rect.x + rect.width).min(cols);
        if rect.y >= row_end || rect.x >= col_end {
            return Self::default();
        }

        let convert = |v: f64| conversion.map_or(v, |f| f(v));
        let window = matrix.slice(ndarray::s![rect.y..row_end, rect.x..col_end]);
        let (min, max) = window
            .iter()
            .map(|&v| convert(v))
            .fold((f64::NAN, f64::NAN), |(lo, hi), v| (lo.min(v), hi.max(v)));
        let center = matrix.get(cursor).map_or(f64::NAN, |&v| convert(v));

        Self { min, max, center }
    }

    pub fn label_lines(&self) -> [String; 3] {
        [
            format!("Min: {:.2e} keV", self.min),
            format!("Max: {:.2e} keV", self.max),
            format!("Val: {:.2e} keV", self.center),
        ]
    }
}

impl fmt::Display for MagnifierStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label_lines().join(" | "))
    }
}
