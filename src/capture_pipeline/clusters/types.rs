use crate::capture_pipeline::common::{BoundingBox, Matrix};

/// One cluster of energy deposits found in a capture.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusteredEventInfo {
    /// Extent of the cluster in the capture
    pub bounding_box: BoundingBox,
    /// Capture values inside `bounding_box`
    pub data: Matrix,
    /// Row of the most energetic pixel
    pub center_row: usize,
    /// Column of the most energetic pixel
    pub center_col: usize,
}

impl ClusteredEventInfo {
    pub fn new(bounding_box: BoundingBox, data: Matrix, center_row: usize, center_col: usize) -> Self {
        Self {
            bounding_box,
            data,
            center_row,
            center_col,
        }
    }

    /// Sum of the cluster values, NaN cells skipped.
    pub fn total_energy(&self) -> f64 {
        self.data.iter().filter(|v| !v.is_nan()).sum()
    }
}
