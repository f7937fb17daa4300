use crate::capture_pipeline::common::error::Result;
use crate::capture_pipeline::common::Matrix;
use crate::capture_pipeline::filters::traits::{PerPixelFilter, PerValueFilter, UniformFilter};

/// Runs a [`PerValueFilter`] over every element.
pub struct PerValueAdapter<F: PerValueFilter>(pub F);

impl<F: PerValueFilter> UniformFilter for PerValueAdapter<F> {
    fn filter(&self, matrix: &Matrix) -> Result<Matrix> {
        Ok(matrix.mapv(|v| self.0.filter(v)))
    }
}

/// Runs a [`PerPixelFilter`] over every element, passing its `(row, col)`.
pub struct PerPixelAdapter<F: PerPixelFilter>(pub F);

impl<F: PerPixelFilter> UniformFilter for PerPixelAdapter<F> {
    fn filter(&self, matrix: &Matrix) -> Result<Matrix> {
        let mut output = matrix.clone();
        for ((row, col), value) in output.indexed_iter_mut() {
            *value = self.0.filter(row, col, *value);
        }
        Ok(output)
    }
}
