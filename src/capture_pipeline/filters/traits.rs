use crate::capture_pipeline::common::error::Result;
use crate::capture_pipeline::common::Matrix;

/// A filter applied to every pixel of the capture at once.
///
/// Implementations return a new matrix of the same shape and never touch their input.
pub trait UniformFilter {
    fn filter(&self, matrix: &Matrix) -> Result<Matrix>;
}

/// A filter applied to a single pixel value at a known location.
pub trait PerPixelFilter {
    fn filter(&self, row: usize, col: usize, value: f64) -> f64;
}

/// A filter applied to values regardless of where they are.
pub trait PerValueFilter {
    fn filter(&self, value: f64) -> f64;
}

impl<F> PerValueFilter for F
where
    F: Fn(f64) -> f64,
{
    fn filter(&self, value: f64) -> f64 {
        self(value)
    }
}

impl<F> PerPixelFilter for F
where
    F: Fn(usize, usize, f64) -> f64,
{
    fn filter(&self, row: usize, col: usize, value: f64) -> f64 {
        self(row, col, value)
    }
}
