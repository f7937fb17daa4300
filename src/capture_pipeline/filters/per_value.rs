//! Scalar compressions used to bring out faint signal.

use crate::capture_pipeline::filters::traits::PerValueFilter;

/// Square root; negative input yields NaN.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sqrt;

impl PerValueFilter for Sqrt {
    fn filter(&self, value: f64) -> f64 {
        value.sqrt()
    }
}

/// Natural logarithm; zero yields -inf and negative input NaN.
#[derive(Debug, Clone, Copy, Default)]
pub struct Log;

impl PerValueFilter for Log {
    fn filter(&self, value: f64) -> f64 {
        value.ln()
    }
}
