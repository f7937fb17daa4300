//! Uniform filters over the whole capture matrix.

use ndarray::Axis;
use tracing::{debug, instrument};

use crate::capture_pipeline::common::error::{PipelineError, Result};
use crate::capture_pipeline::common::Matrix;
use crate::capture_pipeline::filters::traits::UniformFilter;

/// Kernel half-width in standard deviations.
const GAUSSIAN_TRUNCATE: f64 = 4.0;

/// Multiplies every element by a constant factor.
#[derive(Debug, Clone, Copy)]
pub struct ScalarMultiply {
    factor: f64,
}

impl ScalarMultiply {
    pub fn new(factor: f64) -> Self {
        Self { factor }
    }
}

impl UniformFilter for ScalarMultiply {
    fn filter(&self, matrix: &Matrix) -> Result<Matrix> {
        Ok(matrix * self.factor)
    }
}

/// Adds a constant to every element.
#[derive(Debug, Clone, Copy)]
pub struct Add {
    value: f64,
}

impl Add {
    pub fn new(value: f64) -> Self {
        Self { value }
    }
}

impl UniformFilter for Add {
    fn filter(&self, matrix: &Matrix) -> Result<Matrix> {
        Ok(matrix + self.value)
    }
}

/// Replaces every element in `[start, end]` by `value`.
#[derive(Debug, Clone, Copy)]
pub struct SubstituteInRange {
    start: f64,
    end: f64,
    value: f64,
}

impl SubstituteInRange {
    pub fn new(start: f64, end: f64, value: f64) -> Self {
        Self { start, end, value }
    }
}

impl UniformFilter for SubstituteInRange {
    fn filter(&self, matrix: &Matrix) -> Result<Matrix> {
        Ok(matrix.mapv(|x| {
            if x >= self.start && x <= self.end {
                self.value
            } else {
                x
            }
        }))
    }
}

/// Replaces every element outside `[start, end]` by `value`. Boundary values are kept.
#[derive(Debug, Clone, Copy)]
pub struct SubstituteOutOfRange {
    start: f64,
    end: f64,
    value: f64,
}

impl SubstituteOutOfRange {
    pub fn new(start: f64, end: f64, value: f64) -> Self {
        Self { start, end, value }
    }
}

impl UniformFilter for SubstituteOutOfRange {
    fn filter(&self, matrix: &Matrix) -> Result<Matrix> {
        Ok(matrix.mapv(|x| {
            if x < self.start || x > self.end {
                self.value
            } else {
                x
            }
        }))
    }
}

/// Separable Gaussian smoothing.
///
/// Edges are extended with the nearest pixel and the kernel is truncated at four
/// standard deviations. `sigma == 0`, or a sigma so small that its square underflows,
/// leaves the matrix unchanged; a negative or NaN sigma is reported when the filter runs.
#[derive(Debug, Clone, Copy)]
pub struct Gaussian {
    sigma: f64,
}

impl Gaussian {
    pub fn new(sigma: f64) -> Self {
        Self { sigma }
    }

    pub fn sigma(&self) -> f64 {
        self.sigma
    }
}

impl UniformFilter for Gaussian {
    #[instrument(skip_all, fields(sigma = self.sigma))]
    fn filter(&self, matrix: &Matrix) -> Result<Matrix> {
        if self.sigma.is_nan() || self.sigma < 0.0 {
            return Err(PipelineError::InvalidConfiguration(format!(
                "gaussian sigma must be non-negative, got {}",
                self.sigma
            )));
        }
        if self.sigma * self.sigma == 0.0 {
            return Ok(matrix.clone());
        }

        let kernel = gaussian_kernel_1d(self.sigma);
        debug!(taps = kernel.len(), "Gaussian kernel built");

        let rows_done = convolve_lanes(matrix, &kernel, Axis(1));
        Ok(convolve_lanes(&rows_done, &kernel, Axis(0)))
    }
}

/// Normalized 1-D Gaussian with `2 * radius + 1` taps.
fn gaussian_kernel_1d(sigma: f64) -> Vec<f64> {
    let radius = (GAUSSIAN_TRUNCATE * sigma + 0.5) as isize;
    let mut kernel: Vec<f64> = (-radius..=radius)
        .map(|x| (-((x * x) as f64) / (2.0 * sigma * sigma)).exp())
        .collect();

    let sum: f64 = kernel.iter().sum();
    kernel.iter_mut().for_each(|w| *w /= sum);
    kernel
}

/// Convolves every lane along `axis` with `kernel`, clamping reads to the lane.
fn convolve_lanes(input: &Matrix, kernel: &[f64], axis: Axis) -> Matrix {
    let mut output = Matrix::zeros(input.raw_dim());
    let radius = (kernel.len() / 2) as isize;

    for (lane_in, mut lane_out) in input.lanes(axis).into_iter().zip(output.lanes_mut(axis)) {
        let last = lane_in.len() as isize - 1;
        for (i, out) in lane_out.iter_mut().enumerate() {
            *out = kernel
                .iter()
                .enumerate()
                .map(|(k, w)| {
                    let j = (i as isize + k as isize - radius).clamp(0, last);
                    w * lane_in[j as usize]
                })
                .sum();
        }
    }
    output
}
