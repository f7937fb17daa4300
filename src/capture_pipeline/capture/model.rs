use std::fmt;
use std::path::Path;

use tracing::{debug, instrument};

use crate::capture_pipeline::capture::fits_reader::FitsCaptureReader;
use crate::capture_pipeline::capture::reader::CaptureReader;
use crate::capture_pipeline::capture::types::CaptureInfo;
use crate::capture_pipeline::common::error::{PipelineError, Result};
use crate::capture_pipeline::common::Matrix;
use crate::capture_pipeline::filters::UniformFilter;

/// One CCD capture: the data matrix and the metadata describing it.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptureModel {
    matrix: Matrix,
    info: CaptureInfo,
}

impl CaptureModel {
    pub fn new(matrix: Matrix) -> Self {
        let info = CaptureInfo::from_matrix(&matrix);
        Self { matrix, info }
    }

    /// Wraps a matrix with caller-provided metadata, e.g. header-derived timestamps.
    pub fn with_info(matrix: Matrix, info: CaptureInfo) -> Self {
        Self { matrix, info }
    }

    /// Loads every image HDU of a FITS file, in file order.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Vec<CaptureModel>> {
        FitsCaptureReader.read_captures(path.as_ref())
    }

    pub fn raw_data(&self) -> &Matrix {
        &self.matrix
    }

    pub fn info(&self) -> &CaptureInfo {
        &self.info
    }

    /// Replaces the matrix with `filter(matrix)`. The info is left as it was.
    ///
    /// On error the matrix is untouched.
    #[instrument(skip_all)]
    pub fn apply_filter(&mut self, filter: &dyn UniformFilter) -> Result<()> {
        let filtered = filter.filter(&self.matrix)?;
        if filtered.dim() != self.matrix.dim() {
            return Err(PipelineError::ShapeMismatch {
                expected: self.matrix.dim(),
                actual: filtered.dim(),
            });
        }
        self.matrix = filtered;
        Ok(())
    }

    /// Deep copy; the copy shares nothing with `self`.
    pub fn copy(&self) -> CaptureModel {
        self.clone()
    }

    /// Rebuilds dimensions and min/max from the current matrix, keeping the timestamps.
    pub fn refresh_info(&mut self) {
        let info = CaptureInfo::from_matrix(&self.matrix).with_timestamps(
            self.info.capture_start(),
            self.info.capture_end(),
            self.info.capture_date(),
        );
        debug!(min = info.min, max = info.max, "Refreshed capture info");
        self.info = info;
    }
}

impl fmt::Display for CaptureModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.info, f)
    }
}
