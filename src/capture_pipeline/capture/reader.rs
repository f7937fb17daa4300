use std::path::Path;

use crate::capture_pipeline::capture::model::CaptureModel;
use crate::capture_pipeline::common::error::Result;

pub trait CaptureReader {
    fn read_captures(&self, path: &Path) -> Result<Vec<CaptureModel>>;
}
