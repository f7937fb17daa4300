//! Capture loading module
//!
//! A capture is one frame (HDU) of a multi-frame FITS file: a numeric matrix plus the
//! metadata derived from it and its header.

mod reader;
mod fits_reader;
mod model;
pub mod types;


pub use reader::CaptureReader;
pub use fits_reader::FitsCaptureReader;
pub use model::CaptureModel;
pub use types::CaptureInfo;
