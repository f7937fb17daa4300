//! Batch conversions module
//!
//! Orchestrates load, filter, render and export for whole capture files.

mod fits_to_tiff;
mod timing;
pub mod types;


pub use fits_to_tiff::FitsToTiffPipeline;
pub use timing::{PipelineTimings, Step, StepTiming};
pub use types::{RenderOptions, RenderOptionsBuilder};
