//! Common utilities module
//!
//! This module contains the error type, the bounding box value type and the matrix
//! helpers shared across the capture pipeline.

pub mod error;
pub mod bounding_box;
pub mod matrix;

pub use error::{PipelineError, Result};
pub use bounding_box::BoundingBox;
pub use matrix::{Matrix, min_max};
