//! Capture view-model
//!
//! Owns a pristine capture next to the copy that filters are applied to, and the
//! display state around it (colormap, visualization range, crop box, value conversion).

mod types;
mod capture_view_model;

#[cfg(test)]
mod tests;

pub use types::{ConversionFn, KevConversion, ViewerConfig, ViewerConfigBuilder, VisualizationRange};
pub use capture_view_model::CaptureViewModel;
