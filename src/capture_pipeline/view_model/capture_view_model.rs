use tracing::{debug, info, instrument};

use crate::capture_pipeline::capture::{CaptureInfo, CaptureModel};
use crate::capture_pipeline::common::error::{PipelineError, Result};
use crate::capture_pipeline::common::{min_max, BoundingBox, Matrix};
use crate::capture_pipeline::filters::{SubstituteOutOfRange, UniformFilter};
use crate::capture_pipeline::pixmap::{AccurateConverter, Pixmap, PixmapConverter};
use crate::capture_pipeline::view_model::types::{ConversionFn, ViewerConfig, VisualizationRange};

/// View-model over one capture.
///
/// The capture it is built from is kept untouched; filters only ever modify the
/// visualization copy, and [`reset`](Self::reset) rebuilds that copy from the pristine one.
/// Meant to be driven by a single consumer (one UI context) at a time.
pub struct CaptureViewModel {
    pristine: CaptureModel,
    visualization: CaptureModel,
    converter: Box<dyn PixmapConverter>,
    conversion: Option<ConversionFn>,
    config: ViewerConfig,
    colormap: String,
    range: VisualizationRange,
    crop_box: BoundingBox,
}

impl CaptureViewModel {
    /// View-model rendering through an [`AccurateConverter`] at 100 dpi.
    pub fn new(capture: CaptureModel, config: ViewerConfig) -> Self {
        let converter = AccurateConverter::new(config.default_colormap.clone(), 100);
        Self::with_converter(capture, Box::new(converter), config)
    }

    pub fn with_converter(capture: CaptureModel, mut converter: Box<dyn PixmapConverter>, config: ViewerConfig) -> Self {
        let colormap = config.default_colormap.clone();
        converter.set_colormap(&colormap);
        let range = pristine_range(capture.raw_data());
        debug!(low = range.low, high = range.high, fast = converter.is_fast(), "Created view-model");

        Self {
            visualization: capture.copy(),
            pristine: capture,
            converter,
            conversion: None,
            config,
            colormap,
            range,
            crop_box: BoundingBox::unbounded(),
        }
    }

    /// Sets the conversion applied by [`value_at`](Self::value_at).
    pub fn with_conversion(mut self, conversion: ConversionFn) -> Self {
        self.conversion = Some(conversion);
        self
    }

    pub fn conversion(&self) -> Option<&ConversionFn> {
        self.conversion.as_ref()
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    /// Records the crop rectangle. The matrix itself is not cropped.
    pub fn crop(&mut self, crop_box: BoundingBox) {
        self.crop_box = crop_box;
    }

    pub fn crop_box(&self) -> BoundingBox {
        self.crop_box
    }

    /// Restores the visualization matrix, colormap and range to their post-load state.
    /// The crop box is left as is.
    pub fn reset(&mut self) {
        self.visualization = self.pristine.copy();
        let default = self.config.default_colormap.clone();
        self.set_current_colormap(&default);
        self.range = pristine_range(self.pristine.raw_data());
        info!(colormap = %self.colormap, "View-model reset");
    }

    /// Applies `filter` on top of the current visualization when `use_viz_model` is set,
    /// otherwise on a fresh copy of the pristine data. The visualization range is kept
    /// either way.
    ///
    /// On error the visualization matrix is unchanged.
    #[instrument(skip(self, filter))]
    pub fn apply_filter(&mut self, filter: &dyn UniformFilter, use_viz_model: bool) -> Result<()> {
        if use_viz_model {
            return self.visualization.apply_filter(filter);
        }

        let mut fresh = self.pristine.copy();
        fresh.apply_filter(filter)?;
        self.visualization = fresh;
        Ok(())
    }

    pub fn set_visualization_range(&mut self, range: impl Into<VisualizationRange>) {
        self.range = range.into();
    }

    pub fn visualization_range(&self) -> VisualizationRange {
        self.range
    }

    /// Blanks everything outside the visualization range, starting from the pristine data.
    pub fn restrict_visualization_to_range(&mut self, blank_value: f64) -> Result<()> {
        let VisualizationRange { low, high } = self.range;
        debug!(low, high, blank_value, "Restricting visualization to range");
        self.apply_filter(&SubstituteOutOfRange::new(low, high, blank_value), false)
    }

    /// Visualization value at `(row, col)`, passed through the conversion if any.
    pub fn value_at(&self, row: usize, col: usize) -> Result<f64> {
        let matrix = self.visualization.raw_data();
        let value = matrix.get((row, col)).copied().ok_or_else(|| {
            let (rows, cols) = matrix.dim();
            PipelineError::IndexOutOfBounds { row, col, rows, cols }
        })?;
        Ok(match &self.conversion {
            Some(convert) => convert(value),
            None => value,
        })
    }

    /// Renders the current visualization matrix.
    pub fn image(&self) -> Result<Pixmap> {
        self.converter.convert(self.visualization.raw_data())
    }

    /// Stored as given; an unknown name only fails when the image is rendered.
    pub fn set_current_colormap(&mut self, name: &str) {
        self.colormap = name.to_string();
        self.converter.set_colormap(name);
    }

    pub fn current_colormap(&self) -> &str {
        &self.colormap
    }

    /// Colormap controls are meaningless while this is true.
    pub fn is_using_a_fast_converter(&self) -> bool {
        self.converter.is_fast()
    }

    /// Info of the visualization capture. It is not refreshed by filters.
    pub fn capture_info(&self) -> &CaptureInfo {
        self.visualization.info()
    }

    pub fn visualization_data(&self) -> &Matrix {
        self.visualization.raw_data()
    }

    pub fn pristine_data(&self) -> &Matrix {
        self.pristine.raw_data()
    }

    /// Integer slider positions spanning the pristine min/max.
    pub fn slider_bounds(&self) -> (i64, i64) {
        let scale = self.config.slider_scale_factor;
        let (min, max) = min_max(self.pristine.raw_data());
        ((min * scale).floor() as i64, (max * scale).ceil() as i64)
    }

    /// Inverse of [`slider_bounds`](Self::slider_bounds).
    pub fn set_visualization_range_from_slider(&mut self, low: i64, high: i64) {
        let scale = self.config.slider_scale_factor;
        self.range = VisualizationRange::new(low as f64 / scale, high as f64 / scale);
    }
}

fn pristine_range(matrix: &Matrix) -> VisualizationRange {
    let (min, max) = min_max(matrix);
    VisualizationRange::new(min, max)
}
