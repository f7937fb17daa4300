//! View-model configuration types

use std::fmt;
use std::sync::Arc;

/// Conversion applied to values read for display, e.g. counts to keV.
pub type ConversionFn = Arc<dyn Fn(f64) -> f64 + Send + Sync>;

/// Low/high window of raw values mapped to the visible output.
///
/// No ordering is enforced between `low` and `high`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct VisualizationRange {
    pub low: f64,
    pub high: f64,
}

impl VisualizationRange {
    pub fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }
}

impl From<(f64, f64)> for VisualizationRange {
    fn from((low, high): (f64, f64)) -> Self {
        Self { low, high }
    }
}

impl From<VisualizationRange> for (f64, f64) {
    fn from(range: VisualizationRange) -> Self {
        (range.low, range.high)
    }
}

/// Linear conversion from ADC counts to keV: `factor * (counts + pedestal)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KevConversion {
    pub factor: f64,
    pub pedestal: f64,
}

impl Default for KevConversion {
    fn default() -> Self {
        Self {
            factor: 1.02857e-5,
            pedestal: 0.0,
        }
    }
}

impl KevConversion {
    pub fn new(factor: f64, pedestal: f64) -> Self {
        Self { factor, pedestal }
    }

    pub fn apply(&self, counts: f64) -> f64 {
        self.factor * (counts + self.pedestal)
    }

    pub fn into_fn(self) -> ConversionFn {
        Arc::new(move |counts| self.apply(counts))
    }
}

/// Constructor-time settings of the viewer.
#[derive(Debug, Clone)]
pub struct ViewerConfig {
    /// Colormap restored by `reset`
    pub default_colormap: String,
    /// Raw value to integer slider position factor
    pub slider_scale_factor: f64,
    /// Side of the square magnifier, in screen pixels
    pub magnifier_display_size: usize,
    pub initial_magnification: f64,
    pub min_magnification: f64,
    pub max_magnification: f64,
    pub magnification_step: f64,
    /// Smallest source neighbourhood the magnifier will show
    pub min_effective_side: usize,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            default_colormap: "Greys_r".to_string(),
            slider_scale_factor: 1000.0,
            magnifier_display_size: 127,
            initial_magnification: 3.0,
            min_magnification: 1.0,
            max_magnification: 100.0,
            magnification_step: 0.5,
            min_effective_side: 9,
        }
    }
}

impl ViewerConfig {
    pub fn builder() -> ViewerConfigBuilder {
        ViewerConfigBuilder::default()
    }
}

impl fmt::Display for ViewerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "colormap={}, slider_scale={}, magnifier={}px x{} [{}, {}] step {}",
            self.default_colormap,
            self.slider_scale_factor,
            self.magnifier_display_size,
            self.initial_magnification,
            self.min_magnification,
            self.max_magnification,
            self.magnification_step
        )
    }
}

/// Builder for ViewerConfig
#[derive(Default)]
pub struct ViewerConfigBuilder {
    default_colormap: Option<String>,
    slider_scale_factor: Option<f64>,
    magnifier_display_size: Option<usize>,
    initial_magnification: Option<f64>,
    min_magnification: Option<f64>,
    max_magnification: Option<f64>,
    magnification_step: Option<f64>,
    min_effective_side: Option<usize>,
}

impl ViewerConfigBuilder {
    pub fn default_colormap(mut self, name: impl Into<String>) -> Self {
        self.default_colormap = Some(name.into());
        self
    }

    pub fn slider_scale_factor(mut self, factor: f64) -> Self {
        self.slider_scale_factor = Some(factor);
        self
    }

    pub fn magnifier_display_size(mut self, size: usize) -> Self {
        self.magnifier_display_size = Some(size);
        self
    }

    pub fn initial_magnification(mut self, factor: f64) -> Self {
        self.initial_magnification = Some(factor);
        self
    }

    pub fn magnification_bounds(mut self, min: f64, max: f64) -> Self {
        self.min_magnification = Some(min);
        self.max_magnification = Some(max);
        self
    }

    pub fn magnification_step(mut self, step: f64) -> Self {
        self.magnification_step = Some(step);
        self
    }

    pub fn min_effective_side(mut self, side: usize) -> Self {
        self.min_effective_side = Some(side);
        self
    }

    pub fn build(self) -> ViewerConfig {
        let default = ViewerConfig::default();
        ViewerConfig {
            default_colormap: self.default_colormap.unwrap_or(default.default_colormap),
            slider_scale_factor: self.slider_scale_factor.unwrap_or(default.slider_scale_factor),
            magnifier_display_size: self.magnifier_display_size.unwrap_or(default.magnifier_display_size),
            initial_magnification: self.initial_magnification.unwrap_or(default.initial_magnification),
            min_magnification: self.min_magnification.unwrap_or(default.min_magnification),
            max_magnification: self.max_magnification.unwrap_or(default.max_magnification),
            magnification_step: self.magnification_step.unwrap_or(default.magnification_step),
            min_effective_side: self.min_effective_side.unwrap_or(default.min_effective_side),
        }
    }
}
