//! Batch rendering options

use crate::capture_pipeline::pixmap::GrayDepth;
use crate::capture_pipeline::tiff::ExportConfig;
use crate::capture_pipeline::view_model::{KevConversion, VisualizationRange};

/// How each capture of a file is turned into an image.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Use the fast grayscale converter instead of the colormap one
    pub fast: bool,
    pub gray_depth: GrayDepth,
    pub colormap: String,
    pub dpi: u32,
    /// Counts to keV conversion applied to the data before anything else
    pub kev: Option<KevConversion>,
    /// Values outside this range (after conversion) are replaced by `blank_value`
    pub range: Option<VisualizationRange>,
    pub blank_value: f64,
    /// Gaussian smoothing applied last
    pub sigma: Option<f64>,
    pub export: ExportConfig,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            fast: false,
            gray_depth: GrayDepth::Eight,
            colormap: "Greys_r".to_string(),
            dpi: 100,
            kev: None,
            range: None,
            blank_value: 0.0,
            sigma: None,
            export: ExportConfig::default(),
        }
    }
}

impl RenderOptions {
    pub fn builder() -> RenderOptionsBuilder {
        RenderOptionsBuilder::default()
    }
}

/// Builder for RenderOptions
#[derive(Default)]
pub struct RenderOptionsBuilder {
    fast: Option<bool>,
    gray_depth: Option<GrayDepth>,
    colormap: Option<String>,
    dpi: Option<u32>,
    kev: Option<Option<KevConversion>>,
    range: Option<Option<VisualizationRange>>,
    blank_value: Option<f64>,
    sigma: Option<Option<f64>>,
    export: Option<ExportConfig>,
}

impl RenderOptionsBuilder {
    pub fn fast(mut self, fast: bool) -> Self {
        self.fast = Some(fast);
        self
    }

    pub fn gray_depth(mut self, depth: GrayDepth) -> Self {
        self.gray_depth = Some(depth);
        self
    }

    pub fn colormap(mut self, name: impl Into<String>) -> Self {
        self.colormap = Some(name.into());
        self
    }

    pub fn dpi(mut self, dpi: u32) -> Self {
        self.dpi = Some(dpi);
        self
    }

    pub fn kev(mut self, kev: Option<KevConversion>) -> Self {
        self.kev = Some(kev);
        self
    }

    pub fn range(mut self, range: Option<VisualizationRange>) -> Self {
        self.range = Some(range);
        self
    }

    pub fn blank_value(mut self, value: f64) -> Self {
        self.blank_value = Some(value);
        self
    }

    pub fn sigma(mut self, sigma: Option<f64>) -> Self {
        self.sigma = Some(sigma);
        self
    }

    pub fn export(mut self, export: ExportConfig) -> Self {
        self.export = Some(export);
        self
    }

    pub fn build(self) -> RenderOptions {
        let default = RenderOptions::default();
        RenderOptions {
            fast: self.fast.unwrap_or(default.fast),
            gray_depth: self.gray_depth.unwrap_or(default.gray_depth),
            colormap: self.colormap.unwrap_or(default.colormap),
            dpi: self.dpi.unwrap_or(default.dpi),
            kev: self.kev.unwrap_or(default.kev),
            range: self.range.unwrap_or(default.range),
            blank_value: self.blank_value.unwrap_or(default.blank_value),
            sigma: self.sigma.unwrap_or(default.sigma),
            export: self.export.unwrap_or(default.export),
        }
    }
}
