//! Export settings for rendered pixmaps

use std::fmt;

use crate::capture_pipeline::pixmap::PixmapData;

/// Deflate effort level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeflateEffort {
    Fast,
    #[default]
    Balanced,
    Best,
}

/// Compression of the written TIFF strips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TiffCompression {
    #[default]
    None,
    Lzw,
    Deflate(DeflateEffort),
}

impl fmt::Display for TiffCompression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TiffCompression::None => write!(f, "none"),
            TiffCompression::Lzw => write!(f, "lzw"),
            TiffCompression::Deflate(effort) => write!(f, "deflate ({effort:?})"),
        }
    }
}

/// How rendered captures are written out.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportConfig {
    pub compression: TiffCompression,
    /// Horizontal differencing ahead of compression.
    pub horizontal_predictor: bool,
    /// Output files are named `<prefix><hdu index>.tiff`.
    pub file_prefix: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            compression: TiffCompression::None,
            horizontal_predictor: false,
            file_prefix: "hdu_".to_string(),
        }
    }
}

impl ExportConfig {
    pub fn builder() -> ExportConfigBuilder {
        ExportConfigBuilder::default()
    }

    /// File name of the capture at `index`.
    pub fn file_name(&self, index: usize) -> String {
        format!("{}{index}.tiff", self.file_prefix)
    }

    /// Whether the predictor is applied to `data`.
    ///
    /// Only gray samples are differenced; colormapped RGB is mostly flat runs of a
    /// few palette colours, which the compressors already handle well.
    /// Uncompressed output never uses it.
    pub fn uses_predictor(&self, data: &PixmapData) -> bool {
        self.horizontal_predictor
            && self.compression != TiffCompression::None
            && !matches!(data, PixmapData::Rgb8(_))
    }
}

#[derive(Default)]
pub struct ExportConfigBuilder {
    config: ExportConfig,
}

impl ExportConfigBuilder {
    pub fn compression(mut self, compression: TiffCompression) -> Self {
        self.config.compression = compression;
        self
    }

    pub fn horizontal_predictor(mut self, enabled: bool) -> Self {
        self.config.horizontal_predictor = enabled;
        self
    }

    pub fn file_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.file_prefix = prefix.into();
        self
    }

    pub fn build(self) -> ExportConfig {
        self.config
    }
}
