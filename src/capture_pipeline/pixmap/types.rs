//! Pixmap data types

use crate::capture_pipeline::common::error::{PipelineError, Result};

/// Bit depth of grayscale output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GrayDepth {
    #[default]
    Eight,
    Sixteen,
}

impl GrayDepth {
    /// Largest representable sample value.
    pub fn max_value(&self) -> f64 {
        match self {
            GrayDepth::Eight => u8::MAX as f64,
            GrayDepth::Sixteen => u16::MAX as f64,
        }
    }
}

/// Row-major sample buffer of a [`Pixmap`].
#[derive(Debug, Clone, PartialEq)]
pub enum PixmapData {
    Gray8(Vec<u8>),
    Gray16(Vec<u16>),
    /// Interleaved RGB, three bytes per pixel.
    Rgb8(Vec<u8>),
}

impl PixmapData {
    pub fn channels(&self) -> usize {
        match self {
            PixmapData::Gray8(_) | PixmapData::Gray16(_) => 1,
            PixmapData::Rgb8(_) => 3,
        }
    }

    /// Number of samples (not pixels).
    pub fn len(&self) -> usize {
        match self {
            PixmapData::Gray8(data) | PixmapData::Rgb8(data) => data.len(),
            PixmapData::Gray16(data) => data.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A renderable raster image.
#[derive(Debug, Clone, PartialEq)]
pub struct Pixmap {
    pub width: usize,
    pub height: usize,
    pub data: PixmapData,
}

impl Pixmap {
    /// Builds a pixmap, checking that `data` holds exactly `width * height` pixels.
    pub fn new(width: usize, height: usize, data: PixmapData) -> Result<Self> {
        if width == 0 || height == 0 || data.len() != width * height * data.channels() {
            return Err(PipelineError::InvalidDimensions(width, height));
        }
        Ok(Self { width, height, data })
    }

    /// Samples of the pixel at `(x, y)`, widened to `u16`.
    pub fn pixel(&self, x: usize, y: usize) -> Option<Vec<u16>> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let index = y * self.width + x;
        Some(match &self.data {
            PixmapData::Gray8(data) => vec![data[index] as u16],
            PixmapData::Gray16(data) => vec![data[index]],
            PixmapData::Rgb8(data) => data[index * 3..index * 3 + 3].iter().map(|&v| v as u16).collect(),
        })
    }

    /// Nearest-neighbour resample of the `width x height` region at `(x, y)` onto an
    /// `out_width x out_height` pixmap. The region is clipped to the pixmap.
    pub fn resample_region(
        &self,
        x: usize,
        y: usize,
        width: usize,
        height: usize,
        out_width: usize,
        out_height: usize,
    ) -> Result<Pixmap> {
        let width = width.min(self.width.saturating_sub(x));
        let height = height.min(self.height.saturating_sub(y));
        if width == 0 || height == 0 || out_width == 0 || out_height == 0 {
            return Err(PipelineError::InvalidDimensions(out_width, out_height));
        }

        let source_index = |ox: usize, oy: usize| {
            let sx = x + ox * width / out_width;
            let sy = y + oy * height / out_height;
            sy * self.width + sx
        };

        let data = match &self.data {
            PixmapData::Gray8(data) => PixmapData::Gray8(resample(data, 1, out_width, out_height, source_index)),
            PixmapData::Gray16(data) => PixmapData::Gray16(resample(data, 1, out_width, out_height, source_index)),
            PixmapData::Rgb8(data) => PixmapData::Rgb8(resample(data, 3, out_width, out_height, source_index)),
        };
        Pixmap::new(out_width, out_height, data)
    }
}

fn resample<T: Copy>(
    data: &[T],
    channels: usize,
    out_width: usize,
    out_height: usize,
    source_index: impl Fn(usize, usize) -> usize,
) -> Vec<T> {
    let mut output = Vec::with_capacity(out_width * out_height * channels);
    for oy in 0..out_height {
        for ox in 0..out_width {
            let start = source_index(ox, oy) * channels;
            output.extend_from_slice(&data[start..start + channels]);
        }
    }
    output
}
