use std::io::Write;
use std::path::Path;

use tracing::{info, instrument, warn};

use crate::capture_pipeline::capture::{CaptureModel, CaptureReader, FitsCaptureReader};
use crate::capture_pipeline::common::error::{PipelineError, Result};
use crate::capture_pipeline::conversions::timing::{PipelineTimings, Step};
use crate::capture_pipeline::conversions::types::RenderOptions;
use crate::capture_pipeline::filters::{Add, FilterChain, Gaussian, ScalarMultiply};
use crate::capture_pipeline::pixmap::{AccurateConverter, FastConverter, PixmapConverter};
use crate::capture_pipeline::tiff::{PixmapWriter, StandardTiffWriter};
use crate::capture_pipeline::view_model::{CaptureViewModel, ViewerConfig};

/// Renders every capture of a FITS file to its own TIFF.
pub struct FitsToTiffPipeline<R: CaptureReader, W: PixmapWriter> {
    reader: R,
    writer: W,
    options: RenderOptions,
}

impl FitsToTiffPipeline<FitsCaptureReader, StandardTiffWriter> {
    pub fn new(options: RenderOptions) -> Self {
        Self {
            reader: FitsCaptureReader,
            writer: StandardTiffWriter,
            options,
        }
    }
}

impl<R: CaptureReader, W: PixmapWriter> FitsToTiffPipeline<R, W> {
    pub fn with_custom(reader: R, writer: W, options: RenderOptions) -> Self {
        Self {
            reader,
            writer,
            options,
        }
    }

    /// Loads `input` and writes one TIFF per capture into `out_dir`, named by
    /// [`ExportConfig::file_name`](crate::capture_pipeline::tiff::ExportConfig::file_name).
    ///
    /// A capture is fully rendered and encoded before its file is created, so a failing
    /// capture leaves nothing behind.
    #[instrument(skip(self, input_path, out_dir))]
    pub fn convert_file<P: AsRef<Path>, Q: AsRef<Path>>(&self, input_path: P, out_dir: Q) -> Result<PipelineTimings> {
        let input_path = input_path.as_ref();
        let out_dir = out_dir.as_ref();
        info!(input = %input_path.display(), output = %out_dir.display(), "Converting file");

        let mut timings = PipelineTimings::new();
        let captures = timings.measure(Step::Load, None, || {
            let _span = tracing::info_span!("load_captures").entered();
            self.reader.read_captures(input_path)
        })?;

        std::fs::create_dir_all(out_dir)
            .map_err(|e| PipelineError::OutputWriteError(format!("{}: {}", out_dir.display(), e)))?;

        for (index, capture) in captures.into_iter().enumerate() {
            let mut encoded = Vec::new();
            self.convert_capture(index, capture, &mut encoded, &mut timings)?;

            let path = out_dir.join(self.options.export.file_name(index));
            timings.measure(Step::Write, Some(index), || {
                std::fs::write(&path, &encoded)
                    .map_err(|e| PipelineError::OutputWriteError(format!("{}: {}", path.display(), e)))
            })?;
            info!(hdu = index, bytes = encoded.len(), output = %path.display(), "Wrote capture");
        }

        info!(total_ms = timings.total_duration().as_secs_f64() * 1000.0, "Conversion complete");
        Ok(timings)
    }

    /// Filters, renders and encodes the capture at `index` into `output`.
    #[instrument(skip_all, fields(hdu = index, rows = capture.info().rows, cols = capture.info().cols))]
    pub fn convert_capture(
        &self,
        index: usize,
        mut capture: CaptureModel,
        output: &mut dyn Write,
        timings: &mut PipelineTimings,
    ) -> Result<()> {
        let view_model = timings.measure(Step::Filter, Some(index), || {
            let _span = tracing::info_span!("filter").entered();
            if let Some(kev) = self.options.kev {
                let chain = FilterChain::new()
                    .then(Add::new(kev.pedestal))
                    .then(ScalarMultiply::new(kev.factor));
                capture.apply_filter(&chain)?;
                capture.refresh_info();
            }

            let mut view_model = CaptureViewModel::with_converter(capture, self.converter(), self.viewer_config());
            if let Some(range) = self.options.range {
                view_model.set_visualization_range(range);
                view_model.restrict_visualization_to_range(self.options.blank_value)?;
            }
            if let Some(sigma) = self.options.sigma {
                view_model.apply_filter(&Gaussian::new(sigma), true)?;
            }
            Ok(view_model)
        })?;

        let pixmap = timings.measure(Step::Render, Some(index), || {
            let _span = tracing::info_span!("render", fast = view_model.is_using_a_fast_converter()).entered();
            view_model.image()
        })?;

        timings.measure(Step::Encode, Some(index), || {
            let _span = tracing::info_span!("encode_tiff", width = pixmap.width, height = pixmap.height).entered();
            self.writer.write_pixmap(&pixmap, output, &self.options.export)
        })
    }

    fn converter(&self) -> Box<dyn PixmapConverter> {
        if self.options.fast {
            if self.options.colormap != ViewerConfig::default().default_colormap {
                warn!(colormap = %self.options.colormap, "Colormap is ignored by the fast converter");
            }
            Box::new(FastConverter::new(self.options.gray_depth))
        } else {
            Box::new(AccurateConverter::new(self.options.colormap.clone(), self.options.dpi))
        }
    }

    fn viewer_config(&self) -> ViewerConfig {
        ViewerConfig::builder()
            .default_colormap(self.options.colormap.clone())
            .build()
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: RenderOptions) {
        self.options = options;
    }
}
