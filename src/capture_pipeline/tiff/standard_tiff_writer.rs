use std::io::{Cursor, Write};

use tiff::encoder::colortype::{ColorType, Gray16, Gray8, RGB8};
use tiff::encoder::compression::DeflateLevel;
use tiff::encoder::{Compression, TiffEncoder, TiffValue};
use tiff::tags::Predictor;
use tracing::{debug, instrument};

use crate::capture_pipeline::common::error::{PipelineError, Result};
use crate::capture_pipeline::pixmap::{Pixmap, PixmapData};
use crate::capture_pipeline::tiff::types::{DeflateEffort, ExportConfig, TiffCompression};
use crate::capture_pipeline::tiff::writer::PixmapWriter;

/// Pixmap writer backed by the `tiff` crate encoder.
pub struct StandardTiffWriter;

impl PixmapWriter for StandardTiffWriter {
    #[instrument(skip_all, fields(width = pixmap.width, height = pixmap.height))]
    fn write_pixmap(&self, pixmap: &Pixmap, output: &mut dyn Write, config: &ExportConfig) -> Result<()> {
        if pixmap.width == 0 || pixmap.height == 0 {
            return Err(PipelineError::InvalidDimensions(pixmap.width, pixmap.height));
        }

        let mut buffer = Vec::new();
        match &pixmap.data {
            PixmapData::Gray8(data) => encode::<Gray8>(&mut buffer, pixmap, data, config)?,
            PixmapData::Gray16(data) => encode::<Gray16>(&mut buffer, pixmap, data, config)?,
            PixmapData::Rgb8(data) => encode::<RGB8>(&mut buffer, pixmap, data, config)?,
        }

        output.write_all(&buffer)?;
        debug!(bytes = buffer.len(), "TIFF encoding complete");
        Ok(())
    }
}

fn encode<C>(buffer: &mut Vec<u8>, pixmap: &Pixmap, data: &[C::Inner], config: &ExportConfig) -> Result<()>
where
    C: ColorType,
    [C::Inner]: TiffValue,
{
    let mut encoder = TiffEncoder::new(Cursor::new(buffer))
        .map_err(|e| PipelineError::EncodeError(e.to_string()))?
        .with_compression(compression(config.compression));

    if config.uses_predictor(&pixmap.data) {
        encoder = encoder.with_predictor(Predictor::Horizontal);
    }

    encoder
        .write_image::<C>(pixmap.width as u32, pixmap.height as u32, data)
        .map_err(|e| PipelineError::EncodeError(e.to_string()))
}

fn compression(compression: TiffCompression) -> Compression {
    match compression {
        TiffCompression::None => Compression::Uncompressed,
        TiffCompression::Lzw => Compression::Lzw,
        TiffCompression::Deflate(DeflateEffort::Fast) => Compression::Deflate(DeflateLevel::Fast),
        TiffCompression::Deflate(DeflateEffort::Balanced) => Compression::Deflate(DeflateLevel::Balanced),
        TiffCompression::Deflate(DeflateEffort::Best) => Compression::Deflate(DeflateLevel::Best),
    }
}
