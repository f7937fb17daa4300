use std::io::Write;

use crate::capture_pipeline::common::error::Result;
use crate::capture_pipeline::pixmap::Pixmap;
use crate::capture_pipeline::tiff::types::ExportConfig;

pub trait PixmapWriter {
    fn write_pixmap(&self, pixmap: &Pixmap, output: &mut dyn Write, config: &ExportConfig) -> Result<()>;
}
