use crate::capture_pipeline::common::error::Result;
use crate::capture_pipeline::common::Matrix;
use crate::capture_pipeline::pixmap::types::Pixmap;

/// Turns a capture matrix into something the display layer can draw.
pub trait PixmapConverter {
    fn convert(&self, matrix: &Matrix) -> Result<Pixmap>;

    /// Whether the converter is cheap enough to run on every interaction.
    fn is_fast(&self) -> bool;

    /// Selects the colormap used by subsequent conversions. Converters without a
    /// colormap ignore it.
    fn set_colormap(&mut self, _name: &str) {}
}
