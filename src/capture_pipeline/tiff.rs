//! TIFF export module
//!
//! Writes rendered pixmaps to TIFF with the compression chosen in [`ExportConfig`].

mod writer;
mod standard_tiff_writer;
pub mod types;

#[cfg(test)]
mod tests;

pub use writer::PixmapWriter;
pub use standard_tiff_writer::StandardTiffWriter;
pub use types::{DeflateEffort, ExportConfig, ExportConfigBuilder, TiffCompression};
