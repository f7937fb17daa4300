//! Matrix to pixmap conversion
//!
//! A [`PixmapConverter`] turns a capture matrix into a renderable raster. The accurate
//! converter goes through a named colormap; the fast converter writes grayscale directly
//! and is the one to use for large frames.

mod types;
mod colormap;
mod converter;
mod accurate_converter;
mod fast_converter;


pub use types::{GrayDepth, Pixmap, PixmapData};
pub use colormap::{Colormap, Palette};
pub use converter::PixmapConverter;
pub use accurate_converter::AccurateConverter;
pub use fast_converter::FastConverter;
