//! Magnifier overlay
//!
//! Re-samples a square neighbourhood of the rendered capture around the cursor and
//! reports min/max/value statistics of the matching raw data.

mod geometry;
mod stats;
mod overlay;
mod controller;


pub use geometry::{compute_source_rect, image_region, place_anchor, SourceRect, ANCHOR_OFFSET};
pub use stats::MagnifierStats;
pub use overlay::{MagnifierOverlay, MagnifierSource, LABEL_HEIGHT, LABEL_PADDING, LABEL_WIDTH};
pub use controller::MagnifierController;
