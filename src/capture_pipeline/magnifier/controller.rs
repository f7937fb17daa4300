use tracing::info;

use crate::capture_pipeline::magnifier::overlay::{MagnifierOverlay, MagnifierSource};
use crate::capture_pipeline::view_model::ViewerConfig;

/// Visibility toggle that builds the overlay the first time it is shown.
pub struct MagnifierController {
    config: ViewerConfig,
    overlay: Option<MagnifierOverlay>,
    visible: bool,
}

impl MagnifierController {
    pub fn new(config: ViewerConfig) -> Self {
        Self {
            config,
            overlay: None,
            visible: false,
        }
    }

    /// Flips visibility. `seed` is only called when the overlay does not exist yet.
    pub fn toggle<F>(&mut self, seed: F) -> bool
    where
        F: FnOnce() -> MagnifierSource,
    {
        self.visible = !self.visible;
        if self.visible && self.overlay.is_none() {
            let mut overlay = MagnifierOverlay::new(&self.config);
            overlay.set_source_data(seed());
            info!("Magnifier created");
            self.overlay = Some(overlay);
        }
        self.visible
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn overlay(&self) -> Option<&MagnifierOverlay> {
        self.overlay.as_ref()
    }

    pub fn overlay_mut(&mut self) -> Option<&mut MagnifierOverlay> {
        self.overlay.as_mut()
    }

    /// Forwards a cursor move when the magnifier is showing.
    pub fn cursor_moved(&mut self, row: usize, col: usize) {
        if !self.visible {
            return;
        }
        if let Some(overlay) = self.overlay.as_mut() {
            overlay.set_pixel_pos(row, col);
        }
    }
}
