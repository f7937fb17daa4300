/// Axis-aligned pixel rectangle.
///
/// `bottom` and `right` are exclusive edges, matching how overlays turn a box into a
/// `(x, y, width, height)` rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoundingBox {
    pub top: i64,
    pub left: i64,
    pub bottom: i64,
    pub right: i64,
}

impl BoundingBox {
    pub const fn new(top: i64, left: i64, bottom: i64, right: i64) -> Self {
        Self { top, left, bottom, right }
    }

    /// Sentinel describing an uncropped matrix.
    pub const fn unbounded() -> Self {
        Self::new(0, 0, -1, -1)
    }

    /// True for the sentinel and anything else with inverted edges.
    pub fn is_unbounded(&self) -> bool {
        self.bottom < self.top || self.right < self.left
    }

    pub fn width(&self) -> Option<i64> {
        (!self.is_unbounded()).then(|| self.right - self.left)
    }

    pub fn height(&self) -> Option<i64> {
        (!self.is_unbounded()).then(|| self.bottom - self.top)
    }

    /// An unbounded box contains every pixel.
    pub fn contains(&self, row: i64, col: i64) -> bool {
        if self.is_unbounded() {
            return true;
        }
        row >= self.top && row < self.bottom && col >= self.left && col < self.right
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::unbounded()
    }
}
