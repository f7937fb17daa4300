/// Screen-space distance between the cursor and the magnifier.
pub const ANCHOR_OFFSET: usize = 16;

/// Rectangle of matrix cells (`x` = column, `y` = row).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SourceRect {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl SourceRect {
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        row >= self.y && row < self.y + self.height && col >= self.x && col < self.x + self.width
    }
}

/// Square region around `(row, col)` to magnify.
///
/// The side is `display_size / factor`, never below `min_side`. The square is slid back
/// inside the matrix when it would cross an edge; it only shrinks when the matrix itself
/// is smaller, in which case it covers the matrix from the top-left corner.
pub fn compute_source_rect(
    cols: usize,
    rows: usize,
    row: usize,
    col: usize,
    factor: f64,
    display_size: usize,
    min_side: usize,
) -> SourceRect {
    let side = ((display_size as f64 / factor).floor() as usize).max(min_side);
    let (x, width) = clamp_axis(col, side, cols);
    let (y, height) = clamp_axis(row, side, rows);
    SourceRect { x, y, width, height }
}

fn clamp_axis(center: usize, side: usize, extent: usize) -> (usize, usize) {
    let length = side.min(extent);
    let start = center.saturating_sub(side / 2).min(extent - length);
    (start, length)
}

/// Maps a rectangle of matrix cells onto the pixels of an image rendered from a
/// `rows x cols` matrix at `image` (width, height).
///
/// Edges are scaled independently, so the region always covers at least one pixel per axis.
pub fn image_region(rect: SourceRect, (rows, cols): (usize, usize), image: (usize, usize)) -> SourceRect {
    let (x, width) = scale_axis(rect.x, rect.width, cols, image.0);
    let (y, height) = scale_axis(rect.y, rect.height, rows, image.1);
    SourceRect { x, y, width, height }
}

fn scale_axis(start: usize, length: usize, cells: usize, pixels: usize) -> (usize, usize) {
    if cells == 0 || pixels == 0 {
        return (0, 0);
    }
    let first = (start * pixels / cells).min(pixels - 1);
    let end = ((start + length) * pixels).div_ceil(cells).clamp(first + 1, pixels);
    (first, end - first)
}

/// Top-left corner of a `size` box shown next to `cursor` inside a `view` area.
///
/// The box goes below/right of the cursor, flips to the other side when it would
/// overflow, then is clamped into the view. A box larger than the view pins to 0.
pub fn place_anchor(cursor: (usize, usize), size: (usize, usize), view: (usize, usize)) -> (usize, usize) {
    (
        anchor_axis(cursor.0, size.0, view.0),
        anchor_axis(cursor.1, size.1, view.1),
    )
}

fn anchor_axis(cursor: usize, size: usize, view: usize) -> usize {
    if size >= view {
        return 0;
    }
    let after = cursor + ANCHOR_OFFSET;
    let position = if after + size <= view {
        after
    } else {
        cursor.saturating_sub(ANCHOR_OFFSET + size)
    };
    position.min(view - size)
}
