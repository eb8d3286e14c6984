use crate::foundation::core::Canvas;
use crate::foundation::math::round_px;
use kurbo::{Point, Rect, RoundedRect};

/// Number of unit tiles: days, hours, minutes, seconds.
pub const TILE_COUNT: usize = 4;

/// Tile geometry derived from the canvas size.
///
/// Recomputed for every frame; all values are whole pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StyleDerivedLayout {
    /// Canvas the layout was computed for.
    pub canvas: Canvas,
    /// Horizontal gap before, between and after tiles (2% of the width).
    pub gap: u32,
    /// Width of each tile: `(width - 5 * gap) / 4`.
    pub block_w: u32,
    /// Height of each tile (74% of the canvas height).
    pub block_h: u32,
    /// Top edge of every tile; tiles are vertically centered.
    pub block_y: u32,
    /// Corner radius (10% of the tile width).
    pub radius: u32,
}

impl StyleDerivedLayout {
    /// Derive the tile geometry for `canvas`, rounding every measure to whole pixels.
    pub fn compute(canvas: Canvas) -> Self {
        let w = f64::from(canvas.width);
        let h = f64::from(canvas.height);
        let gap = round_px(w * 0.02);
        let block_w = round_px((w - 5.0 * f64::from(gap)) / 4.0);
        let block_h = round_px(h * 0.74);
        let block_y = round_px((h - f64::from(block_h)) / 2.0);
        let radius = round_px(f64::from(block_w) * 0.1);
        Self {
            canvas,
            gap,
            block_w,
            block_h,
            block_y,
            radius,
        }
    }

    /// Left edge of tile `slot`.
    pub fn tile_x(&self, slot: usize) -> f64 {
        f64::from(self.gap) + (slot as f64) * f64::from(self.block_w + self.gap)
    }

    /// Bounding box of tile `slot`.
    pub fn tile_rect(&self, slot: usize) -> Rect {
        let x = self.tile_x(slot);
        let y = f64::from(self.block_y);
        Rect::new(
            x,
            y,
            x + f64::from(self.block_w),
            y + f64::from(self.block_h),
        )
    }

    /// Rounded outline of tile `slot`.
    pub fn tile_shape(&self, slot: usize) -> RoundedRect {
        RoundedRect::from_rect(self.tile_rect(slot), f64::from(self.radius))
    }

    /// Vertical middle of the two-digit value.
    pub fn value_center(&self, slot: usize) -> Point {
        self.tile_point(slot, 0.44)
    }

    /// Top of the unit caption.
    pub fn label_top(&self, slot: usize) -> Point {
        self.tile_point(slot, 0.70)
    }

    /// Center of the colon after tile `slot`; `None` after the last tile.
    pub fn separator_center(&self, slot: usize) -> Option<Point> {
        if slot + 1 >= TILE_COUNT {
            return None;
        }
        let x = self.tile_x(slot) + f64::from(self.block_w) + f64::from(self.gap) / 2.0;
        let y = f64::from(self.block_y) + f64::from(self.block_h) * 0.42;
        Some(Point::new(x, y))
    }

    /// Widest text that fits inside a tile.
    pub fn tile_text_width(&self) -> f64 {
        f64::from(self.block_w) * 0.9
    }

    fn tile_point(&self, slot: usize, fy: f64) -> Point {
        Point::new(
            self.tile_x(slot) + f64::from(self.block_w) / 2.0,
            f64::from(self.block_y) + f64::from(self.block_h) * fy,
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/layout.rs"]
mod tests;
