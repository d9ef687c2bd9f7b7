/// Axis-aligned bounding box in frame pixel coordinates.
///
/// Stored as TLWH (top-left x, top-left y, width, height), which is the layout
/// detectors hand over and the one the on-screen display draws from.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    /// Top-left x coordinate
    pub left: f32,
    /// Top-left y coordinate
    pub top: f32,
    /// Width of the bounding box
    pub width: f32,
    /// Height of the bounding box
    pub height: f32,
}

impl Rect {
    /// Create a new Rect from top-left coordinates and dimensions (TLWH format).
    #[inline]
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Create a Rect from TLBR format (top-left x, top-left y, bottom-right x, bottom-right y).
    #[inline]
    pub fn from_tlbr(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self {
            left: x1,
            top: y1,
            width: x2 - x1,
            height: y2 - y1,
        }
    }

    /// Integer pixel box `(left, top, width, height)`.
    ///
    /// Every component is truncated on its own (saturating at the `i32`
    /// range), so `left + width` and `top + height` derived from it keep the
    /// exact integer extent. On fractional boxes the right and bottom edges
    /// can therefore sit one pixel left of / above `(left + width) as i32`,
    /// e.g. left 10.6 and width 20.7 give a right edge of 30, not 31.
    #[inline]
    pub fn to_pixels(&self) -> [i32; 4] {
        [
            self.left as i32,
            self.top as i32,
            self.width as i32,
            self.height as i32,
        ]
    }
}
