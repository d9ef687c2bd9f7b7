//! Per-object coordinate records extracted from a frame.

use nalgebra::Point2;

use crate::overlay::Rect;

/// The four corners of an object's box, in integer pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Corners {
    pub top_left: Point2<i32>,
    pub top_right: Point2<i32>,
    pub bottom_left: Point2<i32>,
    pub bottom_right: Point2<i32>,
}

impl Corners {
    pub fn from_rect(rect: &Rect) -> Self {
        let [left, top, width, height] = rect.to_pixels();
        let right = left.saturating_add(width);
        let bottom = top.saturating_add(height);
        Self {
            top_left: Point2::new(left, top),
            top_right: Point2::new(right, top),
            bottom_left: Point2::new(left, bottom),
            bottom_right: Point2::new(right, bottom),
        }
    }

    pub fn width(&self) -> i32 {
        (self.top_right - self.top_left).x
    }

    pub fn height(&self) -> i32 {
        (self.bottom_left - self.top_left).y
    }
}

/// Label and corner coordinates of one detected object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationRecord {
    pub frame_number: u64,
    /// Empty when the detector supplied no label.
    pub label: String,
    pub corners: Corners,
}

impl AnnotationRecord {
    pub fn new(frame_number: u64, label: impl Into<String>, rect: &Rect) -> Self {
        Self {
            frame_number,
            label: label.into(),
            corners: Corners::from_rect(rect),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corners_from_rect() {
        let corners = Corners::from_rect(&Rect::new(10.0, 20.0, 30.0, 40.0));
        assert_eq!(corners.top_left, Point2::new(10, 20));
        assert_eq!(corners.top_right, Point2::new(40, 20));
        assert_eq!(corners.bottom_left, Point2::new(10, 60));
        assert_eq!(corners.bottom_right, Point2::new(40, 60));
    }

    #[test]
    fn test_corner_extents_match_rect() {
        let rects = [
            Rect::new(0.0, 0.0, 0.0, 0.0),
            Rect::new(3.0, 7.0, 1920.0, 1.0),
            Rect::new(12.75, 99.5, 40.25, 17.9),
        ];
        for rect in rects {
            let c = Corners::from_rect(&rect);
            let [_, _, w, h] = rect.to_pixels();
            assert_eq!(c.width(), w);
            assert_eq!((c.bottom_right - c.bottom_left).x, w);
            assert_eq!(c.height(), h);
            assert_eq!((c.bottom_right - c.top_right).y, h);
        }
    }

    #[test]
    fn test_large_rect_saturates() {
        let corners = Corners::from_rect(&Rect::new(2.0e9, 0.0, 2.0e9, 3.0e9));
        assert_eq!(corners.top_left, Point2::new(2_000_000_000, 0));
        assert_eq!(corners.bottom_right, Point2::new(i32::MAX, i32::MAX));
        assert_eq!(corners.width(), i32::MAX - 2_000_000_000);
    }

    #[test]
    fn test_record_keeps_empty_label() {
        let record = AnnotationRecord::new(5, "", &Rect::new(1.0, 2.0, 3.0, 4.0));
        assert_eq!(record.frame_number, 5);
        assert!(record.label.is_empty());
    }
}
