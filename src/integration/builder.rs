//! Builder for detections coming from detector outputs in assorted box formats.

use crate::overlay::{Color, Detection, Mask, Rect};

/// Builder for [`Detection`]s.
///
/// Box setters overwrite each other; the last one called wins.
#[derive(Debug, Clone, Default)]
pub struct DetectionBuilder {
    rect: Rect,
    class_id: i32,
    label: Option<String>,
    mask: Option<Mask>,
    border_color: Option<Color>,
}

impl DetectionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Box given as corners (x1, y1, x2, y2).
    pub fn tlbr(mut self, x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        self.rect = Rect::from_tlbr(x1, y1, x2, y2);
        self
    }

    /// Box given as center and size.
    pub fn xywh(mut self, center_x: f32, center_y: f32, width: f32, height: f32) -> Self {
        self.rect = Rect::new(center_x - width / 2.0, center_y - height / 2.0, width, height);
        self
    }

    /// Box given as (top, left, width, height), the order some detectors emit.
    pub fn tlwh(mut self, top: f32, left: f32, width: f32, height: f32) -> Self {
        self.rect = Rect::new(left, top, width, height);
        self
    }

    pub fn rect(mut self, rect: Rect) -> Self {
        self.rect = rect;
        self
    }

    pub fn class_id(mut self, class_id: i32) -> Self {
        self.class_id = class_id;
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn mask(mut self, mask: Mask) -> Self {
        self.mask = Some(mask);
        self
    }

    /// Border color; red when unset.
    pub fn border_color(mut self, color: Color) -> Self {
        self.border_color = Some(color);
        self
    }

    pub fn build(self) -> Detection {
        Detection {
            label: self.label,
            mask: self.mask,
            border_color: self.border_color.unwrap_or(Color::RED),
            ..Detection::new(self.class_id, self.rect)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;

    #[test]
    fn test_corner_box() {
        let det = DetectionBuilder::new()
            .tlbr(10.0, 20.0, 50.0, 80.0)
            .class_id(2)
            .label("person")
            .build();

        assert_eq!(det.rect, Rect::new(10.0, 20.0, 40.0, 60.0));
        assert_eq!(det.class_id, 2);
        assert_eq!(det.label_text(), "person");
        assert_eq!(det.border_color, Color::RED);
        assert!(det.mask.is_none());
    }

    #[test]
    fn test_box_formats_agree() {
        let a = DetectionBuilder::new().tlwh(20.0, 10.0, 40.0, 60.0).build();
        let b = DetectionBuilder::new().xywh(30.0, 50.0, 40.0, 60.0).build();
        let c = DetectionBuilder::new().rect(Rect::new(10.0, 20.0, 40.0, 60.0)).build();
        assert_eq!(a.rect, b.rect);
        assert_eq!(b.rect, c.rect);
        assert_eq!(a.label_text(), "");
    }

    #[test]
    fn test_mask_and_color() {
        let det = DetectionBuilder::new()
            .tlbr(0.0, 0.0, 2.0, 2.0)
            .mask(Mask::new(Array2::from_elem((2, 2), 0.9), 0.5))
            .border_color(Color::WHITE)
            .build();
        assert_eq!(det.border_color, Color::WHITE);
        assert!(det.drawable_mask().is_some());
    }
}
