//! Draw primitives and the per-frame inputs they are built from.

use std::fmt;

use ndarray::Array2;

use crate::overlay::color::Color;
use crate::overlay::rect::Rect;

/// Border width applied to detection boxes unless configured otherwise.
pub const DEFAULT_BORDER_WIDTH: u32 = 4;

/// Font size used for detection labels.
pub const DEFAULT_LABEL_FONT_SIZE: u32 = 12;

/// The six primitive kinds, in terminal draw priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Rectangle,
    Mask,
    Text,
    Line,
    Arrow,
    Circle,
}

impl PrimitiveKind {
    pub const ALL: [PrimitiveKind; 6] = [
        PrimitiveKind::Rectangle,
        PrimitiveKind::Mask,
        PrimitiveKind::Text,
        PrimitiveKind::Line,
        PrimitiveKind::Arrow,
        PrimitiveKind::Circle,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rectangle => "rectangle",
            Self::Mask => "mask",
            Self::Text => "text",
            Self::Line => "line",
            Self::Arrow => "arrow",
            Self::Circle => "circle",
        }
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rectangle draw request.
#[derive(Debug, Clone, PartialEq)]
pub struct RectParams {
    pub rect: Rect,
    pub border_width: u32,
    pub border_color: Color,
    /// Fill color; set from the palette in hardware-blend mode.
    pub bg_color: Option<Color>,
    /// Index of the palette entry that supplied `bg_color`.
    pub color_id: Option<usize>,
}

impl RectParams {
    pub fn new(rect: Rect, border_width: u32, border_color: Color) -> Self {
        Self {
            rect,
            border_width,
            border_color,
            bg_color: None,
            color_id: None,
        }
    }

    pub fn with_background(mut self, color_id: usize, color: Color) -> Self {
        self.color_id = Some(color_id);
        self.bg_color = Some(color);
        self
    }
}

/// Instance segmentation mask, one probability per pixel of the object box.
#[derive(Debug, Clone, PartialEq)]
pub struct Mask {
    pub data: Array2<f32>,
    /// Pixels strictly above this value are painted.
    pub threshold: f32,
}

impl Mask {
    pub fn new(data: Array2<f32>, threshold: f32) -> Self {
        Self { data, threshold }
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Mask draw request: the mask plus the box it is stretched over.
#[derive(Debug, Clone, PartialEq)]
pub struct MaskParams {
    pub rect: RectParams,
    pub mask: Mask,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FontParams {
    pub name: String,
    pub size: u32,
    pub color: Color,
}

impl Default for FontParams {
    fn default() -> Self {
        Self {
            name: "Serif".to_string(),
            size: DEFAULT_LABEL_FONT_SIZE,
            color: Color::WHITE,
        }
    }
}

/// Text draw request anchored at its top-left corner.
#[derive(Debug, Clone, PartialEq)]
pub struct TextParams {
    pub text: String,
    pub x_offset: f32,
    pub y_offset: f32,
    pub font: FontParams,
    pub bg_color: Option<Color>,
}

impl TextParams {
    pub fn new(text: impl Into<String>, x_offset: f32, y_offset: f32) -> Self {
        Self {
            text: text.into(),
            x_offset,
            y_offset,
            font: FontParams::default(),
            bg_color: None,
        }
    }

    /// Label placed on the box's left edge, above it unless the box hugs the
    /// top of the frame.
    pub fn label_for(rect: &Rect, text: impl Into<String>) -> Self {
        let y = if rect.top > 20.0 {
            rect.top - 10.0
        } else {
            rect.top + 20.0
        };
        let mut params = Self::new(text, rect.left, y);
        params.bg_color = Some(Color::BLACK);
        params
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineParams {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
    pub width: u32,
    pub color: Color,
}

/// Which end(s) of an arrow carry a head.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArrowHead {
    Start,
    #[default]
    End,
    Both,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArrowParams {
    pub line: LineParams,
    pub head: ArrowHead,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CircleParams {
    pub center_x: f32,
    pub center_y: f32,
    pub radius: f32,
    pub width: u32,
    pub color: Color,
    pub bg_color: Option<Color>,
}

/// One detected object, as supplied by the detector for a frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    pub class_id: i32,
    pub label: Option<String>,
    pub rect: Rect,
    pub mask: Option<Mask>,
    pub border_color: Color,
}

impl Detection {
    pub fn new(class_id: i32, rect: Rect) -> Self {
        Self {
            class_id,
            label: None,
            rect,
            mask: None,
            border_color: Color::RED,
        }
    }

    /// Label text, empty when the detector supplied none.
    pub fn label_text(&self) -> &str {
        self.label.as_deref().unwrap_or("")
    }

    /// The mask, if one is attached and it has at least one pixel.
    pub fn drawable_mask(&self) -> Option<&Mask> {
        self.mask.as_ref().filter(|m| !m.is_empty())
    }
}

/// Overlay primitives requested by the display layer for a frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OverlayRequest {
    pub rects: Vec<RectParams>,
    pub texts: Vec<TextParams>,
    pub lines: Vec<LineParams>,
    pub arrows: Vec<ArrowParams>,
    pub circles: Vec<CircleParams>,
}

/// Everything to annotate on one frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameAnnotations {
    pub detections: Vec<Detection>,
    pub overlays: Vec<OverlayRequest>,
}

impl FrameAnnotations {
    pub fn new(detections: Vec<Detection>) -> Self {
        Self {
            detections,
            overlays: Vec::new(),
        }
    }

    pub fn with_overlay(mut self, overlay: OverlayRequest) -> Self {
        self.overlays.push(overlay);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_placement() {
        let above = TextParams::label_for(&Rect::new(5.0, 50.0, 10.0, 10.0), "car");
        assert_eq!((above.x_offset, above.y_offset), (5.0, 40.0));

        let below = TextParams::label_for(&Rect::new(5.0, 8.0, 10.0, 10.0), "car");
        assert_eq!(below.y_offset, 28.0);
    }

    #[test]
    fn test_empty_mask_is_not_drawable() {
        let mut det = Detection::new(0, Rect::new(0.0, 0.0, 4.0, 4.0));
        det.mask = Some(Mask::new(Array2::zeros((0, 0)), 0.5));
        assert!(det.drawable_mask().is_none());

        det.mask = Some(Mask::new(Array2::zeros((2, 2)), 0.5));
        assert!(det.drawable_mask().is_some());
    }

    #[test]
    fn test_kind_order() {
        let names: Vec<_> = PrimitiveKind::ALL.iter().map(|k| k.as_str()).collect();
        assert_eq!(names, ["rectangle", "mask", "text", "line", "arrow", "circle"]);
    }
}
