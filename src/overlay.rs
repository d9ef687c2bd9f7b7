//! Overlay primitives, per-kind batching and per-frame extraction.

mod batch;
mod color;
mod extractor;
mod mode;
mod palette;
mod primitives;
mod rect;

pub use batch::{DrawPrimitive, MAX_OSD_ELEMS, PrimitiveBatch};
pub use color::Color;
pub use extractor::{DisplayToggles, FlushSummary, FrameAnnotationExtractor};
pub use mode::{ClockParams, FrameContext, MAX_FONT_SIZE, RenderMode};
pub use palette::{ColorEntry, ColorPalette, DEFAULT_PALETTE, MAX_BG_CLR};
pub use primitives::{
    ArrowHead, ArrowParams, CircleParams, DEFAULT_BORDER_WIDTH, Detection, FontParams,
    FrameAnnotations, LineParams, Mask, MaskParams, OverlayRequest, PrimitiveKind, RectParams,
    TextParams,
};
pub use rect::Rect;
