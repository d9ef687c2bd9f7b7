//! FrameAnnotationExtractor: turns a frame's detections and overlay requests
//! into batched draw calls and coordinate records.

use crate::error::FrameError;
use crate::integration::{DrawTarget, RenderBackend};
use crate::metadata::AnnotationRecord;
use crate::overlay::batch::{MAX_OSD_ELEMS, PrimitiveBatch};
use crate::overlay::mode::RenderMode;
use crate::overlay::palette::ColorPalette;
use crate::overlay::primitives::{
    ArrowParams, CircleParams, DEFAULT_BORDER_WIDTH, Detection, FrameAnnotations, LineParams,
    MaskParams, OverlayRequest, PrimitiveKind, RectParams, TextParams,
};

/// What the extractor draws and records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayToggles {
    pub bbox: bool,
    pub mask: bool,
    pub text: bool,
    pub clock: bool,
    pub coordinates: bool,
    pub border_width: u32,
}

impl Default for DisplayToggles {
    fn default() -> Self {
        Self {
            bbox: true,
            mask: false,
            text: true,
            clock: false,
            coordinates: true,
            border_width: DEFAULT_BORDER_WIDTH,
        }
    }
}

/// Number of draw calls issued per primitive kind during one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FlushSummary {
    counts: [usize; 6],
}

impl FlushSummary {
    pub fn get(&self, kind: PrimitiveKind) -> usize {
        self.counts[kind as usize]
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

/// Walks one frame's annotations, batching primitives per kind and collecting
/// an [`AnnotationRecord`] per detection.
///
/// Batches and the record list are owned here and reused across frames.
#[derive(Debug)]
pub struct FrameAnnotationExtractor {
    toggles: DisplayToggles,
    palette: ColorPalette,
    rects: PrimitiveBatch<RectParams>,
    masks: PrimitiveBatch<MaskParams>,
    texts: PrimitiveBatch<TextParams>,
    lines: PrimitiveBatch<LineParams>,
    arrows: PrimitiveBatch<ArrowParams>,
    circles: PrimitiveBatch<CircleParams>,
    records: Vec<AnnotationRecord>,
}

impl FrameAnnotationExtractor {
    pub fn new(toggles: DisplayToggles, palette: ColorPalette) -> Self {
        Self::with_capacity(toggles, palette, MAX_OSD_ELEMS)
    }

    /// Extractor whose batches flush every `capacity` primitives.
    pub fn with_capacity(toggles: DisplayToggles, palette: ColorPalette, capacity: usize) -> Self {
        Self {
            toggles,
            palette,
            rects: PrimitiveBatch::new(capacity),
            masks: PrimitiveBatch::new(capacity),
            texts: PrimitiveBatch::new(capacity),
            lines: PrimitiveBatch::new(capacity),
            arrows: PrimitiveBatch::new(capacity),
            circles: PrimitiveBatch::new(capacity),
            records: Vec::new(),
        }
    }

    /// Empty every batch and the record list without releasing storage.
    pub fn reset(&mut self) {
        self.rects.reset();
        self.masks.reset();
        self.texts.reset();
        self.lines.reset();
        self.arrows.reset();
        self.circles.reset();
        self.records.clear();
    }

    /// Batch every detection, then every overlay request, in supplied order.
    ///
    /// Full batches are drawn as they fill; partial ones stay pending until
    /// [`finish`](Self::finish). Returns the coordinate records of the frame.
    pub fn extract<B: RenderBackend>(
        &mut self,
        frame: &FrameAnnotations,
        target: &mut DrawTarget<'_, B>,
    ) -> Result<&[AnnotationRecord], FrameError> {
        self.reset();
        for detection in &frame.detections {
            self.extract_detection(detection, target)?;
        }
        for overlay in &frame.overlays {
            self.extract_overlay(overlay, target)?;
        }
        Ok(&self.records)
    }

    fn extract_detection<B: RenderBackend>(
        &mut self,
        det: &Detection,
        target: &mut DrawTarget<'_, B>,
    ) -> Result<(), FrameError> {
        if self.toggles.bbox {
            let mut rect = RectParams::new(det.rect, self.toggles.border_width, det.border_color);
            if target.ctx.mode == RenderMode::HwBlend {
                if let Some((idx, color)) = self.palette.lookup(det.class_id) {
                    rect = rect.with_background(idx, color);
                }
            }
            self.rects.push(rect, target)?;
        }

        if self.toggles.coordinates {
            self.records.push(AnnotationRecord::new(
                target.ctx.frame_number,
                det.label_text(),
                &det.rect,
            ));
        }

        if self.toggles.mask {
            if let Some(mask) = det.drawable_mask() {
                let params = MaskParams {
                    rect: RectParams::new(det.rect, 0, det.border_color),
                    mask: mask.clone(),
                };
                self.masks.push(params, target)?;
            }
        }

        if self.toggles.text && !det.label_text().is_empty() {
            let label = TextParams::label_for(&det.rect, det.label_text());
            self.texts.push(label, target)?;
        }
        Ok(())
    }

    fn extract_overlay<B: RenderBackend>(
        &mut self,
        overlay: &OverlayRequest,
        target: &mut DrawTarget<'_, B>,
    ) -> Result<(), FrameError> {
        for rect in &overlay.rects {
            self.rects.push(rect.clone(), target)?;
        }
        if self.toggles.text {
            for text in overlay.texts.iter().filter(|t| !t.is_empty()) {
                self.texts.push(text.clone(), target)?;
            }
        }
        for line in &overlay.lines {
            self.lines.push(line.clone(), target)?;
        }
        for arrow in &overlay.arrows {
            self.arrows.push(arrow.clone(), target)?;
        }
        for circle in &overlay.circles {
            self.circles.push(circle.clone(), target)?;
        }
        Ok(())
    }

    /// Draw every pending partial batch once, in draw priority order.
    ///
    /// The text batch is also submitted when empty if the clock is shown, since
    /// the backend paints the clock with each text submission.
    pub fn finish<B: RenderBackend>(
        &mut self,
        target: &mut DrawTarget<'_, B>,
    ) -> Result<FlushSummary, FrameError> {
        let force_text = self.toggles.text && self.toggles.clock;
        self.rects.finish(target, false)?;
        self.masks.finish(target, false)?;
        self.texts.finish(target, force_text)?;
        self.lines.finish(target, false)?;
        self.arrows.finish(target, false)?;
        self.circles.finish(target, false)?;
        Ok(self.flush_summary())
    }

    /// Draw calls issued so far in the current frame.
    pub fn flush_summary(&self) -> FlushSummary {
        let mut summary = FlushSummary::default();
        for kind in PrimitiveKind::ALL {
            summary.counts[kind as usize] = match kind {
                PrimitiveKind::Rectangle => self.rects.flush_count(),
                PrimitiveKind::Mask => self.masks.flush_count(),
                PrimitiveKind::Text => self.texts.flush_count(),
                PrimitiveKind::Line => self.lines.flush_count(),
                PrimitiveKind::Arrow => self.arrows.flush_count(),
                PrimitiveKind::Circle => self.circles.flush_count(),
            };
        }
        summary
    }

    /// Records collected for the current frame.
    pub fn records(&self) -> &[AnnotationRecord] {
        &self.records
    }

    /// Primitives waiting in the batch of `kind`.
    pub fn pending(&self, kind: PrimitiveKind) -> usize {
        match kind {
            PrimitiveKind::Rectangle => self.rects.len(),
            PrimitiveKind::Mask => self.masks.len(),
            PrimitiveKind::Text => self.texts.len(),
            PrimitiveKind::Line => self.lines.len(),
            PrimitiveKind::Arrow => self.arrows.len(),
            PrimitiveKind::Circle => self.circles.len(),
        }
    }

    pub fn toggles(&self) -> &DisplayToggles {
        &self.toggles
    }

    pub fn palette(&self) -> &ColorPalette {
        &self.palette
    }
}
