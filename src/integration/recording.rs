//! In-memory backend that records draw calls instead of painting.

use std::fmt;

use log::trace;

use super::RenderBackend;
use crate::overlay::{
    ArrowParams, CircleParams, ClockParams, ColorPalette, LineParams, MaskParams, PrimitiveKind,
    RectParams, RenderMode, TextParams,
};

/// One submitted batch.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Rectangles(Vec<RectParams>),
    Masks(Vec<MaskParams>),
    Text(Vec<TextParams>),
    Lines(Vec<LineParams>),
    Arrows(Vec<ArrowParams>),
    Circles(Vec<CircleParams>),
}

impl DrawCall {
    pub fn kind(&self) -> PrimitiveKind {
        match self {
            Self::Rectangles(_) => PrimitiveKind::Rectangle,
            Self::Masks(_) => PrimitiveKind::Mask,
            Self::Text(_) => PrimitiveKind::Text,
            Self::Lines(_) => PrimitiveKind::Line,
            Self::Arrows(_) => PrimitiveKind::Arrow,
            Self::Circles(_) => PrimitiveKind::Circle,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Rectangles(b) => b.len(),
            Self::Masks(b) => b.len(),
            Self::Text(b) => b.len(),
            Self::Lines(b) => b.len(),
            Self::Arrows(b) => b.len(),
            Self::Circles(b) => b.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Failure injected into a [`RecordingBackend`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordingError(pub String);

impl fmt::Display for RecordingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for RecordingError {}

/// Backend that keeps every batch it receives, in submission order.
///
/// Useful for tests and dry runs; failures can be injected per kind.
#[derive(Debug, Default)]
pub struct RecordingBackend {
    calls: Vec<DrawCall>,
    modes: Vec<RenderMode>,
    integrated: bool,
    activations: usize,
    frame_size: Option<(u32, u32)>,
    clock: Option<ClockParams>,
    palette: Option<ColorPalette>,
    released: bool,
    fail_kind: Option<PrimitiveKind>,
    fail_activate: bool,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend reporting an integrated-memory device.
    pub fn integrated() -> Self {
        Self {
            integrated: true,
            ..Self::default()
        }
    }

    /// Fail every draw call of `kind`.
    pub fn fail_on(&mut self, kind: PrimitiveKind) {
        self.fail_kind = Some(kind);
    }

    /// Fail every context activation.
    pub fn fail_activation(&mut self) {
        self.fail_activate = true;
    }

    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    /// Mode each call in [`calls`](Self::calls) was tagged with.
    pub fn modes(&self) -> &[RenderMode] {
        &self.modes
    }

    pub fn calls_of(&self, kind: PrimitiveKind) -> impl Iterator<Item = &DrawCall> {
        self.calls.iter().filter(move |c| c.kind() == kind)
    }

    pub fn clear(&mut self) {
        self.calls.clear();
        self.modes.clear();
    }

    pub fn activations(&self) -> usize {
        self.activations
    }

    pub fn frame_size(&self) -> Option<(u32, u32)> {
        self.frame_size
    }

    pub fn clock(&self) -> Option<&ClockParams> {
        self.clock.as_ref()
    }

    pub fn palette(&self) -> Option<&ColorPalette> {
        self.palette.as_ref()
    }

    pub fn is_released(&self) -> bool {
        self.released
    }

    fn record(&mut self, mode: RenderMode, call: DrawCall) -> Result<(), RecordingError> {
        let kind = call.kind();
        if self.fail_kind == Some(kind) {
            return Err(RecordingError(format!("injected {} failure", kind)));
        }
        trace!("recorded {} batch of {}", kind, call.len());
        self.calls.push(call);
        self.modes.push(mode);
        Ok(())
    }
}

impl RenderBackend for RecordingBackend {
    type Surface = ();
    type Error = RecordingError;

    fn is_integrated(&self) -> bool {
        self.integrated
    }

    fn make_current(&mut self) -> Result<(), Self::Error> {
        if self.fail_activate {
            return Err(RecordingError("injected activation failure".to_string()));
        }
        self.activations += 1;
        Ok(())
    }

    fn configure(&mut self, width: u32, height: u32) -> Result<(), Self::Error> {
        self.frame_size = Some((width, height));
        Ok(())
    }

    fn set_clock_params(&mut self, clock: &ClockParams) -> Result<(), Self::Error> {
        self.clock = Some(clock.clone());
        Ok(())
    }

    fn init_hw_blend_colors(&mut self, palette: &ColorPalette) -> Result<(), Self::Error> {
        self.palette = Some(palette.clone());
        Ok(())
    }

    fn release(&mut self) -> Result<(), Self::Error> {
        self.released = true;
        Ok(())
    }

    fn draw_rectangles(
        &mut self,
        _surface: &mut (),
        mode: RenderMode,
        batch: &[RectParams],
    ) -> Result<(), Self::Error> {
        self.record(mode, DrawCall::Rectangles(batch.to_vec()))
    }

    fn draw_masks(
        &mut self,
        _surface: &mut (),
        mode: RenderMode,
        batch: &[MaskParams],
    ) -> Result<(), Self::Error> {
        self.record(mode, DrawCall::Masks(batch.to_vec()))
    }

    fn draw_text(
        &mut self,
        _surface: &mut (),
        mode: RenderMode,
        batch: &[TextParams],
    ) -> Result<(), Self::Error> {
        self.record(mode, DrawCall::Text(batch.to_vec()))
    }

    fn draw_lines(
        &mut self,
        _surface: &mut (),
        mode: RenderMode,
        batch: &[LineParams],
    ) -> Result<(), Self::Error> {
        self.record(mode, DrawCall::Lines(batch.to_vec()))
    }

    fn draw_arrows(
        &mut self,
        _surface: &mut (),
        mode: RenderMode,
        batch: &[ArrowParams],
    ) -> Result<(), Self::Error> {
        self.record(mode, DrawCall::Arrows(batch.to_vec()))
    }

    fn draw_circles(
        &mut self,
        _surface: &mut (),
        mode: RenderMode,
        batch: &[CircleParams],
    ) -> Result<(), Self::Error> {
        self.record(mode, DrawCall::Circles(batch.to_vec()))
    }
}
