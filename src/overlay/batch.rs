//! Fixed-capacity primitive batches with flush-on-full.

use log::debug;

use crate::error::FrameError;
use crate::integration::{DrawTarget, RenderBackend};
use crate::overlay::primitives::{
    ArrowParams, CircleParams, LineParams, MaskParams, PrimitiveKind, RectParams, TextParams,
};
use crate::overlay::mode::RenderMode;

/// Maximum number of primitives of one kind submitted in a single draw call.
pub const MAX_OSD_ELEMS: usize = 1024;

/// A primitive type the backend can draw in batches.
pub trait DrawPrimitive: Sized {
    const KIND: PrimitiveKind;

    /// Hand `batch` to the backend's draw call for this kind.
    fn submit<B: RenderBackend>(
        backend: &mut B,
        surface: &mut B::Surface,
        mode: RenderMode,
        batch: &[Self],
    ) -> Result<(), B::Error>;
}

macro_rules! draw_primitive {
    ($ty:ty, $kind:expr, $method:ident) => {
        impl DrawPrimitive for $ty {
            const KIND: PrimitiveKind = $kind;

            fn submit<B: RenderBackend>(
                backend: &mut B,
                surface: &mut B::Surface,
                mode: RenderMode,
                batch: &[Self],
            ) -> Result<(), B::Error> {
                backend.$method(surface, mode, batch)
            }
        }
    };
}

draw_primitive!(RectParams, PrimitiveKind::Rectangle, draw_rectangles);
draw_primitive!(MaskParams, PrimitiveKind::Mask, draw_masks);
draw_primitive!(TextParams, PrimitiveKind::Text, draw_text);
draw_primitive!(LineParams, PrimitiveKind::Line, draw_lines);
draw_primitive!(ArrowParams, PrimitiveKind::Arrow, draw_arrows);
draw_primitive!(CircleParams, PrimitiveKind::Circle, draw_circles);

/// Ordered buffer of one primitive kind.
///
/// Never holds more than `capacity` items: the append that fills it submits
/// the whole batch and empties it. Storage is allocated once and reused.
#[derive(Debug)]
pub struct PrimitiveBatch<T> {
    items: Vec<T>,
    capacity: usize,
    flushes: usize,
}

impl<T: DrawPrimitive> Default for PrimitiveBatch<T> {
    fn default() -> Self {
        Self::new(MAX_OSD_ELEMS)
    }
}

impl<T: DrawPrimitive> PrimitiveBatch<T> {
    /// Create a batch flushing every `capacity` items (at least one).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            items: Vec::with_capacity(capacity),
            capacity,
            flushes: 0,
        }
    }

    /// Append `item`; submit and clear the batch if this fills it.
    ///
    /// Returns whether a flush happened.
    pub fn push<B: RenderBackend>(
        &mut self,
        item: T,
        target: &mut DrawTarget<'_, B>,
    ) -> Result<bool, FrameError> {
        self.items.push(item);
        if self.items.len() < self.capacity {
            return Ok(false);
        }
        self.flush(target)?;
        Ok(true)
    }

    /// Submit the current contents, in insertion order, and clear.
    ///
    /// Returns the number of primitives submitted.
    pub fn flush<B: RenderBackend>(
        &mut self,
        target: &mut DrawTarget<'_, B>,
    ) -> Result<usize, FrameError> {
        let count = self.items.len();
        target.activate()?;
        T::submit(target.backend, target.surface, target.ctx.mode, &self.items).map_err(|e| {
            FrameError::Draw {
                kind: T::KIND,
                count,
                source: Box::new(e),
            }
        })?;
        debug!(
            "frame {}: drew {} {} primitive(s)",
            target.ctx.frame_number,
            count,
            T::KIND
        );
        self.items.clear();
        self.flushes += 1;
        Ok(count)
    }

    /// End-of-frame flush: submits if anything is pending or `force` is set.
    ///
    /// Returns whether a flush happened.
    pub fn finish<B: RenderBackend>(
        &mut self,
        target: &mut DrawTarget<'_, B>,
        force: bool,
    ) -> Result<bool, FrameError> {
        if self.items.is_empty() && !force {
            return Ok(false);
        }
        self.flush(target)?;
        Ok(true)
    }

    /// Drop pending items and the flush counter, keeping the allocation.
    pub fn reset(&mut self) {
        self.items.clear();
        self.flushes = 0;
    }

    pub fn kind(&self) -> PrimitiveKind {
        T::KIND
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Flushes performed since the last [`reset`](Self::reset).
    pub fn flush_count(&self) -> usize {
        self.flushes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::integration::{DrawCall, RecordingBackend};
    use crate::overlay::{Color, FrameContext, LineParams};

    fn line(i: usize) -> LineParams {
        LineParams {
            x1: i as f32,
            y1: 0.0,
            x2: i as f32,
            y2: 10.0,
            width: 1,
            color: Color::WHITE,
        }
    }

    fn drawn_lines(call: &DrawCall) -> Vec<f32> {
        match call {
            DrawCall::Lines(batch) => batch.iter().map(|l| l.x1).collect(),
            other => panic!("unexpected draw call {:?}", other),
        }
    }

    #[test]
    fn test_full_batch_flushes_once_in_order() {
        let mut backend = RecordingBackend::new();
        let ctx = FrameContext::default();
        let mut surface = ();
        let mut target = DrawTarget::new(&mut backend, &mut surface, &ctx);
        let mut batch = PrimitiveBatch::new(4);

        let mut flushed = Vec::new();
        for i in 0..4 {
            flushed.push(batch.push(line(i), &mut target).unwrap());
        }

        assert_eq!(flushed, [false, false, false, true]);
        assert!(batch.is_empty());
        assert_eq!(batch.flush_count(), 1);
        assert_eq!(backend.calls().len(), 1);
        assert_eq!(drawn_lines(&backend.calls()[0]), [0.0, 1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_finish_emits_partial_batch() {
        let mut backend = RecordingBackend::new();
        let ctx = FrameContext::default();
        let mut surface = ();
        let mut target = DrawTarget::new(&mut backend, &mut surface, &ctx);
        let mut batch = PrimitiveBatch::new(8);

        for i in 0..3 {
            batch.push(line(i), &mut target).unwrap();
        }
        assert!(batch.finish(&mut target, false).unwrap());
        assert!(batch.is_empty());
        assert!(!batch.finish(&mut target, false).unwrap());

        assert_eq!(backend.calls().len(), 1);
        assert_eq!(drawn_lines(&backend.calls()[0]), [0.0, 1.0, 2.0]);
    }

    #[test]
    fn test_overflow_splits_into_batches() {
        let mut backend = RecordingBackend::new();
        let ctx = FrameContext::default();
        let mut surface = ();
        let mut target = DrawTarget::new(&mut backend, &mut surface, &ctx);
        let mut batch = PrimitiveBatch::new(3);

        for i in 0..7 {
            batch.push(line(i), &mut target).unwrap();
            assert!(batch.len() < batch.capacity());
        }
        batch.finish(&mut target, false).unwrap();

        let batches: Vec<_> = backend.calls().iter().map(drawn_lines).collect();
        assert_eq!(
            batches,
            vec![vec![0.0, 1.0, 2.0], vec![3.0, 4.0, 5.0], vec![6.0]]
        );
    }

    #[test]
    fn test_forced_finish_submits_empty_batch() {
        let mut backend = RecordingBackend::new();
        let ctx = FrameContext::default();
        let mut surface = ();
        let mut target = DrawTarget::new(&mut backend, &mut surface, &ctx);
        let mut batch: PrimitiveBatch<LineParams> = PrimitiveBatch::new(3);

        assert!(batch.finish(&mut target, true).unwrap());
        assert_eq!(backend.calls(), &[DrawCall::Lines(vec![])]);
    }

    #[test]
    fn test_draw_failure_is_reported_with_kind() {
        let mut backend = RecordingBackend::new();
        backend.fail_on(PrimitiveKind::Line);
        let ctx = FrameContext::default();
        let mut surface = ();
        let mut target = DrawTarget::new(&mut backend, &mut surface, &ctx);
        let mut batch = PrimitiveBatch::new(2);

        batch.push(line(0), &mut target).unwrap();
        let err = batch.push(line(1), &mut target).unwrap_err();
        assert!(matches!(
            err,
            FrameError::Draw {
                kind: PrimitiveKind::Line,
                count: 2,
                ..
            }
        ));
    }

    #[test]
    fn test_reset_keeps_allocation() {
        let mut batch: PrimitiveBatch<LineParams> = PrimitiveBatch::default();
        assert_eq!(batch.capacity(), MAX_OSD_ELEMS);
        batch.items.push(line(0));
        batch.reset();
        assert!(batch.is_empty());
        assert!(batch.items.capacity() >= MAX_OSD_ELEMS);
    }
}
