//! Trait for the rendering backend that paints batched primitives.

use crate::error::FrameError;
use crate::overlay::{
    ArrowParams, CircleParams, ClockParams, ColorPalette, FrameContext, LineParams, MaskParams,
    RectParams, RenderMode, TextParams,
};

/// Rendering backend that paints batches of primitives onto a frame surface.
///
/// Implement this trait to connect any OSD engine (CPU rasterizer, GPU
/// kernels, hardware blender) to the annotation pipeline.
///
/// # Example
///
/// ```ignore
/// use osd_coord_rs::{RectParams, RenderBackend, RenderMode};
///
/// struct MyBackend {
///     // Your drawing context here
/// }
///
/// impl RenderBackend for MyBackend {
///     type Surface = MyFrameBuffer;
///     type Error = std::io::Error;
///
///     fn draw_rectangles(
///         &mut self,
///         surface: &mut MyFrameBuffer,
///         mode: RenderMode,
///         batch: &[RectParams],
///     ) -> Result<(), Self::Error> {
///         // Paint the batch
///         Ok(())
///     }
///     // ...
/// }
/// ```
pub trait RenderBackend {
    /// Frame buffer the primitives are painted onto.
    type Surface;

    /// Error type for device and draw failures.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Whether the device shares memory with the host (required for
    /// hardware blending).
    fn is_integrated(&self) -> bool {
        false
    }

    /// Bind the backend's execution context to the calling thread.
    ///
    /// Called at frame start and before every batch submission, since another
    /// stage may have switched the current context in between.
    fn make_current(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Prepare for frames of the given size.
    fn configure(&mut self, _width: u32, _height: u32) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Clock overlay settings; the clock is painted on every text submission.
    fn set_clock_params(&mut self, _clock: &ClockParams) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Class colors used by the hardware blender.
    fn init_hw_blend_colors(&mut self, _palette: &ColorPalette) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Tear down the execution context.
    fn release(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn draw_rectangles(
        &mut self,
        surface: &mut Self::Surface,
        mode: RenderMode,
        batch: &[RectParams],
    ) -> Result<(), Self::Error>;

    fn draw_masks(
        &mut self,
        surface: &mut Self::Surface,
        mode: RenderMode,
        batch: &[MaskParams],
    ) -> Result<(), Self::Error>;

    /// Paint text strings. `batch` may be empty when only the clock is due.
    fn draw_text(
        &mut self,
        surface: &mut Self::Surface,
        mode: RenderMode,
        batch: &[TextParams],
    ) -> Result<(), Self::Error>;

    fn draw_lines(
        &mut self,
        surface: &mut Self::Surface,
        mode: RenderMode,
        batch: &[LineParams],
    ) -> Result<(), Self::Error>;

    fn draw_arrows(
        &mut self,
        surface: &mut Self::Surface,
        mode: RenderMode,
        batch: &[ArrowParams],
    ) -> Result<(), Self::Error>;

    fn draw_circles(
        &mut self,
        surface: &mut Self::Surface,
        mode: RenderMode,
        batch: &[CircleParams],
    ) -> Result<(), Self::Error>;
}

/// The backend, the frame surface and the frame context a batch is flushed to.
pub struct DrawTarget<'a, B: RenderBackend> {
    pub backend: &'a mut B,
    pub surface: &'a mut B::Surface,
    pub ctx: &'a FrameContext,
}

impl<'a, B: RenderBackend> DrawTarget<'a, B> {
    pub fn new(backend: &'a mut B, surface: &'a mut B::Surface, ctx: &'a FrameContext) -> Self {
        Self {
            backend,
            surface,
            ctx,
        }
    }

    /// Make the backend context current on this thread.
    pub fn activate(&mut self) -> Result<(), FrameError> {
        self.backend
            .make_current()
            .map_err(|e| FrameError::Device(Box::new(e)))
    }
}
