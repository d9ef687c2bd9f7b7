//! Rendering mode and the per-pipeline frame context.

use log::warn;
use serde::Deserialize;

use crate::overlay::color::Color;
use crate::overlay::primitives::FontParams;

/// Largest clock font size the backend accepts.
pub const MAX_FONT_SIZE: u32 = 60;

/// Where the backend paints: on the CPU, with GPU kernels, or through the
/// hardware blender of integrated-memory devices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    Cpu,
    #[default]
    Gpu,
    #[serde(rename = "hw")]
    HwBlend,
}

impl RenderMode {
    /// Hardware blending needs integrated memory; fall back to GPU otherwise.
    pub fn resolve(self, integrated: bool) -> RenderMode {
        match self {
            RenderMode::HwBlend if !integrated => {
                warn!("hardware blend requested on a discrete device, using GPU mode");
                RenderMode::Gpu
            }
            mode => mode,
        }
    }
}

/// State threaded through every draw call of a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameContext {
    pub width: u32,
    pub height: u32,
    /// Sequence number of the frame being processed, starting at 0.
    pub frame_number: u64,
    pub mode: RenderMode,
}

impl FrameContext {
    pub fn new(mode: RenderMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }
}

/// Clock overlay settings handed to the backend once at start-up.
#[derive(Debug, Clone, PartialEq)]
pub struct ClockParams {
    pub font: FontParams,
    pub x_offset: u32,
    pub y_offset: u32,
}

impl Default for ClockParams {
    fn default() -> Self {
        Self {
            font: FontParams {
                color: Color::RED,
                ..FontParams::default()
            },
            x_offset: 0,
            y_offset: 0,
        }
    }
}
