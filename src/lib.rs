//! Per-frame on-screen-display annotation with coordinate metadata publishing.
//!
//! Detections and overlay requests of a frame are grouped into fixed-capacity
//! batches per primitive kind and drawn through a [`RenderBackend`]; the box
//! corners and labels of every detection are serialized as one JSON message
//! per frame and handed to a [`MetadataSink`].

pub mod config;
pub mod error;
pub mod integration;
pub mod metadata;
pub mod overlay;

pub use config::{BrokerConfig, OsdConfig};
pub use error::{ConfigError, FrameError, PipelineError, PublishError};
pub use integration::{
    AnnotationPipeline, AnnotationSource, DetectionBuilder, FrameReport, PublishOutcome,
    RenderBackend,
};
pub use metadata::{AnnotationRecord, FrameMessage, MetadataPublisher, MetadataSink};
pub use overlay::{
    ColorPalette, Detection, FrameAnnotations, FrameContext, OverlayRequest, Rect, RenderMode,
};
