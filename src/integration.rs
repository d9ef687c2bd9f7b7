//! Integration module connecting external collaborators with the annotation
//! pipeline.
//!
//! This module provides the traits a rendering backend and an annotation
//! source implement, plus in-memory implementations for tests and dry runs.

mod backend;
mod builder;
mod pipeline;
mod recording;
mod source;

pub use backend::{DrawTarget, RenderBackend};
pub use builder::DetectionBuilder;
pub use pipeline::{AnnotationPipeline, FrameReport, PublishOutcome};
pub use recording::{DrawCall, RecordingBackend, RecordingError};
pub use source::{AnnotationSource, IntoFrameAnnotations, VecSource};
