//! Error types for configuration, frame processing and metadata delivery.

use thiserror::Error;

use crate::overlay::PrimitiveKind;

/// Boxed error from an external collaborator (backend or sink).
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Invalid configuration. Raised while building a pipeline, never per frame.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("palette group {group}: class id {class_id} is not below the limit of {bound}")]
    ClassIdOutOfRange {
        group: usize,
        class_id: u32,
        bound: usize,
    },
    #[error("palette has more than {bound} entries")]
    TooManyPaletteEntries { bound: usize },
    #[error("palette group {group}: {reason}")]
    MalformedPalette { group: usize, reason: String },
    #[error("palette group {group}: class id {class_id} already has a color")]
    DuplicateClassId { group: usize, class_id: u32 },
    #[error("clock font size {size} exceeds the maximum of {max}")]
    FontSizeOutOfRange { size: u32, max: u32 },
    #[error("unable to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Failure that aborts the current frame.
#[derive(Debug, Error)]
pub enum FrameError {
    #[error("unable to make the render context current: {0}")]
    Device(#[source] BoxError),
    #[error("unable to draw {kind} batch of {count}: {source}")]
    Draw {
        kind: PrimitiveKind,
        count: usize,
        #[source]
        source: BoxError,
    },
}

/// Metadata delivery failure. Reported, never fatal to the frame.
#[derive(Debug, Error)]
pub enum PublishError {
    #[error("metadata sink is not connected")]
    NotConnected,
    #[error("unable to serialize frame metadata: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("metadata sink transport error: {0}")]
    Transport(#[source] BoxError),
    #[error("metadata sink rejected message with status {status}")]
    Rejected { status: i32 },
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("pipeline used before initialize()")]
    NotInitialized,
    #[error("unable to connect metadata sink: {0}")]
    Connect(#[source] BoxError),
    #[error("unable to configure render backend: {0}")]
    Backend(#[source] BoxError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Frame(#[from] FrameError),
}
