//! Coordinate metadata: per-object records, the JSON message schema and the
//! publisher delivering one message per frame to a sink.

mod message;
mod publisher;
mod record;
mod sink;

pub use message::{Coordinate, FrameMessage, InferredObject, Point};
pub use publisher::{MetadataPublisher, PublishStatus};
pub use record::{AnnotationRecord, Corners};
pub use sink::{
    ConnectionParams, DeliveryStatus, MemorySink, MetadataSink, StoredMessage, WriterSink,
};
