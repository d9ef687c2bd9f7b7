//! MetadataPublisher: serializes one frame's records and hands them to the sink.

use log::{debug, info};

use super::message::FrameMessage;
use super::record::AnnotationRecord;
use super::sink::{ConnectionParams, MetadataSink};
use crate::error::{BoxError, PublishError};

/// Result of a successful publish call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishStatus {
    /// No records; the sink was not called.
    Skipped,
    /// The sink accepted a message of `bytes` bytes.
    Delivered { bytes: usize },
}

/// Owns the sink and its connection; publishes one message per frame.
pub struct MetadataPublisher<S: MetadataSink> {
    sink: S,
    params: ConnectionParams,
    destination: String,
    connection: Option<S::Connection>,
    buffer: Vec<u8>,
}

impl<S: MetadataSink> MetadataPublisher<S> {
    pub fn new(sink: S, params: ConnectionParams, destination: impl Into<String>) -> Self {
        Self {
            sink,
            params,
            destination: destination.into(),
            connection: None,
            buffer: Vec::new(),
        }
    }

    /// Open the sink connection if it is not open yet.
    pub fn connect(&mut self) -> Result<(), BoxError> {
        if self.connection.is_some() {
            return Ok(());
        }
        let connection = self.sink.connect(&self.params)?;
        info!(
            "metadata sink connected to {}:{} (vhost {}), publishing to {}",
            self.params.host, self.params.port, self.params.vhost, self.destination
        );
        self.connection = Some(connection);
        Ok(())
    }

    /// Drop the current connection, if any, and open a new one.
    pub fn reconnect(&mut self) -> Result<(), BoxError> {
        self.disconnect()?;
        self.connect()
    }

    pub fn disconnect(&mut self) -> Result<(), BoxError> {
        match self.connection.take() {
            Some(connection) => {
                self.sink.disconnect(connection)?;
                info!("metadata sink disconnected");
                Ok(())
            }
            None => Ok(()),
        }
    }

    pub fn is_connected(&self) -> bool {
        self.connection.is_some()
    }

    /// Publish one frame's records as a single message.
    ///
    /// Empty `records` never reach the sink. A non-zero sink status is
    /// returned as [`PublishError::Rejected`].
    pub fn publish(&mut self, records: &[AnnotationRecord]) -> Result<PublishStatus, PublishError> {
        let Some(message) = FrameMessage::from_records(records) else {
            return Ok(PublishStatus::Skipped);
        };
        let connection = self.connection.as_mut().ok_or(PublishError::NotConnected)?;

        self.buffer.clear();
        serde_json::to_writer(&mut self.buffer, &message)?;

        let status = self
            .sink
            .publish(connection, &self.destination, &self.buffer)
            .map_err(|e| PublishError::Transport(Box::new(e)))?;
        if !status.is_ok() {
            return Err(PublishError::Rejected { status: status.0 });
        }

        debug!(
            "frame {}: published {} record(s) to {}",
            message.frame_number,
            records.len(),
            self.destination
        );
        Ok(PublishStatus::Delivered {
            bytes: self.buffer.len(),
        })
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }
}
