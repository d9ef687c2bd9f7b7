//! Trait for the downstream message consumer and two simple implementations.

use std::convert::Infallible;
use std::io::Write;

use log::debug;

/// Broker connection settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionParams {
    pub host: String,
    pub port: u16,
    pub vhost: String,
    pub user: String,
    pub password: String,
}

/// Status code returned by the sink for one message; zero means accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeliveryStatus(pub i32);

impl DeliveryStatus {
    pub const OK: DeliveryStatus = DeliveryStatus(0);

    pub fn is_ok(&self) -> bool {
        self.0 == 0
    }
}

/// Message sink receiving serialized frame metadata.
///
/// The connection is opened once through [`connect`](Self::connect) and then
/// passed back into every [`publish`](Self::publish).
pub trait MetadataSink {
    /// Handle of an established connection.
    type Connection;

    /// Error type for connection and transport failures.
    type Error: std::error::Error + Send + Sync + 'static;

    fn connect(&mut self, params: &ConnectionParams) -> Result<Self::Connection, Self::Error>;

    /// Deliver `payload` to `destination`. Blocks until the sink answers.
    fn publish(
        &mut self,
        connection: &mut Self::Connection,
        destination: &str,
        payload: &[u8],
    ) -> Result<DeliveryStatus, Self::Error>;

    fn disconnect(&mut self, connection: Self::Connection) -> Result<(), Self::Error> {
        drop(connection);
        Ok(())
    }
}

/// Message kept by a [`MemorySink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredMessage {
    pub destination: String,
    pub payload: Vec<u8>,
}

/// Sink that keeps every published message in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    messages: Vec<StoredMessage>,
    connects: usize,
    disconnects: usize,
    status: Option<DeliveryStatus>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer every publish with `status` (the message is still stored).
    pub fn respond_with(&mut self, status: DeliveryStatus) {
        self.status = Some(status);
    }

    pub fn messages(&self) -> &[StoredMessage] {
        &self.messages
    }

    pub fn connects(&self) -> usize {
        self.connects
    }

    pub fn disconnects(&self) -> usize {
        self.disconnects
    }
}

impl MetadataSink for MemorySink {
    type Connection = ();
    type Error = Infallible;

    fn connect(&mut self, params: &ConnectionParams) -> Result<(), Self::Error> {
        debug!("memory sink connect to {}:{}", params.host, params.port);
        self.connects += 1;
        Ok(())
    }

    fn publish(
        &mut self,
        _connection: &mut (),
        destination: &str,
        payload: &[u8],
    ) -> Result<DeliveryStatus, Self::Error> {
        self.messages.push(StoredMessage {
            destination: destination.to_string(),
            payload: payload.to_vec(),
        });
        Ok(self.status.unwrap_or(DeliveryStatus::OK))
    }

    fn disconnect(&mut self, _connection: ()) -> Result<(), Self::Error> {
        self.disconnects += 1;
        Ok(())
    }
}

/// Sink writing one JSON message per line to any writer.
#[derive(Debug)]
pub struct WriterSink<W: Write> {
    writer: W,
}

impl<W: Write> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> MetadataSink for WriterSink<W> {
    type Connection = ();
    type Error = std::io::Error;

    fn connect(&mut self, _params: &ConnectionParams) -> Result<(), Self::Error> {
        Ok(())
    }

    fn publish(
        &mut self,
        _connection: &mut (),
        _destination: &str,
        payload: &[u8],
    ) -> Result<DeliveryStatus, Self::Error> {
        self.writer.write_all(payload)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(DeliveryStatus::OK)
    }
}
