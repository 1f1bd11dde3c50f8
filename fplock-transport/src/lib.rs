//! Transport layer for the fingerprint module
//!
//! Exposes the byte-oriented half-duplex channel the protocol engine
//! drives: serial in production, a scripted in-memory channel for tests
//! and demos.

pub mod error;
pub mod mock;
pub mod serial;

pub use error::{Error, Result};
pub use mock::ScriptedChannel;
pub use serial::SerialChannel;

use async_trait::async_trait;

/// Byte-oriented duplex channel to the module.
///
/// The protocol has no framing delimiter, so consumers read by exact
/// length: poll [`bytes_available`](Self::bytes_available) until enough
/// bytes queued up, then [`read_exact`](Self::read_exact). Methods take
/// `&mut self` since one conversation at a time is a protocol
/// requirement, and exclusive access makes it a compile-time one.
#[async_trait]
pub trait SensorChannel: Send {
    /// Number of received bytes waiting to be read
    async fn bytes_available(&mut self) -> Result<usize>;

    /// Read exactly `buf.len()` bytes
    async fn read_exact(&mut self, buf: &mut [u8]) -> Result<()>;

    /// Write all bytes and flush
    async fn write_all(&mut self, data: &[u8]) -> Result<()>;
}
