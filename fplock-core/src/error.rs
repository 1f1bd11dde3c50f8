//! Error types for fplock-core

use crate::command::Command;
use crate::result::ResultCode;

/// Result type alias for protocol operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core protocol errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Frame is too short to be valid
    #[error("Frame too short: expected at least {expected} bytes, got {actual} bytes")]
    FrameTooShort { expected: usize, actual: usize },

    /// Checksum verification failed
    #[error("Checksum mismatch: computed 0x{computed:04X}, received 0x{received:04X}")]
    ChecksumMismatch { computed: u16, received: u16 },

    /// Payload does not fit the frame
    #[error("Payload too large: {size} bytes (max: {max} bytes)")]
    PayloadTooLarge { size: usize, max: usize },

    /// Response payload shorter than the field being read from it
    #[error("Response payload too short: expected at least {expected} bytes, got {actual} bytes")]
    PayloadTooShort { expected: usize, actual: usize },

    /// The module reported a non-success result code
    #[error("{command} failed: {code}")]
    Device { command: Command, code: ResultCode },
}
