//! High-level error types

use std::time::Duration;

use fplock_types::StoreError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Protocol error: {0}")]
    Protocol(#[from] fplock_core::Error),

    #[error("Transport error: {0}")]
    Transport(#[from] fplock_transport::Error),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// The module did not produce `expected` bytes within the read deadline
    #[error("Timed out waiting for {expected} bytes (deadline {deadline:?})")]
    Timeout { expected: usize, deadline: Duration },

    /// The running workflow was asked to stop
    #[error("Operation cancelled")]
    Cancelled,

    /// The verification loop did not release the channel within the grace
    /// period; it is still running and may be reclaimed again later
    #[error("Verification loop did not release the sensor within {grace:?}")]
    HandoffTimeout { grace: Duration },

    /// The verification task died without returning the sensor
    #[error("Verification task failed; sensor channel lost")]
    ChannelLost,
}

impl Error {
    /// Check whether this is a cancellation rather than a fault
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// Check whether this is a response-read timeout
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}
