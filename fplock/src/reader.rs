//! Response reader
//!
//! The link has no framing delimiter, so a frame can only be read by
//! knowing its exact length up front: poll the channel's availability
//! until that many bytes queue up, then read them in one piece and let
//! the codec validate the checksum. On timeout nothing is consumed:
//! partial bytes stay in the channel for the caller to resynchronize on
//! or discard along with the connection.

use fplock_core::frame::{self, Response};
use fplock_transport::SensorChannel;
use tokio::time::Instant;
use tracing::{debug, trace};

use crate::{
    config::SensorConfig,
    error::{Error, Result},
};

/// Read and decode exactly one response frame of known length.
///
/// # Errors
///
/// - [`Error::Timeout`] if `expected_len` bytes do not arrive within the
///   configured read deadline
/// - [`Error::Protocol`] if the frame fails checksum validation
/// - [`Error::Transport`] if the channel itself fails
pub async fn read_response<C: SensorChannel>(
    channel: &mut C,
    expected_len: usize,
    config: &SensorConfig,
) -> Result<Response> {
    let deadline = Instant::now() + config.read_deadline;

    loop {
        let available = channel.bytes_available().await?;
        if available >= expected_len {
            break;
        }

        if Instant::now() >= deadline {
            debug!(expected_len, available, "Response read timed out");
            return Err(Error::Timeout {
                expected: expected_len,
                deadline: config.read_deadline,
            });
        }

        tokio::time::sleep(config.poll_interval).await;
    }

    let mut buf = vec![0u8; expected_len];
    channel.read_exact(&mut buf).await?;

    trace!(expected_len, "Read complete frame");

    Ok(frame::decode_response(&buf)?)
}
