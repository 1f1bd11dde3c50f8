//! Frame encoding and decoding
//!
//! The module speaks three frame shapes over the serial link. Command and
//! status frames are fixed at 26 bytes; data frames grow with their payload.
//!
//! ```text
//! Command frame (host → module), 26 bytes:
//! ┌──────────┬──────────┬──────────┬──────────┬──────────────┬──────────┐
//! │  Marker  │ Reserved │   Code   │  Length  │   Payload    │ Checksum │
//! │ 2 bytes  │ 2 bytes  │ 2 bytes  │ 2 bytes  │   16 bytes   │ 2 bytes  │
//! │ (LE u16) │          │ (LE u16) │ (LE u16) │ (zero-pad)   │ (LE u16) │
//! └──────────┴──────────┴──────────┴──────────┴──────────────┴──────────┘
//!
//! Data frame (either direction), 10 + N bytes:
//! ┌──────────┬──────────┬──────────┬──────────┬──────────────┬──────────┐
//! │  Marker  │ Reserved │   Code   │  Length  │   Payload    │ Checksum │
//! │ 2 bytes  │ 2 bytes  │ 2 bytes  │ 2 bytes  │   N bytes    │ 2 bytes  │
//! └──────────┴──────────┴──────────┴──────────┴──────────────┴──────────┘
//! ```
//!
//! Responses reuse the same shapes with their own markers; bytes [8,10)
//! hold the result code and the payload spans [10, len-2). The checksum is
//! the sum of all preceding bytes mod 65536 (see [`crate::checksum`]); the
//! module does not reject bad markers, so decoding relies on the checksum
//! alone.

use bytes::{BufMut, Bytes, BytesMut};
use std::fmt;
use tracing::trace;

use crate::{
    checksum,
    command::Command,
    constants::*,
    error::{Error, Result},
    result::ResultCode,
};

/// A decoded response frame.
///
/// Status responses are zero-padded to 26 bytes on the wire, so their
/// payload always decodes to 14 bytes; data responses carry exactly the
/// announced payload.
#[derive(Clone, PartialEq, Eq)]
pub struct Response {
    /// Result code reported by the module
    pub code: ResultCode,

    /// Payload bytes between the result code and the checksum
    pub payload: Bytes,
}

impl Response {
    /// Read a little-endian u16 field out of the payload.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PayloadTooShort`] if the payload does not reach
    /// `offset + 2`.
    pub fn payload_u16(&self, offset: usize) -> Result<u16> {
        if self.payload.len() < offset + 2 {
            return Err(Error::PayloadTooShort {
                expected: offset + 2,
                actual: self.payload.len(),
            });
        }

        Ok(u16::from_le_bytes([
            self.payload[offset],
            self.payload[offset + 1],
        ]))
    }
}

impl fmt::Debug for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Response")
            .field("code", &self.code)
            .field("payload_len", &self.payload.len())
            .finish()
    }
}

/// Encode a fixed 26-byte command frame.
///
/// The payload is zero-padded to 16 bytes; the checksum covers the first
/// 24 bytes.
///
/// # Errors
///
/// Returns [`Error::PayloadTooLarge`] if the payload exceeds 16 bytes.
///
/// # Examples
///
/// ```
/// use fplock_core::{frame, Command};
///
/// let encoded = frame::encode_command(Command::GetImage, &[]).unwrap();
/// assert_eq!(encoded.len(), 26);
/// ```
pub fn encode_command(command: Command, payload: &[u8]) -> Result<BytesMut> {
    if payload.len() > COMMAND_PAYLOAD_MAX {
        return Err(Error::PayloadTooLarge {
            size: payload.len(),
            max: COMMAND_PAYLOAD_MAX,
        });
    }

    let mut buf = BytesMut::with_capacity(COMMAND_FRAME_LEN);

    buf.put_u16_le(MARKER_COMMAND);
    buf.put_u16_le(0); // Reserved
    buf.put_u16_le(command.into());
    buf.put_u16_le(payload.len() as u16);
    buf.put_slice(payload);
    buf.put_bytes(0, COMMAND_PAYLOAD_MAX - payload.len());

    let cks = checksum::sum(&buf);
    buf.put_u16_le(cks);

    trace!(command = %command, payload_len = payload.len(), "Encoded command frame");

    Ok(buf)
}

/// Encode a variable-length data frame (host → module).
///
/// The length field records the payload length only, not the header or
/// checksum; the checksum covers everything before it.
///
/// # Errors
///
/// Returns [`Error::PayloadTooLarge`] if the payload length does not fit
/// the 16-bit length field.
pub fn encode_data(command: Command, payload: &[u8]) -> Result<BytesMut> {
    if payload.len() > u16::MAX as usize {
        return Err(Error::PayloadTooLarge {
            size: payload.len(),
            max: u16::MAX as usize,
        });
    }

    let mut buf = BytesMut::with_capacity(FRAME_HEADER_LEN + payload.len() + CHECKSUM_LEN);

    buf.put_u16_le(MARKER_COMMAND_DATA);
    buf.put_u16_le(0); // Reserved
    buf.put_u16_le(command.into());
    buf.put_u16_le(payload.len() as u16);
    buf.put_slice(payload);

    let cks = checksum::sum(&buf);
    buf.put_u16_le(cks);

    trace!(command = %command, payload_len = payload.len(), "Encoded data frame");

    Ok(buf)
}

/// Decode a response frame of either shape.
///
/// Works for 26-byte status frames, 12-byte confirmations and full data
/// responses alike: the result code sits at bytes [8,10) and the payload
/// spans [10, len-2).
///
/// # Errors
///
/// Returns an error if:
/// - The buffer is shorter than the 12-byte minimum
/// - The trailing checksum does not match the byte sum
///
/// # Examples
///
/// ```
/// use fplock_core::{frame, Command, ResultCode};
///
/// let wire = frame::encode_status_response(
///     Command::GetImage,
///     ResultCode::Success,
///     &[],
/// ).unwrap();
///
/// let response = frame::decode_response(&wire).unwrap();
/// assert!(response.code.is_success());
/// ```
pub fn decode_response(buf: &[u8]) -> Result<Response> {
    if buf.len() < RESPONSE_OVERHEAD {
        return Err(Error::FrameTooShort {
            expected: RESPONSE_OVERHEAD,
            actual: buf.len(),
        });
    }

    let body = buf.len() - CHECKSUM_LEN;
    let received = u16::from_le_bytes([buf[body], buf[body + 1]]);
    let computed = checksum::sum(&buf[..body]);

    if computed != received {
        return Err(Error::ChecksumMismatch { computed, received });
    }

    let code = ResultCode::from(u16::from_le_bytes([
        buf[RESULT_CODE_OFFSET],
        buf[RESULT_CODE_OFFSET + 1],
    ]));
    let payload = Bytes::copy_from_slice(&buf[PAYLOAD_OFFSET..body]);

    let response = Response { code, payload };

    trace!(code = %response.code, payload_len = response.payload.len(), "Decoded response");

    Ok(response)
}

/// Encode the module's 26-byte status reply.
///
/// The host never sends these; simulated channels (tests, demos, mock
/// transports) use it to speak the module's half of the conversation.
///
/// # Errors
///
/// Returns [`Error::PayloadTooLarge`] if the payload exceeds 14 bytes.
pub fn encode_status_response(
    command: Command,
    code: ResultCode,
    payload: &[u8],
) -> Result<BytesMut> {
    if payload.len() > RESPONSE_PAYLOAD_MAX {
        return Err(Error::PayloadTooLarge {
            size: payload.len(),
            max: RESPONSE_PAYLOAD_MAX,
        });
    }

    let mut buf = BytesMut::with_capacity(RESPONSE_FRAME_LEN);

    buf.put_u16_le(MARKER_RESPONSE);
    buf.put_u16_le(0); // Reserved
    buf.put_u16_le(command.into());
    buf.put_u16_le((RESULT_CODE_LEN + payload.len()) as u16);
    buf.put_u16_le(code.code());
    buf.put_slice(payload);
    buf.put_bytes(0, RESPONSE_PAYLOAD_MAX - payload.len());

    let cks = checksum::sum(&buf);
    buf.put_u16_le(cks);

    Ok(buf)
}

/// Encode the module's data reply (template transfer, confirmations).
///
/// A confirmation is simply an empty-payload data reply: 12 bytes total.
/// Like [`encode_status_response`], this exists for simulated channels.
///
/// # Errors
///
/// Returns [`Error::PayloadTooLarge`] if the payload length plus the
/// result code does not fit the 16-bit length field.
pub fn encode_data_response(
    command: Command,
    code: ResultCode,
    payload: &[u8],
) -> Result<BytesMut> {
    if payload.len() > u16::MAX as usize - RESULT_CODE_LEN {
        return Err(Error::PayloadTooLarge {
            size: payload.len(),
            max: u16::MAX as usize - RESULT_CODE_LEN,
        });
    }

    let mut buf =
        BytesMut::with_capacity(FRAME_HEADER_LEN + RESULT_CODE_LEN + payload.len() + CHECKSUM_LEN);

    buf.put_u16_le(MARKER_RESPONSE_DATA);
    buf.put_u16_le(0); // Reserved
    buf.put_u16_le(command.into());
    buf.put_u16_le((RESULT_CODE_LEN + payload.len()) as u16);
    buf.put_u16_le(code.code());
    buf.put_slice(payload);

    let cks = checksum::sum(&buf);
    buf.put_u16_le(cks);

    Ok(buf)
}
