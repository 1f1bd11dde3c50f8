//! Protocol constants
//!
//! All multi-byte fields are little-endian on the wire.

use std::time::Duration;

/// Marker for a command frame (host → module)
pub const MARKER_COMMAND: u16 = 0xAA55;

/// Marker for a response frame (module → host)
pub const MARKER_RESPONSE: u16 = 0x55AA;

/// Marker for a data frame carrying a large payload (host → module)
pub const MARKER_COMMAND_DATA: u16 = 0xA55A;

/// Marker for a data frame carrying a large payload (module → host)
pub const MARKER_RESPONSE_DATA: u16 = 0x5AA5;

/// Total size of a command frame
pub const COMMAND_FRAME_LEN: usize = 26;

/// Total size of a status response frame
pub const RESPONSE_FRAME_LEN: usize = 26;

/// Maximum inline payload of a command frame
pub const COMMAND_PAYLOAD_MAX: usize = 16;

/// Maximum inline payload of a status response frame
pub const RESPONSE_PAYLOAD_MAX: usize = 14;

/// Header size shared by every frame family (marker, reserved, code, length)
pub const FRAME_HEADER_LEN: usize = 8;

/// Size of the trailing checksum
pub const CHECKSUM_LEN: usize = 2;

/// Size of the result code field in a response
pub const RESULT_CODE_LEN: usize = 2;

/// Byte offset of the result code in a response
pub const RESULT_CODE_OFFSET: usize = 8;

/// Byte offset of the payload in a response
pub const PAYLOAD_OFFSET: usize = 10;

/// Bytes surrounding the payload of a data response: header, result code
/// and checksum. A bare 12-byte confirmation frame is a data response with
/// an empty payload.
pub const RESPONSE_OVERHEAD: usize = FRAME_HEADER_LEN + RESULT_CODE_LEN + CHECKSUM_LEN;

/// Template size observed on the module (informational, not enforced)
pub const TYPICAL_TEMPLATE_LEN: usize = 498;

/// Default serial baud rate of the module
pub const DEFAULT_BAUD_RATE: u32 = 115_200;

/// Default deadline for one response read
pub const DEFAULT_READ_DEADLINE: Duration = Duration::from_secs(3);

/// Default interval between byte-availability polls
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(10);
