//! Result codes returned by the fingerprint module

use std::fmt;

/// Result code carried at offset 8 of every response frame.
///
/// The documented codes get their own variants; anything else the module
/// returns is carried through numerically so callers see it verbatim.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ResultCode {
    /// Operation succeeded (for Match: the two buffers match)
    Success,

    /// Generic failure
    Fail,

    /// The two compared buffers do not match
    VerifyFail,

    /// Captured image too poor to work with
    BadQuality,

    /// Request named a buffer slot the module does not have
    InvalidBufferId,

    /// Undocumented code, passed through
    Other(u16),
}

impl ResultCode {
    /// Numeric code as found on the wire
    pub fn code(self) -> u16 {
        match self {
            Self::Success => 0x00,
            Self::Fail => 0x01,
            Self::VerifyFail => 0x10,
            Self::BadQuality => 0x19,
            Self::InvalidBufferId => 0x26,
            Self::Other(code) => code,
        }
    }

    /// Check whether this is the success code
    pub fn is_success(self) -> bool {
        matches!(self, Self::Success)
    }

    /// Get result name
    pub fn name(self) -> &'static str {
        match self {
            Self::Success => "SUCCESS",
            Self::Fail => "FAIL",
            Self::VerifyFail => "VERIFY_FAIL",
            Self::BadQuality => "BAD_QUALITY",
            Self::InvalidBufferId => "INVALID_BUFFER_ID",
            Self::Other(_) => "OTHER",
        }
    }
}

impl From<u16> for ResultCode {
    fn from(code: u16) -> Self {
        match code {
            0x00 => Self::Success,
            0x01 => Self::Fail,
            0x10 => Self::VerifyFail,
            0x19 => Self::BadQuality,
            0x26 => Self::InvalidBufferId,
            other => Self::Other(other),
        }
    }
}

impl fmt::Display for ResultCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(0x{:02X})", self.name(), self.code())
    }
}
