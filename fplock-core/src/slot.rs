//! Module buffer slot identifiers

use std::fmt;

/// One of the module's three internal RAM buffers.
///
/// Each slot can hold a single captured or partial template. Enrollment
/// fills all three (one per scan) before merging them into `Primary`;
/// matching compares `Primary` against `Secondary`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum BufferSlot {
    Primary = 0,
    Secondary = 1,
    Tertiary = 2,
}

impl BufferSlot {
    /// Slot index as used inside frame payloads
    pub fn index(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for BufferSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RamBuffer{}", self.index())
    }
}
