//! Frame checksum
//!
//! Every frame ends with the sum of all preceding bytes, modulo 65536,
//! stored little-endian. There is no ones-complement step and no word
//! grouping: the module sums raw bytes.

use crate::constants::CHECKSUM_LEN;

/// Sum `bytes` modulo 65536.
///
/// # Examples
///
/// ```
/// use fplock_core::checksum;
///
/// assert_eq!(checksum::sum(&[0x55, 0xAA, 0x20]), 0x011F);
/// ```
pub fn sum(bytes: &[u8]) -> u16 {
    bytes
        .iter()
        .fold(0u16, |acc, &b| acc.wrapping_add(u16::from(b)))
}

/// Verify the trailing little-endian checksum of a complete frame.
///
/// Returns `false` for frames shorter than the checksum itself.
pub fn verify(frame: &[u8]) -> bool {
    if frame.len() < CHECKSUM_LEN {
        return false;
    }

    let body = frame.len() - CHECKSUM_LEN;
    let received = u16::from_le_bytes([frame[body], frame[body + 1]]);

    sum(&frame[..body]) == received
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_sum_empty() {
        assert_eq!(sum(&[]), 0);
    }

    #[test]
    fn test_sum_known_vector() {
        // GetImage command header: marker 0xAA55 LE, reserved, code 0x20
        let bytes = [0x55, 0xAA, 0x00, 0x00, 0x20, 0x00, 0x00, 0x00];
        assert_eq!(sum(&bytes), 0x011F);
    }

    #[test]
    fn test_sum_wraps_modulo_65536() {
        // 300 * 255 = 76500; 76500 mod 65536 = 10964
        let bytes = vec![0xFF; 300];
        assert_eq!(sum(&bytes), 10_964);
    }

    #[test]
    fn test_verify_accepts_valid_frame() {
        let mut frame = vec![0x55, 0xAA, 0x01, 0x02];
        let cks = sum(&frame);
        frame.extend_from_slice(&cks.to_le_bytes());

        assert!(verify(&frame));
    }

    #[test]
    fn test_verify_rejects_corrupted_frame() {
        let mut frame = vec![0x55, 0xAA, 0x01, 0x02];
        let cks = sum(&frame);
        frame.extend_from_slice(&cks.to_le_bytes());
        frame[2] ^= 0x10;

        assert!(!verify(&frame));
    }

    #[test]
    fn test_verify_rejects_short_frame() {
        assert!(!verify(&[]));
        assert!(!verify(&[0x01]));
    }
}
