//! Fixed-width integer extraction from register buffers
//!
//! All functions index `buf` directly; the buffer must hold at least
//! `offset + width` bytes or the call panics.

/// Unsigned 16-bit value, low byte first
#[must_use]
pub fn u16_le(buf: &[u8], offset: usize) -> u16 {
    (u16::from(buf[offset + 1]) << 8) | u16::from(buf[offset])
}

/// Unsigned 16-bit value, high byte first
#[must_use]
pub fn u16_be(buf: &[u8], offset: usize) -> u16 {
    (u16::from(buf[offset]) << 8) | u16::from(buf[offset + 1])
}

/// Signed (two's complement) 16-bit value, low byte first
#[must_use]
pub fn i16_le(buf: &[u8], offset: usize) -> i16 {
    i16::from_le_bytes([buf[offset], buf[offset + 1]])
}

/// Signed 8-bit calibration value
///
/// Only bytes strictly above 0x80 are negative. 0x80 itself decodes to +128,
/// so the result is widened to `i16`.
#[must_use]
pub fn i8(buf: &[u8], offset: usize) -> i16 {
    let value = i16::from(buf[offset]);
    if value > 0x80 { value - 0x100 } else { value }
}
