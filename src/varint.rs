//! Variable-length integer encoding (LEB128) and zigzag mapping
//!
//! Compact Protocol integers are zigzag-mapped to unsigned values and then
//! written 7 bits per byte, low-order group first.

use alloc::vec::Vec;

use crate::error::{Error, Result};

/// Map a signed integer of `bits` width onto the unsigned zigzag domain.
///
/// `bits` selects the bit that supplies the sign mask (16, 32 or 64). The
/// shift runs in 128-bit arithmetic so `i64::MIN` maps to `u64::MAX` exactly.
#[inline]
pub fn zigzag(value: i64, bits: u32) -> u64 {
    debug_assert!(matches!(bits, 16 | 32 | 64), "zigzag width must be 16, 32 or 64");
    let wide = value as i128;
    ((wide << 1) ^ (wide >> (bits - 1))) as u64
}

/// Inverse of [`zigzag`] for values that were in range for `bits`.
#[inline]
pub fn unzigzag(value: u64, bits: u32) -> i64 {
    debug_assert!(matches!(bits, 16 | 32 | 64), "zigzag width must be 16, 32 or 64");
    ((value >> 1) as i64) ^ -((value & 1) as i64)
}

/// Number of bytes `value` occupies once varint-encoded
#[inline]
pub fn encoded_len(value: u64) -> usize {
    let significant = 64 - (value | 1).leading_zeros() as usize;
    significant.div_ceil(7)
}

/// Append `value` as a varint to `out`
#[inline]
pub fn write_u64(value: u64, out: &mut Vec<u8>) {
    let mut value = value;

    loop {
        if value < 0x80 {
            out.push(value as u8);
            return;
        }

        out.push((value as u8) | 0x80);
        value >>= 7;
    }
}

/// Read one varint from the front of `buf`.
///
/// Yields the value together with how many bytes it spanned; trailing bytes
/// are left alone. A tenth byte may only carry the top bit of a u64.
pub fn decode_u64(buf: &[u8]) -> Result<(u64, usize)> {
    let mut result = 0u64;

    for (index, &byte) in buf.iter().enumerate() {
        let shift = 7 * index as u32;
        let payload = (byte & 0x7F) as u64;

        if shift > 63 || (shift == 63 && payload > 1) {
            return Err(Error::Overflow);
        }
        result |= payload << shift;

        if byte & 0x80 == 0 {
            return Ok((result, index + 1));
        }
    }

    Err(Error::UnexpectedEof)
}
