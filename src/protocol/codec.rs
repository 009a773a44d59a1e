// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Little-endian field composition and extraction.
//!
//! Callers validate buffer lengths first; reads index directly.

use heapless::Vec;

/// Compose a `u16` from `buf[at..at + 2]`, low byte first.
#[inline]
pub fn read_u16_le(buf: &[u8], at: usize) -> u16 {
    u16::from(buf[at]) | (u16::from(buf[at + 1]) << 8)
}

/// Compose a `u32` from `buf[at..at + 4]`, low byte first.
#[inline]
pub fn read_u32_le(buf: &[u8], at: usize) -> u32 {
    u32::from(buf[at])
        | (u32::from(buf[at + 1]) << 8)
        | (u32::from(buf[at + 2]) << 16)
        | (u32::from(buf[at + 3]) << 24)
}

/// Two's complement view of [`read_u32_le`].
#[inline]
pub fn read_i32_le(buf: &[u8], at: usize) -> i32 {
    read_u32_le(buf, at) as i32
}

/// Append `value` low byte first. Returns `false` when `out` is full.
pub fn push_u16_le<const N: usize>(out: &mut Vec<u8, N>, value: u16) -> bool {
    out.extend_from_slice(&[value as u8, (value >> 8) as u8])
        .is_ok()
}

/// Append `value` low byte first. Returns `false` when `out` is full.
pub fn push_u32_le<const N: usize>(out: &mut Vec<u8, N>, value: u32) -> bool {
    out.extend_from_slice(&[
        value as u8,
        (value >> 8) as u8,
        (value >> 16) as u8,
        (value >> 24) as u8,
    ])
    .is_ok()
}

#[inline]
pub fn push_i16_le<const N: usize>(out: &mut Vec<u8, N>, value: i16) -> bool {
    push_u16_le(out, value as u16)
}

#[inline]
pub fn push_i32_le<const N: usize>(out: &mut Vec<u8, N>, value: i32) -> bool {
    push_u32_le(out, value as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_at_offset() {
        let buf = [0xFF, 0x34, 0x12, 0x78, 0x56];
        assert_eq!(read_u16_le(&buf, 1), 0x1234);
        assert_eq!(read_u32_le(&buf, 1), 0x5678_1234);
    }

    #[test]
    fn negative_values_keep_twos_complement() {
        let mut out: Vec<u8, 4> = Vec::new();
        assert!(push_i32_le(&mut out, -2));
        assert_eq!(out.as_slice(), &[0xFE, 0xFF, 0xFF, 0xFF]);
        assert_eq!(read_i32_le(&out, 0), -2);
    }

    #[test]
    fn full_buffer_is_reported() {
        let mut out: Vec<u8, 3> = Vec::new();
        assert!(push_u16_le(&mut out, 1));
        assert!(!push_u16_le(&mut out, 2));
    }
}
