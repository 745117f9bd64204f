//! Variable-width big-endian unsigned integers.
//!
//! Child counts are stored in the minimum number of bytes; zero takes no
//! bytes at all, which matters because most nodes in an n-gram tree are
//! leaves. The byte length itself travels in the block's end-word tag, so
//! decoding always knows exactly how many bytes to read.

use crate::error::{Error, Result};
use std::io::Read;

/// Counts wider than this cannot be represented (`u32` child counts).
pub(crate) const MAX_COUNT_LEN: usize = 4;

/// Minimum number of big-endian bytes needed to represent `val`.
///
/// Returns 0 for 0.
pub(crate) fn byte_len(mut val: u32) -> usize {
    let mut len = 0;
    while val > 0 {
        len += 1;
        val >>= 8;
    }
    len
}

/// Appends `val` as `len` big-endian bytes.
pub(crate) fn push_be(out: &mut Vec<u8>, val: u32, len: usize) {
    debug_assert!(len >= byte_len(val));
    for shift in (0..len).rev() {
        out.push((val >> (8 * shift)) as u8);
    }
}

/// Reads a `len`-byte big-endian value.
///
/// # Errors
/// Returns [`Error::CountOverflow`] for `len > 4` and
/// [`Error::TruncatedStream`] when the reader ends early.
pub(crate) fn read_be<R: Read>(reader: &mut R, len: usize) -> Result<u32> {
    if len > MAX_COUNT_LEN {
        return Err(Error::CountOverflow(len));
    }
    let mut val = 0u32;
    let mut byte = [0u8; 1];
    for _ in 0..len {
        reader
            .read_exact(&mut byte)
            .map_err(|_| Error::TruncatedStream("stream ended inside a child count"))?;
        val = (val << 8) | byte[0] as u32;
    }
    Ok(val)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Closed-form oracle for the minimal byte length.
    fn byte_len_oracle(val: u32) -> usize {
        ((32 - val.leading_zeros() as usize) + 7) / 8
    }

    #[test]
    fn test_byte_len_boundaries() {
        assert_eq!(byte_len(0), 0);
        assert_eq!(byte_len(1), 1);
        assert_eq!(byte_len(0xFF), 1);
        assert_eq!(byte_len(0x100), 2);
        assert_eq!(byte_len(0xFFFF), 2);
        assert_eq!(byte_len(0x0001_0000), 3);
        assert_eq!(byte_len(0x00FF_FFFF), 3);
        assert_eq!(byte_len(0x0100_0000), 4);
        assert_eq!(byte_len(u32::MAX), 4);
    }

    #[test]
    fn test_byte_len_matches_oracle() {
        for shift in 0..32 {
            for delta in [-1i64, 0, 1] {
                let val = ((1u64 << shift) as i64 + delta).clamp(0, u32::MAX as i64) as u32;
                assert_eq!(byte_len(val), byte_len_oracle(val), "val = {val}");
            }
        }
    }

    #[test]
    fn test_push_read_roundtrip() {
        for val in [0u32, 1, 44, 255, 256, 300, 65_535, 65_536, u32::MAX] {
            let len = byte_len(val);
            let mut buf = Vec::new();
            push_be(&mut buf, val, len);
            assert_eq!(buf.len(), len);
            assert_eq!(read_be(&mut buf.as_slice(), len).unwrap(), val);
        }
    }

    #[test]
    fn test_zero_takes_no_bytes() {
        let mut buf = Vec::new();
        push_be(&mut buf, 0, 0);
        assert!(buf.is_empty());

        let mut empty: &[u8] = &[];
        assert_eq!(read_be(&mut empty, 0).unwrap(), 0);
    }

    #[test]
    fn test_big_endian_order() {
        let mut buf = Vec::new();
        push_be(&mut buf, 300, 2);
        assert_eq!(buf, [0x01, 0x2C]);
    }

    #[test]
    fn test_truncated_read() {
        let bytes = [0x01u8];
        assert!(matches!(
            read_be(&mut bytes.as_slice(), 2),
            Err(Error::TruncatedStream(_))
        ));
    }

    #[test]
    fn test_overwide_read() {
        let bytes = [0u8; 8];
        assert!(matches!(
            read_be(&mut bytes.as_slice(), 5),
            Err(Error::CountOverflow(5))
        ));
    }
}
