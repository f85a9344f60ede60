//! Packed integer decoding internals.
//!
//! Decoding is the exact inverse of the encoder's digit split: the low
//! six bits of the leading byte seed the accumulator, and each trailing
//! byte is folded in with `acc = (acc << 8 | byte) + 64`. Beyond the
//! input-shape checks no error is possible; every well-formed sequence of
//! the tagged length decodes to a unique value in range.

use std::io::Cursor;

use super::{Error, PackedInt, ReadPackedInt, DIGIT_BIAS, LEADING_PAYLOAD_MASK, LENGTH_TAG_SHIFT};

impl PackedInt {
    /// Returns the total encoded length promised by the leading byte.
    ///
    /// Reads only `bytes[offset]` and returns a length in `1..=4`. The
    /// buffer is not required to actually hold that many bytes; checking
    /// that is the decoder's responsibility.
    ///
    /// ## Errors
    /// * `IndexOutOfBounds` - If `offset` is at or past the end of input
    pub fn expected_length(bytes: &[u8], offset: usize) -> Result<usize, Error> {
        let Some(&leading) = bytes.get(offset) else {
            return Err(Error::IndexOutOfBounds {
                offset,
                len: bytes.len(),
            });
        };

        Ok(usize::from(leading >> LENGTH_TAG_SHIFT) + 1)
    }

    /// Decodes the packed integer starting at `offset`.
    ///
    /// Bytes before the offset and past the encoded value are ignored,
    /// which allows decoding directly out of a larger frame.
    ///
    /// ## Errors
    /// * `EmptyInput` - If `bytes` has zero length
    /// * `IndexOutOfBounds` - If `offset` is at or past the end of input
    /// * `TruncatedInput` - If the buffer ends before the promised length
    pub fn decode(bytes: &[u8], offset: usize) -> Result<u32, Error> {
        if bytes.is_empty() {
            return Err(Error::EmptyInput);
        }

        let needed = Self::expected_length(bytes, offset)?;
        let available = bytes.len() - offset;
        if needed > available {
            return Err(Error::TruncatedInput { needed, available });
        }

        let mut acc = u32::from(bytes[offset] & LEADING_PAYLOAD_MASK);
        for &byte in &bytes[offset + 1..offset + needed] {
            acc = ((acc << 8) | u32::from(byte)) + DIGIT_BIAS;
        }

        Ok(acc)
    }

    /// Decodes the packed integer at offset 0 and renders it in base-10.
    ///
    /// Any decode error is propagated unchanged.
    pub fn to_display_string(bytes: &[u8]) -> Result<String, Error> {
        let value = Self::decode(bytes, 0)?;
        Ok(value.to_string())
    }
}

/// Implementation for reading packed integers from a byte cursor.
///
/// Reads the value at the cursor position and advances past it, enabling
/// sequential decoding of multiple values out of one buffer.
impl ReadPackedInt for Cursor<&[u8]> {
    fn read_packed_int(&mut self) -> Result<u32, Error> {
        // Clamp instead of truncating so an oversized position on 32-bit
        // platforms fails the bounds check below rather than wrapping
        // into range.
        let start_pos = usize::try_from(self.position()).unwrap_or(usize::MAX);
        let buffer = self.get_ref();

        if start_pos >= buffer.len() {
            return Err(Error::IndexOutOfBounds {
                offset: start_pos,
                len: buffer.len(),
            });
        }

        let length = PackedInt::expected_length(buffer, start_pos)?;
        let value = PackedInt::decode(buffer, start_pos)?;

        self.set_position((start_pos + length) as u64);

        Ok(value)
    }
}
