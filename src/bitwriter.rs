//! Variable-length bit writer for building the compressed payload.
//!
//! Bits are appended sequentially using MSB-first ordering:
//! - First bit appended goes to bit position 7 of the first byte
//! - Second bit goes to position 6, etc.
//!
//! When the bit count is not a multiple of 8, the final byte is padded with
//! zero bits. The writer does not record how many bits are padding; readers
//! must know the symbol count from elsewhere.

#![allow(clippy::cast_possible_truncation)]

use crate::codebook::Code;

/// Bits moved from a code into the accumulator at a time.
const CHUNK_BITS: usize = 32;

/// Growable MSB-first bit buffer.
///
/// Uses a 64-bit accumulator and flushes whole bytes as they fill.
#[derive(Clone, Debug, Default)]
pub struct BitWriter {
    /// Byte storage for flushed bits.
    data: Vec<u8>,
    /// Total number of bits written.
    num_bits: usize,
    /// Accumulator for pending bits.
    acc: u64,
    /// Number of bits in the accumulator.
    acc_len: usize,
}

impl BitWriter {
    /// Create a new empty writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a writer with room for `num_bits` bits.
    pub fn with_capacity(num_bits: usize) -> Self {
        Self {
            data: Vec::with_capacity(num_bits.div_ceil(8)),
            ..Self::default()
        }
    }

    /// Get the total number of bits written.
    #[inline]
    pub fn len(&self) -> usize {
        self.num_bits
    }

    /// Check if nothing has been written.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.num_bits == 0
    }

    /// Flush complete bytes from accumulator to data buffer.
    fn flush_acc(&mut self) {
        while self.acc_len >= 8 {
            self.acc_len -= 8;
            self.data.push((self.acc >> self.acc_len) as u8);
            self.acc &= (1u64 << self.acc_len) - 1;
        }
    }

    /// Append a single bit (0 or non-zero for 1).
    pub fn write_bit(&mut self, bit: u8) {
        self.acc = (self.acc << 1) | u64::from(bit != 0);
        self.acc_len += 1;
        self.num_bits += 1;
        self.flush_acc();
    }

    /// Append the low `num_bits` bits of `value`, most significant first.
    ///
    /// # Panics
    /// If `num_bits` exceeds 32.
    pub fn write_bits(&mut self, value: u32, num_bits: usize) {
        assert!(num_bits <= CHUNK_BITS, "at most 32 bits per call");
        if num_bits == 0 {
            return;
        }

        let mask = (1u64 << num_bits) - 1;
        self.acc = (self.acc << num_bits) | (u64::from(value) & mask);
        self.acc_len += num_bits;
        self.num_bits += num_bits;
        self.flush_acc();
    }

    /// Append every bit of `code`.
    pub fn write_code(&mut self, code: Code) {
        let mut remaining = code.len();
        while remaining > 0 {
            let take = remaining.min(CHUNK_BITS);
            remaining -= take;
            let chunk = (code.bits() >> remaining) as u32;
            self.write_bits(chunk, take);
        }
    }

    /// Finish writing and return the bytes, zero-padding the last byte.
    pub fn into_bytes(mut self) -> Vec<u8> {
        if self.acc_len > 0 {
            let last_byte = (self.acc << (8 - self.acc_len)) as u8;
            self.data.push(last_byte);
        }
        self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let writer = BitWriter::new();
        assert_eq!(writer.len(), 0);
        assert!(writer.is_empty());
        assert!(writer.into_bytes().is_empty());
    }

    #[test]
    fn test_write_bit() {
        let mut writer = BitWriter::new();

        // 10110010 = 0xB2
        for bit in [1, 0, 1, 1, 0, 0, 1, 0] {
            writer.write_bit(bit);
        }

        assert_eq!(writer.len(), 8);
        assert_eq!(writer.into_bytes(), vec![0xB2]);
    }

    #[test]
    fn test_write_bits() {
        let mut writer = BitWriter::new();

        writer.write_bits(0b1010, 4);
        assert_eq!(writer.len(), 4);

        // Full byte 0b10101100 = 0xAC
        writer.write_bits(0b1100, 4);
        assert_eq!(writer.len(), 8);

        assert_eq!(writer.into_bytes(), vec![0xAC]);
    }

    #[test]
    fn test_write_bits_masks_high_bits() {
        let mut writer = BitWriter::new();
        writer.write_bits(0xFFFF_FFF5, 4);
        writer.write_bits(0, 4);
        assert_eq!(writer.into_bytes(), vec![0x50]);
    }

    #[test]
    fn test_write_bits_full_word() {
        let mut writer = BitWriter::new();
        writer.write_bit(1);
        writer.write_bits(0xDEAD_BEEF, 32);
        assert_eq!(writer.len(), 33);
        assert_eq!(writer.into_bytes(), vec![0xEF, 0x56, 0xDF, 0x77, 0x80]);
    }

    #[test]
    fn test_partial_byte_padding() {
        let mut writer = BitWriter::new();

        // 10110 left-aligned = 10110000 = 0xB0
        writer.write_bits(0b10110, 5);
        assert_eq!(writer.len(), 5);
        assert_eq!(writer.into_bytes(), vec![0xB0]);
    }

    #[test]
    fn test_write_code() {
        let mut writer = BitWriter::new();
        writer.write_code(Code::new(0b0, 1).unwrap());
        writer.write_code(Code::new(0b11, 2).unwrap());
        writer.write_code(Code::new(0b10, 2).unwrap());
        assert_eq!(writer.len(), 5);
        assert_eq!(writer.into_bytes(), vec![0b0111_0000]);
    }

    #[test]
    fn test_write_long_code() {
        // 40-bit code spans two chunks: 0xAB followed by 0xDEADBEEF
        let code = Code::new(0xAB_DEAD_BEEF, 40).unwrap();
        let mut writer = BitWriter::new();
        writer.write_code(code);
        assert_eq!(writer.len(), 40);
        assert_eq!(writer.into_bytes(), vec![0xAB, 0xDE, 0xAD, 0xBE, 0xEF]);
    }

    #[test]
    fn test_multi_byte() {
        let mut writer = BitWriter::with_capacity(24);
        writer.write_bits(0xDE, 8);
        writer.write_bits(0xAD, 8);
        writer.write_bits(0xBE, 8);

        assert_eq!(writer.len(), 24);
        assert_eq!(writer.into_bytes(), vec![0xDE, 0xAD, 0xBE]);
    }
}
