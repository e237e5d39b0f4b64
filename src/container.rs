//! Artifact container format.
//!
//! ## Layout
//! All integers are big-endian.
//!
//! | Offset | Field | Size |
//! |---|---|---|
//! | 0 | Magic `"HUFP"` | 4 |
//! | 4 | Original length | u64 |
//! | 12 | Symbol count | u16 (0..=256) |
//! | 14 | Frequency entries, ascending symbol | count × (u8 symbol, u64 count) |
//! | 14 + 9·count | Payload, MSB-first, zero-padded | remainder |
//!
//! The frequency table alone is enough to rebuild the tree used to encode the
//! payload.

#![allow(clippy::cast_possible_truncation)]

use tracing::trace;

use crate::error::{HuffError, Result};
use crate::frequency::FrequencyTable;

/// Artifact magic marker.
pub const MAGIC: [u8; 4] = *b"HUFP";

/// Size of magic, original length and symbol count.
pub const PRELUDE_SIZE: usize = 4 + 8 + 2;

/// Size of one serialized frequency entry.
pub const ENTRY_SIZE: usize = 1 + 8;

/// Validated artifact header.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Header {
    /// Byte length of the original data.
    pub original_len: u64,
    /// Frequencies of every symbol in the original data.
    pub frequencies: FrequencyTable,
}

impl Header {
    /// Serialized header size in bytes.
    pub fn encoded_len(&self) -> usize {
        PRELUDE_SIZE + ENTRY_SIZE * self.frequencies.distinct_symbols()
    }

    /// Append the serialized header to `out`.
    pub fn write_to(&self, out: &mut Vec<u8>) {
        let symbol_count = self.frequencies.distinct_symbols() as u16;

        out.extend_from_slice(&MAGIC);
        out.extend_from_slice(&self.original_len.to_be_bytes());
        out.extend_from_slice(&symbol_count.to_be_bytes());
        for (symbol, count) in self.frequencies.iter() {
            out.push(symbol);
            out.extend_from_slice(&count.to_be_bytes());
        }
    }
}

/// A parsed artifact: validated header plus a borrowed payload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Artifact<'a> {
    /// Validated header.
    pub header: Header,
    /// Bit-packed payload.
    pub payload: &'a [u8],
}

impl<'a> Artifact<'a> {
    /// Serialize a header followed by `payload`.
    pub fn assemble(header: &Header, payload: &[u8]) -> Vec<u8> {
        let mut out = Vec::with_capacity(header.encoded_len() + payload.len());
        header.write_to(&mut out);
        out.extend_from_slice(payload);
        out
    }

    /// Parse and validate an artifact.
    ///
    /// The payload is not inspected; only the header is checked.
    pub fn parse(bytes: &'a [u8]) -> Result<Self> {
        let mut cursor = Cursor::new(bytes);

        let magic: [u8; 4] = cursor.take_array()?;
        if magic != MAGIC {
            return Err(HuffError::InvalidMagic { found: magic });
        }

        let original_len = u64::from_be_bytes(cursor.take_array()?);
        let symbol_count = usize::from(u16::from_be_bytes(cursor.take_array()?));
        trace!(original_len, symbol_count, "parsed prelude");

        if symbol_count > 256 {
            return Err(HuffError::TooManySymbols(symbol_count));
        }
        cursor.require(symbol_count * ENTRY_SIZE)?;

        let mut frequencies = FrequencyTable::new();
        let mut previous: Option<u8> = None;
        for _ in 0..symbol_count {
            let [symbol] = cursor.take_array::<1>()?;
            let count = u64::from_be_bytes(cursor.take_array()?);

            if previous.is_some_and(|p| symbol <= p) {
                return Err(HuffError::frequency_table(format!(
                    "symbol 0x{symbol:02x} out of ascending order"
                )));
            }
            if count == 0 {
                return Err(HuffError::frequency_table(format!(
                    "symbol 0x{symbol:02x} has zero count"
                )));
            }
            // Cannot overflow: each symbol appears once and starts at zero
            frequencies.add(symbol, count);
            previous = Some(symbol);
        }

        let counted = frequencies
            .total()
            .ok_or_else(|| HuffError::LengthOverflow("frequency counts overflow u64".into()))?;
        if counted != original_len {
            return Err(HuffError::LengthMismatch {
                declared: original_len,
                counted,
            });
        }
        if usize::try_from(original_len).is_err() {
            return Err(HuffError::LengthOverflow(format!(
                "original length {original_len} exceeds addressable memory"
            )));
        }

        let payload = cursor.rest();
        trace!(payload_bytes = payload.len(), "parsed frequency table");

        Ok(Self {
            header: Header {
                original_len,
                frequencies,
            },
            payload,
        })
    }

    /// Original length as `usize` (checked during parsing).
    pub fn original_len(&self) -> usize {
        usize::try_from(self.header.original_len).unwrap_or(usize::MAX)
    }
}

/// Forward-only reader over the header bytes.
struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Fail unless `len` more bytes are available.
    fn require(&self, len: usize) -> Result<()> {
        let available = self.data.len() - self.pos;
        if available < len {
            return Err(HuffError::TruncatedHeader {
                needed: self.pos + len,
                available: self.data.len(),
            });
        }
        Ok(())
    }

    fn take_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        self.require(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(&self.data[self.pos..self.pos + N]);
        self.pos += N;
        Ok(out)
    }

    fn rest(self) -> &'a [u8] {
        &self.data[self.pos..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(data: &[u8]) -> Header {
        Header {
            original_len: data.len() as u64,
            frequencies: FrequencyTable::from_bytes(data),
        }
    }

    #[test]
    fn test_empty_header_layout() {
        let bytes = Artifact::assemble(&header(&[]), &[]);
        assert_eq!(
            bytes,
            vec![b'H', b'U', b'F', b'P', 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]
        );

        let artifact = Artifact::parse(&bytes).unwrap();
        assert_eq!(artifact.header.original_len, 0);
        assert!(artifact.header.frequencies.is_empty());
        assert!(artifact.payload.is_empty());
    }

    #[test]
    fn test_entries_ascending() {
        let bytes = Artifact::assemble(&header(b"CBA"), &[0xAA]);
        assert_eq!(bytes.len(), PRELUDE_SIZE + 3 * ENTRY_SIZE + 1);
        assert_eq!(&bytes[12..14], &[0, 3]);
        assert_eq!(bytes[14], b'A');
        assert_eq!(bytes[14 + ENTRY_SIZE], b'B');
        assert_eq!(bytes[14 + 2 * ENTRY_SIZE], b'C');

        let artifact = Artifact::parse(&bytes).unwrap();
        assert_eq!(artifact.header, header(b"CBA"));
        assert_eq!(artifact.payload, &[0xAA]);
        assert_eq!(artifact.original_len(), 3);
    }

    #[test]
    fn test_too_short() {
        assert!(matches!(
            Artifact::parse(b"HUF"),
            Err(HuffError::TruncatedHeader {
                needed: 4,
                available: 3
            })
        ));
        assert!(matches!(
            Artifact::parse(b"HUFP\0\0\0\0"),
            Err(HuffError::TruncatedHeader { .. })
        ));
    }

    #[test]
    fn test_bad_magic() {
        let mut bytes = Artifact::assemble(&header(b"abc"), &[0]);
        bytes[0] = b'X';
        assert!(matches!(
            Artifact::parse(&bytes),
            Err(HuffError::InvalidMagic { found }) if found == *b"XUFP"
        ));
    }

    #[test]
    fn test_too_many_symbols() {
        let mut bytes = Artifact::assemble(&header(&[]), &[]);
        bytes[12..14].copy_from_slice(&257u16.to_be_bytes());
        assert!(matches!(
            Artifact::parse(&bytes),
            Err(HuffError::TooManySymbols(257))
        ));
    }

    #[test]
    fn test_entries_truncated() {
        let bytes = Artifact::assemble(&header(b"abcd"), &[]);
        let cut = &bytes[..bytes.len() - 1];
        assert!(matches!(
            Artifact::parse(cut),
            Err(HuffError::TruncatedHeader { needed, available })
                if needed == bytes.len() && available == bytes.len() - 1
        ));
    }

    #[test]
    fn test_unordered_entries() {
        let mut bytes = Artifact::assemble(&header(b"ab"), &[]);
        bytes[14] = b'b';
        bytes[14 + ENTRY_SIZE] = b'a';
        let err = Artifact::parse(&bytes).unwrap_err();
        assert!(matches!(err, HuffError::InvalidFrequencyTable(_)));
        assert!(err.is_format_error());
    }

    #[test]
    fn test_duplicate_entries() {
        let mut bytes = Artifact::assemble(&header(b"ab"), &[]);
        bytes[14 + ENTRY_SIZE] = b'a';
        assert!(matches!(
            Artifact::parse(&bytes),
            Err(HuffError::InvalidFrequencyTable(_))
        ));
    }

    #[test]
    fn test_zero_count() {
        let mut bytes = Artifact::assemble(&header(b"ab"), &[]);
        bytes[15..23].copy_from_slice(&0u64.to_be_bytes());
        bytes[4..12].copy_from_slice(&1u64.to_be_bytes());
        assert!(matches!(
            Artifact::parse(&bytes),
            Err(HuffError::InvalidFrequencyTable(_))
        ));
    }

    #[test]
    fn test_length_mismatch() {
        let mut bytes = Artifact::assemble(&header(b"aab"), &[0]);
        bytes[4..12].copy_from_slice(&4u64.to_be_bytes());
        assert!(matches!(
            Artifact::parse(&bytes),
            Err(HuffError::LengthMismatch {
                declared: 4,
                counted: 3
            })
        ));
    }

    #[test]
    fn test_length_without_symbols() {
        let mut bytes = Artifact::assemble(&header(&[]), &[]);
        bytes[4..12].copy_from_slice(&5u64.to_be_bytes());
        assert!(matches!(
            Artifact::parse(&bytes),
            Err(HuffError::LengthMismatch {
                declared: 5,
                counted: 0
            })
        ));
    }

    #[test]
    fn test_count_overflow() {
        let mut bytes = Artifact::assemble(&header(b"ab"), &[]);
        bytes[15..23].copy_from_slice(&u64::MAX.to_be_bytes());
        assert!(matches!(
            Artifact::parse(&bytes),
            Err(HuffError::LengthOverflow(_))
        ));
    }
}
