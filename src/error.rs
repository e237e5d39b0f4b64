//! Error types for Huffman compression/decompression.
//!
//! Compression cannot fail. Every error comes from decoding an artifact and
//! falls into one of two groups:
//!
//! - **Format** errors: the header cannot be trusted (bad magic, truncated or
//!   inconsistent frequency table).
//! - **Corruption** errors: the header is sound but the payload bit stream
//!   does not decode to exactly the declared number of symbols.

use thiserror::Error;

/// Result type alias for decoding operations.
pub type Result<T> = core::result::Result<T, HuffError>;

/// Errors that can occur while decoding an artifact.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HuffError {
    /// Buffer ends before the header is complete.
    #[error("truncated header: need {needed} bytes, got {available}")]
    TruncatedHeader { needed: usize, available: usize },

    /// Leading bytes are not the artifact magic.
    #[error("invalid magic: {found:02x?}")]
    InvalidMagic { found: [u8; 4] },

    /// Declared symbol count exceeds the 256 possible byte values.
    #[error("too many symbols: {0} (at most 256)")]
    TooManySymbols(usize),

    /// Frequency entries are out of order, duplicated or zero.
    #[error("invalid frequency table: {0}")]
    InvalidFrequencyTable(String),

    /// Frequency counts do not add up to the declared original length.
    #[error("length mismatch: header declares {declared} bytes, frequencies sum to {counted}")]
    LengthMismatch { declared: u64, counted: u64 },

    /// A length in the header does not fit this platform or overflows.
    #[error("length overflow: {0}")]
    LengthOverflow(String),

    /// Payload ran out of bits before all symbols were decoded.
    #[error("unexpected end of payload after {decoded} of {expected} symbols")]
    UnexpectedEndOfPayload { decoded: usize, expected: usize },

    /// Bit sequence does not correspond to any code.
    #[error("invalid code at bit {position}")]
    InvalidCode { position: usize },

    /// Whole bytes left over after the last symbol.
    #[error("{extra_bytes} trailing payload bytes after last symbol")]
    TrailingPayload { extra_bytes: usize },
}

impl HuffError {
    /// Create an invalid frequency table error.
    pub fn frequency_table(message: impl Into<String>) -> Self {
        Self::InvalidFrequencyTable(message.into())
    }

    /// True if the header failed validation.
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            Self::TruncatedHeader { .. }
                | Self::InvalidMagic { .. }
                | Self::TooManySymbols(_)
                | Self::InvalidFrequencyTable(_)
                | Self::LengthMismatch { .. }
                | Self::LengthOverflow(_)
        )
    }

    /// True if the payload failed to decode.
    pub fn is_corruption(&self) -> bool {
        !self.is_format_error()
    }

    /// Short stable name for the error kind.
    pub fn category(&self) -> &'static str {
        if self.is_format_error() {
            "format"
        } else {
            "corruption"
        }
    }
}
