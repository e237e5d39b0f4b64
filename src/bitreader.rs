//! Sequential bit reader for decoding the compressed payload.
//!
//! ## Bit Ordering
//! Bits are read MSB-first within each byte, matching [`BitWriter`]:
//! - Bit position 0 in a byte is bit 7 (MSB)
//! - Bit position 7 in a byte is bit 0 (LSB)
//!
//! [`BitWriter`]: crate::BitWriter

use tracing::trace;

use crate::error::{HuffError, Result};
use crate::tree::{HuffmanTree, Node, NodeId};

/// Sequential MSB-first bit reader over a byte slice.
#[derive(Clone, Debug)]
pub struct BitReader<'a> {
    /// Source data.
    data: &'a [u8],
    /// Total number of bits available.
    num_bits: usize,
    /// Current bit position.
    bit_pos: usize,
}

impl<'a> BitReader<'a> {
    /// Create a reader over every bit of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            num_bits: data.len() * 8,
            bit_pos: 0,
        }
    }

    /// Get current bit position.
    #[inline]
    pub fn position(&self) -> usize {
        self.bit_pos
    }

    /// Get number of remaining bits.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.num_bits - self.bit_pos
    }

    /// Check if there are more bits to read.
    #[inline]
    pub fn has_bits(&self) -> bool {
        self.bit_pos < self.num_bits
    }

    /// Number of bytes touched so far, including a partially read one.
    #[inline]
    pub fn bytes_consumed(&self) -> usize {
        self.bit_pos.div_ceil(8)
    }

    /// Read a single bit, or `None` if the data is exhausted.
    #[inline]
    pub fn read_bit(&mut self) -> Option<u8> {
        if self.bit_pos >= self.num_bits {
            return None;
        }

        let byte_index = self.bit_pos >> 3;
        let bit_index = self.bit_pos & 7;
        let bit = (self.data[byte_index] >> (7 - bit_index)) & 1;

        self.bit_pos += 1;
        Some(bit)
    }

    /// Decode one symbol by walking `tree` from `root`: `0` goes left, `1`
    /// goes right, until a leaf is reached.
    ///
    /// A root that is itself a leaf consumes exactly one `0` bit.
    ///
    /// Returns `Ok(None)` if the bits run out before a leaf is reached.
    pub fn decode_symbol(&mut self, tree: &HuffmanTree, root: NodeId) -> Result<Option<u8>> {
        if let Node::Leaf { symbol, .. } = tree.node(root) {
            let position = self.bit_pos;
            return match self.read_bit() {
                None => Ok(None),
                Some(0) => Ok(Some(*symbol)),
                Some(_) => Err(HuffError::InvalidCode { position }),
            };
        }

        let mut node = root;
        loop {
            match tree.node(node) {
                Node::Leaf { symbol, .. } => return Ok(Some(*symbol)),
                Node::Internal { left, right, .. } => {
                    let Some(bit) = self.read_bit() else {
                        return Ok(None);
                    };
                    node = if bit == 0 { *left } else { *right };
                }
            }
        }
    }

    /// Decode exactly `count` symbols using `tree`.
    ///
    /// Padding bits after the last symbol are ignored.
    pub fn decode(&mut self, tree: &HuffmanTree, count: usize) -> Result<Vec<u8>> {
        let Some(root) = tree.root() else {
            return if count == 0 {
                Ok(Vec::new())
            } else {
                Err(HuffError::UnexpectedEndOfPayload {
                    decoded: 0,
                    expected: count,
                })
            };
        };

        // Every symbol costs at least one bit
        let mut output = Vec::with_capacity(count.min(self.remaining()));
        while output.len() < count {
            match self.decode_symbol(tree, root)? {
                Some(symbol) => output.push(symbol),
                None => {
                    return Err(HuffError::UnexpectedEndOfPayload {
                        decoded: output.len(),
                        expected: count,
                    });
                }
            }
        }

        trace!(symbols = count, bits = self.bit_pos, "decoded payload");
        Ok(output)
    }
}
