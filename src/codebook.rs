//! Symbol-to-code mapping derived from a Huffman tree.

#![allow(clippy::cast_possible_truncation)]

use std::fmt;

use crate::frequency::FrequencyTable;
use crate::tree::{HuffmanTree, Node};

/// Maximum code length in bits.
///
/// Counts are u64 and must sum to a u64 length, which bounds tree depth far
/// below this.
pub const MAX_CODE_BITS: usize = 128;

/// A variable-length code, right-justified in `bits`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Code {
    bits: u128,
    len: u8,
}

impl Code {
    /// Code for the only symbol of a single-leaf tree: one `0` bit.
    pub const SINGLE: Code = Code { bits: 0, len: 1 };

    /// Create a code from right-justified bits.
    ///
    /// Returns `None` if `len` is 0 or exceeds [`MAX_CODE_BITS`].
    pub fn new(bits: u128, len: usize) -> Option<Self> {
        if len == 0 || len > MAX_CODE_BITS {
            return None;
        }
        let mask = if len == MAX_CODE_BITS {
            u128::MAX
        } else {
            (1u128 << len) - 1
        };
        Some(Self {
            bits: bits & mask,
            len: u8::try_from(len).ok()?,
        })
    }

    /// Code bits, right-justified.
    #[inline]
    pub fn bits(&self) -> u128 {
        self.bits
    }

    /// Code length in bits.
    #[inline]
    pub fn len(&self) -> usize {
        usize::from(self.len)
    }

    /// Always false; codes have at least one bit.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Bit at `index`, counting from the first (most significant) bit.
    pub fn bit(&self, index: usize) -> u8 {
        let shift = self.len() - 1 - index;
        ((self.bits >> shift) & 1) as u8
    }

    /// Check if `self` is a prefix of `other` (or equal to it).
    pub fn is_prefix_of(&self, other: &Code) -> bool {
        self.len <= other.len && other.bits >> (other.len - self.len) == self.bits
    }

    /// Extend by one bit.
    fn push(self, bit: u8) -> Self {
        Self {
            bits: (self.bits << 1) | u128::from(bit & 1),
            len: self.len + 1,
        }
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.len() {
            write!(f, "{}", self.bit(i))?;
        }
        Ok(())
    }
}

/// Maps each present symbol to its code.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CodeBook {
    codes: [Option<Code>; 256],
}

impl CodeBook {
    /// Derive codes by walking `tree` depth-first: left appends `0`, right
    /// appends `1`. A single-leaf tree gets [`Code::SINGLE`].
    pub fn from_tree(tree: &HuffmanTree) -> Self {
        let mut codes = [None; 256];
        let Some(root) = tree.root() else {
            return Self { codes };
        };

        if let Node::Leaf { symbol, .. } = tree.node(root) {
            codes[*symbol as usize] = Some(Code::SINGLE);
            return Self { codes };
        }

        let empty = Code { bits: 0, len: 0 };
        let mut stack = vec![(root, empty)];
        while let Some((id, code)) = stack.pop() {
            match tree.node(id) {
                Node::Leaf { symbol, .. } => codes[*symbol as usize] = Some(code),
                Node::Internal { left, right, .. } => {
                    stack.push((*right, code.push(1)));
                    stack.push((*left, code.push(0)));
                }
            }
        }

        Self { codes }
    }

    /// Code for `symbol`, if it is present.
    #[inline]
    pub fn get(&self, symbol: u8) -> Option<Code> {
        self.codes[symbol as usize]
    }

    /// Number of symbols with a code.
    pub fn len(&self) -> usize {
        self.codes.iter().flatten().count()
    }

    /// Check if the book has no codes.
    pub fn is_empty(&self) -> bool {
        self.codes.iter().all(Option::is_none)
    }

    /// `(symbol, code)` pairs in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, Code)> + '_ {
        (0..=u8::MAX)
            .zip(self.codes.iter())
            .filter_map(|(symbol, code)| code.map(|c| (symbol, c)))
    }

    /// Exact payload size in bits for data with these frequencies:
    /// the sum of `count × code length`.
    ///
    /// Returns `None` on overflow. Symbols without a code contribute nothing.
    pub fn encoded_bit_len(&self, frequencies: &FrequencyTable) -> Option<u64> {
        frequencies.iter().try_fold(0u64, |acc, (symbol, count)| {
            let len = self.get(symbol).map_or(0, |c| c.len() as u64);
            acc.checked_add(count.checked_mul(len)?)
        })
    }
}
