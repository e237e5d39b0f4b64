//! Huffman compression.
//!
//! Pipeline: count frequencies, build the tree, derive codes, pack every input
//! byte's code into the payload, then wrap header and payload in an artifact.

#![allow(clippy::cast_possible_truncation)]

use tracing::debug;

use crate::bitwriter::BitWriter;
use crate::codebook::CodeBook;
use crate::container::{Artifact, Header};
use crate::frequency::FrequencyTable;
use crate::tree::HuffmanTree;

/// Compress `data` into a self-describing artifact.
///
/// Empty input produces a header with no frequency entries and no payload.
/// Input with a single distinct byte encodes each byte as one `0` bit.
pub fn compress(data: &[u8]) -> Vec<u8> {
    let frequencies = FrequencyTable::from_bytes(data);
    let tree = HuffmanTree::build(&frequencies);
    let book = CodeBook::from_tree(&tree);

    let payload_bits = book.encoded_bit_len(&frequencies).unwrap_or(0) as usize;
    let mut writer = BitWriter::with_capacity(payload_bits);
    for &byte in data {
        // Every byte of `data` was counted, so every byte has a code
        if let Some(code) = book.get(byte) {
            writer.write_code(code);
        }
    }

    let header = Header {
        original_len: data.len() as u64,
        frequencies,
    };
    let bits = writer.len();
    let artifact = Artifact::assemble(&header, &writer.into_bytes());

    debug!(
        input_bytes = data.len(),
        symbols = header.frequencies.distinct_symbols(),
        payload_bits = bits,
        output_bytes = artifact.len(),
        "compressed"
    );

    artifact
}
