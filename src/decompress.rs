//! Huffman decompression.
//!
//! Parses the artifact, rebuilds the tree from the embedded frequency table,
//! then decodes exactly the declared number of symbols from the payload.

use tracing::debug;

use crate::bitreader::BitReader;
use crate::container::Artifact;
use crate::error::{HuffError, Result};
use crate::tree::HuffmanTree;

/// Decompress an artifact produced by [`compress`](crate::compress).
///
/// # Errors
///
/// Returns a format error if the header is invalid, or a corruption error
/// if the payload does not decode to exactly the declared length. No partial
/// output is ever returned.
pub fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    let artifact = Artifact::parse(data)?;
    let expected = artifact.original_len();

    if expected == 0 {
        if !artifact.payload.is_empty() {
            return Err(HuffError::TrailingPayload {
                extra_bytes: artifact.payload.len(),
            });
        }
        debug!("decompressed empty artifact");
        return Ok(Vec::new());
    }

    let tree = HuffmanTree::build(&artifact.header.frequencies);
    let mut reader = BitReader::new(artifact.payload);
    let output = reader.decode(&tree, expected)?;

    let extra_bytes = artifact.payload.len() - reader.bytes_consumed();
    if extra_bytes > 0 {
        return Err(HuffError::TrailingPayload { extra_bytes });
    }

    debug!(
        input_bytes = data.len(),
        payload_bits = reader.position(),
        output_bytes = output.len(),
        "decompressed"
    );

    Ok(output)
}
