//! # huffpack
//!
//! Lossless compression of arbitrary byte streams with static Huffman coding.
//!
//! ## Design
//!
//! - **Deterministic** - Tree construction breaks ties by a fixed total order,
//!   so the same input always yields the same artifact bytes
//! - **Self-describing** - Artifacts embed the frequency table; nothing else is
//!   needed to decode
//! - **Safe Rust** - `#![forbid(unsafe_code)]`
//! - **Whole-buffer** - Input and output live entirely in memory
//!
//! ## API Overview
//!
//! ### High-Level Functions
//!
//! - [`compress()`] - Compress an entire buffer into an artifact
//! - [`decompress()`] - Recover the original buffer from an artifact
//!
//! ### Low-Level Components
//!
//! - [`FrequencyTable`] - Per-byte occurrence counts
//! - [`HuffmanTree`] - Arena-backed prefix tree
//! - [`CodeBook`] / [`Code`] - Symbol to bit-code mapping
//! - [`BitWriter`] / [`BitReader`] - MSB-first bit packing and tree-walking decode
//! - [`Artifact`] / [`Header`] - Container serialization and validation
//!
//! ## Usage
//!
//! ```rust
//! use huffpack::{compress, decompress};
//!
//! let data = b"AAABBC".to_vec();
//! let artifact = compress(&data);
//! let restored = decompress(&artifact).unwrap();
//!
//! assert_eq!(data, restored);
//! ```

#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

mod bitreader;
mod bitwriter;
mod codebook;
mod compress;
pub mod container;
mod decompress;
mod error;
mod frequency;
mod tree;

pub use bitreader::BitReader;
pub use bitwriter::BitWriter;
pub use codebook::{Code, CodeBook, MAX_CODE_BITS};
pub use compress::compress;
pub use container::{Artifact, Header, MAGIC};
pub use decompress::decompress;
pub use error::{HuffError, Result};
pub use frequency::FrequencyTable;
pub use tree::{HuffmanTree, Node, NodeId};
