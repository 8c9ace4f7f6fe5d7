//! # OxiHuff: Pure Rust Huffman Compression
//!
//! This crate compresses byte sequences with a Huffman code built from the
//! input's own symbol frequencies, and stores the code table alongside the
//! payload so the result decodes without any outside context.
//!
//! ## Features
//!
//! - **Pure Rust**: No C dependencies, 100% safe Rust
//! - **Deterministic**: Equal inputs always give byte-identical output
//! - **Self-describing**: The code table travels inside the container
//! - **Byte alphabet**: Up to 256 distinct symbols
//!
//! ## Pipeline
//!
//! ```text
//! bytes ─▶ FrequencyTable ─▶ HuffmanTree ─▶ CodeTable ─▶ BitString
//!                                                          │ pack
//!                           container ◀─ table + length ◀─ bytes
//! ```
//!
//! Decompression parses the container, rebuilds the reverse lookup from the
//! embedded table, unpacks the payload, and matches codes bit by bit.
//!
//! ## Example
//!
//! ```rust
//! use oxihuff::{compress, decompress};
//!
//! let original = b"TOBEORNOTTOBEORTOBEORNOT";
//!
//! let compressed = compress(original).unwrap();
//! let decompressed = decompress(&compressed).unwrap();
//!
//! assert_eq!(decompressed, original);
//! ```
//!
//! ## Container format
//!
//! ```rust
//! use oxihuff::compress;
//!
//! // One symbol gets the one-bit code "0"; three bits pad to a byte with 5 zeros.
//! let container = compress(b"AAA").unwrap();
//! assert_eq!(container, b"\x05\x00{\"65\":\"0\"}10");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod code_table;
pub mod container;
mod decoder;
mod encoder;
pub mod file;
pub mod frequency;
pub mod tree;

pub use code_table::{CodeTable, DecodeTable};
pub use container::{Container, ContainerStats, Layout};
pub use decoder::HuffmanDecoder;
pub use encoder::{Analysis, HuffmanEncoder};
pub use file::{compress_file, decompress_file};
pub use frequency::FrequencyTable;
pub use tree::{HuffmanTree, Node, NodeId};

pub use oxihuff_core::{BitString, NoProgress, OxiHuffError, Progress, Result, Stage};

/// Compress `data` into a self-describing container.
///
/// # Example
///
/// ```rust
/// use oxihuff::compress;
///
/// let first = compress(b"abracadabra").unwrap();
/// let second = compress(b"abracadabra").unwrap();
/// assert_eq!(first, second);
/// ```
pub fn compress(data: &[u8]) -> Result<Vec<u8>> {
    HuffmanEncoder::new().encode(data)
}

/// Compress `data`, reporting progress to `progress`.
pub fn compress_with_progress<P: Progress>(data: &[u8], progress: P) -> Result<Vec<u8>> {
    HuffmanEncoder::with_progress(progress).encode(data)
}

/// Decompress a container produced by [`compress`].
///
/// # Example
///
/// ```rust
/// use oxihuff::{compress, decompress};
///
/// let data = b"Hello, World!";
/// let compressed = compress(data).unwrap();
/// assert_eq!(decompress(&compressed).unwrap(), data);
/// ```
pub fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    HuffmanDecoder::new().decode(data)
}

/// Decompress a container, reporting progress to `progress`.
pub fn decompress_with_progress<P: Progress>(data: &[u8], progress: P) -> Result<Vec<u8>> {
    HuffmanDecoder::with_progress(progress).decode(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip() {
        let original = b"TOBEORNOTTOBEORTOBEORNOT";
        let compressed = compress(original).unwrap();
        assert_eq!(decompress(&compressed).unwrap(), original);
    }

    #[test]
    fn test_empty_input() {
        let compressed = compress(b"").unwrap();
        assert_eq!(compressed, b"\x00{}2");
        assert!(decompress(&compressed).unwrap().is_empty());
    }

    #[test]
    fn test_single_symbol() {
        let compressed = compress(b"AAA").unwrap();
        assert_eq!(decompress(&compressed).unwrap(), b"AAA");
    }

    #[test]
    fn test_equal_frequencies() {
        let compressed = compress(b"AABBCC").unwrap();
        assert_eq!(decompress(&compressed).unwrap(), b"AABBCC");
    }

    #[test]
    fn test_brace_in_data() {
        let original = b"}}}{{{}}}";
        let compressed = compress(original).unwrap();
        assert_eq!(decompress(&compressed).unwrap(), original);
    }

    #[test]
    fn test_all_byte_values() {
        let original: Vec<u8> = (0..=255).collect();
        let compressed = compress(&original).unwrap();
        assert_eq!(decompress(&compressed).unwrap(), original);
    }

    #[test]
    fn test_repeating_pattern_shrinks() {
        let original = b"abababababcabababab".repeat(50);
        let compressed = compress(&original).unwrap();
        assert!(compressed.len() < original.len() / 2);
        assert_eq!(decompress(&compressed).unwrap(), original);
    }
}
