//! Huffman encoder (compression).

use crate::code_table::CodeTable;
use crate::container::Container;
use crate::frequency::FrequencyTable;
use crate::tree::HuffmanTree;
use oxihuff_core::error::Result;
use oxihuff_core::progress::{NoProgress, Progress};

/// Everything derived from an input before its payload is encoded.
#[derive(Debug, Clone)]
pub struct Analysis {
    /// Symbol counts.
    pub frequencies: FrequencyTable,
    /// The Huffman tree, absent for empty input.
    pub tree: Option<HuffmanTree>,
    /// Codes read off the tree (empty for empty input).
    pub table: CodeTable,
}

impl Analysis {
    /// Payload size in bits, before padding.
    pub fn encoded_bits(&self) -> u64 {
        self.table.encoded_bit_len(&self.frequencies)
    }
}

/// Huffman encoder producing self-describing containers.
#[derive(Debug, Default)]
pub struct HuffmanEncoder<P: Progress = NoProgress> {
    progress: P,
}

impl HuffmanEncoder<NoProgress> {
    /// Create an encoder that reports no progress.
    pub fn new() -> Self {
        Self {
            progress: NoProgress,
        }
    }
}

impl<P: Progress> HuffmanEncoder<P> {
    /// Create an encoder reporting to `progress`.
    pub fn with_progress(progress: P) -> Self {
        Self { progress }
    }

    /// Count symbols, build the tree, and derive the code table.
    pub fn analyze(&mut self, data: &[u8]) -> Analysis {
        let frequencies = FrequencyTable::build_with_progress(data, &mut self.progress);
        let tree = HuffmanTree::build_with_progress(&frequencies, &mut self.progress);
        let table = tree
            .as_ref()
            .map(HuffmanTree::code_table)
            .unwrap_or_default();

        Analysis {
            frequencies,
            tree,
            table,
        }
    }

    /// Compress `data` into a container.
    ///
    /// # Algorithm
    ///
    /// 1. Count symbol frequencies
    /// 2. Build the Huffman tree and read the code table off it
    /// 3. Replace every byte with its code
    /// 4. Pack the bits into bytes, recording the padding
    /// 5. Append the serialized table and its length
    pub fn encode(&mut self, data: &[u8]) -> Result<Vec<u8>> {
        let analysis = self.analyze(data);
        let bits = analysis
            .table
            .apply_with_progress(data, &mut self.progress)?;

        log::debug!(
            "encoded {} bytes into {} bits with {} codes",
            data.len(),
            bits.len(),
            analysis.table.len()
        );

        Container::new(bits.into_packed(), analysis.table).to_bytes()
    }

    /// Take back the progress sink.
    pub fn into_progress(self) -> P {
        self.progress
    }
}
