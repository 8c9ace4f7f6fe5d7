//! Huffman decoder (decompression).

use crate::container::Container;
use oxihuff_core::error::Result;
use oxihuff_core::progress::{NoProgress, Progress};

/// Huffman decoder for containers produced by [`HuffmanEncoder`](crate::HuffmanEncoder).
#[derive(Debug, Default)]
pub struct HuffmanDecoder<P: Progress = NoProgress> {
    progress: P,
}

impl HuffmanDecoder<NoProgress> {
    /// Create a decoder that reports no progress.
    pub fn new() -> Self {
        Self {
            progress: NoProgress,
        }
    }
}

impl<P: Progress> HuffmanDecoder<P> {
    /// Create a decoder reporting to `progress`.
    pub fn with_progress(progress: P) -> Self {
        Self { progress }
    }

    /// Parse a container without decoding its payload.
    pub fn inspect(&self, input: &[u8]) -> Result<Container> {
        Container::from_bytes(input)
    }

    /// Decompress a container.
    ///
    /// Either the whole input decodes or an error is returned; no partial
    /// output is produced.
    pub fn decode(&mut self, input: &[u8]) -> Result<Vec<u8>> {
        let container = Container::from_bytes(input)?;
        let decoder = container.table.decoder()?;
        let bits = container.bits()?;

        let output = decoder.decode_with_progress(&bits, &mut self.progress)?;
        log::debug!(
            "decoded {} bits into {} bytes with {} codes",
            bits.len(),
            output.len(),
            decoder.len()
        );
        Ok(output)
    }

    /// Take back the progress sink.
    pub fn into_progress(self) -> P {
        self.progress
    }
}
