//! # OxiHuff Core
//!
//! Core components for the OxiHuff compressor.
//!
//! - [`bitstream`]: MSB-first bit strings, byte packing and unpacking
//! - [`progress`]: Best-effort progress reporting
//! - [`error`]: Error types
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ CLI                                                     │
//! │     compress / decompress / test / info / tree         │
//! ├─────────────────────────────────────────────────────────┤
//! │ Codec (oxihuff)                                         │
//! │     Frequencies, Huffman tree, code table, container   │
//! ├─────────────────────────────────────────────────────────┤
//! │ Core (this crate)                                       │
//! │     BitString, pack/unpack, Progress, errors           │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use oxihuff_core::bitstream::{BitString, pack, unpack};
//!
//! let bits: BitString = "1011001011".parse().unwrap();
//! let packed = pack(&bits);
//! assert_eq!(packed.padding, 6);
//! assert_eq!(packed.bytes, vec![0b1011_0010, 0b1100_0000]);
//!
//! let restored = unpack(packed.padding, &packed.bytes).unwrap();
//! assert_eq!(restored, bits);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]
#![allow(clippy::module_name_repetitions)]

pub mod bitstream;
pub mod error;
pub mod progress;

// Re-exports for convenience
pub use bitstream::{BitString, MAX_PADDING, PackedBits, pack, unpack};
pub use error::{OxiHuffError, Result};
pub use progress::{NoProgress, PROGRESS_STEP, Progress, Stage, Ticker};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::bitstream::{BitString, PackedBits};
    pub use crate::error::{OxiHuffError, Result};
    pub use crate::progress::{NoProgress, Progress, Stage};
}
