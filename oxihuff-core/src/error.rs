//! Error types for OxiHuff operations.
//!
//! A single error type covers the whole pipeline: I/O from the byte
//! source/sink, malformed containers on decode, and internal lookup
//! inconsistencies between a code table and the data it is applied to.

use std::io;
use thiserror::Error;

/// The main error type for OxiHuff operations.
#[derive(Debug, Error)]
pub enum OxiHuffError {
    /// I/O error from underlying reader/writer.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Input rejected before any work was attempted.
    #[error("Invalid input: {message}")]
    InvalidInput {
        /// Why the input was rejected.
        message: String,
    },

    /// The compressed container could not be taken apart.
    #[error("Malformed container: {message}")]
    MalformedContainer {
        /// Description of what is wrong with the container.
        message: String,
    },

    /// A symbol being encoded has no entry in the code table.
    #[error("No code for symbol {symbol} ({symbol:#04x})")]
    MissingCode {
        /// The symbol without a code.
        symbol: u8,
    },

    /// The bit stream does not decode against the code table.
    #[error("Undecodable bit sequence at bit position {bit_position}")]
    UndecodableBits {
        /// Bit position where decoding got stuck.
        bit_position: u64,
    },

    /// A textual bit string contained something other than '0' or '1'.
    #[error("Invalid bit character {character:?} at position {position}")]
    InvalidBit {
        /// The offending character.
        character: char,
        /// Character index within the string.
        position: usize,
    },

    /// Padding length outside the packed stream's bounds.
    #[error("Invalid padding length: {padding}")]
    InvalidPadding {
        /// The rejected padding length.
        padding: u8,
    },
}

/// Result type alias for OxiHuff operations.
pub type Result<T> = std::result::Result<T, OxiHuffError>;

impl OxiHuffError {
    /// Create an invalid input error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Create a malformed container error.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedContainer {
            message: message.into(),
        }
    }

    /// Create a missing code error.
    pub fn missing_code(symbol: u8) -> Self {
        Self::MissingCode { symbol }
    }

    /// Create an undecodable bits error.
    pub fn undecodable(bit_position: u64) -> Self {
        Self::UndecodableBits { bit_position }
    }

    /// Create an invalid bit character error.
    pub fn invalid_bit(character: char, position: usize) -> Self {
        Self::InvalidBit {
            character,
            position,
        }
    }

    /// Create an invalid padding error.
    pub fn invalid_padding(padding: u8) -> Self {
        Self::InvalidPadding { padding }
    }

    /// Whether this error indicates a bug or corruption rather than bad user input.
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            Self::MissingCode { .. } | Self::UndecodableBits { .. }
        )
    }
}
