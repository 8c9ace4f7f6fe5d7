//! Self-describing container format.
//!
//! ## Layout
//!
//! ```text
//! ┌─────────┬────────────────┬──────────────────────┬─────────────┐
//! │ padding │ packed payload │ code table (JSON)    │ table len   │
//! │ 1 byte  │ N bytes        │ M bytes              │ ASCII digits│
//! └─────────┴────────────────┴──────────────────────┴─────────────┘
//! ```
//!
//! - `padding` (0-7) is the number of zero bits closing the last payload byte.
//! - The code table maps decimal symbol strings to code strings with no
//!   whitespace, e.g. `{"65":"010","66":"11"}`.
//! - `table len` is `M` in decimal. It has no fixed width: a reader finds it
//!   by scanning back from the end to the last `}`, which closes the table.
//!   Length digits are ASCII `0`-`9`, so they can never contain that byte,
//!   while `}` bytes inside the payload sit before the table and are never
//!   reached by the scan.

use crate::code_table::CodeTable;
use oxihuff_core::bitstream::{BitString, MAX_PADDING, PackedBits, unpack};
use oxihuff_core::error::{OxiHuffError, Result};
use serde::Serialize;
use std::ops::Range;

/// Last byte of the serialized code table.
pub const TABLE_TERMINATOR: u8 = b'}';

/// First byte of the serialized code table.
pub const TABLE_START: u8 = b'{';

/// Byte ranges of each container section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    /// Padding length from byte 0.
    pub padding: u8,
    /// Packed payload bytes.
    pub payload: Range<usize>,
    /// Serialized code table.
    pub table: Range<usize>,
    /// Decimal digits of the table length.
    pub length: Range<usize>,
}

impl Layout {
    /// Locate the sections of `bytes`.
    pub fn locate(bytes: &[u8]) -> Result<Self> {
        let brace = bytes
            .iter()
            .rposition(|&b| b == TABLE_TERMINATOR)
            .ok_or_else(|| OxiHuffError::malformed("missing closing brace of code table"))?;

        let length = brace + 1..bytes.len();
        let digits = &bytes[length.clone()];
        if digits.is_empty() {
            return Err(OxiHuffError::malformed("missing code table length"));
        }
        if let Some(&bad) = digits.iter().find(|b| !b.is_ascii_digit()) {
            return Err(OxiHuffError::malformed(format!(
                "byte {bad:#04x} in code table length"
            )));
        }

        let table_len: usize = std::str::from_utf8(digits)
            .ok()
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| OxiHuffError::malformed("code table length out of range"))?;

        let table_end = brace + 1;
        let table_start = table_end.checked_sub(table_len).ok_or_else(|| {
            OxiHuffError::malformed(format!(
                "code table length {table_len} exceeds container size {}",
                bytes.len()
            ))
        })?;
        if table_len == 0 || bytes[table_start] != TABLE_START {
            return Err(OxiHuffError::malformed(format!(
                "code table length {table_len} does not match table bounds"
            )));
        }
        if table_start == 0 {
            return Err(OxiHuffError::malformed("missing padding byte"));
        }

        let padding = bytes[0];
        if padding > MAX_PADDING {
            return Err(OxiHuffError::malformed(format!(
                "padding length {padding} exceeds {MAX_PADDING}"
            )));
        }
        let payload = 1..table_start;
        if payload.is_empty() && padding != 0 {
            return Err(OxiHuffError::malformed(format!(
                "padding length {padding} with empty payload"
            )));
        }

        log::trace!(
            "container layout: payload {:?}, table {:?}, length {:?}",
            payload,
            table_start..table_end,
            length
        );

        Ok(Self {
            padding,
            payload,
            table: table_start..table_end,
            length,
        })
    }
}

/// A decoded container: padding, packed payload, and code table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Container {
    /// Zero bits closing the last payload byte (0-7).
    pub padding: u8,
    /// Packed payload, MSB-first.
    pub payload: Vec<u8>,
    /// Code table needed to decode the payload.
    pub table: CodeTable,
}

impl Container {
    /// Assemble a container from packed bits and their code table.
    pub fn new(packed: PackedBits, table: CodeTable) -> Self {
        Self {
            padding: packed.padding,
            payload: packed.bytes,
            table,
        }
    }

    /// Serialize to the container byte layout.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let table = serde_json::to_vec(&self.table)
            .map_err(|e| OxiHuffError::malformed(format!("cannot serialize code table: {e}")))?;
        let length = table.len().to_string();

        let mut out = Vec::with_capacity(1 + self.payload.len() + table.len() + length.len());
        out.push(self.padding);
        out.extend_from_slice(&self.payload);
        out.extend_from_slice(&table);
        out.extend_from_slice(length.as_bytes());

        log::debug!(
            "container: {} payload bytes, padding {}, {} table bytes, {} length digits",
            self.payload.len(),
            self.padding,
            table.len(),
            length.len()
        );
        Ok(out)
    }

    /// Parse the container byte layout.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let layout = Layout::locate(bytes)?;
        let table: CodeTable = serde_json::from_slice(&bytes[layout.table.clone()])
            .map_err(|e| OxiHuffError::malformed(format!("invalid code table: {e}")))?;

        Ok(Self {
            padding: layout.padding,
            payload: bytes[layout.payload].to_vec(),
            table,
        })
    }

    /// The payload as a bit string with padding removed.
    pub fn bits(&self) -> Result<BitString> {
        unpack(self.padding, &self.payload)
    }
}

/// Size breakdown of a container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContainerStats {
    /// Size of the whole container.
    pub total_bytes: usize,
    /// Packed payload size.
    pub payload_bytes: usize,
    /// Serialized code table size.
    pub table_bytes: usize,
    /// Digits in the trailing length field.
    pub length_digits: usize,
    /// Padding bits in the last payload byte.
    pub padding: u8,
    /// Payload bits excluding padding.
    pub payload_bits: usize,
    /// Symbols in the code table.
    pub symbols: usize,
    /// Longest code in the table.
    pub max_code_len: usize,
}

impl ContainerStats {
    /// Compute statistics for a container's bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let layout = Layout::locate(bytes)?;
        let container = Container::from_bytes(bytes)?;
        Ok(Self {
            total_bytes: bytes.len(),
            payload_bytes: layout.payload.len(),
            table_bytes: layout.table.len(),
            length_digits: layout.length.len(),
            padding: layout.padding,
            payload_bits: (layout.payload.len() * 8).saturating_sub(layout.padding as usize),
            symbols: container.table.len(),
            max_code_len: container.table.max_code_len(),
        })
    }
}
