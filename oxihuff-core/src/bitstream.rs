//! MSB-first bit strings and byte packing.
//!
//! Huffman codes and the encoded payload are both sequences of bits whose
//! length is not a multiple of 8. [`BitString`] stores them packed, most
//! significant bit first, so that turning a payload into bytes is a matter of
//! recording how many zero bits pad the final byte.
//!
//! ```text
//! bits:    1 0 1 1 0 0 1 0 1 1
//! bytes:   [1011_0010] [11__ ____]
//!                          ^^^^^^ padding = 6
//! ```

use crate::error::{OxiHuffError, Result};
use std::fmt;
use std::str::FromStr;

/// Largest padding a packed stream can carry.
pub const MAX_PADDING: u8 = 7;

/// An owned sequence of bits, packed MSB-first.
///
/// Bits past `len` in the last byte are always zero, so two bit strings with
/// the same bits compare equal regardless of how they were built.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BitString {
    bytes: Vec<u8>,
    len: usize,
}

impl BitString {
    /// Create an empty bit string.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty bit string with room for `bits` bits.
    pub fn with_capacity(bits: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(bits.div_ceil(8)),
            len: 0,
        }
    }

    /// Number of bits.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the bit string holds no bits.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Append a single bit.
    #[inline]
    pub fn push(&mut self, bit: bool) {
        let offset = self.len % 8;
        if offset == 0 {
            self.bytes.push(0);
        }
        if bit {
            let last = self.bytes.len() - 1;
            self.bytes[last] |= 0x80 >> offset;
        }
        self.len += 1;
    }

    /// Remove and return the last bit.
    pub fn pop(&mut self) -> Option<bool> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        let offset = self.len % 8;
        let index = self.len / 8;
        let mask = 0x80 >> offset;
        let bit = self.bytes[index] & mask != 0;
        self.bytes[index] &= !mask;
        if offset == 0 {
            self.bytes.pop();
        }
        Some(bit)
    }

    /// Append all bits of `other`.
    pub fn extend(&mut self, other: &BitString) {
        if self.len % 8 == 0 {
            // Byte-aligned: other's tail bits are zero, so a plain copy works.
            self.bytes.extend_from_slice(&other.bytes);
            self.len += other.len;
            return;
        }
        for bit in other.iter() {
            self.push(bit);
        }
    }

    /// Bit at `index`, if in range.
    #[inline]
    pub fn get(&self, index: usize) -> Option<bool> {
        if index >= self.len {
            return None;
        }
        Some(self.bytes[index / 8] & (0x80 >> (index % 8)) != 0)
    }

    /// Iterate over the bits in order.
    pub fn iter(&self) -> Bits<'_> {
        Bits {
            bits: self,
            front: 0,
        }
    }

    /// Whether every bit of `self` matches the start of `other`.
    ///
    /// A bit string is a prefix of itself.
    pub fn is_prefix_of(&self, other: &BitString) -> bool {
        if self.len > other.len {
            return false;
        }
        let full = self.len / 8;
        if self.bytes[..full] != other.bytes[..full] {
            return false;
        }
        let rest = self.len % 8;
        if rest == 0 {
            return true;
        }
        let mask = 0xFFu8 << (8 - rest);
        (self.bytes[full] & mask) == (other.bytes[full] & mask)
    }

    /// Packed bytes backing this bit string (tail bits zero).
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Consume the bit string into byte-aligned form.
    pub fn into_packed(self) -> PackedBits {
        PackedBits {
            padding: padding_for(self.len),
            bytes: self.bytes,
        }
    }
}

/// Number of zero bits needed to round `bit_len` up to a byte boundary.
#[inline]
pub fn padding_for(bit_len: usize) -> u8 {
    ((8 - bit_len % 8) % 8) as u8
}

impl fmt::Display for BitString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self.iter() {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl FromStr for BitString {
    type Err = OxiHuffError;

    fn from_str(s: &str) -> Result<Self> {
        let mut bits = BitString::with_capacity(s.len());
        for (position, character) in s.chars().enumerate() {
            match character {
                '0' => bits.push(false),
                '1' => bits.push(true),
                _ => return Err(OxiHuffError::invalid_bit(character, position)),
            }
        }
        Ok(bits)
    }
}

impl FromIterator<bool> for BitString {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        let mut bits = BitString::new();
        for bit in iter {
            bits.push(bit);
        }
        bits
    }
}

impl<'a> IntoIterator for &'a BitString {
    type Item = bool;
    type IntoIter = Bits<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the bits of a [`BitString`].
#[derive(Debug, Clone)]
pub struct Bits<'a> {
    bits: &'a BitString,
    front: usize,
}

impl Iterator for Bits<'_> {
    type Item = bool;

    #[inline]
    fn next(&mut self) -> Option<bool> {
        let bit = self.bits.get(self.front)?;
        self.front += 1;
        Some(bit)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.bits.len - self.front;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Bits<'_> {}

/// A bit string rounded up to whole bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackedBits {
    /// Zero bits appended after the last real bit (0-7).
    pub padding: u8,
    /// Packed bytes, MSB-first.
    pub bytes: Vec<u8>,
}

impl PackedBits {
    /// Number of real (unpadded) bits.
    pub fn bit_len(&self) -> usize {
        (self.bytes.len() * 8).saturating_sub(self.padding as usize)
    }
}

/// Pack a bit string into bytes, zero-padding the last byte.
pub fn pack(bits: &BitString) -> PackedBits {
    bits.clone().into_packed()
}

/// Unpack bytes into a bit string, dropping `padding` trailing bits.
///
/// Fails when `padding` exceeds [`MAX_PADDING`] or the number of available bits.
pub fn unpack(padding: u8, bytes: &[u8]) -> Result<BitString> {
    let total = bytes.len() * 8;
    if padding > MAX_PADDING || padding as usize > total {
        return Err(OxiHuffError::invalid_padding(padding));
    }

    let mut owned = bytes.to_vec();
    if padding > 0 {
        // Padding bits written by other encoders may not be zero.
        if let Some(last) = owned.last_mut() {
            *last &= 0xFFu8 << padding;
        }
    }

    Ok(BitString {
        bytes: owned,
        len: total - padding as usize,
    })
}
