//! Symbol-to-code mapping and its reverse.
//!
//! [`CodeTable`] is what the container carries: each symbol present in the
//! input mapped to its Huffman code. [`DecodeTable`] is the reverse lookup,
//! held as a binary trie so decoding walks one bit at a time and emits a
//! symbol whenever it reaches a leaf.

use crate::frequency::FrequencyTable;
use oxihuff_core::BitString;
use oxihuff_core::error::{OxiHuffError, Result};
use oxihuff_core::progress::{NoProgress, Progress, Stage, Ticker};
use serde::de::{self, Deserializer};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Mapping from symbol to its Huffman code, ordered by symbol.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeTable {
    codes: BTreeMap<u8, BitString>,
}

impl CodeTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the code for `symbol`, returning the previous one.
    pub fn insert(&mut self, symbol: u8, code: BitString) -> Option<BitString> {
        self.codes.insert(symbol, code)
    }

    /// Code for `symbol`.
    pub fn get(&self, symbol: u8) -> Option<&BitString> {
        self.codes.get(&symbol)
    }

    /// Number of symbols with a code.
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// `(symbol, code)` pairs in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &BitString)> + '_ {
        self.codes.iter().map(|(&s, c)| (s, c))
    }

    /// Length of the longest code (0 for an empty table).
    pub fn max_code_len(&self) -> usize {
        self.codes.values().map(BitString::len).max().unwrap_or(0)
    }

    /// Whether no code is a prefix of another.
    pub fn is_prefix_free(&self) -> bool {
        let codes: Vec<&BitString> = self.codes.values().collect();
        codes.iter().enumerate().all(|(i, a)| {
            codes[i + 1..]
                .iter()
                .all(|b| !a.is_prefix_of(b) && !b.is_prefix_of(a))
        })
    }

    /// Bits needed to encode data with the given frequencies.
    ///
    /// Symbols without a code are ignored.
    pub fn encoded_bit_len(&self, freq: &FrequencyTable) -> u64 {
        freq.iter()
            .filter_map(|(s, count)| self.get(s).map(|c| c.len() as u64 * count))
            .sum()
    }

    /// Concatenate the code of every byte in `data`.
    pub fn apply(&self, data: &[u8]) -> Result<BitString> {
        self.apply_with_progress(data, &mut NoProgress)
    }

    /// Concatenate the code of every byte in `data`, reporting to `progress`.
    ///
    /// Fails with [`OxiHuffError::MissingCode`] if a byte has no code, which
    /// means the table was not built from this data.
    pub fn apply_with_progress<P: Progress + ?Sized>(
        &self,
        data: &[u8],
        progress: &mut P,
    ) -> Result<BitString> {
        // Dense lookup instead of a map probe per byte.
        let mut lookup: Vec<Option<&BitString>> = vec![None; 256];
        for (&symbol, code) in &self.codes {
            lookup[symbol as usize] = Some(code);
        }

        let mut bits = BitString::with_capacity(data.len() * 2);
        let mut ticker = Ticker::start(progress, Stage::Encoding, data.len() as u64);

        for (i, &byte) in data.iter().enumerate() {
            let code = lookup[byte as usize].ok_or_else(|| OxiHuffError::missing_code(byte))?;
            bits.extend(code);
            ticker.tick(progress, i as u64 + 1);
        }

        ticker.done(progress, data.len() as u64);
        Ok(bits)
    }

    /// Build the reverse lookup for decoding.
    pub fn decoder(&self) -> Result<DecodeTable> {
        DecodeTable::new(self)
    }
}

impl FromIterator<(u8, BitString)> for CodeTable {
    fn from_iter<I: IntoIterator<Item = (u8, BitString)>>(iter: I) -> Self {
        Self {
            codes: iter.into_iter().collect(),
        }
    }
}

/// Serializes as a map from symbol to code text, e.g. `{"65":"0","66":"10"}`.
impl Serialize for CodeTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.codes.len()))?;
        for (symbol, code) in &self.codes {
            map.serialize_entry(symbol, &code.to_string())?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for CodeTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = BTreeMap::<u8, String>::deserialize(deserializer)?;
        let mut codes = BTreeMap::new();
        for (symbol, text) in raw {
            let code: BitString = text.parse().map_err(de::Error::custom)?;
            if code.is_empty() {
                return Err(de::Error::custom(format!("empty code for symbol {symbol}")));
            }
            codes.insert(symbol, code);
        }
        Ok(Self { codes })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Empty,
    Branch(u32),
    Symbol(u8),
}

/// Reverse of a [`CodeTable`]: a binary trie over code bits.
#[derive(Debug, Clone)]
pub struct DecodeTable {
    /// Node 0 is the root; each node has a slot for bit 0 and bit 1.
    nodes: Vec<[Slot; 2]>,
    symbols: usize,
}

impl DecodeTable {
    /// Build the trie, rejecting empty codes and codes that prefix one another.
    pub fn new(table: &CodeTable) -> Result<Self> {
        let mut nodes = vec![[Slot::Empty; 2]];

        for (symbol, code) in table.iter() {
            let last = code
                .len()
                .checked_sub(1)
                .ok_or_else(|| OxiHuffError::malformed(format!("empty code for symbol {symbol}")))?;

            let mut node = 0usize;
            for (i, bit) in code.iter().enumerate() {
                match nodes[node][bit as usize] {
                    Slot::Empty if i == last => nodes[node][bit as usize] = Slot::Symbol(symbol),
                    Slot::Empty => {
                        let next = nodes.len();
                        nodes[node][bit as usize] = Slot::Branch(next as u32);
                        nodes.push([Slot::Empty; 2]);
                        node = next;
                    }
                    Slot::Branch(next) if i < last => node = next as usize,
                    Slot::Branch(_) | Slot::Symbol(_) => {
                        return Err(OxiHuffError::malformed(format!(
                            "code {code} for symbol {symbol} is not prefix-free"
                        )));
                    }
                }
            }
        }

        Ok(Self {
            nodes,
            symbols: table.len(),
        })
    }

    /// Number of symbols reachable in the trie.
    pub fn len(&self) -> usize {
        self.symbols
    }

    /// Whether the trie holds no codes.
    pub fn is_empty(&self) -> bool {
        self.symbols == 0
    }

    /// Decode `bits` into symbols.
    pub fn decode(&self, bits: &BitString) -> Result<Vec<u8>> {
        self.decode_with_progress(bits, &mut NoProgress)
    }

    /// Decode `bits` into symbols, reporting consumed bits to `progress`.
    ///
    /// Codes are prefix-free, so the first leaf reached is the only possible
    /// match and no backtracking is needed. Fails with
    /// [`OxiHuffError::UndecodableBits`] if a bit leads nowhere or the input
    /// ends partway through a code.
    pub fn decode_with_progress<P: Progress + ?Sized>(
        &self,
        bits: &BitString,
        progress: &mut P,
    ) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(bits.len() / 2);
        let mut node = 0usize;
        let mut code_start = 0usize;
        let mut ticker = Ticker::start(progress, Stage::Decoding, bits.len() as u64);

        for (pos, bit) in bits.iter().enumerate() {
            match self.nodes[node][bit as usize] {
                Slot::Empty => return Err(OxiHuffError::undecodable(pos as u64)),
                Slot::Branch(next) => node = next as usize,
                Slot::Symbol(symbol) => {
                    out.push(symbol);
                    node = 0;
                    code_start = pos + 1;
                }
            }
            ticker.tick(progress, pos as u64 + 1);
        }

        if node != 0 {
            return Err(OxiHuffError::undecodable(code_start as u64));
        }

        ticker.done(progress, bits.len() as u64);
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(pairs: &[(u8, &str)]) -> CodeTable {
        pairs
            .iter()
            .map(|&(s, c)| (s, c.parse().unwrap()))
            .collect()
    }

    #[test]
    fn test_apply() {
        let t = table(&[(b'A', "0"), (b'B', "10"), (b'C', "11")]);
        let bits = t.apply(b"ABCA").unwrap();
        assert_eq!(bits.to_string(), "010110");
    }

    #[test]
    fn test_apply_missing_symbol() {
        let t = table(&[(b'A', "0")]);
        let err = t.apply(b"AB").unwrap_err();
        assert!(matches!(err, OxiHuffError::MissingCode { symbol: b'B' }));
    }

    #[test]
    fn test_decode() {
        let t = table(&[(b'A', "0"), (b'B', "10"), (b'C', "11")]);
        let dec = t.decoder().unwrap();
        assert_eq!(dec.len(), 3);
        let bits: BitString = "010110".parse().unwrap();
        assert_eq!(dec.decode(&bits).unwrap(), b"ABCA");
    }

    #[test]
    fn test_decode_trailing_partial_code() {
        let t = table(&[(b'A', "0"), (b'B', "10"), (b'C', "11")]);
        let dec = t.decoder().unwrap();
        let bits: BitString = "0101".parse().unwrap();
        let err = dec.decode(&bits).unwrap_err();
        assert!(matches!(err, OxiHuffError::UndecodableBits { bit_position: 3 }));
    }

    #[test]
    fn test_decode_dead_end() {
        // Single-symbol table: a '1' bit matches nothing.
        let t = table(&[(b'A', "0")]);
        let dec = t.decoder().unwrap();
        let bits: BitString = "001".parse().unwrap();
        let err = dec.decode(&bits).unwrap_err();
        assert!(matches!(err, OxiHuffError::UndecodableBits { bit_position: 2 }));
    }

    #[test]
    fn test_empty_table() {
        let dec = CodeTable::new().decoder().unwrap();
        assert!(dec.is_empty());
        assert!(dec.decode(&BitString::new()).unwrap().is_empty());
        assert!(dec.decode(&"0".parse().unwrap()).is_err());
    }

    #[test]
    fn test_rejects_prefix_conflicts() {
        let t = table(&[(b'A', "0"), (b'B', "01")]);
        assert!(!t.is_prefix_free());
        assert!(matches!(
            t.decoder(),
            Err(OxiHuffError::MalformedContainer { .. })
        ));

        let t = table(&[(b'A', "10"), (b'B', "1")]);
        assert!(!t.is_prefix_free());
        assert!(t.decoder().is_err());

        let t = table(&[(b'A', "1"), (b'B', "1")]);
        assert!(t.decoder().is_err());
    }

    #[test]
    fn test_rejects_empty_code() {
        let t = table(&[(b'A', "")]);
        assert!(matches!(
            t.decoder(),
            Err(OxiHuffError::MalformedContainer { .. })
        ));
    }

    #[test]
    fn test_json_shape() {
        let t = table(&[(b'B', "11"), (b'A', "010")]);
        let json = serde_json::to_string(&t).unwrap();
        assert_eq!(json, r#"{"65":"010","66":"11"}"#);

        let back: CodeTable = serde_json::from_str(&json).unwrap();
        assert_eq!(back, t);
    }

    #[test]
    fn test_json_rejects_bad_codes() {
        assert!(serde_json::from_str::<CodeTable>(r#"{"65":"012"}"#).is_err());
        assert!(serde_json::from_str::<CodeTable>(r#"{"65":""}"#).is_err());
        assert!(serde_json::from_str::<CodeTable>(r#"{"256":"0"}"#).is_err());
        assert!(serde_json::from_str::<CodeTable>(r#"{"x":"0"}"#).is_err());
    }

    #[test]
    fn test_encoded_bit_len() {
        let freq = FrequencyTable::build(b"AAB");
        let t = table(&[(b'A', "0"), (b'B', "1")]);
        assert_eq!(t.encoded_bit_len(&freq), 3);
        assert_eq!(t.max_code_len(), 1);
    }
}
