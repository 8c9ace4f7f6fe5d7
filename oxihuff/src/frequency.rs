//! Symbol frequency counting.

use oxihuff_core::progress::{Progress, Stage, Ticker};

/// Occurrence counts for each byte value of an input.
///
/// Symbols are remembered in the order they first appear; that order seeds
/// the tie-break used when building the tree, so equal inputs always produce
/// equal trees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [u64; 256],
    order: Vec<u8>,
}

impl FrequencyTable {
    /// Count the symbols of `data`.
    pub fn build(data: &[u8]) -> Self {
        let mut progress = oxihuff_core::NoProgress;
        Self::build_with_progress(data, &mut progress)
    }

    /// Count the symbols of `data`, reporting to `progress`.
    pub fn build_with_progress<P: Progress + ?Sized>(data: &[u8], progress: &mut P) -> Self {
        let mut table = Self::default();
        let mut ticker = Ticker::start(progress, Stage::Counting, data.len() as u64);

        for (i, &byte) in data.iter().enumerate() {
            table.add(byte);
            ticker.tick(progress, i as u64 + 1);
        }

        ticker.done(progress, data.len() as u64);
        table
    }

    /// Add one occurrence of `symbol`.
    pub fn add(&mut self, symbol: u8) {
        let count = &mut self.counts[symbol as usize];
        if *count == 0 {
            self.order.push(symbol);
        }
        *count += 1;
    }

    /// Occurrences of `symbol` (zero if absent).
    #[inline]
    pub fn get(&self, symbol: u8) -> u64 {
        self.counts[symbol as usize]
    }

    /// Number of distinct symbols.
    #[inline]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether no symbol was counted.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Total number of symbols counted.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// `(symbol, count)` pairs in first-occurrence order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.order.iter().map(|&s| (s, self.counts[s as usize]))
    }
}

impl Default for FrequencyTable {
    fn default() -> Self {
        Self {
            counts: [0; 256],
            order: Vec::new(),
        }
    }
}
