//! Best-effort progress reporting.
//!
//! The codec reports coarse progress through the [`Progress`] trait while it
//! counts symbols, builds the tree, and encodes or decodes the payload. Sinks
//! are write-only; nothing they do can affect the result.

use std::fmt;

/// Report at most once per this many completed units.
pub const PROGRESS_STEP: u64 = 1 << 12;

/// A pass of the compression pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Counting symbol frequencies.
    Counting,
    /// Merging nodes into the Huffman tree.
    BuildingTree,
    /// Replacing input bytes with their codes.
    Encoding,
    /// Matching bits against the code table.
    Decoding,
}

impl Stage {
    /// Short human-readable name.
    pub fn name(self) -> &'static str {
        match self {
            Stage::Counting => "counting",
            Stage::BuildingTree => "building tree",
            Stage::Encoding => "encoding",
            Stage::Decoding => "decoding",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A sink for progress updates.
pub trait Progress {
    /// A stage is starting with `total` units of work.
    fn begin(&mut self, stage: Stage, total: u64);

    /// `completed` units of the current stage are done.
    ///
    /// Values increase monotonically within a stage.
    fn advance(&mut self, completed: u64);

    /// The current stage is finished.
    fn finish(&mut self);
}

impl<P: Progress + ?Sized> Progress for &mut P {
    fn begin(&mut self, stage: Stage, total: u64) {
        (**self).begin(stage, total);
    }

    fn advance(&mut self, completed: u64) {
        (**self).advance(completed);
    }

    fn finish(&mut self) {
        (**self).finish();
    }
}

/// Progress sink that ignores every update.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl Progress for NoProgress {
    #[inline]
    fn begin(&mut self, _stage: Stage, _total: u64) {}

    #[inline]
    fn advance(&mut self, _completed: u64) {}

    #[inline]
    fn finish(&mut self) {}
}

/// Throttles [`Progress::advance`] calls to every [`PROGRESS_STEP`] units.
#[derive(Debug)]
pub struct Ticker {
    next: u64,
}

impl Ticker {
    /// Begin `stage` on `progress` and return a ticker for it.
    pub fn start<P: Progress + ?Sized>(progress: &mut P, stage: Stage, total: u64) -> Self {
        progress.begin(stage, total);
        Self {
            next: PROGRESS_STEP,
        }
    }

    /// Forward `completed` to `progress` if a step boundary was crossed.
    #[inline]
    pub fn tick<P: Progress + ?Sized>(&mut self, progress: &mut P, completed: u64) {
        if completed >= self.next {
            progress.advance(completed);
            self.next = completed + PROGRESS_STEP;
        }
    }

    /// Report the final count and end the stage.
    pub fn done<P: Progress + ?Sized>(self, progress: &mut P, completed: u64) {
        progress.advance(completed);
        progress.finish();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        events: Vec<(Option<Stage>, u64)>,
        finished: usize,
    }

    impl Progress for Recorder {
        fn begin(&mut self, stage: Stage, total: u64) {
            self.events.push((Some(stage), total));
        }

        fn advance(&mut self, completed: u64) {
            self.events.push((None, completed));
        }

        fn finish(&mut self) {
            self.finished += 1;
        }
    }

    #[test]
    fn test_ticker_throttles() {
        let mut rec = Recorder::default();
        let total = PROGRESS_STEP * 2 + 5;
        let mut ticker = Ticker::start(&mut rec, Stage::Encoding, total);
        for i in 1..=total {
            ticker.tick(&mut rec, i);
        }
        ticker.done(&mut rec, total);

        assert_eq!(rec.events[0], (Some(Stage::Encoding), total));
        let counts: Vec<u64> = rec.events[1..].iter().map(|e| e.1).collect();
        assert_eq!(counts, vec![PROGRESS_STEP, PROGRESS_STEP * 2, total]);
        assert!(counts.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(rec.finished, 1);
    }

    #[test]
    fn test_mut_ref_forwarding() {
        fn drive<P: Progress>(mut progress: P) {
            progress.begin(Stage::Counting, 3);
            progress.advance(3);
            progress.finish();
        }

        let mut rec = Recorder::default();
        drive(&mut rec);
        assert_eq!(rec.events.len(), 2);
        assert_eq!(rec.finished, 1);
    }

    #[test]
    fn test_stage_names() {
        assert_eq!(Stage::BuildingTree.to_string(), "building tree");
        assert_eq!(Stage::Decoding.name(), "decoding");
    }
}
