use serde::{Deserialize, Serialize};
use tracing::info;

/// Tally of one full pass through the token sequence.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BlockResult {
    pub seq: u64,
    pub attempted: usize,
    pub correct: usize,
    /// Fraction in `[0, 1]`; zero when nothing was attempted.
    pub accuracy: f64,
}

impl BlockResult {
    pub fn new(seq: u64, attempted: usize, correct: usize) -> Self {
        let accuracy = if attempted > 0 {
            correct as f64 / attempted as f64
        } else {
            0.0
        };
        Self {
            seq,
            attempted,
            correct,
            accuracy,
        }
    }

    pub fn is_perfect(&self) -> bool {
        self.attempted > 0 && self.correct == self.attempted
    }
}

/// A block finished without a single wrong keystroke.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PerfectBlock {
    pub seq: u64,
}

/// One-shot notifier for perfect blocks, deduplicated by `seq`.
#[derive(Clone, Debug, Default)]
pub struct PerfectBlockSignal {
    last_seq: Option<u64>,
}

impl PerfectBlockSignal {
    pub fn observe(&mut self, result: &BlockResult) -> Option<PerfectBlock> {
        if !result.is_perfect() || self.last_seq == Some(result.seq) {
            return None;
        }
        self.last_seq = Some(result.seq);
        info!(seq = result.seq, attempted = result.attempted, "perfect block");
        Some(PerfectBlock { seq: result.seq })
    }
}
