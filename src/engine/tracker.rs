use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

pub const DEFAULT_WINDOW_MS: u64 = 15_000;

const CHARS_PER_WORD: f64 = 5.0;
const MS_PER_MINUTE: f64 = 60_000.0;

/// One scored keystroke at time `t` (milliseconds on the host's clock).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AttemptEvent {
    pub t: u64,
    pub correct: bool,
    pub counted: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrackerSnapshot {
    pub window_ms: u64,
    pub correct: usize,
    pub attempted: usize,
    pub accuracy: f64,
    pub wpm: f64,
}

/// Time-windowed log of attempts.
///
/// Events must be pushed with non-decreasing `t`; pruning only drops from the
/// front of the log and relies on that ordering.
#[derive(Clone, Debug)]
pub struct RollingTracker {
    window_ms: u64,
    attempts: VecDeque<AttemptEvent>,
}

impl RollingTracker {
    pub fn new(window_ms: u64) -> Self {
        Self {
            window_ms,
            attempts: VecDeque::new(),
        }
    }

    pub fn window_ms(&self) -> u64 {
        self.window_ms
    }

    pub fn len(&self) -> usize {
        self.attempts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attempts.is_empty()
    }

    pub fn clear(&mut self) {
        self.attempts.clear();
    }

    pub fn push(&mut self, event: AttemptEvent) {
        self.attempts.push_back(event);
        self.prune(event.t);
    }

    pub fn snapshot(&mut self, now: u64) -> TrackerSnapshot {
        self.prune(now);

        let mut correct = 0;
        let mut attempted = 0;
        let mut oldest_counted: Option<u64> = None;

        for attempt in self.attempts.iter().filter(|a| a.counted) {
            attempted += 1;
            if attempt.correct {
                correct += 1;
            }
            oldest_counted.get_or_insert(attempt.t);
        }

        let accuracy = if attempted > 0 {
            correct as f64 / attempted as f64 * 100.0
        } else {
            100.0
        };

        let span_ms = oldest_counted
            .map(|t| now.saturating_sub(t).min(self.window_ms))
            .unwrap_or(0);
        let wpm = if span_ms > 0 {
            (correct as f64 / CHARS_PER_WORD) / (span_ms as f64 / MS_PER_MINUTE)
        } else {
            0.0
        };

        TrackerSnapshot {
            window_ms: self.window_ms,
            correct,
            attempted,
            accuracy,
            wpm,
        }
    }

    fn prune(&mut self, now: u64) {
        let Some(cutoff) = now.checked_sub(self.window_ms) else {
            return;
        };
        while self.attempts.front().is_some_and(|a| a.t < cutoff) {
            self.attempts.pop_front();
        }
    }
}

impl Default for RollingTracker {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW_MS)
    }
}
