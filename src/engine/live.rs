use crate::engine::smoother::{Metrics, MetricsSmoother};
use crate::engine::tracker::{AttemptEvent, RollingTracker, TrackerSnapshot};
use crate::generator::text::TokenKind;
use crate::session::input::AttemptResult;

/// When the tracker is sampled into a new smoother target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SnapshotCadence {
    /// After a space attempt, and after every `every`-th attempt.
    PerAttempt { every: u32 },
    /// At most once per `ms` of host time, driven by `tick`.
    Interval { ms: u64 },
}

impl Default for SnapshotCadence {
    fn default() -> Self {
        SnapshotCadence::PerAttempt { every: 5 }
    }
}

/// Rolling tracker, cadence and smoother owned by one view.
pub struct LiveMetrics {
    tracker: RollingTracker,
    smoother: MetricsSmoother,
    cadence: SnapshotCadence,
    last_seq: Option<u64>,
    attempt_count: u64,
    last_refresh: Option<u64>,
    last_snapshot: Option<TrackerSnapshot>,
}

impl LiveMetrics {
    pub fn new(window_ms: u64, alpha: f64, cadence: SnapshotCadence) -> Self {
        Self {
            tracker: RollingTracker::new(window_ms),
            smoother: MetricsSmoother::new(alpha),
            cadence,
            last_seq: None,
            attempt_count: 0,
            last_refresh: None,
            last_snapshot: None,
        }
    }

    pub fn display(&self) -> Metrics {
        self.smoother.display()
    }

    pub fn target(&self) -> Metrics {
        self.smoother.target()
    }

    pub fn last_snapshot(&self) -> Option<TrackerSnapshot> {
        self.last_snapshot
    }

    /// Feed one scored attempt. Returns true when the target was refreshed.
    pub fn record(&mut self, attempt: &AttemptResult, now: u64) -> bool {
        if self.last_seq == Some(attempt.seq) {
            return false;
        }
        self.last_seq = Some(attempt.seq);

        self.tracker.push(AttemptEvent {
            t: now,
            correct: attempt.correct,
            counted: true,
        });
        self.attempt_count += 1;

        match self.cadence {
            SnapshotCadence::PerAttempt { every } => {
                let every = u64::from(every.max(1));
                if attempt.kind == TokenKind::Space || self.attempt_count % every == 0 {
                    self.refresh(now);
                    return true;
                }
                false
            }
            SnapshotCadence::Interval { .. } => false,
        }
    }

    /// Advance one frame. Returns true while the display is still moving.
    pub fn tick(&mut self, now: u64) -> bool {
        if let SnapshotCadence::Interval { ms } = self.cadence {
            let due = self
                .last_refresh
                .is_none_or(|last| now.saturating_sub(last) >= ms);
            if due {
                self.refresh(now);
            }
        }
        self.smoother.step()
    }

    fn refresh(&mut self, now: u64) {
        let snap = self.tracker.snapshot(now);
        self.smoother.set_target(Metrics {
            wpm: snap.wpm,
            accuracy: snap.accuracy,
        });
        self.last_refresh = Some(now);
        self.last_snapshot = Some(snap);
    }
}
