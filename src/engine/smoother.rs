use serde::{Deserialize, Serialize};

pub const DEFAULT_ALPHA: f64 = 0.18;
pub const SETTLE_EPSILON: f64 = 0.05;
pub const MAX_WPM: f64 = 999.0;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    pub wpm: f64,
    pub accuracy: f64,
}

impl Metrics {
    /// Limit to wpm in `[0, MAX_WPM]` and accuracy in `[0, 100]`.
    pub fn clamped(self) -> Self {
        Self {
            wpm: self.wpm.clamp(0.0, MAX_WPM),
            accuracy: self.accuracy.clamp(0.0, 100.0),
        }
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self {
            wpm: 0.0,
            accuracy: 100.0,
        }
    }
}

/// Exponential interpolation of displayed metrics towards a target.
///
/// `step` is the frame callback; the host keeps calling it while it returns
/// `true` and may stop scheduling frames once it returns `false`.
#[derive(Clone, Debug)]
pub struct MetricsSmoother {
    display: Metrics,
    target: Metrics,
    alpha: f64,
    settled: bool,
}

impl MetricsSmoother {
    pub fn new(alpha: f64) -> Self {
        Self::starting_at(Metrics::default(), alpha)
    }

    pub fn starting_at(display: Metrics, alpha: f64) -> Self {
        Self {
            display,
            target: display,
            alpha: alpha.clamp(f64::EPSILON, 1.0),
            settled: true,
        }
    }

    pub fn display(&self) -> Metrics {
        self.display
    }

    pub fn target(&self) -> Metrics {
        self.target
    }

    pub fn is_settled(&self) -> bool {
        self.settled
    }

    /// The target is clamped like the display, so an out-of-range snapshot
    /// still settles.
    pub fn set_target(&mut self, target: Metrics) {
        self.target = target.clamped();
        self.settled = false;
    }

    pub fn step(&mut self) -> bool {
        if self.settled {
            return false;
        }

        let wpm = self.display.wpm + (self.target.wpm - self.display.wpm) * self.alpha;
        let accuracy =
            self.display.accuracy + (self.target.accuracy - self.display.accuracy) * self.alpha;

        self.settled = (self.target.wpm - wpm).abs() < SETTLE_EPSILON
            && (self.target.accuracy - accuracy).abs() < SETTLE_EPSILON;

        self.display = Metrics { wpm, accuracy }.clamped();

        !self.settled
    }
}

impl Default for MetricsSmoother {
    fn default() -> Self {
        Self::new(DEFAULT_ALPHA)
    }
}
