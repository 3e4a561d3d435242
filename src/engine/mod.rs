pub mod live;
pub mod smoother;
pub mod tracker;

pub use live::{LiveMetrics, SnapshotCadence};
pub use smoother::{Metrics, MetricsSmoother};
pub use tracker::{AttemptEvent, RollingTracker, TrackerSnapshot};
