//! Counters for the ARC engine, compiled in with the `metrics` feature.
pub mod metrics_impl;
pub mod snapshot;
pub mod traits;

pub use metrics_impl::ArcMetrics;
pub use snapshot::ArcMetricsSnapshot;
pub use traits::{ArcMetricsRecorder, CoreMetricsRecorder, MetricsReset, MetricsSnapshotProvider};
