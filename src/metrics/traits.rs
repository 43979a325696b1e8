//! Recorder and provider traits for the `metrics` feature.
//!
//! ```text
//!        ┌──────────────────────────┐
//!        │   CoreMetricsRecorder    │  get hit/miss, insert new/update,
//!        │                          │  evictions, clear
//!        └────────────┬─────────────┘
//!                     │
//!                     ▼
//!        ┌──────────────────────────┐
//!        │   ArcMetricsRecorder     │  promotions, ghost hits per side,
//!        │                          │  capacity shifts, evictions per side
//!        └──────────────────────────┘
//!
//!   MetricsSnapshotProvider<S>: read side, decoupled from recording
//! ```
//!
//! Recorders only write counters. Snapshots are plain `Copy` structs taken at
//! a point in time, so tests and benches can diff them.

/// Counters every policy can record.
pub trait CoreMetricsRecorder {
    fn record_get_hit(&mut self);
    fn record_get_miss(&mut self);
    fn record_insert_call(&mut self);
    fn record_insert_new(&mut self);
    fn record_insert_update(&mut self);
    fn record_evicted_entries(&mut self, count: usize);
    fn record_clear(&mut self);
}

/// ARC-specific signals.
pub trait ArcMetricsRecorder: CoreMetricsRecorder {
    fn record_promotion(&mut self);
    fn record_recency_ghost_hit(&mut self);
    fn record_frequency_ghost_hit(&mut self);
    /// One unit moved from the frequency partition to the recency partition.
    fn record_recency_capacity_gain(&mut self);
    /// One unit moved from the recency partition to the frequency partition.
    fn record_frequency_capacity_gain(&mut self);
    fn record_recency_evictions(&mut self, count: usize);
    fn record_frequency_evictions(&mut self, count: usize);
}

pub trait MetricsSnapshotProvider<S> {
    fn snapshot(&self) -> S;
}

/// Reset counters between test cases or bench iterations.
pub trait MetricsReset {
    fn reset_metrics(&mut self);
}
