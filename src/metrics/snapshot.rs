#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ArcMetricsSnapshot {
    pub get_calls: u64,
    pub get_hits: u64,
    pub get_misses: u64,

    pub insert_calls: u64,
    pub insert_updates: u64,
    pub insert_new: u64,

    pub evicted_entries: u64,
    pub recency_evictions: u64,
    pub frequency_evictions: u64,

    pub promotions: u64,
    pub recency_ghost_hits: u64,
    pub frequency_ghost_hits: u64,
    pub recency_capacity_gains: u64,
    pub frequency_capacity_gains: u64,

    // gauges captured at snapshot time
    pub recency_len: usize,
    pub frequency_len: usize,
    pub recency_capacity: usize,
    pub frequency_capacity: usize,
    pub capacity: usize,
}

impl ArcMetricsSnapshot {
    /// Fraction of `get` calls that returned a value, `0.0` before any call.
    pub fn hit_ratio(&self) -> f64 {
        if self.get_calls == 0 {
            0.0
        } else {
            self.get_hits as f64 / self.get_calls as f64
        }
    }
}
