use crate::metrics::traits::{ArcMetricsRecorder, CoreMetricsRecorder};

#[derive(Debug, Default, Clone)]
pub struct ArcMetrics {
    pub get_calls: u64,
    pub get_hits: u64,
    pub get_misses: u64,
    pub insert_calls: u64,
    pub insert_updates: u64,
    pub insert_new: u64,
    pub evicted_entries: u64,
    pub clears: u64,
    pub promotions: u64,
    pub recency_ghost_hits: u64,
    pub frequency_ghost_hits: u64,
    pub recency_capacity_gains: u64,
    pub frequency_capacity_gains: u64,
    pub recency_evictions: u64,
    pub frequency_evictions: u64,
}

impl CoreMetricsRecorder for ArcMetrics {
    fn record_get_hit(&mut self) {
        self.get_calls += 1;
        self.get_hits += 1;
    }
    fn record_get_miss(&mut self) {
        self.get_calls += 1;
        self.get_misses += 1;
    }
    fn record_insert_call(&mut self) {
        self.insert_calls += 1;
    }
    fn record_insert_new(&mut self) {
        self.insert_new += 1;
    }
    fn record_insert_update(&mut self) {
        self.insert_updates += 1;
    }
    fn record_evicted_entries(&mut self, count: usize) {
        self.evicted_entries += count as u64;
    }
    fn record_clear(&mut self) {
        self.clears += 1;
    }
}

impl ArcMetricsRecorder for ArcMetrics {
    fn record_promotion(&mut self) {
        self.promotions += 1;
    }
    fn record_recency_ghost_hit(&mut self) {
        self.recency_ghost_hits += 1;
    }
    fn record_frequency_ghost_hit(&mut self) {
        self.frequency_ghost_hits += 1;
    }
    fn record_recency_capacity_gain(&mut self) {
        self.recency_capacity_gains += 1;
    }
    fn record_frequency_capacity_gain(&mut self) {
        self.frequency_capacity_gains += 1;
    }
    fn record_recency_evictions(&mut self, count: usize) {
        self.recency_evictions += count as u64;
        self.record_evicted_entries(count);
    }
    fn record_frequency_evictions(&mut self, count: usize) {
        self.frequency_evictions += count as u64;
        self.record_evicted_entries(count);
    }
}
