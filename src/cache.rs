//! Per-threshold memoization of cluster assignments.
//!
//! Thresholds are quantized to two decimals before keying, so the key space
//! is exactly the 101 integer percentages and near-duplicate floating
//! inputs collapse to one entry. Entries live for the process lifetime;
//! nothing is ever evicted.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::cluster::{ClusterAssignment, ClusterModel};

/// Quantize a threshold in [0,1] to its integer-percent cache key.
///
/// Fixed-point on purpose: an f64 rounded to two decimals is not exactly
/// representable, and keying on it could split one logical threshold into
/// two entries depending on how the input was produced.
pub fn quantize(threshold: f64) -> u8 {
    (threshold.clamp(0.0, 1.0) * 100.0).round() as u8
}

/// Process-wide cluster cache. One mutex guards the whole map and is held
/// across a miss computation, so a given key is computed at most once and
/// readers only ever observe fully built assignments. A cut is O(n α) and
/// the key space is 101 entries, so serializing distinct-key misses costs
/// nothing worth avoiding.
#[derive(Default)]
pub struct ClusterCache {
    entries: Mutex<HashMap<u8, Arc<ClusterAssignment>>>,
}

impl ClusterCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the assignment for `threshold`, computing and storing it on
    /// first use of its quantized key.
    pub fn get_or_compute(&self, model: &ClusterModel, threshold: f64) -> Arc<ClusterAssignment> {
        let key = quantize(threshold);
        let mut entries = self.entries.lock();
        if let Some(cached) = entries.get(&key) {
            crate::debug_event!("cache", "hit", "sim={}", key as f64 / 100.0);
            return Arc::clone(cached);
        }
        let assignment = Arc::new(model.cut(key as f64 / 100.0));
        entries.insert(key, Arc::clone(&assignment));
        assignment
    }

    /// Number of distinct thresholds computed so far.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}
