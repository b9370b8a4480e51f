//! The query façade the serving layer talks to.
//!
//! Holds the immutable startup state plus the injected cluster cache, and
//! validates inputs before delegating. One instance is built at startup and
//! shared behind an `Arc` by every request handler; tests build their own
//! with a fresh cache.

use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::Value;

use crate::cache::ClusterCache;
use crate::cluster::{ClusterAssignment, ClusterModel};
use crate::error::{QueryError, QueryResult};
use crate::hymns::HymnStore;

pub struct ClusterService {
    model: ClusterModel,
    hymns: HymnStore,
    cache: ClusterCache,
}

impl ClusterService {
    pub fn new(model: ClusterModel, hymns: HymnStore, cache: ClusterCache) -> Self {
        Self {
            model,
            hymns,
            cache,
        }
    }

    /// The partition induced by `sim`. The raw value must already lie in
    /// [0,1]; quantization for the cache happens after that check, so
    /// e.g. 1.004 is rejected rather than rounded in.
    pub fn clusters(&self, sim: f64) -> QueryResult<Arc<ClusterAssignment>> {
        if !(0.0..=1.0).contains(&sim) {
            return Err(QueryError::InvalidRange);
        }
        Ok(self.cache.get_or_compute(&self.model, sim))
    }

    pub fn hymn(&self, id: &str) -> QueryResult<&Value> {
        self.hymns.get(id)
    }

    pub fn hymns_bulk<'a, I>(&self, ids: I) -> QueryResult<IndexMap<String, Value>>
    where
        I: IntoIterator<Item = &'a str>,
    {
        self.hymns.get_bulk(ids)
    }
}
