//! The persisted input format.
//!
//! A single `data.json` produced by the offline clustering pipeline:
//!
//! ```json
//! {
//!   "linkage":    [left, right, distance, size, ...],
//!   "vocab_freq": [["word", freq, ["1-1", ...]], ...],
//!   "hymns":      {"1-1": <record>, ...}
//! }
//! ```
//!
//! Loaded once at startup and validated before anything is served; any
//! inconsistency is fatal.

use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;

use crate::cluster::ClusterModel;
use crate::error::LoadResult;
use crate::hymns::HymnStore;
use crate::linkage::Linkage;
use crate::vocab::Vocabulary;

#[derive(Debug, Deserialize)]
pub struct DataFile {
    /// Flat merge history, four numbers per step.
    pub linkage: Vec<f64>,
    /// Word, frequency, originating hymn ids. Order defines leaf indices.
    pub vocab_freq: Vec<(String, u64, Vec<String>)>,
    /// Hymn id to record, passed through verbatim.
    pub hymns: IndexMap<String, Value>,
}

impl DataFile {
    pub fn load(path: &Path) -> LoadResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }
}

/// Build the validated startup state out of a parsed data file.
pub fn load_model(data: DataFile) -> LoadResult<(ClusterModel, HymnStore)> {
    let vocab = Vocabulary::new(data.vocab_freq)?;
    let linkage = Linkage::from_flat(&data.linkage)?;
    let model = ClusterModel::new(linkage, vocab)?;
    let hymns = HymnStore::new(data.hymns);

    crate::log_event!(
        "data",
        "loaded",
        "{} words, {} merges, {} hymns",
        model.vocab().len(),
        data.linkage.len() / 4,
        hymns.len()
    );

    Ok((model, hymns))
}
