//! Hymn records keyed by id.
//!
//! Records are opaque JSON passed through from the data file verbatim; ids
//! follow the "book-hymn" convention of the source export but the store
//! treats them as plain strings.

use indexmap::IndexMap;
use serde_json::Value;

use crate::error::{QueryError, QueryResult};

#[derive(Debug, Clone, Default)]
pub struct HymnStore {
    records: IndexMap<String, Value>,
}

impl HymnStore {
    pub fn new(records: IndexMap<String, Value>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: &str) -> QueryResult<&Value> {
        self.records.get(id).ok_or(QueryError::HymnNotFound)
    }

    /// Look up every id independently, skipping unknown ones. Fails only
    /// when no id matched at all.
    pub fn get_bulk<'a, I>(&self, ids: I) -> QueryResult<IndexMap<String, Value>>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut found = IndexMap::new();
        for id in ids {
            if let Some(record) = self.records.get(id) {
                found.insert(id.to_string(), record.clone());
            }
        }
        if found.is_empty() {
            return Err(QueryError::HymnNotFound);
        }
        Ok(found)
    }
}
