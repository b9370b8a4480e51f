//! The fixed vocabulary and its per-word metadata.
//!
//! Word order is significant: a word's position in the supplied list is its
//! leaf index in the linkage, so the two structures must be built from the
//! same export. The leaf index is internal plumbing and never leaves the
//! crate boundary.

use serde::Serialize;

use crate::error::{LoadError, LoadResult};

/// Frequency and originating hymns for one word. The hymn id list is kept
/// exactly as supplied, duplicates included.
#[derive(Debug, Clone, Serialize)]
pub struct WordMeta {
    pub freq: u64,
    pub hymn_ids: Vec<String>,
}

/// Immutable word list in leaf order.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    words: Vec<String>,
    meta: Vec<WordMeta>,
}

impl Vocabulary {
    pub fn new(entries: Vec<(String, u64, Vec<String>)>) -> LoadResult<Self> {
        let mut words = Vec::with_capacity(entries.len());
        let mut meta = Vec::with_capacity(entries.len());
        let mut seen = std::collections::HashSet::with_capacity(entries.len());

        for (word, freq, hymn_ids) in entries {
            if !seen.insert(word.clone()) {
                return Err(LoadError::DuplicateWord(word));
            }
            words.push(word);
            meta.push(WordMeta { freq, hymn_ids });
        }

        Ok(Self { words, meta })
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Words in leaf order, index `i` being leaf `i`.
    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn meta(&self, leaf: usize) -> &WordMeta {
        &self.meta[leaf]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(word: &str, freq: u64, ids: &[&str]) -> (String, u64, Vec<String>) {
        (
            word.to_string(),
            freq,
            ids.iter().map(|s| s.to_string()).collect(),
        )
    }

    #[test]
    fn preserves_order_and_metadata() {
        let vocab = Vocabulary::new(vec![
            entry("agni", 200, &["1-1", "1-12"]),
            entry("soma", 120, &["9-1"]),
        ])
        .unwrap();

        assert_eq!(vocab.len(), 2);
        assert_eq!(vocab.words(), ["agni", "soma"]);
        assert_eq!(vocab.meta(0).freq, 200);
        assert_eq!(vocab.meta(1).hymn_ids, ["9-1"]);
    }

    #[test]
    fn keeps_duplicate_hymn_ids_verbatim() {
        let vocab = Vocabulary::new(vec![entry("indra", 3, &["2-12", "2-12", "4-19"])]).unwrap();
        assert_eq!(vocab.meta(0).hymn_ids, ["2-12", "2-12", "4-19"]);
    }

    #[test]
    fn rejects_duplicate_words() {
        let err = Vocabulary::new(vec![entry("agni", 1, &[]), entry("agni", 2, &[])]).unwrap_err();
        assert!(matches!(err, LoadError::DuplicateWord(w) if w == "agni"));
    }
}
