//! Cutting the dendrogram at a similarity threshold.
//!
//! The linkage is static; all the work at query time is replaying merge
//! steps whose distance falls under the cutoff into a disjoint-set union
//! structure and then labelling each word by its set representative.
//! Cluster ids are dense and deterministic: id 0 is always the cluster of
//! the first vocabulary word, ids increase in order of first appearance
//! during a single left-to-right scan. They carry no meaning across
//! different thresholds.

use std::collections::HashMap;

use indexmap::IndexMap;
use serde::Serialize;

use crate::error::{LoadError, LoadResult};
use crate::linkage::Linkage;
use crate::vocab::Vocabulary;

/// Per-word output record: cluster label plus the word's metadata.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct WordEntry {
    pub cluster: u32,
    pub freq: u64,
    pub hymn_ids: Vec<String>,
}

/// The partition induced by one threshold, in vocabulary order.
pub type ClusterAssignment = IndexMap<String, WordEntry>;

/// Linkage and vocabulary paired up, counts cross-checked. This is the
/// read-only state every cut runs against.
#[derive(Debug, Clone)]
pub struct ClusterModel {
    linkage: Linkage,
    vocab: Vocabulary,
}

impl ClusterModel {
    /// Pair a linkage with its vocabulary.
    ///
    /// The leaf counts must agree: leaf index `i` in the linkage is word
    /// `i` in the vocabulary, and a mismatch would send the union-find
    /// indexing out of bounds. Every referenced node id must also fit the
    /// `2n - 1` dendrogram node space; `Linkage` construction already
    /// guarantees this, the check here guards the invariant the cutter
    /// relies on.
    pub fn new(linkage: Linkage, vocab: Vocabulary) -> LoadResult<Self> {
        if linkage.n_leaves() != vocab.len() {
            return Err(LoadError::VocabLinkageMismatch {
                vocab: vocab.len(),
                linkage: linkage.n_leaves(),
            });
        }
        let n = vocab.len();
        let total_nodes = 2 * n - 1;
        for step in linkage.steps() {
            let max_id = step.left.max(step.right);
            if max_id as usize >= total_nodes {
                return Err(LoadError::NodeIndexOutOfRange {
                    id: max_id,
                    total: total_nodes,
                });
            }
        }
        Ok(Self { linkage, vocab })
    }

    pub fn vocab(&self) -> &Vocabulary {
        &self.vocab
    }

    /// Cut the dendrogram at `threshold` (cosine similarity in [0,1],
    /// clamped). Higher threshold means a lower distance cutoff, fewer
    /// merges applied, and more, smaller clusters.
    ///
    /// Merge steps are replayed in order while `distance <= cutoff`
    /// (inclusive); the scan stops at the first step above the cutoff,
    /// which the sorted-distance invariant enforced at load makes safe.
    /// Each applied step joins both children and the step's own node into
    /// one set, so later steps that reference the merged node land in the
    /// same set.
    pub fn cut(&self, threshold: f64) -> ClusterAssignment {
        let cutoff = 1.0 - threshold.clamp(0.0, 1.0);
        let n = self.vocab.len();
        let total_nodes = 2 * n - 1;

        let mut dsu = DisjointSet::new(total_nodes);
        for (k, step) in self.linkage.steps().iter().enumerate() {
            if step.distance > cutoff {
                break;
            }
            let new_id = n + k;
            dsu.union(step.left as usize, step.right as usize);
            dsu.union(step.left as usize, new_id);
            dsu.union(step.right as usize, new_id);
        }

        let mut rep_to_cluster: HashMap<usize, u32> = HashMap::new();
        let mut assignment = ClusterAssignment::with_capacity(n);
        for (leaf, word) in self.vocab.words().iter().enumerate() {
            let rep = dsu.find(leaf);
            let next = rep_to_cluster.len() as u32;
            let cluster = *rep_to_cluster.entry(rep).or_insert(next);
            let meta = self.vocab.meta(leaf);
            assignment.insert(
                word.clone(),
                WordEntry {
                    cluster,
                    freq: meta.freq,
                    hymn_ids: meta.hymn_ids.clone(),
                },
            );
        }

        let clusters = rep_to_cluster.len();
        crate::log_event!(
            "cluster",
            "cut",
            "sim={threshold:.2}, cutoff={cutoff:.2}, clusters={clusters}"
        );

        assignment
    }
}

/// Union-find over the dendrogram nodes, parent-pointer forest with
/// iterative path compression. Union by arbitrary parent is enough here;
/// compression alone keeps finds amortized near-constant.
struct DisjointSet {
    parent: Vec<usize>,
}

impl DisjointSet {
    fn new(size: usize) -> Self {
        Self {
            parent: (0..size).collect(),
        }
    }

    fn find(&mut self, x: usize) -> usize {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        // Second pass repoints the whole path at the root.
        let mut cur = x;
        while self.parent[cur] != root {
            let next = self.parent[cur];
            self.parent[cur] = root;
            cur = next;
        }
        root
    }

    fn union(&mut self, a: usize, b: usize) {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra != rb {
            self.parent[rb] = ra;
        }
    }
}
