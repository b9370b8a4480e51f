//! Immutable agglomerative-clustering merge history.
//!
//! A linkage over `n` leaves has `n - 1` merge steps, so the leaf count is
//! implied by the input length. Node ids `0..n-1` are the leaves (words, in
//! vocabulary order); step `k` creates node `n + k` by joining two earlier
//! nodes. The flat input carries four numbers per step: left child id,
//! right child id, merge distance, subtree size.

use crate::error::{LoadError, LoadResult};

/// One step of the precomputed clustering.
///
/// `size` (leaves subsumed by the new node) is carried through from the
/// input but not consulted when cutting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MergeStep {
    pub left: u32,
    pub right: u32,
    pub distance: f64,
    pub size: u32,
}

/// The validated merge history. Read-only after construction.
#[derive(Debug, Clone)]
pub struct Linkage {
    n_leaves: usize,
    steps: Vec<MergeStep>,
}

impl Linkage {
    /// Parse a flat `[left, right, distance, size, ...]` sequence.
    ///
    /// Rejects inputs where the length is not a multiple of four, where a
    /// child id is fractional or negative, where step `k` references a node
    /// that does not exist yet (id >= `n_leaves + k`), and where distances
    /// are not non-decreasing. The cut scan stops at the first step above
    /// its cutoff, which is only correct for sorted distances, so unsorted
    /// input is refused here rather than silently miscut later.
    pub fn from_flat(flat: &[f64]) -> LoadResult<Self> {
        if flat.len() % 4 != 0 {
            return Err(LoadError::MalformedLinkage(format!(
                "flat length {} is not a multiple of 4",
                flat.len()
            )));
        }

        let n_steps = flat.len() / 4;
        let n_leaves = n_steps + 1;
        let mut steps = Vec::with_capacity(n_steps);
        let mut prev_distance = f64::NEG_INFINITY;

        for (k, chunk) in flat.chunks_exact(4).enumerate() {
            let left = node_id(chunk[0], k)?;
            let right = node_id(chunk[1], k)?;
            let distance = chunk[2];
            let size = chunk[3] as u32;

            let new_id = n_leaves + k;
            if left as usize >= new_id || right as usize >= new_id {
                return Err(LoadError::MalformedLinkage(format!(
                    "step {k} references node {} before it exists (new node is {new_id})",
                    (left as usize).max(right as usize)
                )));
            }
            if distance < 0.0 || !distance.is_finite() {
                return Err(LoadError::MalformedLinkage(format!(
                    "step {k} has invalid distance {distance}"
                )));
            }
            if distance < prev_distance {
                return Err(LoadError::MalformedLinkage(format!(
                    "step {k} distance {distance} decreases below {prev_distance}"
                )));
            }
            prev_distance = distance;

            steps.push(MergeStep {
                left,
                right,
                distance,
                size,
            });
        }

        Ok(Self { n_leaves, steps })
    }

    /// Leaf count implied by the merge history (one more than the step
    /// count; a single-word vocabulary has an empty linkage).
    pub fn n_leaves(&self) -> usize {
        self.n_leaves
    }

    pub fn steps(&self) -> &[MergeStep] {
        &self.steps
    }
}

fn node_id(value: f64, step: usize) -> LoadResult<u32> {
    if value < 0.0 || value.fract() != 0.0 || value > u32::MAX as f64 {
        return Err(LoadError::MalformedLinkage(format!(
            "step {step} has non-integral node id {value}"
        )));
    }
    Ok(value as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_valid_flat_input() {
        let linkage = Linkage::from_flat(&[0.0, 1.0, 0.2, 2.0, 2.0, 3.0, 0.5, 3.0]).unwrap();
        assert_eq!(linkage.n_leaves(), 3);
        assert_eq!(linkage.steps().len(), 2);
        assert_eq!(linkage.steps()[0].left, 0);
        assert_eq!(linkage.steps()[1].right, 3);
        assert_eq!(linkage.steps()[1].distance, 0.5);
    }

    #[test]
    fn rejects_length_not_multiple_of_four() {
        let err = Linkage::from_flat(&[0.0, 1.0, 0.2]).unwrap_err();
        assert!(matches!(err, LoadError::MalformedLinkage(_)));
    }

    #[test]
    fn rejects_forward_reference() {
        // One step implies two leaves; node 4 does not exist yet.
        let err = Linkage::from_flat(&[0.0, 4.0, 0.2, 2.0]).unwrap_err();
        assert!(matches!(err, LoadError::MalformedLinkage(_)));
    }

    #[test]
    fn rejects_self_reference() {
        // Step 0 creates node 2 and may not reference it.
        let err = Linkage::from_flat(&[0.0, 2.0, 0.2, 2.0]).unwrap_err();
        assert!(matches!(err, LoadError::MalformedLinkage(_)));
    }

    #[test]
    fn rejects_decreasing_distances() {
        let err =
            Linkage::from_flat(&[0.0, 1.0, 0.5, 2.0, 2.0, 3.0, 0.2, 3.0]).unwrap_err();
        assert!(matches!(err, LoadError::MalformedLinkage(_)));
    }

    #[test]
    fn rejects_fractional_node_id() {
        let err = Linkage::from_flat(&[0.5, 1.0, 0.2, 2.0]).unwrap_err();
        assert!(matches!(err, LoadError::MalformedLinkage(_)));
    }

    #[test]
    fn rejects_negative_distance() {
        let err = Linkage::from_flat(&[0.0, 1.0, -0.1, 2.0]).unwrap_err();
        assert!(matches!(err, LoadError::MalformedLinkage(_)));
    }

    #[test]
    fn empty_linkage_is_a_single_leaf() {
        let linkage = Linkage::from_flat(&[]).unwrap();
        assert_eq!(linkage.n_leaves(), 1);
        assert!(linkage.steps().is_empty());
    }
}
