use std::fmt;

use gcol_graph::NodeLabel;
use serde::{Deserialize, Serialize};

/// Boundary walk of one face, stored under a canonical rotation.
///
/// The canonical rotation starts at the smallest label; when the smallest
/// label occurs more than once (a cut vertex on the boundary) the
/// lexicographically smallest of those rotations is used. Two cyclic
/// rotations of the same walk therefore compare equal. Direction is kept, so
/// a walk and its reverse are different faces.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Face<N>(Vec<N>);

impl<N: NodeLabel> Face<N> {
    /// Canonicalises a boundary walk.
    pub fn new(mut walk: Vec<N>) -> Self {
        if let Some(start) = canonical_start(&walk) {
            walk.rotate_left(start);
        }
        Self(walk)
    }

    /// Returns the boundary nodes in walk order.
    pub fn nodes(&self) -> &[N] {
        &self.0
    }

    /// Number of boundary positions (repeated cut vertices counted twice).
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns whether the walk is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<N: fmt::Debug> fmt::Debug for Face<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Face").field(&self.0).finish()
    }
}

fn canonical_start<N: Ord>(walk: &[N]) -> Option<usize> {
    let min = walk.iter().min()?;
    let n = walk.len();
    let rotation = move |start: usize| (0..n).map(move |k| &walk[(start + k) % n]);
    (0..n)
        .filter(|&i| walk[i] == *min)
        .min_by(|&a, &b| rotation(a).cmp(rotation(b)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_rotation_canonicalises_identically() {
        let walk = vec![4, 2, 7, 9];
        let expected = Face::new(walk.clone());
        assert_eq!(expected.nodes(), &[2, 7, 9, 4]);
        for k in 0..walk.len() {
            let mut rotated = walk.clone();
            rotated.rotate_left(k);
            assert_eq!(Face::new(rotated), expected);
        }
    }

    #[test]
    fn repeated_minimum_uses_smallest_rotation() {
        // Bowtie outer walk through the shared vertex 0.
        let a = Face::new(vec![0, 3, 4, 0, 1, 2]);
        let b = Face::new(vec![4, 0, 1, 2, 0, 3]);
        assert_eq!(a, b);
        assert_eq!(a.nodes(), &[0, 1, 2, 0, 3, 4]);
    }

    #[test]
    fn reversal_is_a_different_face() {
        assert_ne!(Face::new(vec![1, 2, 3]), Face::new(vec![3, 2, 1]));
    }
}
