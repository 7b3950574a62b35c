//! Reductions of precolouring and list colouring to plain colouring.

use std::collections::{BTreeMap, BTreeSet};

use gcol_core::errors::GcolError;
use gcol_core::rng::RngHandle;
use gcol_core::{infeasible_error, Color, ColorableGraph};

use crate::adjacency::Adjacency;
use crate::config::SolveConfig;
use crate::construct::construct;
use crate::optimise::{minimise_colors, reach_k};

/// Graph with every precolour class contracted to one anchor node.
///
/// Anchors come first, one per distinct fixed colour in ascending order, and
/// form a clique; the free nodes follow in their original order. Any proper
/// colouring of the contracted graph gives each anchor a distinct colour,
/// which [`Contraction::expand`] renames to the fixed colour.
#[derive(Debug, Clone)]
pub struct Contraction {
    adj: Adjacency,
    node_map: Vec<usize>,
    labels: Vec<Color>,
}

impl Contraction {
    /// Contracts `adj` under `fixed`. Adjacent nodes must not share a fixed
    /// colour.
    pub fn new(adj: &Adjacency, fixed: &BTreeMap<usize, Color>) -> Self {
        let labels: Vec<Color> = fixed
            .values()
            .copied()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let mut anchor_weight = vec![0.0; labels.len()];
        for (&u, label) in fixed {
            if let Ok(anchor) = labels.binary_search(label) {
                anchor_weight[anchor] += adj.weight(u);
            }
        }
        let mut contracted = Adjacency::new(0);
        for weight in anchor_weight {
            contracted.push_node(weight);
        }
        let node_map: Vec<usize> = (0..adj.len())
            .map(|u| match fixed.get(&u).map(|label| labels.binary_search(label)) {
                Some(Ok(anchor)) => anchor,
                _ => contracted.push_node(adj.weight(u)),
            })
            .collect();
        for a in 0..labels.len() {
            for b in a + 1..labels.len() {
                contracted.insert_edge(a, b);
            }
        }
        for u in 0..adj.len() {
            for &v in adj.neighbors(u) {
                if u < v {
                    contracted.insert_edge(node_map[u], node_map[v]);
                }
            }
        }
        Self {
            adj: contracted,
            node_map,
            labels,
        }
    }

    /// The contracted graph.
    pub fn graph(&self) -> &Adjacency {
        &self.adj
    }

    /// Maps a proper colouring of the contracted graph back to the original
    /// nodes. Anchor colours become the fixed colours; every other colour,
    /// in ascending order, takes the smallest label no anchor uses.
    pub fn expand(&self, contracted: &[Color]) -> Vec<Color> {
        let mut rename: BTreeMap<Color, Color> = BTreeMap::new();
        for (anchor, &label) in self.labels.iter().enumerate() {
            rename.insert(contracted[anchor], label);
        }
        let taken: BTreeSet<Color> = self.labels.iter().copied().collect();
        let mut free_labels = (0..).filter(|label| !taken.contains(label));
        let others: BTreeSet<Color> = contracted[self.labels.len()..]
            .iter()
            .copied()
            .filter(|c| !rename.contains_key(c))
            .collect();
        for c in others {
            if let Some(label) = free_labels.next() {
                rename.insert(c, label);
            }
        }
        self.node_map
            .iter()
            .map(|&idx| rename.get(&contracted[idx]).copied().unwrap_or(contracted[idx]))
            .collect()
    }
}

/// Colours `adj` with as few colours as the configuration finds while
/// keeping every colour in `fixed`.
pub fn solve_precolored(
    adj: &Adjacency,
    fixed: &BTreeMap<usize, Color>,
    config: &SolveConfig,
    rng: &mut RngHandle,
) -> Vec<Color> {
    let contraction = Contraction::new(adj, fixed);
    let initial = construct(contraction.graph(), config.strategy, rng);
    let colors = minimise_colors(contraction.graph(), initial, config, rng);
    contraction.expand(&colors)
}

/// Colours node `u` from `lists[u]`.
///
/// One anchor per candidate colour is added, precoloured with that colour
/// and joined to every node whose list lacks it; a proper colouring of the
/// result using exactly the candidate colours is a list colouring.
pub fn solve_lists(
    adj: &Adjacency,
    lists: &[BTreeSet<Color>],
    config: &SolveConfig,
    rng: &mut RngHandle,
) -> Result<Vec<Color>, GcolError> {
    if let Some(u) = lists.iter().position(BTreeSet::is_empty) {
        return Err(infeasible_error("empty-list", "node has no candidate colours", true)
            .with_context("node", u));
    }
    let palette: Vec<Color> = lists
        .iter()
        .flatten()
        .copied()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let k = palette.len();
    let n = adj.len();

    let mut extended = adj.clone();
    let mut fixed = BTreeMap::new();
    for (slot, &color) in palette.iter().enumerate() {
        let anchor = extended.push_node(0.0);
        fixed.insert(anchor, slot);
        for (u, list) in lists.iter().enumerate() {
            if !list.contains(&color) {
                extended.insert_edge(u, anchor);
            }
        }
    }

    let contraction = Contraction::new(&extended, &fixed);
    let initial = construct(contraction.graph(), config.strategy, rng);
    let colors = reach_k(contraction.graph(), k, initial, config, rng).map_err(|err| {
        let exhaustive = err.is_proven_infeasible();
        infeasible_error("list-infeasible", "no colouring respects the candidate lists", exhaustive)
            .with_context("palette", k)
    })?;
    let slots = contraction.expand(&colors);
    Ok(slots[..n].iter().map(|&slot| palette[slot]).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(n: usize) -> Adjacency {
        let mut adj = Adjacency::new(n);
        for i in 1..n {
            adj.insert_edge(i - 1, i);
        }
        adj
    }

    #[test]
    fn contraction_merges_classes_and_links_anchors() {
        let adj = path(4);
        let fixed: BTreeMap<usize, Color> = [(0, 5), (2, 5), (3, 1)].into_iter().collect();
        let contraction = Contraction::new(&adj, &fixed);
        // Anchors for colours 1 and 5, then free node 1.
        assert_eq!(contraction.labels, vec![1, 5]);
        assert_eq!(contraction.graph().len(), 3);
        assert!(contraction.graph().adjacent(0, 1));
        assert!(contraction.graph().adjacent(2, 1));
        assert!(!contraction.graph().adjacent(2, 0));
    }

    #[test]
    fn expand_restores_fixed_labels() {
        let adj = path(4);
        let fixed: BTreeMap<usize, Color> = [(0, 5), (3, 1)].into_iter().collect();
        let contraction = Contraction::new(&adj, &fixed);
        let mut rng = RngHandle::from_seed(0);
        let colors = solve_precolored(&adj, &fixed, &SolveConfig::default(), &mut rng);
        assert_eq!(colors[0], 5);
        assert_eq!(colors[3], 1);
        assert!(adj.is_proper(&colors));
        assert_eq!(contraction.node_map, vec![1, 2, 3, 0]);
    }

    #[test]
    fn lists_are_respected() {
        let adj = path(3);
        let lists: Vec<BTreeSet<Color>> = vec![
            [7].into_iter().collect(),
            [3, 7].into_iter().collect(),
            [3, 9].into_iter().collect(),
        ];
        let mut rng = RngHandle::from_seed(0);
        let colors = solve_lists(&adj, &lists, &SolveConfig::default(), &mut rng).unwrap();
        assert_eq!(colors[0], 7);
        assert_eq!(colors[1], 3);
        assert_eq!(colors[2], 9);
    }

    #[test]
    fn empty_list_is_proven_infeasible() {
        let adj = path(2);
        let lists = vec![BTreeSet::new(), [0].into_iter().collect()];
        let mut rng = RngHandle::from_seed(0);
        let err = solve_lists(&adj, &lists, &SolveConfig::default(), &mut rng).unwrap_err();
        assert_eq!(err.code(), "empty-list");
        assert!(err.is_proven_infeasible());
    }
}
