//! Colour relabelling helpers over dense colourings.

use std::cmp::Reverse;
use std::collections::BTreeMap;

use gcol_core::{colors_used, Color, UNCOLORED};

/// Renames the colours in use to `0..c`, preserving their relative order.
pub fn compact(colors: &mut [Color]) {
    let mut used: Vec<Color> = colors.iter().copied().filter(|&c| c != UNCOLORED).collect();
    used.sort_unstable();
    used.dedup();
    let rename: BTreeMap<Color, Color> = used.into_iter().zip(0..).collect();
    for c in colors.iter_mut() {
        if let Some(&renamed) = rename.get(c) {
            *c = renamed;
        }
    }
}

/// Splits single nodes off the largest classes until `target` colours are in
/// use. A singleton class can never conflict, so properness is kept.
/// `colors` must be compact; `target` must not exceed the node count.
pub fn split_to(colors: &mut [Color], target: usize) {
    let mut count = colors_used(colors);
    while count < target {
        let mut sizes = vec![0usize; count];
        for &c in colors.iter() {
            sizes[c] += 1;
        }
        let Some(largest) = (0..count).max_by_key(|&c| (sizes[c], Reverse(c))) else {
            break;
        };
        if sizes[largest] < 2 {
            break;
        }
        if let Some(node) = colors.iter().rposition(|&c| c == largest) {
            colors[node] = count;
        }
        count += 1;
    }
}

/// Renames colours so class 0 is the largest; equal sizes are ordered by
/// their smallest member.
pub fn normalize(colors: &mut [Color]) {
    let mut classes: BTreeMap<Color, (usize, usize)> = BTreeMap::new();
    for (u, &c) in colors.iter().enumerate() {
        if c == UNCOLORED {
            continue;
        }
        let entry = classes.entry(c).or_insert((0, u));
        entry.0 += 1;
    }
    let mut order: Vec<(Color, (usize, usize))> = classes.into_iter().collect();
    order.sort_by_key(|&(_, (size, first))| (Reverse(size), first));
    let rename: BTreeMap<Color, Color> = order
        .into_iter()
        .enumerate()
        .map(|(label, (c, _))| (c, label))
        .collect();
    for c in colors.iter_mut() {
        if let Some(&renamed) = rename.get(c) {
            *c = renamed;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compact_closes_gaps() {
        let mut colors = vec![4, 0, 4, 7];
        compact(&mut colors);
        assert_eq!(colors, vec![1, 0, 1, 2]);
    }

    #[test]
    fn split_reaches_target() {
        let mut colors = vec![0, 0, 0, 1];
        split_to(&mut colors, 3);
        assert_eq!(colors, vec![0, 0, 2, 1]);
        split_to(&mut colors, 4);
        assert_eq!(colors_used(&colors), 4);
    }

    #[test]
    fn normalize_orders_by_size_then_first_member() {
        let mut colors = vec![2, 1, 1, 0, 2, 1];
        normalize(&mut colors);
        assert_eq!(colors, vec![1, 0, 0, 2, 1, 0]);
    }
}
