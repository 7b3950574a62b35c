use std::collections::BTreeSet;

use crate::geometry::{segments_cross, Segment};

/// Finds one crossing pair among `segments`, if any.
///
/// Segments are oriented left to right and swept by x-coordinate. Every
/// segment is tested against the segments whose x-range is still open when it
/// starts, so only pairs with overlapping x-ranges are compared.
pub fn find_crossing(segments: &[Segment]) -> Option<(usize, usize)> {
    let oriented: Vec<Segment> = segments
        .iter()
        .map(|&(p, q)| if p.0 <= q.0 { (p, q) } else { (q, p) })
        .collect();

    // (x, is_right_end, y, segment)
    let mut events: Vec<(f64, u8, f64, usize)> = Vec::with_capacity(oriented.len() * 2);
    for (i, &(left, right)) in oriented.iter().enumerate() {
        events.push((left.0, 0, left.1, i));
        events.push((right.0, 1, right.1, i));
    }
    events.sort_by(|a, b| {
        a.0.total_cmp(&b.0)
            .then(a.1.cmp(&b.1))
            .then(a.2.total_cmp(&b.2))
            .then(a.3.cmp(&b.3))
    });

    let mut active: BTreeSet<usize> = BTreeSet::new();
    for (_, is_right, _, i) in events {
        if is_right == 0 {
            if let Some(&j) = active
                .iter()
                .find(|&&j| segments_cross(oriented[i], oriented[j]))
            {
                return Some((j.min(i), j.max(i)));
            }
            active.insert(i);
        } else {
            active.remove(&i);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_an_x() {
        let segments = [
            ((0.0, 0.0), (1.0, 0.0)),
            ((0.0, 0.0), (2.0, 2.0)),
            ((2.0, 0.0), (0.0, 2.0)),
        ];
        assert_eq!(find_crossing(&segments), Some((1, 2)));
    }

    #[test]
    fn star_is_crossing_free() {
        let segments = [
            ((0.0, 0.0), (1.0, 0.0)),
            ((0.0, 0.0), (0.0, 1.0)),
            ((0.0, 0.0), (-1.0, 0.0)),
            ((1.0, 0.0), (0.0, 1.0)),
        ];
        assert_eq!(find_crossing(&segments), None);
    }
}
