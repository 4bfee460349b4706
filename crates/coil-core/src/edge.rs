// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Edge enumeration over a [`Layout`].
//!
//! Enumeration order is canonical: first endpoints ascend in `(group, index)`
//! order; for each first endpoint, second endpoints run over the rest of its
//! own group and then over every later group from index 0.
//!
//! Two coverages exist:
//! - [`Coverage::Reference`] never uses the final group as the first-endpoint
//!   group, so edges among nodes of the final group are absent and a
//!   single-group layout has no edges. Crossing passes use this coverage and
//!   depend on it; it must not be widened.
//! - [`Coverage::Full`] visits every group as a first-endpoint group and
//!   yields every unordered pair of distinct nodes exactly once.

use core::iter::FusedIterator;

use crate::error::LayoutError;
use crate::layout::{Layout, NodeId};
use crate::math::Vec3;

/// Which first-endpoint groups the enumerator visits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Coverage {
    /// First-endpoint groups `0..group_count - 1` (the crossing-pass bounds).
    #[default]
    Reference,
    /// First-endpoint groups `0..group_count` (the complete graph).
    Full,
}

/// An edge between two distinct nodes, in enumeration orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Edge {
    /// Endpoint visited by the outer loops.
    pub first: NodeId,
    /// Endpoint visited by the inner loops.
    pub second: NodeId,
}

impl Edge {
    /// Builds an edge from its endpoints.
    pub const fn new(first: NodeId, second: NodeId) -> Self {
        Self { first, second }
    }

    /// `true` when both endpoints belong to the same group.
    pub fn is_intra_group(&self) -> bool {
        self.first.group == self.second.group
    }

    /// Resolves both endpoints against `layout`.
    pub fn positions(&self, layout: &Layout) -> Result<(Vec3, Vec3), LayoutError> {
        Ok((layout.position(self.first)?, layout.position(self.second)?))
    }
}

/// Lazy iterator over the edges of a layout.
#[derive(Debug, Clone)]
pub struct EdgeEnumerator<'a> {
    groups: &'a [Vec<Vec3>],
    first_group_end: usize,
    g1: usize,
    n1: usize,
    g2: usize,
    n2: usize,
}

impl<'a> EdgeEnumerator<'a> {
    /// Enumerates with [`Coverage::Reference`] bounds.
    pub fn new(layout: &'a Layout) -> Self {
        Self::with_coverage(layout, Coverage::Reference)
    }

    /// Enumerates with [`Coverage::Full`] bounds.
    pub fn full(layout: &'a Layout) -> Self {
        Self::with_coverage(layout, Coverage::Full)
    }

    /// Enumerates with explicit bounds.
    pub fn with_coverage(layout: &'a Layout, coverage: Coverage) -> Self {
        let groups = layout.groups();
        let first_group_end = match coverage {
            Coverage::Reference => groups.len().saturating_sub(1),
            Coverage::Full => groups.len(),
        };
        Self {
            groups,
            first_group_end,
            g1: 0,
            n1: 0,
            g2: 0,
            n2: 1,
        }
    }
}

impl Iterator for EdgeEnumerator<'_> {
    type Item = Edge;

    fn next(&mut self) -> Option<Edge> {
        loop {
            if self.g1 >= self.first_group_end {
                return None;
            }
            if self.n1 >= self.groups[self.g1].len() {
                self.g1 += 1;
                self.n1 = 0;
                self.g2 = self.g1;
                self.n2 = 1;
                continue;
            }
            if self.g2 >= self.groups.len() {
                self.n1 += 1;
                self.g2 = self.g1;
                self.n2 = self.n1 + 1;
                continue;
            }
            if self.n2 >= self.groups[self.g2].len() {
                self.g2 += 1;
                self.n2 = 0;
                continue;
            }
            let edge = Edge::new(
                NodeId::new(self.g1, self.n1),
                NodeId::new(self.g2, self.n2),
            );
            self.n2 += 1;
            return Some(edge);
        }
    }
}

impl FusedIterator for EdgeEnumerator<'_> {}

/// Counts the edges `EdgeEnumerator::with_coverage` would yield, without
/// walking them.
pub fn edge_count(layout: &Layout, coverage: Coverage) -> usize {
    let groups = layout.groups();
    let first_group_end = match coverage {
        Coverage::Reference => groups.len().saturating_sub(1),
        Coverage::Full => groups.len(),
    };
    let mut later: usize = groups.iter().map(Vec::len).sum();
    let mut total = 0;
    for group in &groups[..first_group_end] {
        let len = group.len();
        later -= len;
        // Pairs inside the group plus every pairing with a later group.
        total += len * len.saturating_sub(1) / 2 + len * later;
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(edges: impl Iterator<Item = Edge>) -> Vec<((usize, usize), (usize, usize))> {
        edges
            .map(|e| {
                (
                    (e.first.group, e.first.index),
                    (e.second.group, e.second.index),
                )
            })
            .collect()
    }

    #[test]
    fn skips_empty_groups_between_populated_ones() {
        let layout = Layout::from_arrays([
            vec![[0.0; 3]],
            vec![],
            vec![[1.0; 3]],
        ]);
        assert_eq!(ids(EdgeEnumerator::new(&layout)), vec![((0, 0), (2, 0))]);
    }

    #[test]
    fn full_coverage_adds_final_group_pairs() {
        let layout = Layout::from_arrays([vec![[0.0; 3]], vec![[1.0; 3], [2.0; 3]]]);
        assert_eq!(
            ids(EdgeEnumerator::new(&layout)),
            vec![((0, 0), (1, 0)), ((0, 0), (1, 1))]
        );
        assert_eq!(
            ids(EdgeEnumerator::full(&layout)),
            vec![((0, 0), (1, 0)), ((0, 0), (1, 1)), ((1, 0), (1, 1))]
        );
    }

    #[test]
    fn enumerator_is_fused() {
        let layout = Layout::from_arrays([vec![[0.0; 3], [1.0; 3]], vec![]]);
        let mut it = EdgeEnumerator::new(&layout);
        assert!(it.next().is_some());
        assert!(it.next().is_none());
        assert!(it.next().is_none());
    }
}
