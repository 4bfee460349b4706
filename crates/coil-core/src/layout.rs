// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Node layouts: ordered groups of ordered 3D positions.

use core::fmt;

use crate::error::LayoutError;
use crate::math::Vec3;

/// Identity of a node: its group index and its index within that group.
///
/// Ordering is lexicographic `(group, index)`, which is also the order the
/// edge enumerator visits first endpoints in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeId {
    /// Index of the owning group.
    pub group: usize,
    /// Index within the group.
    pub index: usize,
}

impl NodeId {
    /// Builds an identity from its parts.
    pub const fn new(group: usize, index: usize) -> Self {
        Self { group, index }
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.group, self.index)
    }
}

/// Immutable input to one crossing pass.
///
/// Groups and nodes keep their indices for the lifetime of the value; a host
/// that rearranges its nodes builds a fresh `Layout` for the next pass.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Layout {
    groups: Vec<Vec<Vec3>>,
}

impl Layout {
    /// Wraps already-built groups.
    pub fn new(groups: Vec<Vec<Vec3>>) -> Self {
        Self { groups }
    }

    /// Builds a layout from nested coordinate arrays.
    ///
    /// # Examples
    /// ```
    /// use coil_core::Layout;
    /// let layout = Layout::from_arrays([vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0]], vec![]]);
    /// assert_eq!(layout.group_count(), 2);
    /// assert_eq!(layout.node_count(), 2);
    /// ```
    pub fn from_arrays<G, N>(groups: G) -> Self
    where
        G: IntoIterator<Item = N>,
        N: IntoIterator<Item = [f32; 3]>,
    {
        Self {
            groups: groups
                .into_iter()
                .map(|g| g.into_iter().map(Vec3::from).collect())
                .collect(),
        }
    }

    /// Borrow the raw groups.
    pub fn groups(&self) -> &[Vec<Vec3>] {
        &self.groups
    }

    /// Number of groups, including empty ones.
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Total number of nodes across all groups.
    pub fn node_count(&self) -> usize {
        self.groups.iter().map(Vec::len).sum()
    }

    /// `true` when the layout holds no nodes at all.
    pub fn is_empty(&self) -> bool {
        self.groups.iter().all(Vec::is_empty)
    }

    /// Number of nodes in `group`.
    pub fn group_len(&self, group: usize) -> Result<usize, LayoutError> {
        self.groups
            .get(group)
            .map(Vec::len)
            .ok_or(LayoutError::GroupOutOfRange {
                group,
                groups: self.groups.len(),
            })
    }

    /// Resolves a node identity to its position.
    pub fn position(&self, node: NodeId) -> Result<Vec3, LayoutError> {
        let group = self
            .groups
            .get(node.group)
            .ok_or(LayoutError::GroupOutOfRange {
                group: node.group,
                groups: self.groups.len(),
            })?;
        group
            .get(node.index)
            .copied()
            .ok_or(LayoutError::NodeOutOfRange {
                node,
                len: group.len(),
            })
    }

    /// Iterates every node with its identity in `(group, index)` order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, Vec3)> + '_ {
        self.groups.iter().enumerate().flat_map(|(g, nodes)| {
            nodes
                .iter()
                .enumerate()
                .map(move |(n, pos)| (NodeId::new(g, n), *pos))
        })
    }

    /// Rejects positions with NaN or infinite components.
    ///
    /// Passes never call this on their own; non-finite input simply flows
    /// through the arithmetic. Hosts that want a hard failure opt in here.
    pub fn validate(&self) -> Result<(), LayoutError> {
        match self.nodes().find(|(_, pos)| !pos.is_finite()) {
            Some((node, _)) => Err(LayoutError::NonFinite { node }),
            None => Ok(()),
        }
    }
}
