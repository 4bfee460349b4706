// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Error taxonomy for the crossing engine.
//!
//! Parallel edge pairs and empty layouts are *not* errors; they simply yield
//! no crossings. Only a host that violates the layout contract sees these.

use thiserror::Error;

use crate::layout::NodeId;

/// Raised when a node identity does not resolve against a [`crate::Layout`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// The group index is past the end of the layout.
    #[error("group {group} out of range (layout has {groups} groups)")]
    GroupOutOfRange {
        /// Requested group index.
        group: usize,
        /// Number of groups in the layout.
        groups: usize,
    },
    /// The node index is past the end of its group.
    #[error("node {node} out of range (group holds {len} nodes)")]
    NodeOutOfRange {
        /// Requested node identity.
        node: NodeId,
        /// Number of nodes in the addressed group.
        len: usize,
    },
    /// A position carries a NaN or infinite component.
    #[error("node {node} has a non-finite position")]
    NonFinite {
        /// Offending node identity.
        node: NodeId,
    },
}

/// Errors emitted by a crossing pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PassError {
    /// The layout violated its contract.
    #[error(transparent)]
    Layout(#[from] LayoutError),
    /// A parallel pass was requested with zero workers.
    #[error("parallel pass needs at least one worker")]
    NoWorkers,
}
