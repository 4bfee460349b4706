// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! coil-core: projected edge-crossing engine for grouped node layouts.
//!
//! A [`Layout`] is an ordered list of node groups. The engine enumerates the
//! edges implied by the layout, tests every edge against every other edge in
//! the XY plane, and returns the crossing points as an ordered multiset.
//!
//! Design notes:
//! - Pure: a pass borrows the layout and returns a fresh [`PassReport`]; no
//!   state survives between passes.
//! - Deterministic: output order is the enumeration order, and the parallel
//!   pass merges worker output back into that order.
//! - Float32 throughout, matching the hosts that supply positions.
#![forbid(unsafe_code)]
#![deny(missing_docs, rust_2018_idioms, unused_must_use)]
#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::dbg_macro,
    clippy::print_stdout,
    clippy::print_stderr
)]
#![allow(
    clippy::must_use_candidate,
    clippy::return_self_not_must_use,
    clippy::missing_const_for_fn,
    clippy::suboptimal_flops,
    clippy::redundant_pub_crate
)]

pub mod math;

/// Edge enumeration (reference and full coverage).
pub mod edge;
/// Layout and pass errors.
pub mod error;
/// Pairwise crossing test.
pub mod intersect;
/// Node layouts.
pub mod layout;
/// Multi-threaded pass.
pub mod parallel;
/// Serial pass orchestration.
pub mod pass;

pub use edge::{edge_count, Coverage, Edge, EdgeEnumerator};
pub use error::{LayoutError, PassError};
pub use intersect::{
    check_pair, intersect_projected, shares_correlated_endpoint, Crossing, CrossingOptions,
    Extent, Intersection, ParallelTest,
};
pub use layout::{Layout, NodeId};
pub use math::{Vec2, Vec3};
pub use parallel::run_parallel;
pub use pass::{compute_intersections, IntersectionPass, PassReport, PassStats};
