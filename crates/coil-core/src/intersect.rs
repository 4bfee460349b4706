// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Pairwise crossing test for two edges projected onto the XY plane.
//!
//! Numeric contract:
//! - Directions are `start - end` for each edge (`dir1 = a1 - a2`,
//!   `dir2 = b1 - b2`); only `x`/`y` enter the determinant and the solve.
//! - `det = dir1.x * dir2.y - dir2.x * dir1.y`. With [`ParallelTest::Exact`]
//!   the pair is skipped only when `det == 0.0` exactly, so nearly parallel
//!   pairs produce very distant points.
//! - `t = (1 / det) * (-dir1.x * (b1.y - a1.y) + dir1.y * (b1.x - a1.x))`
//!   and the point is `b1 + t * dir2` evaluated on all three components. The
//!   resulting `z` is `b1.z + t * (b1.z - b2.z)`; it is carried along, not
//!   solved for.
//! - With [`Extent::Line`] both edges are infinite lines and crossings far
//!   outside either segment are reported.

use crate::edge::Edge;
use crate::error::LayoutError;
use crate::layout::Layout;
use crate::math::Vec3;

/// How the determinant is compared against zero.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ParallelTest {
    /// `det == 0.0`, no tolerance.
    #[default]
    Exact,
    /// `|det| <= epsilon`.
    Epsilon(f32),
}

impl ParallelTest {
    /// Builds the test from an optional tolerance (`None` means exact).
    pub fn from_epsilon(epsilon: Option<f32>) -> Self {
        epsilon.map_or(Self::Exact, Self::Epsilon)
    }

    fn is_parallel(self, det: f32) -> bool {
        match self {
            Self::Exact => det == 0.0,
            Self::Epsilon(eps) => det.abs() <= eps,
        }
    }
}

/// Whether edges are treated as infinite lines or finite segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Extent {
    /// Infinite lines through both endpoints.
    #[default]
    Line,
    /// Closed segments between the endpoints.
    Segment,
}

/// Knobs for the crossing test. `Default` reproduces the reference behavior.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CrossingOptions {
    /// Degeneracy test applied to the determinant.
    pub parallel: ParallelTest,
    /// Line or segment semantics.
    pub extent: Extent,
}

/// Outcome of testing one pair of edges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Crossing {
    /// The projected lines cross.
    Point {
        /// Crossing point; `z` follows the numeric contract above.
        point: Vec3,
        /// Parameter along `dir2` from `b1`.
        t: f32,
    },
    /// The projected directions are parallel or anti-parallel.
    Parallel,
    /// The lines cross outside one of the segments ([`Extent::Segment`] only).
    OutOfExtent,
}

/// One recorded crossing with the edge pair that produced it.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Intersection {
    /// Crossing point.
    pub point: Vec3,
    /// Edge from the outer enumeration.
    pub edge_a: Edge,
    /// Edge from the inner enumeration.
    pub edge_b: Edge,
    /// Parameter along edge B's direction from its first endpoint.
    pub t: f32,
}

/// Correlated-endpoint filter.
///
/// Returns `true` when `b` starts where `a` starts or ends where `a` ends.
/// A pair where one edge's first endpoint is the other's second endpoint is
/// *not* filtered; such pairs cross at (or numerically near) the shared node.
pub fn shares_correlated_endpoint(a: &Edge, b: &Edge) -> bool {
    b.first == a.first || b.second == a.second
}

/// Intersects line `a1-a2` with line `b1-b2` in the XY plane.
pub fn intersect_projected(
    a1: Vec3,
    a2: Vec3,
    b1: Vec3,
    b2: Vec3,
    options: &CrossingOptions,
) -> Crossing {
    let dir1 = a1.sub(&a2);
    let dir2 = b1.sub(&b2);
    let det = dir1.xy().perp_dot(&dir2.xy());
    if options.parallel.is_parallel(det) {
        return Crossing::Parallel;
    }

    let t = (1.0 / det)
        * (-dir1.x() * (b1.y() - a1.y()) + dir1.y() * (b1.x() - a1.x()));

    if options.extent == Extent::Segment {
        // Directions point from the second endpoint back to the first, so a
        // point on the segment has its parameter in [-1, 0] on both edges.
        let s = b1.xy().sub(&a1.xy()).perp_dot(&dir2.xy()) / det;
        let on_segment = |p: f32| (-1.0..=0.0).contains(&p);
        if !(on_segment(t) && on_segment(s)) {
            return Crossing::OutOfExtent;
        }
    }

    Crossing::Point {
        point: b1.add(&dir2.scale(t)),
        t,
    }
}

/// Filters, resolves, and intersects a single edge pair.
///
/// Returns `Ok(None)` for filtered, parallel, and out-of-extent pairs.
pub fn check_pair(
    layout: &Layout,
    a: &Edge,
    b: &Edge,
    options: &CrossingOptions,
) -> Result<Option<Intersection>, LayoutError> {
    if shares_correlated_endpoint(a, b) {
        return Ok(None);
    }
    let (a1, a2) = a.positions(layout)?;
    let (b1, b2) = b.positions(layout)?;
    Ok(match intersect_projected(a1, a2, b1, b2, options) {
        Crossing::Point { point, t } => Some(Intersection {
            point,
            edge_a: *a,
            edge_b: *b,
            t,
        }),
        Crossing::Parallel | Crossing::OutOfExtent => None,
    })
}
