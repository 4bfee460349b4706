// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Crossing pass: every edge against every edge, in enumeration order.
//!
//! The pair set is formed by two independent runs of [`EdgeEnumerator::new`]
//! (outer edge A, inner edge B), not by a triangular walk over one edge list.
//! Both orientations of a pair are visited, so each geometric crossing
//! normally appears twice. Results are never deduplicated.

use tracing::{debug, debug_span, trace};

use crate::edge::{Edge, EdgeEnumerator};
use crate::error::{LayoutError, PassError};
use crate::intersect::{
    intersect_projected, shares_correlated_endpoint, Crossing, CrossingOptions, Intersection,
};
use crate::layout::Layout;
use crate::math::Vec3;

/// Counters collected during one pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PassStats {
    /// Edges produced by one enumerator run.
    pub edges: usize,
    /// Ordered edge pairs considered (`edges * edges`).
    pub pairs_visited: usize,
    /// Pairs dropped by the correlated-endpoint filter.
    pub filtered: usize,
    /// Pairs whose projected directions were parallel.
    pub degenerate: usize,
    /// Pairs crossing outside a segment (segment extent only).
    pub out_of_extent: usize,
    /// Crossings recorded.
    pub recorded: usize,
    /// Recorded crossings with a NaN or infinite coordinate or parameter.
    ///
    /// A subnormal determinant passes the exact zero test and blows up in
    /// `1 / det`; such points are still recorded.
    pub non_finite: usize,
}

impl PassStats {
    /// Folds pair counters from a partial scan into `self`.
    ///
    /// `edges` is a property of the layout, not of the scan, and is left as is.
    pub fn absorb(&mut self, other: &Self) {
        self.pairs_visited += other.pairs_visited;
        self.filtered += other.filtered;
        self.degenerate += other.degenerate;
        self.out_of_extent += other.out_of_extent;
        self.recorded += other.recorded;
        self.non_finite += other.non_finite;
    }
}

/// Everything one pass produced.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PassReport {
    /// Crossings in generation order (a multiset).
    pub intersections: Vec<Intersection>,
    /// Pass counters.
    pub stats: PassStats,
}

impl PassReport {
    /// Crossing points in generation order.
    pub fn points(&self) -> Vec<Vec3> {
        self.intersections.iter().map(|i| i.point).collect()
    }
}

/// Configured crossing pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntersectionPass {
    options: CrossingOptions,
}

impl IntersectionPass {
    /// Creates a pass with the given crossing options.
    pub fn new(options: CrossingOptions) -> Self {
        Self { options }
    }

    /// Runs the pass on the calling thread.
    pub fn run(&self, layout: &Layout) -> Result<PassReport, LayoutError> {
        let span = debug_span!(
            "crossing_pass",
            groups = layout.group_count(),
            nodes = layout.node_count()
        );
        let _enter = span.enter();

        let mut report = PassReport::default();
        for edge_a in EdgeEnumerator::new(layout) {
            report.stats.edges += 1;
            scan_outer_edge(
                layout,
                &edge_a,
                &self.options,
                &mut report.intersections,
                &mut report.stats,
            )?;
        }
        debug!(stats = ?report.stats, "crossing pass complete");
        Ok(report)
    }

    /// Runs the pass on `workers` threads; `1` stays on the calling thread.
    ///
    /// Output is identical to [`Self::run`] for any worker count.
    pub fn run_with_workers(
        &self,
        layout: &Layout,
        workers: usize,
    ) -> Result<PassReport, PassError> {
        match workers {
            0 => Err(PassError::NoWorkers),
            1 => Ok(self.run(layout)?),
            n => crate::parallel::run_parallel(layout, &self.options, n),
        }
    }
}

/// Reference pass: crossing points only, default options.
///
/// # Examples
/// ```
/// use coil_core::{compute_intersections, Layout};
/// // Four corners of a square in group 0; the trailing group lets group 0
/// // act as a first-endpoint group.
/// let layout = Layout::from_arrays([
///     vec![[0.0, 0.0, 0.0], [2.0, 0.0, 0.0], [0.0, 2.0, 0.0], [2.0, 2.0, 0.0]],
///     vec![],
/// ]);
/// let points = compute_intersections(&layout)?;
/// assert!(points.iter().any(|p| p.x() == 1.0 && p.y() == 1.0));
/// # Ok::<(), coil_core::LayoutError>(())
/// ```
pub fn compute_intersections(layout: &Layout) -> Result<Vec<Vec3>, LayoutError> {
    Ok(IntersectionPass::default().run(layout)?.points())
}

/// Tests `edge_a` against every edge of a fresh inner enumeration.
pub(crate) fn scan_outer_edge(
    layout: &Layout,
    edge_a: &Edge,
    options: &CrossingOptions,
    out: &mut Vec<Intersection>,
    stats: &mut PassStats,
) -> Result<(), LayoutError> {
    let (a1, a2) = edge_a.positions(layout)?;
    for edge_b in EdgeEnumerator::new(layout) {
        stats.pairs_visited += 1;
        if shares_correlated_endpoint(edge_a, &edge_b) {
            stats.filtered += 1;
            continue;
        }
        let (b1, b2) = edge_b.positions(layout)?;
        match intersect_projected(a1, a2, b1, b2, options) {
            Crossing::Point { point, t } => {
                stats.recorded += 1;
                if !(point.is_finite() && t.is_finite()) {
                    stats.non_finite += 1;
                }
                out.push(Intersection {
                    point,
                    edge_a: *edge_a,
                    edge_b,
                    t,
                });
            }
            Crossing::Parallel => {
                stats.degenerate += 1;
                trace!(?edge_a, ?edge_b, "parallel pair skipped");
            }
            Crossing::OutOfExtent => stats.out_of_extent += 1,
        }
    }
    Ok(())
}
