// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Multi-threaded crossing pass.
//!
//! Outer edges are cut into contiguous chunks. Workers claim chunks through an
//! atomic counter and scan each claimed outer edge against a fresh inner
//! enumeration. Partial results are merged in chunk order after join, so the
//! output matches the serial pass exactly regardless of scheduling.

use std::sync::atomic::{AtomicUsize, Ordering};

use tracing::debug;

use crate::edge::{Edge, EdgeEnumerator};
use crate::error::{LayoutError, PassError};
use crate::intersect::{CrossingOptions, Intersection};
use crate::layout::Layout;
use crate::pass::{scan_outer_edge, PassReport, PassStats};

/// Chunks handed out per worker; more chunks smooth out uneven inner scans.
const CHUNKS_PER_WORKER: usize = 4;

struct ChunkResult {
    index: usize,
    outcome: Result<(Vec<Intersection>, PassStats), LayoutError>,
}

/// Runs a crossing pass on `workers` scoped threads.
///
/// Workers are capped at the outer edge count, then at the chunk count, so
/// small layouts do not spawn idle threads.
pub fn run_parallel(
    layout: &Layout,
    options: &CrossingOptions,
    workers: usize,
) -> Result<PassReport, PassError> {
    if workers == 0 {
        return Err(PassError::NoWorkers);
    }

    let outer: Vec<Edge> = EdgeEnumerator::new(layout).collect();
    if outer.is_empty() {
        return Ok(PassReport::default());
    }

    let workers = workers.min(outer.len());
    let chunk_len = outer
        .len()
        .div_ceil(workers.saturating_mul(CHUNKS_PER_WORKER))
        .max(1);
    let chunks: Vec<&[Edge]> = outer.chunks(chunk_len).collect();
    let capped_workers = workers.min(chunks.len());
    let next_chunk = AtomicUsize::new(0);
    debug!(
        edges = outer.len(),
        chunks = chunks.len(),
        workers = capped_workers,
        "parallel crossing pass"
    );

    let mut results: Vec<ChunkResult> = std::thread::scope(|s| {
        let handles: Vec<_> = (0..capped_workers)
            .map(|_| {
                let chunks = &chunks;
                let next_chunk = &next_chunk;
                s.spawn(move || {
                    let mut done = Vec::new();
                    loop {
                        let index = next_chunk.fetch_add(1, Ordering::Relaxed);
                        let Some(chunk) = chunks.get(index) else {
                            break;
                        };
                        done.push(ChunkResult {
                            index,
                            outcome: scan_chunk(layout, chunk, options),
                        });
                    }
                    done
                })
            })
            .collect();

        handles
            .into_iter()
            .flat_map(|h| match h.join() {
                Ok(done) => done,
                Err(e) => std::panic::resume_unwind(e),
            })
            .collect()
    });
    results.sort_by_key(|r| r.index);

    let mut report = PassReport {
        intersections: Vec::new(),
        stats: PassStats {
            edges: outer.len(),
            ..PassStats::default()
        },
    };
    for result in results {
        let (found, stats) = result.outcome?;
        report.intersections.extend(found);
        report.stats.absorb(&stats);
    }
    debug!(stats = ?report.stats, "parallel crossing pass complete");
    Ok(report)
}

fn scan_chunk(
    layout: &Layout,
    chunk: &[Edge],
    options: &CrossingOptions,
) -> Result<(Vec<Intersection>, PassStats), LayoutError> {
    let mut found = Vec::new();
    let mut stats = PassStats::default();
    for edge_a in chunk {
        scan_outer_edge(layout, edge_a, options, &mut found, &mut stats)?;
    }
    Ok((found, stats))
}
