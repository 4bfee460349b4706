#![allow(missing_docs)]
//! Benchmark: crossing pass cost as the node count grows.
//!
//! Layouts are rings stacked along Z, the shape the editor host produces.
//! The pass is O(N^4) in total nodes, so sizes stay in the tens.
//!
//! Throughput "elements" are ordered edge pairs visited (`edges^2`).
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use coil_core::{edge_count, Coverage, EdgeEnumerator, IntersectionPass, Layout, Vec3};

// Bench constants to avoid magic numbers.
const NODES_PER_GROUP: usize = 4;
const GROUP_COUNTS: &[usize] = &[2, 4, 6, 8];
const WORKER_COUNTS: &[usize] = &[1, 2, 4];

fn ring_layout(groups: usize, per_group: usize) -> Layout {
    let step = core::f32::consts::TAU / per_group as f32;
    Layout::new(
        (0..groups)
            .map(|g| {
                (0..per_group)
                    .map(|n| {
                        let theta = n as f32 * step + g as f32 * 0.1;
                        Vec3::new(theta.cos(), theta.sin(), g as f32)
                    })
                    .collect()
            })
            .collect(),
    )
}

fn bench_edge_enumeration(c: &mut Criterion) {
    let mut group = c.benchmark_group("edge_enumeration");
    for &groups in GROUP_COUNTS {
        let layout = ring_layout(groups, NODES_PER_GROUP);
        group.throughput(Throughput::Elements(
            edge_count(&layout, Coverage::Reference) as u64,
        ));
        group.bench_with_input(BenchmarkId::from_parameter(groups), &layout, |b, layout| {
            b.iter(|| criterion::black_box(EdgeEnumerator::new(layout).count()));
        });
    }
    group.finish();
}

fn bench_crossing_pass(c: &mut Criterion) {
    let mut group = c.benchmark_group("crossing_pass");
    for &groups in GROUP_COUNTS {
        let layout = ring_layout(groups, NODES_PER_GROUP);
        let edges = edge_count(&layout, Coverage::Reference) as u64;
        group.throughput(Throughput::Elements(edges * edges));
        for &workers in WORKER_COUNTS {
            let pass = IntersectionPass::default();
            group.bench_with_input(
                BenchmarkId::new(format!("workers_{workers}"), groups),
                &layout,
                |b, layout| {
                    b.iter(|| {
                        let report = pass.run_with_workers(layout, workers);
                        criterion::black_box(report.map(|r| r.stats.recorded))
                    });
                },
            );
        }
    }
    group.finish();
}

criterion_group!(benches, bench_edge_enumeration, bench_crossing_pass);
criterion_main!(benches);
