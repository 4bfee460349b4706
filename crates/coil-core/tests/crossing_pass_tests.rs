#![allow(missing_docs)]
//! Crossing pass behavior on small hand-checked layouts.

use coil_core::{
    check_pair, compute_intersections, CrossingOptions, Edge, EdgeEnumerator, Extent,
    IntersectionPass, Layout, LayoutError, NodeId, ParallelTest, PassError, PassStats, Vec3,
};
mod common;
use common::{radial_layout, report_bits, two_by_two};

fn e(g1: usize, n1: usize, g2: usize, n2: usize) -> Edge {
    Edge::new(NodeId::new(g1, n1), NodeId::new(g2, n2))
}

#[test]
fn zero_and_one_node_layouts_are_empty() {
    let layouts = [
        Layout::default(),
        Layout::from_arrays(vec![Vec::<[f32; 3]>::new(); 2]),
        Layout::from_arrays([vec![[1.0, 2.0, 3.0]]]),
        Layout::from_arrays([vec![[1.0, 2.0, 3.0]], vec![]]),
        Layout::from_arrays([vec![], vec![[1.0, 2.0, 3.0]]]),
    ];
    for layout in &layouts {
        assert_eq!(compute_intersections(layout), Ok(Vec::new()), "{layout:?}");
    }
}

#[test]
fn two_node_layouts_are_empty() {
    let a = [0.0, 0.0, 0.0];
    let b = [3.0, 1.0, 0.0];
    let layouts = [
        // One group: no edges at all.
        Layout::from_arrays([vec![a, b]]),
        // One edge, paired only with itself and filtered.
        Layout::from_arrays([vec![a], vec![b]]),
        Layout::from_arrays([vec![a, b], vec![]]),
        Layout::from_arrays([vec![a], vec![], vec![b]]),
    ];
    for layout in &layouts {
        let report = IntersectionPass::default().run(layout).unwrap();
        assert!(report.intersections.is_empty(), "{layout:?}");
        assert!(report.stats.edges <= 1);
    }
}

#[test]
fn square_diagonals_cross_at_one_one() {
    let layout = Layout::from_arrays([
        vec![
            [0.0, 0.0, 0.0],
            [2.0, 0.0, 0.0],
            [0.0, 2.0, 0.0],
            [2.0, 2.0, 0.0],
        ],
        vec![],
    ]);
    let report = IntersectionPass::default().run(&layout).unwrap();
    let diagonals = report
        .intersections
        .iter()
        .find(|i| i.edge_a == e(0, 0, 0, 3) && i.edge_b == e(0, 1, 0, 2))
        .expect("diagonal pair recorded");
    let [x, y, _z] = diagonals.point.to_array();
    assert_eq!((x, y), (1.0, 1.0));

    // The reverse orientation is visited by the outer loop too.
    assert!(report
        .intersections
        .iter()
        .any(|i| i.edge_a == e(0, 1, 0, 2) && i.edge_b == e(0, 0, 0, 3)
            && i.point.xy() == Vec3::new(1.0, 1.0, 0.0).xy()));
}

#[test]
fn square_in_a_lone_group_produces_nothing() {
    let layout = Layout::from_arrays([vec![
        [0.0, 0.0, 0.0],
        [2.0, 0.0, 0.0],
        [0.0, 2.0, 0.0],
        [2.0, 2.0, 0.0],
    ]]);
    assert_eq!(compute_intersections(&layout), Ok(Vec::new()));
}

#[test]
fn two_by_two_pair_table() {
    let layout = two_by_two();
    let report = IntersectionPass::default().run(&layout).unwrap();
    assert_eq!(
        report.stats,
        PassStats {
            edges: 5,
            pairs_visited: 25,
            filtered: 17,
            degenerate: 2,
            out_of_extent: 0,
            recorded: 6,
            non_finite: 0,
        }
    );

    let pairs: Vec<(Edge, Edge)> = report
        .intersections
        .iter()
        .map(|i| (i.edge_a, i.edge_b))
        .collect();
    let (e0, e1, e2, e3, e4) = (
        e(0, 0, 0, 1),
        e(0, 0, 1, 0),
        e(0, 0, 1, 1),
        e(0, 1, 1, 0),
        e(0, 1, 1, 1),
    );
    assert_eq!(
        pairs,
        vec![(e0, e3), (e0, e4), (e2, e3), (e3, e0), (e3, e2), (e4, e0)]
    );
    // e1/e4 are the two horizontal rails: parallel in both orientations.
    assert!(!pairs.contains(&(e1, e4)) && !pairs.contains(&(e4, e1)));

    let points: Vec<[f32; 2]> = report
        .points()
        .iter()
        .map(|p| [p.x(), p.y()])
        .collect();
    assert_eq!(
        points,
        vec![
            [0.0, 1.0],
            [0.0, 1.0],
            [0.5, 0.5],
            [0.0, 1.0],
            [0.5, 0.5],
            [0.0, 1.0],
        ]
    );
}

#[test]
fn filter_count_matches_a_direct_scan() {
    let layout = two_by_two();
    let mut filtered = 0;
    let mut total = 0;
    for a in EdgeEnumerator::new(&layout) {
        for b in EdgeEnumerator::new(&layout) {
            total += 1;
            if b.first == a.first || b.second == a.second {
                filtered += 1;
            }
        }
    }
    assert_eq!((filtered, total), (17, 25));
}

#[test]
fn parallel_pair_is_skipped_silently() {
    let layout = Layout::from_arrays([
        vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [2.0, 1.0, 0.0]],
        vec![],
    ]);
    let found = check_pair(
        &layout,
        &e(0, 0, 0, 1),
        &e(0, 2, 0, 3),
        &CrossingOptions::default(),
    );
    assert_eq!(found, Ok(None));
}

#[test]
fn infinite_lines_report_out_of_segment_crossings() {
    // (0,0)-(1,0) and (5,-1)-(5,1) only meet on the extension of the first.
    let layout = Layout::from_arrays([
        vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0]],
        vec![[5.0, -1.0, 0.0], [5.0, 1.0, 0.0]],
    ]);
    let a = e(0, 0, 0, 1);
    let b = e(1, 0, 1, 1);
    let line = check_pair(&layout, &a, &b, &CrossingOptions::default()).unwrap();
    assert!(line.is_some());

    let segment = CrossingOptions {
        extent: Extent::Segment,
        ..CrossingOptions::default()
    };
    let report = IntersectionPass::new(segment).run(&layout).unwrap();
    let reference = IntersectionPass::default().run(&layout).unwrap();
    assert!(report.stats.out_of_extent > 0);
    assert!(report.stats.recorded < reference.stats.recorded);
    assert_eq!(
        report.stats.recorded + report.stats.out_of_extent,
        reference.stats.recorded
    );
}

#[test]
fn epsilon_turns_near_parallel_pairs_into_skips() {
    // Rails (0,0)-(10,0) and (0,1)-(10,1.0001) are enumerated as cross-group
    // edges and differ in slope by a hair.
    let layout = Layout::from_arrays([
        vec![[0.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
        vec![[10.0, 0.0, 0.0], [10.0, 1.0001, 0.0]],
    ]);
    let exact = IntersectionPass::default().run(&layout).unwrap();
    let tolerant = IntersectionPass::new(CrossingOptions {
        parallel: ParallelTest::Epsilon(0.01),
        ..CrossingOptions::default()
    })
    .run(&layout)
    .unwrap();
    assert!(tolerant.stats.degenerate > exact.stats.degenerate);
}

#[test]
fn repeated_passes_are_identical() {
    let layout = radial_layout(3, 5);
    let pass = IntersectionPass::default();
    let first = pass.run(&layout).unwrap();
    let second = pass.run(&layout).unwrap();
    assert_eq!(report_bits(&first), report_bits(&second));
    assert_eq!(first.stats, second.stats);
    assert!(!first.intersections.is_empty());
}

#[test]
fn worker_count_does_not_change_output() {
    let layout = radial_layout(4, 4);
    let pass = IntersectionPass::default();
    let serial = pass.run(&layout).unwrap();
    for workers in [1, 2, 3, 8, 64] {
        let threaded = pass.run_with_workers(&layout, workers).unwrap();
        assert_eq!(report_bits(&serial), report_bits(&threaded), "workers={workers}");
        assert_eq!(serial.stats, threaded.stats, "workers={workers}");
        assert_eq!(
            serial.intersections.iter().map(|i| (i.edge_a, i.edge_b)).collect::<Vec<_>>(),
            threaded.intersections.iter().map(|i| (i.edge_a, i.edge_b)).collect::<Vec<_>>(),
        );
    }
}

#[test]
fn absurd_worker_counts_are_capped() {
    let layout = Layout::from_arrays([
        vec![[0.0, 0.0, 0.0], [2.0, 0.0, 0.0], [0.0, 2.0, 0.0], [2.0, 2.0, 0.0]],
        vec![],
    ]);
    let pass = IntersectionPass::default();
    let serial = pass.run(&layout).unwrap();
    let threaded = pass.run_with_workers(&layout, usize::MAX).unwrap();
    assert_eq!(report_bits(&serial), report_bits(&threaded));
    assert_eq!(serial.stats, threaded.stats);
}

#[test]
fn subnormal_determinants_are_recorded_and_counted() {
    // 1e-20 offsets multiply into a subnormal determinant: it is not exactly
    // zero, so the pair is solved and 1 / det overflows.
    let layout = Layout::from_arrays([
        vec![[1e-20, 0.0, 0.0], [0.0, 0.0, 0.0], [5.0, 1e-20, 0.0], [5.0, 0.0, 0.0]],
        vec![],
    ]);
    let report = IntersectionPass::default().run(&layout).unwrap();
    let blown = report
        .intersections
        .iter()
        .filter(|i| !(i.point.is_finite() && i.t.is_finite()))
        .count();
    assert!(blown > 0);
    assert_eq!(report.stats.non_finite, blown);

    let threaded = IntersectionPass::default().run_with_workers(&layout, 3).unwrap();
    assert_eq!(threaded.stats.non_finite, blown);
}

#[test]
fn zero_workers_is_rejected() {
    let layout = two_by_two();
    assert_eq!(
        IntersectionPass::default().run_with_workers(&layout, 0),
        Err(PassError::NoWorkers)
    );
}

#[test]
fn out_of_range_edges_surface_as_layout_errors() {
    let layout = two_by_two();
    let bad = e(0, 1, 1, 7);
    assert_eq!(
        check_pair(&layout, &e(0, 0, 0, 1), &bad, &CrossingOptions::default()),
        Err(LayoutError::NodeOutOfRange {
            node: NodeId::new(1, 7),
            len: 2,
        })
    );
    assert_eq!(
        check_pair(&layout, &e(4, 0, 0, 1), &e(0, 0, 1, 0), &CrossingOptions::default()),
        Err(LayoutError::GroupOutOfRange { group: 4, groups: 2 })
    );
}
