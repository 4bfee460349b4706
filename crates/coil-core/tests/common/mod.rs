#![allow(dead_code)]
use coil_core::{Layout, PassReport, Vec3};

/// Groups stacked along Z, each a ring of `per_group` nodes, every ring
/// twisted a little further than the last.
pub fn radial_layout(groups: usize, per_group: usize) -> Layout {
    let step = core::f32::consts::TAU / per_group.max(1) as f32;
    let twist = step / (groups.max(1) as f32 + 1.0);
    Layout::new(
        (0..groups)
            .map(|g| {
                (0..per_group)
                    .map(|n| {
                        let theta = n as f32 * step + g as f32 * twist;
                        Vec3::new(theta.cos(), theta.sin(), g as f32)
                    })
                    .collect()
            })
            .collect(),
    )
}

/// The 2×2 layout used for hand-counted pair tables:
/// group 0 = (0,0), (0,1); group 1 = (1,0), (1,1).
pub fn two_by_two() -> Layout {
    Layout::from_arrays([
        vec![[0.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
        vec![[1.0, 0.0, 0.0], [1.0, 1.0, 0.0]],
    ])
}

/// Bit-level view of a report, so NaN payloads and signed zeros compare exactly.
pub fn report_bits(report: &PassReport) -> Vec<[u32; 4]> {
    report
        .intersections
        .iter()
        .map(|i| {
            let [x, y, z] = i.point.to_array();
            [x.to_bits(), y.to_bits(), z.to_bits(), i.t.to_bits()]
        })
        .collect()
}
