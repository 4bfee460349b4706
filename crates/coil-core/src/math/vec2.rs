// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

/// Planar vector produced by projecting a [`super::Vec3`] onto XY.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Vec2 {
    data: [f32; 2],
}

impl Vec2 {
    /// Creates a vector from components.
    pub const fn new(x: f32, y: f32) -> Self {
        Self { data: [x, y] }
    }

    /// X component.
    pub fn x(&self) -> f32 {
        self.data[0]
    }

    /// Y component.
    pub fn y(&self) -> f32 {
        self.data[1]
    }

    /// Subtracts another vector.
    pub fn sub(&self, other: &Self) -> Self {
        Self::new(self.data[0] - other.data[0], self.data[1] - other.data[1])
    }

    /// 2D cross product `self.x * other.y - other.x * self.y`.
    ///
    /// Zero when the two directions are parallel or anti-parallel.
    pub fn perp_dot(&self, other: &Self) -> f32 {
        self.data[0] * other.data[1] - other.data[0] * self.data[1]
    }
}
