// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Deterministic float32 vector helpers used by the crossing engine.
//!
//! All operations round to `f32` and avoid fused multiply-add so identical
//! layouts produce bit-identical crossings across platforms.

mod vec2;
mod vec3;

pub use vec2::Vec2;
pub use vec3::Vec3;
