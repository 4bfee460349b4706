// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Persisted crossing-engine preferences.

use coil_core::{CrossingOptions, Extent, ParallelTest};
use serde::{Deserialize, Serialize};

/// Key the engine preferences are stored under.
pub const ENGINE_CONFIG_KEY: &str = "engine";

/// Preferences a host applies when it runs a crossing pass.
///
/// Defaults reproduce the reference pass: exact zero-determinant test,
/// infinite lines, one thread, no layout validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Tolerance for the parallel test; `None` compares against zero exactly.
    pub parallel_epsilon: Option<f32>,
    /// Line or segment semantics.
    pub extent: Extent,
    /// Worker threads for the pass; `1` runs on the calling thread.
    pub workers: usize,
    /// Reject layouts containing non-finite positions before running.
    pub validate_layout: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            parallel_epsilon: None,
            extent: Extent::Line,
            workers: 1,
            validate_layout: false,
        }
    }
}

impl EngineConfig {
    /// Crossing options for `coil_core::IntersectionPass`.
    pub fn crossing_options(&self) -> CrossingOptions {
        CrossingOptions {
            parallel: ParallelTest::from_epsilon(self.parallel_epsilon),
            extent: self.extent,
        }
    }
}
