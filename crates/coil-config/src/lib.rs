// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Shared configuration services for Coil tools.
//! Keeps the engine itself configuration-free; hosts load preferences here
//! and hand plain options to `coil-core`.

pub mod config;
pub mod engine;
pub mod fs;

pub use config::{ConfigError, ConfigService, ConfigStore, InMemoryConfigStore};
pub use engine::{EngineConfig, ENGINE_CONFIG_KEY};
pub use fs::FsConfigStore;
