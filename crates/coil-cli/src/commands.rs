// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Subcommand implementations.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use coil_config::{ConfigService, EngineConfig, FsConfigStore, ENGINE_CONFIG_KEY};
use coil_core::{
    Coverage, EdgeEnumerator, Extent, Intersection, IntersectionPass, Layout, NodeId, PassStats,
};
use serde::Serialize;
use tracing::{info, warn};

#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ExtentArg {
    /// Infinite lines through the edge endpoints
    Line,
    /// Finite segments between the edge endpoints
    Segment,
}

impl From<ExtentArg> for Extent {
    fn from(value: ExtentArg) -> Self {
        match value {
            ExtentArg::Line => Self::Line,
            ExtentArg::Segment => Self::Segment,
        }
    }
}

#[derive(clap::Args, Debug, Default)]
pub(crate) struct IntersectArgs {
    /// Layout document to read
    pub layout: PathBuf,

    /// Treat |det| <= EPSILON as parallel instead of det == 0
    #[clap(long)]
    pub epsilon: Option<f32>,

    /// Intersect finite segments instead of infinite lines
    #[clap(long)]
    pub segments: bool,

    /// Worker threads for the pass
    #[clap(short, long)]
    pub workers: Option<usize>,

    /// Reject layouts with NaN or infinite coordinates
    #[clap(long)]
    pub validate: bool,

    /// Include pass counters alongside the crossings
    #[clap(long, conflicts_with = "points_only")]
    pub stats: bool,

    /// Emit only the crossing points, without provenance or counters
    #[clap(long)]
    pub points_only: bool,

    /// Write JSON here instead of stdout
    #[clap(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(clap::Args, Debug)]
pub(crate) struct EdgesArgs {
    /// Layout document to read
    pub layout: PathBuf,

    /// Include edges that start in the final group
    #[clap(long)]
    pub full: bool,

    /// Write JSON here instead of stdout
    #[clap(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(clap::Subcommand, Debug)]
pub(crate) enum ConfigAction {
    /// Print the effective engine preferences
    Show,
    /// Forget stored preferences
    Reset,
    /// Update stored preferences
    Set {
        /// Parallel-test tolerance
        #[clap(long, conflicts_with = "exact")]
        epsilon: Option<f32>,
        /// Go back to the exact det == 0 test
        #[clap(long)]
        exact: bool,
        /// Line or segment semantics
        #[clap(long, value_enum)]
        extent: Option<ExtentArg>,
        /// Worker threads
        #[clap(long)]
        workers: Option<usize>,
        /// Validate layouts before running
        #[clap(long)]
        validate: Option<bool>,
    },
}

#[derive(Serialize)]
struct IntersectOutput<'a> {
    intersections: &'a [Intersection],
    #[serde(skip_serializing_if = "Option::is_none")]
    stats: Option<PassStats>,
}

#[derive(Serialize)]
struct EdgeRow {
    first: NodeId,
    second: NodeId,
    intra_group: bool,
}

fn open_config(dir: Option<&Path>) -> Result<ConfigService<FsConfigStore>> {
    let store = match dir {
        Some(dir) => FsConfigStore::with_base(dir),
        None => FsConfigStore::new(),
    }
    .context("opening config store")?;
    Ok(ConfigService::new(store))
}

/// Stored preferences, or defaults when the store is unavailable.
fn stored_engine_config(dir: Option<&Path>) -> EngineConfig {
    open_config(dir)
        .and_then(|svc| Ok(svc.load::<EngineConfig>(ENGINE_CONFIG_KEY)?))
        .unwrap_or_else(|err| {
            warn!("ignoring stored engine config: {err:#}");
            None
        })
        .unwrap_or_default()
}

/// Command-line flags win over stored preferences.
pub(crate) fn apply_overrides(mut cfg: EngineConfig, args: &IntersectArgs) -> EngineConfig {
    if let Some(eps) = args.epsilon {
        cfg.parallel_epsilon = Some(eps);
    }
    if args.segments {
        cfg.extent = Extent::Segment;
    }
    if let Some(workers) = args.workers {
        cfg.workers = workers;
    }
    if args.validate {
        cfg.validate_layout = true;
    }
    cfg
}

pub(crate) fn load_layout(path: &Path) -> Result<Layout> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading layout {}", path.display()))?;
    let layout: Layout = serde_json::from_str(&text)
        .with_context(|| format!("parsing layout {}", path.display()))?;
    info!(
        groups = layout.group_count(),
        nodes = layout.node_count(),
        "loaded layout from {}",
        path.display()
    );
    Ok(layout)
}

fn write_json<T: Serialize>(value: &T, output: Option<&Path>) -> Result<()> {
    let mut text = serde_json::to_string_pretty(value).context("encoding output")?;
    text.push('\n');
    match output {
        Some(path) => {
            fs::write(path, text).with_context(|| format!("writing {}", path.display()))?;
            info!("wrote {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(text.as_bytes()).context("writing stdout")?;
        }
    }
    Ok(())
}

pub(crate) fn intersect(args: &IntersectArgs, config_dir: Option<&Path>) -> Result<()> {
    let cfg = apply_overrides(stored_engine_config(config_dir), args);
    let layout = load_layout(&args.layout)?;
    if cfg.validate_layout {
        layout.validate().context("layout failed validation")?;
    }

    let pass = IntersectionPass::new(cfg.crossing_options());
    let report = pass
        .run_with_workers(&layout, cfg.workers)
        .context("crossing pass failed")?;
    info!(
        edges = report.stats.edges,
        recorded = report.stats.recorded,
        degenerate = report.stats.degenerate,
        "crossing pass finished"
    );
    if report.stats.non_finite > 0 {
        warn!(
            non_finite = report.stats.non_finite,
            "crossings with NaN or infinite coordinates are written as null"
        );
    }

    if args.points_only {
        write_json(&report.points(), args.output.as_deref())
    } else {
        let output = IntersectOutput {
            intersections: &report.intersections,
            stats: args.stats.then_some(report.stats),
        };
        write_json(&output, args.output.as_deref())
    }
}

pub(crate) fn edges(args: &EdgesArgs) -> Result<()> {
    let layout = load_layout(&args.layout)?;
    let coverage = if args.full {
        Coverage::Full
    } else {
        Coverage::Reference
    };
    let rows: Vec<EdgeRow> = EdgeEnumerator::with_coverage(&layout, coverage)
        .map(|e| EdgeRow {
            first: e.first,
            second: e.second,
            intra_group: e.is_intra_group(),
        })
        .collect();
    write_json(&rows, args.output.as_deref())
}

pub(crate) fn config(action: &ConfigAction, config_dir: Option<&Path>) -> Result<()> {
    let svc = open_config(config_dir)?;
    match action {
        ConfigAction::Show => {
            let cfg: EngineConfig = svc.load_or_default(ENGINE_CONFIG_KEY)?;
            write_json(&cfg, None)
        }
        ConfigAction::Reset => {
            svc.reset(ENGINE_CONFIG_KEY)?;
            info!("engine config reset");
            Ok(())
        }
        ConfigAction::Set {
            epsilon,
            exact,
            extent,
            workers,
            validate,
        } => {
            let mut cfg: EngineConfig = svc.load_or_default(ENGINE_CONFIG_KEY)?;
            if *exact {
                cfg.parallel_epsilon = None;
            }
            if let Some(eps) = epsilon {
                cfg.parallel_epsilon = Some(*eps);
            }
            if let Some(extent) = extent {
                cfg.extent = (*extent).into();
            }
            if let Some(workers) = workers {
                cfg.workers = *workers;
            }
            if let Some(validate) = validate {
                cfg.validate_layout = *validate;
            }
            svc.save(ENGINE_CONFIG_KEY, &cfg)?;
            write_json(&cfg, None)
        }
    }
}
