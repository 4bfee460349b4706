// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Coil CLI entrypoint.
//!
//! Loads a layout document, runs a crossing pass, and writes the result as
//! JSON.
//!
//! # Usage
//! ```text
//! coil intersect layout.json [--epsilon E] [--segments] [--workers N] [--output out.json]
//! coil edges layout.json [--full]
//! coil config show|reset|set ...
//! ```
//!
//! A layout document looks like `{"groups": [[[x, y, z], ...], ...]}`. The CLI
//! exits with code `0` on success and non-zero on error.

#![deny(rust_2018_idioms)]
// The CLI is expected to print to stdout/stderr.
#![allow(clippy::print_stdout, clippy::print_stderr)]

mod commands;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{ConfigAction, EdgesArgs, IntersectArgs};

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Raise log verbosity (-v info, -vv debug, -vvv trace)
    #[clap(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Directory for persisted config (defaults to the platform config dir)
    #[clap(long, global = true)]
    config_dir: Option<PathBuf>,

    /// Command to execute
    #[clap(subcommand)]
    cmd: Command,
}

#[derive(clap::Subcommand, Debug)]
enum Command {
    /// Compute crossings between the projected edges of a layout
    Intersect(IntersectArgs),
    /// List the edges a layout implies
    Edges(EdgesArgs),
    /// Inspect or change persisted engine preferences
    Config {
        #[clap(subcommand)]
        action: ConfigAction,
    },
}

fn log_level(verbose: u8) -> Level {
    match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Logs go to stderr so stdout stays valid JSON.
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level(args.verbose))
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("setting default subscriber failed")?;

    let config_dir = args.config_dir.as_deref();
    match args.cmd {
        Command::Intersect(cmd) => commands::intersect(&cmd, config_dir),
        Command::Edges(cmd) => commands::edges(&cmd),
        Command::Config { action } => commands::config(&action, config_dir),
    }
}
