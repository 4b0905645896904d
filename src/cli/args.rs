//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::plan::PlanKind;

/// Ordertrack - follow dataset listings and computation orders step by step.
#[derive(Debug, Parser)]
#[command(name = "ordertrack")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to config file (overrides default .ordertrack/config.yml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to project root (overrides current directory)
    #[arg(short, long, global = true)]
    pub project: Option<PathBuf>,

    /// Show every operation as it starts and finishes
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Open a listing or order and follow its progress
    Watch(WatchArgs),

    /// Show the steps of a workflow kind
    Plan(PlanArgs),

    /// Show completed listings and orders, payments and recent runs
    Status(StatusArgs),

    /// Pay for a finished order
    Pay(PayArgs),

    /// Show where the result of a paid order lives
    Result(ResultArgs),

    /// Compute the content identifier of a dataset file
    Cid(CidArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `watch` command.
#[derive(Debug, Clone, clap::Args)]
pub struct WatchArgs {
    /// Workflow kind: listing or order
    pub kind: PlanKind,

    /// Instance id
    pub id: u64,

    /// Never prompt; print progress as plain lines
    #[arg(long)]
    pub non_interactive: bool,
}

/// Arguments for the `plan` command.
#[derive(Debug, Clone, clap::Args)]
pub struct PlanArgs {
    /// Workflow kind: listing or order
    pub kind: PlanKind,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `status` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct StatusArgs {
    /// Number of recent runs to show
    #[arg(long, default_value_t = 5)]
    pub runs: usize,
}

/// Arguments for the `pay` command.
#[derive(Debug, Clone, clap::Args)]
pub struct PayArgs {
    /// Order id
    pub id: u64,

    /// Pay without asking for confirmation
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the `result` command.
#[derive(Debug, Clone, clap::Args)]
pub struct ResultArgs {
    /// Order id
    pub id: u64,
}

/// Arguments for the `cid` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CidArgs {
    /// Dataset file
    pub file: PathBuf,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: Shell,
}
