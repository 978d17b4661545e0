//! CLI - Command Line Interface Definitions
//!
//! Defines the CLI structure using clap derive macros.
//!
//! @version 0.1.0
//! @author `AutomataNexus` Development Team

use clap::{Args, Parser, Subcommand, ValueEnum};
use lrkit_optim::StepSize;
use std::path::PathBuf;

// =============================================================================
// Main CLI Structure
// =============================================================================

/// lrkit - Learning rate schedules for training runs
#[derive(Parser, Debug)]
#[command(
    name = "lrkit",
    author = "AutomataNexus Development Team",
    version,
    about = "Build and preview learning rate schedules",
    long_about = "lrkit builds a learning rate scheduler from a name and a few hyperparameters \
                  and shows the learning rate it assigns to every epoch."
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except results and errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

// =============================================================================
// Subcommands
// =============================================================================

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the available schedulers
    List,

    /// Print the learning rate of every epoch for a schedule
    Preview(PreviewArgs),

    /// Write a default lrkit.toml
    Init(InitArgs),
}

// =============================================================================
// Preview Command
// =============================================================================

/// Output format for previews
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Aligned text table
    #[default]
    Table,
    /// JSON document
    Json,
}

#[derive(Args, Debug, Default)]
pub struct PreviewArgs {
    /// Configuration file to start from
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Scheduler name
    #[arg(short, long)]
    pub scheduler: Option<String>,

    /// Step size (`20`) or milestones (`30,50,55` or `[30]`)
    #[arg(long, value_parser = parse_stepsize)]
    pub stepsize: Option<StepSize>,

    /// Decay factor
    #[arg(short, long)]
    pub gamma: Option<f64>,

    /// Epoch budget for cosine and exponential_decay
    #[arg(long)]
    pub max_epoch: Option<usize>,

    /// Warm-up starting multiplier
    #[arg(long)]
    pub warmup_factor: Option<f64>,

    /// Warm-up length in epochs
    #[arg(long)]
    pub warmup_epoch: Option<usize>,

    /// Warm-up method (constant, linear)
    #[arg(long)]
    pub warmup_method: Option<String>,

    /// Resume after this epoch
    #[arg(long)]
    pub last_epoch: Option<usize>,

    /// Base learning rate of each parameter group
    #[arg(long, value_delimiter = ',')]
    pub lr: Vec<f64>,

    /// SGD momentum factor
    #[arg(long)]
    pub momentum: Option<f32>,

    /// Weight decay (L2 penalty)
    #[arg(long)]
    pub weight_decay: Option<f32>,

    /// Number of epochs to show
    #[arg(short, long)]
    pub epochs: Option<usize>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

/// Parses `20` as a single step size and `30,50,55` or `[30]` as milestones.
pub fn parse_stepsize(s: &str) -> Result<StepSize, String> {
    let trimmed = s.trim();
    let is_list = trimmed.starts_with('[') || trimmed.contains(',');
    let inner = trimmed.trim_start_matches('[').trim_end_matches(']');

    let parse = |item: &str| {
        item.trim()
            .parse::<usize>()
            .map_err(|_| format!("'{}' is not a non-negative integer", item.trim()))
    };

    if is_list {
        inner
            .split(',')
            .filter(|item| !item.trim().is_empty())
            .map(parse)
            .collect::<Result<Vec<_>, _>>()
            .map(StepSize::Multi)
    } else {
        parse(inner).map(StepSize::Single)
    }
}

// =============================================================================
// Init Command
// =============================================================================

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Directory to write lrkit.toml into
    #[arg(short, long, default_value = ".")]
    pub path: PathBuf,

    /// Scheduler to preconfigure
    #[arg(short, long)]
    pub scheduler: Option<String>,

    /// Overwrite an existing lrkit.toml
    #[arg(long)]
    pub force: bool,
}

// =============================================================================
// Tests
// =============================================================================
