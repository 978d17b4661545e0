//! Preview - Print a Learning Rate Schedule
//!
//! Builds a scheduler from a configuration file and/or flags and prints the
//! learning rate it assigns to each epoch.
//!
//! @version 0.1.0
//! @author `AutomataNexus` Development Team

use colored::Colorize;
use lrkit_optim::{
    preview_optimizer, EpochLr, LrkitConfig, OptimizerConfig, SchedulerKind, SchedulerOptions,
    MAX_PREVIEW_EPOCHS,
};
use serde::Serialize;
use tracing::debug;

use super::utils::{format_lr, print_header, print_kv};
use crate::cli::{OutputFormat, PreviewArgs};
use crate::error::CliResult;

/// Epochs shown when neither `--epochs` nor a useful `max_epoch` is given
const DEFAULT_EPOCHS: usize = 10;

// =============================================================================
// Preview Command
// =============================================================================

/// JSON document emitted by `--format json`
#[derive(Debug, Serialize)]
struct PreviewReport {
    scheduler: SchedulerKind,
    base_lrs: Vec<f64>,
    epochs: Vec<EpochLr>,
}

/// Execute the preview command
pub fn execute(args: PreviewArgs, quiet: bool) -> CliResult<()> {
    let config = resolve_config(&args)?;
    let options = config.scheduler.to_options()?;
    let base_lrs = config.optimizer.base_lrs();
    let epochs = args.epochs.unwrap_or_else(|| default_epochs(&options));

    debug!(scheduler = %options.kind, epochs, "previewing schedule");
    let mut optimizer = config.optimizer.build(vec![Vec::new(); base_lrs.len()])?;
    let rows = preview_optimizer(&options, &mut optimizer, epochs)?;

    match args.format {
        OutputFormat::Json => {
            let report = PreviewReport {
                scheduler: options.kind,
                base_lrs,
                epochs: rows,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Table => {
            if !quiet {
                print_summary(&options, &config.optimizer);
            }
            print_table(&rows, base_lrs.len());
        }
    }
    Ok(())
}

/// Merge the configuration file (if any) with command-line overrides
fn resolve_config(args: &PreviewArgs) -> CliResult<LrkitConfig> {
    let mut config = match &args.config {
        Some(path) => LrkitConfig::load(path)?,
        None => LrkitConfig::default(),
    };

    let scheduler = &mut config.scheduler;
    if let Some(name) = &args.scheduler {
        scheduler.lr_scheduler.clone_from(name);
    }
    if let Some(stepsize) = &args.stepsize {
        scheduler.stepsize = stepsize.clone();
    }
    if let Some(gamma) = args.gamma {
        scheduler.gamma = gamma;
    }
    if let Some(max_epoch) = args.max_epoch {
        scheduler.max_epoch = max_epoch;
    }
    if let Some(warmup_factor) = args.warmup_factor {
        scheduler.warmup_factor = warmup_factor;
    }
    if let Some(warmup_epoch) = args.warmup_epoch {
        scheduler.warmup_epoch = warmup_epoch;
    }
    if let Some(method) = &args.warmup_method {
        scheduler.warmup_method.clone_from(method);
    }
    if args.last_epoch.is_some() {
        scheduler.last_epoch = args.last_epoch;
    }
    if !args.lr.is_empty() {
        config.optimizer.group_lrs = args.lr.clone();
    }
    if let Some(momentum) = args.momentum {
        config.optimizer.momentum = momentum;
    }
    if let Some(weight_decay) = args.weight_decay {
        config.optimizer.weight_decay = weight_decay;
    }

    Ok(config)
}

/// Show the whole epoch budget for budgeted schedules, otherwise a fixed window
fn default_epochs(options: &SchedulerOptions) -> usize {
    match options.kind {
        SchedulerKind::Cosine | SchedulerKind::ExponentialDecay if options.max_epoch > 1 => {
            options.max_epoch.saturating_add(1).min(MAX_PREVIEW_EPOCHS)
        }
        _ => DEFAULT_EPOCHS,
    }
}

fn print_summary(options: &SchedulerOptions, optimizer: &OptimizerConfig) {
    print_header("Learning rate schedule");
    print_kv("scheduler", options.kind.as_str());
    match options.kind {
        SchedulerKind::SingleStep | SchedulerKind::MultiStep => {
            print_kv("stepsize", &options.stepsize.to_string());
            print_kv("gamma", &options.gamma.to_string());
        }
        SchedulerKind::Cosine => {
            print_kv("max_epoch", &options.max_epoch.to_string());
        }
        SchedulerKind::WarmupMultiStep => {
            print_kv("stepsize", &options.stepsize.to_string());
            print_kv("gamma", &options.gamma.to_string());
            print_kv("warmup_factor", &options.warmup_factor.to_string());
            print_kv("warmup_epoch", &options.warmup_epoch.to_string());
            print_kv("warmup_method", options.warmup_method.as_str());
        }
        SchedulerKind::ExponentialDecay => {
            print_kv("stepsize", &options.stepsize.to_string());
            print_kv("gamma", &options.gamma.to_string());
            print_kv("max_epoch", &options.max_epoch.to_string());
        }
    }
    let lrs: Vec<String> = optimizer.base_lrs().iter().map(ToString::to_string).collect();
    print_kv("base lr", &lrs.join(", "));
    if optimizer.momentum != 0.0 {
        print_kv("momentum", &optimizer.momentum.to_string());
    }
    if optimizer.weight_decay != 0.0 {
        print_kv("weight_decay", &optimizer.weight_decay.to_string());
    }
    println!();
}

fn print_table(rows: &[EpochLr], groups: usize) {
    let mut header = format!("{:>6}", "epoch");
    for group in 0..groups {
        let title = if groups == 1 {
            "lr".to_string()
        } else {
            format!("lr[{group}]")
        };
        header.push_str(&format!("  {title:>14}"));
    }
    println!("{}", header.bold());

    for row in rows {
        let mut line = format!("{:>6}", row.epoch);
        for lr in &row.lrs {
            line.push_str(&format!("  {:>14}", format_lr(*lr)));
        }
        println!("{line}");
    }
}

// =============================================================================
// Tests
// =============================================================================
