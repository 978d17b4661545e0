//! lrkit CLI - Command Line Interface for lrkit Learning Rate Schedules
//!
//! The main entry point for the lrkit command-line tool.
//!
//! # Commands
//! - `lrkit list` - List the available schedulers
//! - `lrkit preview` - Print the learning rate of every epoch for a schedule
//! - `lrkit init` - Write a default lrkit.toml
//!
//! Logging goes to stderr and honours `RUST_LOG`; `--verbose` turns on debug
//! output for every scheduler step.
//!
//! @version 0.1.0
//! @author `AutomataNexus` Development Team

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
// CLI-specific allowances
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::format_push_string)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::float_cmp)]

use clap::Parser;
use colored::Colorize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
mod commands;
mod error;

use cli::{Cli, Commands};
use error::CliResult;

fn main() {
    if let Err(e) = run() {
        eprintln!("{} {}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::List => commands::list::execute(cli.quiet),
        Commands::Preview(args) => commands::preview::execute(args, cli.quiet),
        Commands::Init(args) => commands::init::execute(args, cli.quiet),
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "lrkit=debug,lrkit_optim=debug"
    } else {
        "lrkit=warn,lrkit_optim=warn"
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
