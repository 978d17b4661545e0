//! List - Show Available Schedulers
//!
//! @version 0.1.0
//! @author `AutomataNexus` Development Team

use colored::Colorize;
use lrkit_optim::SchedulerKind;

use super::utils::print_header;
use crate::error::CliResult;

// =============================================================================
// List Command
// =============================================================================

/// Execute the list command
pub fn execute(quiet: bool) -> CliResult<()> {
    if quiet {
        for kind in SchedulerKind::ALL {
            println!("{kind}");
        }
        return Ok(());
    }

    print_header("Available schedulers");
    let width = SchedulerKind::ALL
        .iter()
        .map(|kind| kind.as_str().len())
        .max()
        .unwrap_or(0);
    for kind in SchedulerKind::ALL {
        println!(
            "  {}  {}",
            format!("{:<width$}", kind.as_str()).cyan().bold(),
            kind.description()
        );
    }
    println!();
    Ok(())
}
