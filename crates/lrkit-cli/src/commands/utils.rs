//! Utils - Common Utilities for CLI Commands
//!
//! Shared output helpers used across CLI commands.
//!
//! @version 0.1.0
//! @author `AutomataNexus` Development Team

use colored::Colorize;

// =============================================================================
// Output Formatting
// =============================================================================

/// Print a success message
pub fn print_success(message: &str) {
    println!("{} {}", "✓".green().bold(), message);
}

/// Print a header
pub fn print_header(title: &str) {
    println!();
    println!("{}", title.bold().underline());
    println!();
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {}: {}", key.dimmed(), value);
}

/// Format a learning rate for table output
pub fn format_lr(lr: f64) -> String {
    if lr != 0.0 && lr.abs() < 1e-6 {
        format!("{lr:.4e}")
    } else {
        format!("{lr:.8}")
    }
}

// =============================================================================
// Tests
// =============================================================================
