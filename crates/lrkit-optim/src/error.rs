//! Error Types - Scheduler Construction Errors
//!
//! Every way a scheduler can be rejected at construction time, from an unknown
//! scheduler name to a step size of the wrong shape.
//!
//! @version 0.1.0
//! @author `AutomataNexus` Development Team

use thiserror::Error;

// =============================================================================
// Error Types
// =============================================================================

/// The main error type for lrkit operations.
#[derive(Error, Debug)]
pub enum Error {
    /// The requested scheduler name is not one of the known schedulers.
    #[error("Unsupported scheduler: {name}. Must be one of {available:?}")]
    UnsupportedScheduler {
        /// The name that was requested.
        name: String,
        /// The names that are accepted.
        available: Vec<&'static str>,
    },

    /// The step size has the wrong shape for the requested scheduler.
    #[error("For {scheduler} lr_scheduler, stepsize must be {expected}, but got {got}")]
    InvalidStepSize {
        /// Scheduler that rejected the step size.
        scheduler: &'static str,
        /// What the scheduler expects ("an integer", "a list", ...).
        expected: &'static str,
        /// What was actually given.
        got: String,
    },

    /// Milestones are not in non-decreasing order.
    #[error("Milestones should be a list of increasing integers, got {0:?}")]
    InvalidMilestones(Vec<usize>),

    /// Unknown warm-up method.
    #[error("Only 'constant' or 'linear' warmup_method accepted, got {0}")]
    InvalidWarmupMethod(String),

    /// A scheduler was resumed on a parameter group that was never scheduled.
    #[error("param 'initial_lr' is not specified in param_groups[{group}] when resuming an optimizer")]
    MissingInitialLr {
        /// Index of the offending parameter group.
        group: usize,
    },

    /// A numeric argument is out of range.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Configuration could not be parsed or serialized.
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for lrkit operations.
pub type Result<T> = std::result::Result<T, Error>;

// =============================================================================
// Error Conversion
// =============================================================================

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Error::Config(e.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(e: toml::ser::Error) -> Self {
        Error::Config(e.to_string())
    }
}

// =============================================================================
// Tests
// =============================================================================
