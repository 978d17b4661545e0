//! lrkit-optim - Learning Rate Scheduling
//!
//! Builds learning rate schedulers by name and applies them to an optimizer's
//! parameter groups once per epoch.
//!
//! # Learning Rate Schedulers
//!
//! - **StepLR** (`single_step`) - Step decay at fixed intervals
//! - **MultiStepLR** (`multi_step`) - Decay at specified milestones
//! - **CosineAnnealingLR** (`cosine`) - Cosine annealing
//! - **WarmupMultiStepLR** (`warmup_multi_step`) - Warm-up, then milestone decay
//! - **ExponentialDecayLR** (`exponential_decay`) - Flat phase, then exponential decay
//!
//! # Basic Example
//!
//! ```ignore
//! use lrkit_optim::prelude::*;
//!
//! let mut optimizer = SGD::new(params, 0.0003).momentum(0.9);
//! let options = SchedulerOptions::named("single_step")?.stepsize(20);
//! let mut scheduler = build_lr_scheduler(&mut optimizer, &options)?;
//!
//! for epoch in 0..max_epoch {
//!     for batch in loader {
//!         optimizer.zero_grad();
//!         // forward / backward
//!         optimizer.step();
//!     }
//!     scheduler.step(&mut optimizer);
//! }
//! ```
//!
//! # From a Configuration File
//!
//! ```ignore
//! use lrkit_optim::LrkitConfig;
//!
//! let config = LrkitConfig::load("lrkit.toml")?;
//! let options = config.scheduler.to_options()?;
//! ```
//!
//! @version 0.1.0
//! @author `AutomataNexus` Development Team

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
// ML/numeric-specific allowances
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]
#![allow(clippy::too_many_arguments)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::float_cmp)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::upper_case_acronyms)]
#![allow(clippy::needless_pass_by_value)]

// =============================================================================
// Module Declarations
// =============================================================================

pub mod builder;
pub mod config;
pub mod error;
pub mod exponential_decay;
pub mod lr_scheduler;
pub mod optimizer;
pub mod sgd;
pub mod warmup;

// =============================================================================
// Re-exports
// =============================================================================

pub use builder::{
    build_lr_scheduler, preview, preview_optimizer, EpochLr, Scheduler, SchedulerKind,
    SchedulerOptions, StepSize, AVAILABLE_SCHEDULERS, MAX_PREVIEW_EPOCHS,
};
pub use config::{LrkitConfig, OptimizerConfig, SchedulerConfig};
pub use error::{Error, Result};
pub use exponential_decay::ExponentialDecayLR;
pub use lr_scheduler::{CosineAnnealingLR, LRScheduler, MultiStepLR, ScheduleState, StepLR};
pub use optimizer::{Optimizer, ParamGroup, Parameter};
pub use sgd::SGD;
pub use warmup::{WarmupMethod, WarmupMultiStepLR};

// =============================================================================
// Prelude
// =============================================================================

/// Common imports for learning rate scheduling.
pub mod prelude {
    pub use crate::{
        build_lr_scheduler, CosineAnnealingLR, ExponentialDecayLR, LRScheduler, MultiStepLR,
        Optimizer, ParamGroup, Parameter, Scheduler, SchedulerKind, SchedulerOptions, StepLR,
        StepSize, WarmupMethod, WarmupMultiStepLR, SGD,
    };
}

// =============================================================================
// Tests
// =============================================================================
