//! Warmup Multi-Step Scheduler
//!
//! Multi-step decay preceded by a warm-up phase in which the learning rate is
//! scaled down, either by a constant factor or by a factor that ramps linearly
//! back to one.
//!
//! @version 0.1.0
//! @author `AutomataNexus` Development Team

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::lr_scheduler::{milestones_passed, LRScheduler, ScheduleState};
use crate::optimizer::Optimizer;

// =============================================================================
// WarmupMethod
// =============================================================================

/// How the warm-up factor evolves during the warm-up phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarmupMethod {
    /// Hold the factor at `warmup_factor`.
    Constant,
    /// Interpolate from `warmup_factor` at epoch 0 to 1 at `warmup_iters`.
    #[default]
    Linear,
}

impl WarmupMethod {
    /// Name used in configuration files.
    pub fn as_str(self) -> &'static str {
        match self {
            WarmupMethod::Constant => "constant",
            WarmupMethod::Linear => "linear",
        }
    }
}

impl fmt::Display for WarmupMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WarmupMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "constant" => Ok(WarmupMethod::Constant),
            "linear" => Ok(WarmupMethod::Linear),
            other => Err(Error::InvalidWarmupMethod(other.to_string())),
        }
    }
}

// =============================================================================
// WarmupMultiStepLR
// =============================================================================

/// Multi-step decay with a warm-up phase.
///
/// ```text
/// factor = warmup_factor                               (constant, epoch < warmup_iters)
/// factor = warmup_factor * (1 - alpha) + alpha         (linear,   epoch < warmup_iters)
///          where alpha = epoch / warmup_iters
/// factor = 1                                           (epoch >= warmup_iters)
/// lr     = base_lr * factor * gamma^(milestones <= epoch)
/// ```
#[derive(Debug, Clone)]
pub struct WarmupMultiStepLR {
    milestones: Vec<usize>,
    gamma: f64,
    warmup_factor: f64,
    warmup_iters: usize,
    warmup_method: WarmupMethod,
    state: ScheduleState,
}

impl WarmupMultiStepLR {
    /// Creates a new `WarmupMultiStepLR` scheduler and applies epoch 0.
    ///
    /// Milestones must be non-decreasing.
    pub fn new<O: Optimizer + ?Sized>(
        optimizer: &mut O,
        milestones: Vec<usize>,
        gamma: f64,
        warmup_factor: f64,
        warmup_iters: usize,
        warmup_method: WarmupMethod,
    ) -> Result<Self> {
        Self::with_last_epoch(
            optimizer,
            milestones,
            gamma,
            warmup_factor,
            warmup_iters,
            warmup_method,
            None,
        )
    }

    /// Creates a `WarmupMultiStepLR` that continues after `last_epoch`.
    pub fn with_last_epoch<O: Optimizer + ?Sized>(
        optimizer: &mut O,
        milestones: Vec<usize>,
        gamma: f64,
        warmup_factor: f64,
        warmup_iters: usize,
        warmup_method: WarmupMethod,
        last_epoch: Option<usize>,
    ) -> Result<Self> {
        if milestones.windows(2).any(|w| w[0] > w[1]) {
            return Err(Error::InvalidMilestones(milestones));
        }
        let mut scheduler = Self {
            milestones,
            gamma,
            warmup_factor,
            warmup_iters,
            warmup_method,
            state: ScheduleState::attach(optimizer, last_epoch)?,
        };
        scheduler.step(optimizer);
        Ok(scheduler)
    }

    /// Warm-up multiplier at `epoch`.
    pub fn warmup_multiplier(&self, epoch: usize) -> f64 {
        if epoch >= self.warmup_iters {
            return 1.0;
        }
        match self.warmup_method {
            WarmupMethod::Constant => self.warmup_factor,
            WarmupMethod::Linear => {
                let alpha = epoch as f64 / self.warmup_iters as f64;
                self.warmup_factor * (1.0 - alpha) + alpha
            }
        }
    }

    /// Milestones, in order.
    pub fn milestones(&self) -> &[usize] {
        &self.milestones
    }

    /// Warm-up method in use.
    pub fn warmup_method(&self) -> WarmupMethod {
        self.warmup_method
    }
}

impl LRScheduler for WarmupMultiStepLR {
    fn lr_at(&self, base_lr: f64, epoch: usize) -> f64 {
        base_lr
            * self.warmup_multiplier(epoch)
            * self.gamma.powi(milestones_passed(&self.milestones, epoch))
    }

    fn state(&self) -> &ScheduleState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut ScheduleState {
        &mut self.state
    }
}

// =============================================================================
// Tests
// =============================================================================
