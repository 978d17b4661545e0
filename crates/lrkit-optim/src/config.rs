//! Config - Scheduler Configuration Files
//!
//! Handles parsing of `lrkit.toml` files describing an optimizer's learning
//! rates and the schedule to apply to them.
//!
//! ```toml
//! [optimizer]
//! lr = 0.0003
//! momentum = 0.9
//! weight_decay = 0.0005
//!
//! [scheduler]
//! lr_scheduler = "multi_step"
//! stepsize = [30, 50, 55]
//! gamma = 0.1
//! ```
//!
//! @version 0.1.0
//! @author `AutomataNexus` Development Team

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::builder::{SchedulerOptions, StepSize};
use crate::error::{Error, Result};
use crate::optimizer::{ParamGroup, Parameter};
use crate::sgd::SGD;

// =============================================================================
// File Configuration
// =============================================================================

/// Top-level configuration file (lrkit.toml)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LrkitConfig {
    /// Optimizer learning rates
    #[serde(default)]
    pub optimizer: OptimizerConfig,

    /// Learning rate schedule
    #[serde(default)]
    pub scheduler: SchedulerConfig,
}

impl LrkitConfig {
    /// Load configuration from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Render configuration as TOML text
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Save configuration to a TOML file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        std::fs::write(path, self.to_toml_string()?)?;
        Ok(())
    }
}

// =============================================================================
// Optimizer Configuration
// =============================================================================

/// Learning rates of the optimizer being scheduled
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizerConfig {
    /// Learning rate shared by all groups
    #[serde(default = "default_lr")]
    pub lr: f64,

    /// Per-group learning rates, overriding `lr` when non-empty
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub group_lrs: Vec<f64>,

    /// SGD momentum factor
    #[serde(default)]
    pub momentum: f32,

    /// SGD dampening for momentum
    #[serde(default)]
    pub dampening: f32,

    /// Weight decay (L2 penalty)
    #[serde(default)]
    pub weight_decay: f32,

    /// Use Nesterov momentum
    #[serde(default)]
    pub nesterov: bool,
}

impl OptimizerConfig {
    /// Starting learning rate of each parameter group
    pub fn base_lrs(&self) -> Vec<f64> {
        if self.group_lrs.is_empty() {
            vec![self.lr]
        } else {
            self.group_lrs.clone()
        }
    }

    /// Builds SGD with one parameter group per base learning rate
    pub fn build(&self, params: Vec<Vec<Parameter>>) -> Result<SGD> {
        let base_lrs = self.base_lrs();
        if params.len() != base_lrs.len() {
            return Err(Error::InvalidArgument(format!(
                "expected {} parameter groups, got {}",
                base_lrs.len(),
                params.len()
            )));
        }

        let groups = params
            .into_iter()
            .zip(base_lrs)
            .map(|(params, lr)| ParamGroup::new(params, lr))
            .collect();
        Ok(SGD::with_groups(groups)
            .momentum(self.momentum)
            .dampening(self.dampening)
            .weight_decay(self.weight_decay)
            .nesterov(self.nesterov))
    }
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            lr: default_lr(),
            group_lrs: Vec::new(),
            momentum: 0.0,
            dampening: 0.0,
            weight_decay: 0.0,
            nesterov: false,
        }
    }
}

fn default_lr() -> f64 {
    0.0003
}

// =============================================================================
// Scheduler Configuration
// =============================================================================

/// Learning rate scheduler configuration
///
/// Names are kept as strings here and validated by [`SchedulerConfig::to_options`],
/// so that unknown names report the list of accepted ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Scheduler name (single_step, multi_step, cosine, warmup_multi_step, exponential_decay)
    #[serde(default = "default_scheduler")]
    pub lr_scheduler: String,

    /// Step size, or milestones for the multi-step schedulers
    #[serde(default)]
    pub stepsize: StepSize,

    /// Decay factor
    #[serde(default = "default_gamma")]
    pub gamma: f64,

    /// Epoch budget (cosine, exponential_decay)
    #[serde(default = "default_max_epoch")]
    pub max_epoch: usize,

    /// Warm-up starting multiplier
    #[serde(default = "default_warmup_factor")]
    pub warmup_factor: f64,

    /// Warm-up length in epochs
    #[serde(default = "default_warmup_epoch")]
    pub warmup_epoch: usize,

    /// Warm-up method (constant, linear)
    #[serde(default = "default_warmup_method")]
    pub warmup_method: String,

    /// Resume after this epoch
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_epoch: Option<usize>,
}

impl SchedulerConfig {
    /// Validates names and converts to builder options
    pub fn to_options(&self) -> Result<SchedulerOptions> {
        Ok(SchedulerOptions {
            kind: self.lr_scheduler.parse()?,
            stepsize: self.stepsize.clone(),
            gamma: self.gamma,
            max_epoch: self.max_epoch,
            warmup_factor: self.warmup_factor,
            warmup_epoch: self.warmup_epoch,
            warmup_method: self.warmup_method.parse()?,
            last_epoch: self.last_epoch,
        })
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self::from(&SchedulerOptions::default())
    }
}

impl From<&SchedulerOptions> for SchedulerConfig {
    fn from(options: &SchedulerOptions) -> Self {
        Self {
            lr_scheduler: options.kind.to_string(),
            stepsize: options.stepsize.clone(),
            gamma: options.gamma,
            max_epoch: options.max_epoch,
            warmup_factor: options.warmup_factor,
            warmup_epoch: options.warmup_epoch,
            warmup_method: options.warmup_method.to_string(),
            last_epoch: options.last_epoch,
        }
    }
}

fn default_scheduler() -> String {
    "single_step".to_string()
}
fn default_gamma() -> f64 {
    0.1
}
fn default_max_epoch() -> usize {
    1
}
fn default_warmup_factor() -> f64 {
    0.01
}
fn default_warmup_epoch() -> usize {
    10
}
fn default_warmup_method() -> String {
    "linear".to_string()
}

// =============================================================================
// Tests
// =============================================================================
