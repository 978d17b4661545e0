//! Learning Rate Schedulers
//!
//! Shared scheduler machinery plus the standard decay schedules.
//!
//! A scheduler attaches to an optimizer once, records each parameter group's
//! starting learning rate, and from then on rewrites every group's `lr` each
//! time [`LRScheduler::step`] is called at an epoch boundary. Learning rates
//! are always computed in closed form from the base rate and the epoch index,
//! so a scheduler can be rebuilt at any epoch without replaying history.
//!
//! @version 0.1.0
//! @author `AutomataNexus` Development Team

use tracing::debug;

use crate::error::{Error, Result};
use crate::optimizer::Optimizer;

// =============================================================================
// Schedule State
// =============================================================================

/// Bookkeeping shared by every scheduler.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleState {
    base_lrs: Vec<f64>,
    last_epoch: Option<usize>,
    last_lrs: Vec<f64>,
}

impl ScheduleState {
    /// Attaches to an optimizer's parameter groups.
    ///
    /// With `last_epoch = None` the schedule starts fresh and any group that
    /// has no `initial_lr` yet gets its current `lr`. With `Some(epoch)` the
    /// schedule resumes after `epoch`, and every group must already carry an
    /// `initial_lr`.
    pub fn attach<O: Optimizer + ?Sized>(
        optimizer: &mut O,
        last_epoch: Option<usize>,
    ) -> Result<Self> {
        if last_epoch == Some(usize::MAX) {
            return Err(Error::InvalidArgument(format!(
                "last_epoch must be below {}, there is no epoch after it",
                usize::MAX
            )));
        }

        let groups = optimizer.param_groups_mut();
        let mut base_lrs = Vec::with_capacity(groups.len());

        for (index, group) in groups.iter_mut().enumerate() {
            let base = match last_epoch {
                None => *group.initial_lr.get_or_insert(group.lr),
                Some(_) => group
                    .initial_lr
                    .ok_or(Error::MissingInitialLr { group: index })?,
            };
            base_lrs.push(base);
        }

        Ok(Self {
            last_lrs: optimizer.group_lrs(),
            base_lrs,
            last_epoch,
        })
    }

    /// Learning rate each group decays from.
    pub fn base_lrs(&self) -> &[f64] {
        &self.base_lrs
    }

    /// Last epoch applied, `None` before the first step.
    pub fn last_epoch(&self) -> Option<usize> {
        self.last_epoch
    }

    /// Learning rates written by the last step.
    pub fn last_lrs(&self) -> &[f64] {
        &self.last_lrs
    }

    /// Epoch the next step will apply.
    ///
    /// Stays at `usize::MAX` once the schedule has reached it.
    pub fn next_epoch(&self) -> usize {
        self.last_epoch
            .map_or(0, |epoch| epoch.checked_add(1).unwrap_or(epoch))
    }

    fn record(&mut self, epoch: usize, lrs: Vec<f64>) {
        self.last_epoch = Some(epoch);
        self.last_lrs = lrs;
    }
}

// =============================================================================
// LRScheduler Trait
// =============================================================================

/// Trait for learning rate schedulers.
pub trait LRScheduler {
    /// Learning rate for a group whose base rate is `base_lr`, at `epoch`.
    fn lr_at(&self, base_lr: f64, epoch: usize) -> f64;

    /// Shared scheduler state.
    fn state(&self) -> &ScheduleState;

    /// Shared scheduler state, mutably.
    fn state_mut(&mut self) -> &mut ScheduleState;

    /// Advances one epoch and writes the new learning rates into the optimizer.
    fn step<O: Optimizer + ?Sized>(&mut self, optimizer: &mut O) {
        let epoch = self.state().next_epoch();
        let lrs: Vec<f64> = self
            .state()
            .base_lrs()
            .iter()
            .map(|&base| self.lr_at(base, epoch))
            .collect();

        for (group, &lr) in optimizer.param_groups_mut().iter_mut().zip(&lrs) {
            group.lr = lr;
        }

        debug!(epoch, lrs = ?lrs, "adjusted learning rate");
        self.state_mut().record(epoch, lrs);
    }

    /// Returns the learning rates written by the last step.
    fn get_last_lr(&self) -> &[f64] {
        self.state().last_lrs()
    }

    /// Returns the last epoch applied.
    fn last_epoch(&self) -> usize {
        self.state().last_epoch().unwrap_or_default()
    }

    /// Returns the base learning rate of every group.
    fn base_lrs(&self) -> &[f64] {
        self.state().base_lrs()
    }
}

/// Number of milestones reached by `epoch`, counting repeats.
///
/// `milestones` must be sorted.
pub(crate) fn milestones_passed(milestones: &[usize], epoch: usize) -> i32 {
    decay_exponent(milestones.partition_point(|&m| m <= epoch))
}

/// Converts a decay count into a `powi` exponent, saturating at `i32::MAX`.
pub(crate) fn decay_exponent(count: usize) -> i32 {
    i32::try_from(count).unwrap_or(i32::MAX)
}

// =============================================================================
// StepLR
// =============================================================================

/// Decays learning rate by gamma every `step_size` epochs.
///
/// lr = `base_lr` * gamma^(epoch // `step_size`)
#[derive(Debug, Clone)]
pub struct StepLR {
    step_size: usize,
    gamma: f64,
    state: ScheduleState,
}

impl StepLR {
    /// Creates a new `StepLR` scheduler and applies epoch 0.
    pub fn new<O: Optimizer + ?Sized>(
        optimizer: &mut O,
        step_size: usize,
        gamma: f64,
    ) -> Result<Self> {
        Self::with_last_epoch(optimizer, step_size, gamma, None)
    }

    /// Creates a `StepLR` that continues after `last_epoch`.
    pub fn with_last_epoch<O: Optimizer + ?Sized>(
        optimizer: &mut O,
        step_size: usize,
        gamma: f64,
        last_epoch: Option<usize>,
    ) -> Result<Self> {
        if step_size == 0 {
            return Err(Error::InvalidArgument(
                "StepLR step_size must be at least 1".to_string(),
            ));
        }
        let mut scheduler = Self {
            step_size,
            gamma,
            state: ScheduleState::attach(optimizer, last_epoch)?,
        };
        scheduler.step(optimizer);
        Ok(scheduler)
    }

    /// Epochs between decays.
    pub fn step_size(&self) -> usize {
        self.step_size
    }
}

impl LRScheduler for StepLR {
    fn lr_at(&self, base_lr: f64, epoch: usize) -> f64 {
        let num_decays = epoch / self.step_size;
        base_lr * self.gamma.powi(decay_exponent(num_decays))
    }

    fn state(&self) -> &ScheduleState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut ScheduleState {
        &mut self.state
    }
}

// =============================================================================
// MultiStepLR
// =============================================================================

/// Decays learning rate by gamma at each milestone.
///
/// lr = `base_lr` * gamma^(number of milestones <= epoch)
#[derive(Debug, Clone)]
pub struct MultiStepLR {
    milestones: Vec<usize>,
    gamma: f64,
    state: ScheduleState,
}

impl MultiStepLR {
    /// Creates a new `MultiStepLR` scheduler and applies epoch 0.
    ///
    /// Milestones may be given in any order; a repeated milestone decays
    /// once per occurrence.
    pub fn new<O: Optimizer + ?Sized>(
        optimizer: &mut O,
        milestones: Vec<usize>,
        gamma: f64,
    ) -> Result<Self> {
        Self::with_last_epoch(optimizer, milestones, gamma, None)
    }

    /// Creates a `MultiStepLR` that continues after `last_epoch`.
    pub fn with_last_epoch<O: Optimizer + ?Sized>(
        optimizer: &mut O,
        mut milestones: Vec<usize>,
        gamma: f64,
        last_epoch: Option<usize>,
    ) -> Result<Self> {
        milestones.sort_unstable();
        let mut scheduler = Self {
            milestones,
            gamma,
            state: ScheduleState::attach(optimizer, last_epoch)?,
        };
        scheduler.step(optimizer);
        Ok(scheduler)
    }

    /// Sorted milestones.
    pub fn milestones(&self) -> &[usize] {
        &self.milestones
    }
}

impl LRScheduler for MultiStepLR {
    fn lr_at(&self, base_lr: f64, epoch: usize) -> f64 {
        base_lr * self.gamma.powi(milestones_passed(&self.milestones, epoch))
    }

    fn state(&self) -> &ScheduleState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut ScheduleState {
        &mut self.state
    }
}

// =============================================================================
// CosineAnnealingLR
// =============================================================================

/// Cosine annealing learning rate scheduler.
///
/// lr = `eta_min` + (`base_lr` - `eta_min`) * (1 + cos(pi * epoch / `T_max`)) / 2
#[derive(Debug, Clone)]
pub struct CosineAnnealingLR {
    t_max: f64,
    eta_min: f64,
    state: ScheduleState,
}

impl CosineAnnealingLR {
    /// Creates a new `CosineAnnealingLR` scheduler annealing to zero.
    pub fn new<O: Optimizer + ?Sized>(optimizer: &mut O, t_max: f64) -> Result<Self> {
        Self::with_eta_min(optimizer, t_max, 0.0)
    }

    /// Creates a `CosineAnnealingLR` with minimum learning rate.
    pub fn with_eta_min<O: Optimizer + ?Sized>(
        optimizer: &mut O,
        t_max: f64,
        eta_min: f64,
    ) -> Result<Self> {
        Self::with_last_epoch(optimizer, t_max, eta_min, None)
    }

    /// Creates a `CosineAnnealingLR` that continues after `last_epoch`.
    pub fn with_last_epoch<O: Optimizer + ?Sized>(
        optimizer: &mut O,
        t_max: f64,
        eta_min: f64,
        last_epoch: Option<usize>,
    ) -> Result<Self> {
        if !(t_max.is_finite() && t_max > 0.0) {
            return Err(Error::InvalidArgument(format!(
                "CosineAnnealingLR T_max must be positive, got {t_max}"
            )));
        }
        let mut scheduler = Self {
            t_max,
            eta_min,
            state: ScheduleState::attach(optimizer, last_epoch)?,
        };
        scheduler.step(optimizer);
        Ok(scheduler)
    }

    /// Half-period of the cosine, in epochs.
    pub fn t_max(&self) -> f64 {
        self.t_max
    }
}

impl LRScheduler for CosineAnnealingLR {
    fn lr_at(&self, base_lr: f64, epoch: usize) -> f64 {
        let progress = epoch as f64 / self.t_max;
        self.eta_min
            + (base_lr - self.eta_min) * (1.0 + (std::f64::consts::PI * progress).cos()) / 2.0
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
