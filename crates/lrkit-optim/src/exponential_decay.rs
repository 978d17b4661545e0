//! Exponential Decay Scheduler
//!
//! Holds the learning rate flat until a start epoch, then decays it
//! exponentially so that it reaches `base_lr * gamma` at `max_epoch`.
//!
//! @version 0.1.0
//! @author `AutomataNexus` Development Team

use crate::error::{Error, Result};
use crate::lr_scheduler::{LRScheduler, ScheduleState};
use crate::optimizer::Optimizer;

/// Default decay target when none is given.
pub const DEFAULT_GAMMA: f64 = 0.001;

/// Exponential decay with a flat phase.
///
/// ```text
/// lr = base_lr                                                  epoch < start
/// lr = base_lr * gamma^((epoch - start + 1) / (max_epoch - start + 1))   otherwise
/// ```
#[derive(Debug, Clone)]
pub struct ExponentialDecayLR {
    max_epoch: usize,
    start_decay_at_epoch: usize,
    gamma: f64,
    state: ScheduleState,
}

impl ExponentialDecayLR {
    /// Creates a new `ExponentialDecayLR` scheduler and applies epoch 0.
    pub fn new<O: Optimizer + ?Sized>(
        optimizer: &mut O,
        max_epoch: usize,
        start_decay_at_epoch: usize,
        gamma: f64,
    ) -> Result<Self> {
        Self::with_last_epoch(optimizer, max_epoch, start_decay_at_epoch, gamma, None)
    }

    /// Creates an `ExponentialDecayLR` that continues after `last_epoch`.
    pub fn with_last_epoch<O: Optimizer + ?Sized>(
        optimizer: &mut O,
        max_epoch: usize,
        start_decay_at_epoch: usize,
        gamma: f64,
        last_epoch: Option<usize>,
    ) -> Result<Self> {
        if max_epoch < start_decay_at_epoch {
            return Err(Error::InvalidArgument(format!(
                "ExponentialDecayLR max_epoch ({max_epoch}) must not precede \
                 start_decay_at_epoch ({start_decay_at_epoch})"
            )));
        }
        let mut scheduler = Self {
            max_epoch,
            start_decay_at_epoch,
            gamma,
            state: ScheduleState::attach(optimizer, last_epoch)?,
        };
        scheduler.step(optimizer);
        Ok(scheduler)
    }

    /// Epoch at which the decay reaches `gamma`.
    pub fn max_epoch(&self) -> usize {
        self.max_epoch
    }

    /// First epoch that is decayed.
    pub fn start_decay_at_epoch(&self) -> usize {
        self.start_decay_at_epoch
    }
}

impl LRScheduler for ExponentialDecayLR {
    fn lr_at(&self, base_lr: f64, epoch: usize) -> f64 {
        if epoch < self.start_decay_at_epoch {
            return base_lr;
        }
        let elapsed = (epoch - self.start_decay_at_epoch) as f64 + 1.0;
        let span = (self.max_epoch - self.start_decay_at_epoch) as f64 + 1.0;
        base_lr * self.gamma.powf(elapsed / span)
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
