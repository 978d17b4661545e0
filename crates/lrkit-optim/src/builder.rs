//! Scheduler Builder - Name-Driven Scheduler Construction
//!
//! Maps a scheduler name and a handful of hyperparameters onto one of the
//! concrete schedulers, validating the shape of each argument for the
//! scheduler that consumes it.
//!
//! # Example
//!
//! ```ignore
//! use lrkit_optim::prelude::*;
//!
//! // Decay learning rate at 30, 50 and 55 epochs.
//! let options = SchedulerOptions::new(SchedulerKind::MultiStep).stepsize(vec![30, 50, 55]);
//! let mut scheduler = build_lr_scheduler(&mut optimizer, &options)?;
//!
//! for epoch in 0..max_epoch {
//!     train_one_epoch(&mut optimizer);
//!     scheduler.step(&mut optimizer);
//! }
//! ```
//!
//! @version 0.1.0
//! @author `AutomataNexus` Development Team

use std::fmt;
use std::str::FromStr;

use serde::de::{self, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::info;

use crate::error::{Error, Result};
use crate::exponential_decay::ExponentialDecayLR;
use crate::lr_scheduler::{CosineAnnealingLR, LRScheduler, MultiStepLR, ScheduleState, StepLR};
use crate::optimizer::{Optimizer, ParamGroup};
use crate::sgd::SGD;
use crate::warmup::{WarmupMethod, WarmupMultiStepLR};

/// Scheduler names accepted by [`SchedulerKind::from_str`], in display order.
pub const AVAILABLE_SCHEDULERS: [&str; 5] = [
    "single_step",
    "multi_step",
    "cosine",
    "warmup_multi_step",
    "exponential_decay",
];

// =============================================================================
// SchedulerKind
// =============================================================================

/// The schedules the builder can construct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SchedulerKind {
    /// Step decay every `stepsize` epochs.
    #[default]
    SingleStep,
    /// Decay at each milestone in `stepsize`.
    MultiStep,
    /// Cosine annealing over `max_epoch` epochs.
    Cosine,
    /// Warm-up for `warmup_epoch` epochs, then multi-step decay.
    WarmupMultiStep,
    /// Flat until `stepsize`, then exponential decay towards `max_epoch`.
    ExponentialDecay,
}

impl SchedulerKind {
    /// Every kind, in the order of [`AVAILABLE_SCHEDULERS`].
    pub const ALL: [SchedulerKind; 5] = [
        SchedulerKind::SingleStep,
        SchedulerKind::MultiStep,
        SchedulerKind::Cosine,
        SchedulerKind::WarmupMultiStep,
        SchedulerKind::ExponentialDecay,
    ];

    /// Configuration name of this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            SchedulerKind::SingleStep => "single_step",
            SchedulerKind::MultiStep => "multi_step",
            SchedulerKind::Cosine => "cosine",
            SchedulerKind::WarmupMultiStep => "warmup_multi_step",
            SchedulerKind::ExponentialDecay => "exponential_decay",
        }
    }

    /// One-line description for listings.
    pub fn description(self) -> &'static str {
        match self {
            SchedulerKind::SingleStep => "decay by gamma every `stepsize` epochs",
            SchedulerKind::MultiStep => "decay by gamma at each epoch listed in `stepsize`",
            SchedulerKind::Cosine => "cosine annealing to zero over `max_epoch` epochs",
            SchedulerKind::WarmupMultiStep => {
                "warm up for `warmup_epoch` epochs, then decay at each `stepsize` milestone"
            }
            SchedulerKind::ExponentialDecay => {
                "flat until epoch `stepsize`, then exponential decay reaching gamma at `max_epoch`"
            }
        }
    }
}

impl fmt::Display for SchedulerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SchedulerKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| Error::UnsupportedScheduler {
                name: s.to_string(),
                available: AVAILABLE_SCHEDULERS.to_vec(),
            })
    }
}

// =============================================================================
// StepSize
// =============================================================================

/// Step size argument: a single epoch count or a list of milestones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum StepSize {
    /// A single epoch count.
    Single(usize),
    /// A list of epochs.
    Multi(Vec<usize>),
}

impl StepSize {
    /// Reads the step size as one integer; a list contributes its last entry.
    pub fn as_single(&self, scheduler: &'static str) -> Result<usize> {
        match self {
            StepSize::Single(n) => Ok(*n),
            StepSize::Multi(list) => list.last().copied().ok_or(Error::InvalidStepSize {
                scheduler,
                expected: "an integer",
                got: "an empty list".to_string(),
            }),
        }
    }

    /// Reads the step size as a list of milestones.
    pub fn as_list(&self, scheduler: &'static str) -> Result<Vec<usize>> {
        match self {
            StepSize::Multi(list) => Ok(list.clone()),
            StepSize::Single(_) => Err(Error::InvalidStepSize {
                scheduler,
                expected: "a list",
                got: "an integer".to_string(),
            }),
        }
    }
}

impl Default for StepSize {
    fn default() -> Self {
        StepSize::Single(1)
    }
}

impl From<usize> for StepSize {
    fn from(n: usize) -> Self {
        StepSize::Single(n)
    }
}

impl From<Vec<usize>> for StepSize {
    fn from(list: Vec<usize>) -> Self {
        StepSize::Multi(list)
    }
}

impl fmt::Display for StepSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepSize::Single(n) => write!(f, "{n}"),
            StepSize::Multi(list) => write!(f, "{list:?}"),
        }
    }
}

impl<'de> Deserialize<'de> for StepSize {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct StepSizeVisitor;

        impl<'de> Visitor<'de> for StepSizeVisitor {
            type Value = StepSize;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a non-negative integer or a list of non-negative integers")
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<StepSize, E> {
                usize::try_from(v)
                    .map(StepSize::Single)
                    .map_err(|_| E::invalid_value(de::Unexpected::Unsigned(v), &self))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<StepSize, E> {
                usize::try_from(v)
                    .map(StepSize::Single)
                    .map_err(|_| E::invalid_value(de::Unexpected::Signed(v), &self))
            }

            fn visit_seq<A: SeqAccess<'de>>(
                self,
                mut seq: A,
            ) -> std::result::Result<StepSize, A::Error> {
                let mut list = Vec::with_capacity(seq.size_hint().unwrap_or(0));
                while let Some(epoch) = seq.next_element::<usize>()? {
                    list.push(epoch);
                }
                Ok(StepSize::Multi(list))
            }
        }

        deserializer.deserialize_any(StepSizeVisitor)
    }
}

// =============================================================================
// SchedulerOptions
// =============================================================================

/// Arguments for [`build_lr_scheduler`].
///
/// Only the fields the chosen scheduler reads matter; the rest are ignored.
#[derive(Debug, Clone, PartialEq)]
pub struct SchedulerOptions {
    /// Which schedule to build.
    pub kind: SchedulerKind,
    /// Step size (`single_step`, `exponential_decay`) or milestones
    /// (`multi_step`, `warmup_multi_step`).
    pub stepsize: StepSize,
    /// Decay factor.
    pub gamma: f64,
    /// Epoch budget for `cosine` and `exponential_decay`.
    pub max_epoch: usize,
    /// Starting multiplier for `warmup_multi_step`.
    pub warmup_factor: f64,
    /// Warm-up length for `warmup_multi_step`.
    pub warmup_epoch: usize,
    /// Warm-up shape for `warmup_multi_step`.
    pub warmup_method: WarmupMethod,
    /// Resume after this epoch instead of starting fresh.
    pub last_epoch: Option<usize>,
}

impl Default for SchedulerOptions {
    fn default() -> Self {
        Self {
            kind: SchedulerKind::SingleStep,
            stepsize: StepSize::default(),
            gamma: 0.1,
            max_epoch: 1,
            warmup_factor: 0.01,
            warmup_epoch: 10,
            warmup_method: WarmupMethod::Linear,
            last_epoch: None,
        }
    }
}

impl SchedulerOptions {
    /// Creates default options for a scheduler kind.
    pub fn new(kind: SchedulerKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    /// Creates default options for a scheduler given by name.
    pub fn named(name: &str) -> Result<Self> {
        Ok(Self::new(name.parse()?))
    }

    /// Builder method to set the step size.
    pub fn stepsize(mut self, stepsize: impl Into<StepSize>) -> Self {
        self.stepsize = stepsize.into();
        self
    }

    /// Builder method to set gamma.
    pub fn gamma(mut self, gamma: f64) -> Self {
        self.gamma = gamma;
        self
    }

    /// Builder method to set the maximum epoch.
    pub fn max_epoch(mut self, max_epoch: usize) -> Self {
        self.max_epoch = max_epoch;
        self
    }

    /// Builder method to set the warm-up factor.
    pub fn warmup_factor(mut self, warmup_factor: f64) -> Self {
        self.warmup_factor = warmup_factor;
        self
    }

    /// Builder method to set the warm-up length.
    pub fn warmup_epoch(mut self, warmup_epoch: usize) -> Self {
        self.warmup_epoch = warmup_epoch;
        self
    }

    /// Builder method to set the warm-up method.
    pub fn warmup_method(mut self, warmup_method: WarmupMethod) -> Self {
        self.warmup_method = warmup_method;
        self
    }

    /// Builder method to resume after `last_epoch`.
    pub fn last_epoch(mut self, last_epoch: usize) -> Self {
        self.last_epoch = Some(last_epoch);
        self
    }
}

// =============================================================================
// Scheduler
// =============================================================================

/// Any scheduler the builder can produce.
#[derive(Debug, Clone)]
pub enum Scheduler {
    /// See [`StepLR`].
    Step(StepLR),
    /// See [`MultiStepLR`].
    MultiStep(MultiStepLR),
    /// See [`CosineAnnealingLR`].
    Cosine(CosineAnnealingLR),
    /// See [`WarmupMultiStepLR`].
    WarmupMultiStep(WarmupMultiStepLR),
    /// See [`ExponentialDecayLR`].
    ExponentialDecay(ExponentialDecayLR),
}

impl Scheduler {
    /// Kind of the wrapped scheduler.
    pub fn kind(&self) -> SchedulerKind {
        match self {
            Scheduler::Step(_) => SchedulerKind::SingleStep,
            Scheduler::MultiStep(_) => SchedulerKind::MultiStep,
            Scheduler::Cosine(_) => SchedulerKind::Cosine,
            Scheduler::WarmupMultiStep(_) => SchedulerKind::WarmupMultiStep,
            Scheduler::ExponentialDecay(_) => SchedulerKind::ExponentialDecay,
        }
    }
}

impl LRScheduler for Scheduler {
    fn lr_at(&self, base_lr: f64, epoch: usize) -> f64 {
        match self {
            Scheduler::Step(s) => s.lr_at(base_lr, epoch),
            Scheduler::MultiStep(s) => s.lr_at(base_lr, epoch),
            Scheduler::Cosine(s) => s.lr_at(base_lr, epoch),
            Scheduler::WarmupMultiStep(s) => s.lr_at(base_lr, epoch),
            Scheduler::ExponentialDecay(s) => s.lr_at(base_lr, epoch),
        }
    }

    fn state(&self) -> &ScheduleState {
        match self {
            Scheduler::Step(s) => s.state(),
            Scheduler::MultiStep(s) => s.state(),
            Scheduler::Cosine(s) => s.state(),
            Scheduler::WarmupMultiStep(s) => s.state(),
            Scheduler::ExponentialDecay(s) => s.state(),
        }
    }

    fn state_mut(&mut self) -> &mut ScheduleState {
        match self {
            Scheduler::Step(s) => s.state_mut(),
            Scheduler::MultiStep(s) => s.state_mut(),
            Scheduler::Cosine(s) => s.state_mut(),
            Scheduler::WarmupMultiStep(s) => s.state_mut(),
            Scheduler::ExponentialDecay(s) => s.state_mut(),
        }
    }
}

// =============================================================================
// Builder
// =============================================================================

/// Builds the scheduler described by `options` and attaches it to `optimizer`.
///
/// The returned scheduler has already applied its first epoch to the
/// optimizer's parameter groups.
pub fn build_lr_scheduler<O: Optimizer + ?Sized>(
    optimizer: &mut O,
    options: &SchedulerOptions,
) -> Result<Scheduler> {
    let last_epoch = options.last_epoch;

    let scheduler = match options.kind {
        SchedulerKind::SingleStep => {
            let step_size = options.stepsize.as_single("single_step")?;
            Scheduler::Step(StepLR::with_last_epoch(
                optimizer,
                step_size,
                options.gamma,
                last_epoch,
            )?)
        }
        SchedulerKind::MultiStep => {
            let milestones = options.stepsize.as_list("multi_step")?;
            Scheduler::MultiStep(MultiStepLR::with_last_epoch(
                optimizer,
                milestones,
                options.gamma,
                last_epoch,
            )?)
        }
        SchedulerKind::Cosine => Scheduler::Cosine(CosineAnnealingLR::with_last_epoch(
            optimizer,
            options.max_epoch as f64,
            0.0,
            last_epoch,
        )?),
        SchedulerKind::WarmupMultiStep => {
            let milestones = options.stepsize.as_list("warmup_multi_step")?;
            Scheduler::WarmupMultiStep(WarmupMultiStepLR::with_last_epoch(
                optimizer,
                milestones,
                options.gamma,
                options.warmup_factor,
                options.warmup_epoch,
                options.warmup_method,
                last_epoch,
            )?)
        }
        SchedulerKind::ExponentialDecay => {
            let start = options.stepsize.as_single("exponential_decay")?;
            Scheduler::ExponentialDecay(ExponentialDecayLR::with_last_epoch(
                optimizer,
                options.max_epoch,
                start,
                options.gamma,
                last_epoch,
            )?)
        }
    };

    info!(
        scheduler = %options.kind,
        stepsize = %options.stepsize,
        gamma = options.gamma,
        max_epoch = options.max_epoch,
        "built learning rate scheduler"
    );
    Ok(scheduler)
}

// =============================================================================
// Preview
// =============================================================================

/// Learning rates in effect during one epoch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EpochLr {
    /// Epoch index.
    pub epoch: usize,
    /// Learning rate of each parameter group.
    pub lrs: Vec<f64>,
}

/// Longest schedule [`preview`] will evaluate.
pub const MAX_PREVIEW_EPOCHS: usize = 100_000;

/// Evaluates a schedule for `epochs` epochs against parameter groups starting
/// at `base_lrs`, without touching any real optimizer.
pub fn preview(
    options: &SchedulerOptions,
    base_lrs: &[f64],
    epochs: usize,
) -> Result<Vec<EpochLr>> {
    let groups = base_lrs
        .iter()
        .map(|&lr| ParamGroup::new(Vec::new(), lr))
        .collect();
    preview_optimizer(options, &mut SGD::with_groups(groups), epochs)
}

/// Evaluates a schedule for `epochs` epochs on `optimizer`.
///
/// Groups without an `initial_lr` start from their current `lr`, so a
/// resumed schedule can be previewed on a freshly built optimizer.
pub fn preview_optimizer<O: Optimizer + ?Sized>(
    options: &SchedulerOptions,
    optimizer: &mut O,
    epochs: usize,
) -> Result<Vec<EpochLr>> {
    if epochs > MAX_PREVIEW_EPOCHS {
        return Err(Error::InvalidArgument(format!(
            "cannot preview {epochs} epochs, the limit is {MAX_PREVIEW_EPOCHS}"
        )));
    }
    for group in optimizer.param_groups_mut() {
        if group.initial_lr.is_none() {
            group.initial_lr = Some(group.lr);
        }
    }
    let mut scheduler = build_lr_scheduler(optimizer, options)?;

    let mut rows = Vec::new();
    for i in 0..epochs {
        if i > 0 {
            scheduler.step(optimizer);
        }
        rows.push(EpochLr {
            epoch: scheduler.last_epoch(),
            lrs: optimizer.group_lrs(),
        });
    }
    Ok(rows)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimizer::Parameter;

    fn create_test_optimizer() -> SGD {
        SGD::new(vec![Parameter::new(vec![1.0, 2.0])], 0.1)
    }

    fn lrs(options: &SchedulerOptions, epochs: usize) -> Vec<f64> {
        preview(options, &[0.1], epochs)
            .unwrap()
            .into_iter()
            .map(|row| row.lrs[0])
            .collect()
    }

    #[test]
    fn test_kind_round_trips_through_name() {
        for (kind, name) in SchedulerKind::ALL.iter().zip(AVAILABLE_SCHEDULERS) {
            assert_eq!(kind.as_str(), name);
            assert_eq!(name.parse::<SchedulerKind>().unwrap(), *kind);
        }
    }

    #[test]
    fn test_unknown_scheduler_is_rejected() {
        let err = SchedulerOptions::named("plateau").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unsupported scheduler: plateau. Must be one of [\"single_step\", \"multi_step\", \
             \"cosine\", \"warmup_multi_step\", \"exponential_decay\"]"
        );
    }

    #[test]
    fn test_defaults() {
        let options = SchedulerOptions::default();
        assert_eq!(options.kind, SchedulerKind::SingleStep);
        assert_eq!(options.stepsize, StepSize::Single(1));
        assert!((options.gamma - 0.1).abs() < 1e-12);
        assert_eq!(options.max_epoch, 1);
        assert!((options.warmup_factor - 0.01).abs() < 1e-12);
        assert_eq!(options.warmup_epoch, 10);
        assert_eq!(options.warmup_method, WarmupMethod::Linear);
        assert_eq!(options.last_epoch, None);
    }

    #[test]
    fn test_single_step() {
        let mut optimizer = create_test_optimizer();
        let options = SchedulerOptions::new(SchedulerKind::SingleStep).stepsize(20);
        let mut scheduler = build_lr_scheduler(&mut optimizer, &options).unwrap();

        assert_eq!(scheduler.kind(), SchedulerKind::SingleStep);
        for _ in 0..20 {
            scheduler.step(&mut optimizer);
        }
        assert!((optimizer.get_lr() - 0.01).abs() < 1e-12);
    }

    #[test]
    fn test_single_step_uses_last_list_entry() {
        let options = SchedulerOptions::new(SchedulerKind::SingleStep).stepsize(vec![30, 2]);
        let rates = lrs(&options, 5);
        assert!((rates[1] - 0.1).abs() < 1e-12);
        assert!((rates[2] - 0.01).abs() < 1e-12);
        assert!((rates[4] - 0.001).abs() < 1e-12);
    }

    #[test]
    fn test_single_step_rejects_empty_list() {
        let mut optimizer = create_test_optimizer();
        let options = SchedulerOptions::new(SchedulerKind::SingleStep).stepsize(Vec::new());
        let err = build_lr_scheduler(&mut optimizer, &options).unwrap_err();
        assert!(matches!(err, Error::InvalidStepSize { scheduler: "single_step", .. }));
    }

    #[test]
    fn test_multi_step() {
        let options = SchedulerOptions::new(SchedulerKind::MultiStep)
            .stepsize(vec![2, 4])
            .gamma(0.5);
        let rates = lrs(&options, 6);
        assert_eq!(rates.len(), 6);
        assert!((rates[1] - 0.1).abs() < 1e-12);
        assert!((rates[2] - 0.05).abs() < 1e-12);
        assert!((rates[5] - 0.025).abs() < 1e-12);
    }

    #[test]
    fn test_multi_step_requires_list() {
        let mut optimizer = create_test_optimizer();
        let options = SchedulerOptions::new(SchedulerKind::MultiStep).stepsize(10);
        let err = build_lr_scheduler(&mut optimizer, &options).unwrap_err();
        assert_eq!(
            err.to_string(),
            "For multi_step lr_scheduler, stepsize must be a list, but got an integer"
        );
        // optimizer untouched
        assert_eq!(optimizer.param_groups()[0].initial_lr, None);
    }

    #[test]
    fn test_cosine_uses_max_epoch() {
        let options = SchedulerOptions::new(SchedulerKind::Cosine).max_epoch(4);
        let rates = lrs(&options, 5);
        assert!((rates[0] - 0.1).abs() < 1e-12);
        assert!((rates[2] - 0.05).abs() < 1e-12);
        assert!(rates[4].abs() < 1e-12);
    }

    #[test]
    fn test_cosine_rejects_zero_max_epoch() {
        let mut optimizer = create_test_optimizer();
        let options = SchedulerOptions::new(SchedulerKind::Cosine).max_epoch(0);
        assert!(build_lr_scheduler(&mut optimizer, &options).is_err());
    }

    #[test]
    fn test_warmup_multi_step() {
        let options = SchedulerOptions::new(SchedulerKind::WarmupMultiStep)
            .stepsize(vec![3])
            .warmup_epoch(2)
            .warmup_factor(0.5)
            .warmup_method(WarmupMethod::Constant);
        let rates = lrs(&options, 4);
        assert!((rates[0] - 0.05).abs() < 1e-12);
        assert!((rates[1] - 0.05).abs() < 1e-12);
        assert!((rates[2] - 0.1).abs() < 1e-12);
        assert!((rates[3] - 0.01).abs() < 1e-12);
    }

    #[test]
    fn test_warmup_multi_step_requires_list() {
        let mut optimizer = create_test_optimizer();
        let options = SchedulerOptions::new(SchedulerKind::WarmupMultiStep).stepsize(5);
        let err = build_lr_scheduler(&mut optimizer, &options).unwrap_err();
        assert!(matches!(err, Error::InvalidStepSize { scheduler: "warmup_multi_step", .. }));
    }

    #[test]
    fn test_exponential_decay() {
        let options = SchedulerOptions::new(SchedulerKind::ExponentialDecay)
            .stepsize(vec![5, 2])
            .max_epoch(3)
            .gamma(0.01);
        let rates = lrs(&options, 4);
        assert!((rates[0] - 0.1).abs() < 1e-12);
        assert!((rates[1] - 0.1).abs() < 1e-12);
        assert!((rates[2] - 0.1 * 0.01_f64.sqrt()).abs() < 1e-12);
        assert!((rates[3] - 0.001).abs() < 1e-12);
    }

    #[test]
    fn test_exponential_decay_rejects_start_after_max() {
        let mut optimizer = create_test_optimizer();
        let options = SchedulerOptions::new(SchedulerKind::ExponentialDecay)
            .stepsize(10)
            .max_epoch(5);
        let err = build_lr_scheduler(&mut optimizer, &options).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn test_resume_through_builder() {
        let options = SchedulerOptions::new(SchedulerKind::SingleStep)
            .stepsize(2)
            .last_epoch(3);
        let rows = preview(&options, &[1.0], 2).unwrap();
        assert_eq!(rows[0].epoch, 4);
        assert!((rows[0].lrs[0] - 0.01).abs() < 1e-12);
        assert_eq!(rows[1].epoch, 5);
    }

    #[test]
    fn test_preview_multiple_groups() {
        let options = SchedulerOptions::new(SchedulerKind::SingleStep);
        let rows = preview(&options, &[1.0, 0.5], 2).unwrap();
        assert_eq!(rows[0], EpochLr { epoch: 0, lrs: vec![1.0, 0.5] });
        assert!((rows[1].lrs[0] - 0.1).abs() < 1e-12);
        assert!((rows[1].lrs[1] - 0.05).abs() < 1e-12);
    }

    #[test]
    fn test_preview_zero_epochs() {
        let rows = preview(&SchedulerOptions::default(), &[0.1], 0).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_preview_rejects_too_many_epochs() {
        let err = preview(&SchedulerOptions::default(), &[0.1], usize::MAX).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));

        let rows = preview(&SchedulerOptions::default(), &[0.1], MAX_PREVIEW_EPOCHS).unwrap();
        assert_eq!(rows.len(), MAX_PREVIEW_EPOCHS);
    }

    #[test]
    fn test_preview_exponential_decay_largest_max_epoch() {
        let options = SchedulerOptions::new(SchedulerKind::ExponentialDecay)
            .stepsize(0)
            .max_epoch(usize::MAX);
        let rows = preview(&options, &[0.1], 1).unwrap();
        assert!((rows[0].lrs[0] - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_preview_rejects_last_possible_epoch() {
        let options = SchedulerOptions::default().last_epoch(usize::MAX);
        let err = preview(&options, &[0.1], 1).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn test_preview_optimizer_keeps_recorded_initial_lr() {
        let mut optimizer = SGD::with_groups(vec![
            ParamGroup::new(Vec::new(), 0.01).with_initial_lr(1.0),
            ParamGroup::new(Vec::new(), 0.5),
        ]);
        let options = SchedulerOptions::default().last_epoch(0);
        let rows = preview_optimizer(&options, &mut optimizer, 1).unwrap();

        assert_eq!(rows[0].epoch, 1);
        assert!((rows[0].lrs[0] - 0.1).abs() < 1e-12);
        assert!((rows[0].lrs[1] - 0.05).abs() < 1e-12);
    }

    #[test]
    fn test_step_size_deserialization() {
        #[derive(Deserialize)]
        struct Holder {
            stepsize: StepSize,
        }

        let single: Holder = serde_json::from_str(r#"{"stepsize": 20}"#).unwrap();
        assert_eq!(single.stepsize, StepSize::Single(20));

        let multi: Holder = serde_json::from_str(r#"{"stepsize": [30, 50, 55]}"#).unwrap();
        assert_eq!(multi.stepsize, StepSize::Multi(vec![30, 50, 55]));

        let float = serde_json::from_str::<Holder>(r#"{"stepsize": 2.5}"#);
        let message = float.err().unwrap().to_string();
        assert!(message.contains("a non-negative integer or a list"), "{message}");

        assert!(serde_json::from_str::<Holder>(r#"{"stepsize": -1}"#).is_err());
    }

    #[test]
    fn test_step_size_display() {
        assert_eq!(StepSize::Single(20).to_string(), "20");
        assert_eq!(StepSize::Multi(vec![30, 50]).to_string(), "[30, 50]");
    }
}
