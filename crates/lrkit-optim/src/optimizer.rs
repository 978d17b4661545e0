//! Optimizer Trait - Core Optimizer Interface
//!
//! Defines the trait that all optimizers implement, along with the parameter
//! groups whose learning rates the schedulers adjust.
//!
//! @version 0.1.0
//! @author `AutomataNexus` Development Team

// =============================================================================
// Parameter
// =============================================================================

/// A flat trainable buffer and its gradient.
#[derive(Debug, Clone, Default)]
pub struct Parameter {
    /// Current values.
    pub data: Vec<f32>,
    /// Accumulated gradient, if any.
    pub grad: Option<Vec<f32>>,
}

impl Parameter {
    /// Creates a parameter with no gradient.
    pub fn new(data: Vec<f32>) -> Self {
        Self { data, grad: None }
    }

    /// Number of scalar elements.
    pub fn numel(&self) -> usize {
        self.data.len()
    }

    /// Sets the gradient.
    pub fn set_grad(&mut self, grad: Vec<f32>) {
        self.grad = Some(grad);
    }

    /// Zeros the gradient in place.
    pub fn zero_grad(&mut self) {
        if let Some(grad) = self.grad.as_mut() {
            grad.iter_mut().for_each(|g| *g = 0.0);
        }
    }
}

// =============================================================================
// Parameter Group
// =============================================================================

/// A set of parameters sharing one learning rate.
///
/// `initial_lr` is written by the first scheduler attached to the optimizer
/// and is what later schedulers decay from.
#[derive(Debug, Clone)]
pub struct ParamGroup {
    /// Parameters in this group.
    pub params: Vec<Parameter>,
    /// Learning rate currently in effect.
    pub lr: f64,
    /// Learning rate the schedule started from.
    pub initial_lr: Option<f64>,
}

impl ParamGroup {
    /// Creates a group with the given learning rate.
    pub fn new(params: Vec<Parameter>, lr: f64) -> Self {
        Self {
            params,
            lr,
            initial_lr: None,
        }
    }

    /// Builder method to record an initial learning rate, as when restoring
    /// an optimizer that was already scheduled.
    pub fn with_initial_lr(mut self, initial_lr: f64) -> Self {
        self.initial_lr = Some(initial_lr);
        self
    }
}

// =============================================================================
// Optimizer Trait
// =============================================================================

/// Trait for all optimizers.
///
/// Optimizers update model parameters based on gradients. Learning rates live
/// on the parameter groups so schedulers can adjust them between epochs.
pub trait Optimizer {
    /// Performs a single optimization step.
    ///
    /// Updates all parameters based on their gradients.
    fn step(&mut self);

    /// Zeros all parameter gradients.
    fn zero_grad(&mut self);

    /// Returns the parameter groups.
    fn param_groups(&self) -> &[ParamGroup];

    /// Returns the parameter groups mutably.
    fn param_groups_mut(&mut self) -> &mut [ParamGroup];

    /// Returns the learning rate of the first group.
    fn get_lr(&self) -> f64 {
        self.param_groups().first().map_or(0.0, |g| g.lr)
    }

    /// Sets the learning rate of every group.
    fn set_lr(&mut self, lr: f64) {
        for group in self.param_groups_mut() {
            group.lr = lr;
        }
    }

    /// Returns the learning rate of every group.
    fn group_lrs(&self) -> Vec<f64> {
        self.param_groups().iter().map(|g| g.lr).collect()
    }

    /// Returns the number of parameters.
    fn num_parameters(&self) -> usize {
        self.param_groups().iter().map(|g| g.params.len()).sum()
    }
}

// =============================================================================
// Parameter State
// =============================================================================

/// State associated with a parameter during optimization.
#[derive(Debug, Clone, Default)]
pub struct ParamState {
    /// Momentum buffer, allocated on the first step that uses momentum.
    pub momentum_buffer: Option<Vec<f32>>,
}

impl ParamState {
    /// Creates a new empty parameter state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

// =============================================================================
// Tests
// =============================================================================
