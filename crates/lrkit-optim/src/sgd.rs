//! SGD Optimizer - Stochastic Gradient Descent
//!
//! Implements SGD with optional momentum and Nesterov acceleration over
//! parameter groups, each with its own learning rate.
//!
//! @version 0.1.0
//! @author `AutomataNexus` Development Team

use crate::optimizer::{Optimizer, ParamGroup, ParamState, Parameter};

// =============================================================================
// SGD
// =============================================================================

/// Stochastic Gradient Descent optimizer.
///
/// Update rule (with momentum):
/// ```text
/// v_t = momentum * v_{t-1} + (1 - dampening) * grad
/// param = param - lr * v_t
/// ```
///
/// Update rule (with Nesterov):
/// ```text
/// param = param - lr * (momentum * v_t + grad)
/// ```
#[derive(Debug)]
pub struct SGD {
    /// Parameter groups to optimize.
    groups: Vec<ParamGroup>,
    /// Momentum factor.
    momentum: f32,
    /// Weight decay (L2 regularization).
    weight_decay: f32,
    /// Whether to use Nesterov momentum.
    nesterov: bool,
    /// Dampening factor for momentum.
    dampening: f32,
    /// Per-parameter state, indexed `[group][param]`.
    state: Vec<Vec<ParamState>>,
}

impl SGD {
    /// Creates SGD over a single parameter group.
    #[must_use]
    pub fn new(params: Vec<Parameter>, lr: f64) -> Self {
        Self::with_groups(vec![ParamGroup::new(params, lr)])
    }

    /// Creates SGD over several parameter groups.
    #[must_use]
    pub fn with_groups(groups: Vec<ParamGroup>) -> Self {
        let state = groups
            .iter()
            .map(|g| vec![ParamState::new(); g.params.len()])
            .collect();
        Self {
            groups,
            momentum: 0.0,
            weight_decay: 0.0,
            nesterov: false,
            dampening: 0.0,
            state,
        }
    }

    /// Builder method to set momentum.
    #[must_use]
    pub fn momentum(mut self, momentum: f32) -> Self {
        self.momentum = momentum;
        self
    }

    /// Builder method to set weight decay.
    #[must_use]
    pub fn weight_decay(mut self, weight_decay: f32) -> Self {
        self.weight_decay = weight_decay;
        self
    }

    /// Builder method to enable Nesterov momentum.
    #[must_use]
    pub fn nesterov(mut self, nesterov: bool) -> Self {
        self.nesterov = nesterov;
        self
    }

    /// Builder method to set dampening.
    #[must_use]
    pub fn dampening(mut self, dampening: f32) -> Self {
        self.dampening = dampening;
        self
    }
}

impl Optimizer for SGD {
    fn step(&mut self) {
        for (group, group_state) in self.groups.iter_mut().zip(self.state.iter_mut()) {
            let lr = group.lr as f32;

            for (param, state) in group.params.iter_mut().zip(group_state.iter_mut()) {
                let Some(grad) = param.grad.as_ref() else {
                    continue;
                };
                let mut grad_vec = grad.clone();

                if self.weight_decay != 0.0 {
                    for (g, p) in grad_vec.iter_mut().zip(param.data.iter()) {
                        *g += self.weight_decay * p;
                    }
                }

                if self.momentum != 0.0 {
                    // First iteration: the buffer starts as the gradient
                    let first = state.momentum_buffer.is_none();
                    let buf = state
                        .momentum_buffer
                        .get_or_insert_with(|| grad_vec.clone());
                    if !first {
                        for (b, g) in buf.iter_mut().zip(grad_vec.iter()) {
                            *b = self.momentum * *b + (1.0 - self.dampening) * *g;
                        }
                    }

                    if self.nesterov {
                        for (g, b) in grad_vec.iter_mut().zip(buf.iter()) {
                            *g += self.momentum * *b;
                        }
                    } else {
                        grad_vec.copy_from_slice(buf);
                    }
                }

                for (p, g) in param.data.iter_mut().zip(grad_vec.iter()) {
                    *p -= lr * g;
                }
            }
        }
    }

    fn zero_grad(&mut self) {
        for group in &mut self.groups {
            for param in &mut group.params {
                param.zero_grad();
            }
        }
    }

    fn param_groups(&self) -> &[ParamGroup] {
        &self.groups
    }

    fn param_groups_mut(&mut self) -> &mut [ParamGroup] {
        &mut self.groups
    }
}

// =============================================================================
// Tests
// =============================================================================
