//! Damped Newton search over a 2D placement.
//!
//! Each iteration averages one or more derivative estimates at the current
//! position, symmetrizes the Hessian, and subtracts `H⁻¹ · ∇f`. There is no
//! explicit line search or step clipping beyond the collision clipping the
//! derivative engine already applies, and no convergence test: the search
//! runs for exactly `max_steps` iterations. Callers needing bounded
//! wall-clock time size `max_steps` accordingly.

use nalgebra::{Matrix2, Vector2};
use tracing::debug;

use super::deriv::{estimate_derivatives, PlacementOracle};
use super::SolveError;

/// Search configuration.
#[derive(Clone, Copy, Debug)]
pub struct SearchCfg {
    /// Nominal finite-difference step along x.
    pub h: f64,
    /// Nominal finite-difference step along y.
    pub k: f64,
    /// Derivative estimates averaged per iteration; more than one is only
    /// useful when the objective is stochastic (e.g. a noisy simulation).
    pub samples_per_step: usize,
    /// Fixed iteration budget.
    pub max_steps: usize,
}

impl Default for SearchCfg {
    fn default() -> Self {
        Self {
            h: 1.0,
            k: 1.0,
            samples_per_step: 1,
            max_steps: 5,
        }
    }
}

/// Per-iteration diagnostics.
#[derive(Clone, Copy, Debug)]
pub struct StepDiag {
    /// Position after this iteration's update.
    pub position: Vector2<f64>,
    /// Objective value at that position.
    pub value: f64,
    /// Averaged gradient used for the update.
    pub grad: Vector2<f64>,
    /// Averaged effective finite-difference steps.
    pub step: Vector2<f64>,
}

/// Search outcome.
#[derive(Clone, Debug)]
pub struct SearchReport {
    pub position: Vector2<f64>,
    /// Objective value at the final position.
    pub value: f64,
    /// `start − final` position.
    pub displacement: Vector2<f64>,
    pub steps: Vec<StepDiag>,
}

/// Run the damped Newton iteration from `start`, where `f_start` is the
/// caller's objective value at the start position.
///
/// Fails with `SingularHessian` when the symmetrized Hessian estimate
/// cannot be inverted, and propagates `NoFeasibleStep` from the derivative
/// engine when collision geometry leaves no usable probe step.
pub fn search<F, O>(
    func: &mut F,
    start: Vector2<f64>,
    f_start: f64,
    oracle: &O,
    cfg: SearchCfg,
) -> Result<SearchReport, SolveError>
where
    F: FnMut(f64, f64) -> f64,
    O: PlacementOracle,
{
    let mut pos = start;
    let mut value = f_start;
    let mut steps = Vec::with_capacity(cfg.max_steps);
    let samples = cfg.samples_per_step.max(1);

    for iter in 0..cfg.max_steps {
        let mut grad = Vector2::zeros();
        let mut hess = Matrix2::zeros();
        let mut step = Vector2::zeros();
        for _ in 0..samples {
            let d = estimate_derivatives(func, value, pos, cfg.h, cfg.k, oracle)?;
            grad += d.grad;
            hess += d.hess;
            step += d.step;
        }
        let n = samples as f64;
        grad /= n;
        hess /= n;
        step /= n;

        let sym = (hess + hess.transpose()) * 0.5;
        let inv = sym.try_inverse().ok_or(SolveError::SingularHessian)?;
        pos -= inv * grad;
        value = func(pos.x, pos.y);
        debug!(
            iter,
            x = pos.x,
            y = pos.y,
            value,
            grad_norm = grad.norm(),
            "newton step"
        );
        steps.push(StepDiag {
            position: pos,
            value,
            grad,
            step,
        });
    }

    Ok(SearchReport {
        position: pos,
        value,
        displacement: start - pos,
        steps,
    })
}
