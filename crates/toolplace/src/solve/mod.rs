//! Collision-aware placement optimization.
//!
//! Purpose
//! - Estimate first and second derivatives of a black-box objective over a
//!   2D placement, with finite-difference steps clipped so no probe ever
//!   lands inside world geometry (`deriv`), and drive those estimates
//!   through a damped Newton iteration to search for a tool position
//!   (`newton`).
//!
//! The world enters only through two caller-supplied capabilities: a
//! `PlacementOracle` answering collision queries, and the objective
//! evaluator itself (typically a full simulation run, and the dominant cost
//! per call).

pub mod deriv;
pub mod newton;

pub use deriv::{estimate_derivatives, estimate_gradient, Derivatives, Gradient, PlacementOracle};
pub use newton::{search, SearchCfg, SearchReport, StepDiag};

use thiserror::Error;

/// Failure conditions for the optimization layer.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum SolveError {
    /// A probe direction stayed colliding through the whole halving budget.
    #[error("no collision-free probe step after {0} halvings")]
    NoFeasibleStep(u32),
    /// The symmetrized Hessian estimate could not be inverted.
    #[error("singular hessian estimate; cannot take a newton step")]
    SingularHessian,
}
