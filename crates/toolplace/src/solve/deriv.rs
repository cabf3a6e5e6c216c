//! Finite differences with collision-clipped, per-direction step sizes.
//!
//! Model
//! - Each probe direction independently halves its step until the candidate
//!   placement is collision-free, so the forward and backward steps around a
//!   point may end up unequal. First partials average the forward and
//!   backward difference quotients over their own effective steps, a
//!   deliberate compromise when geometry crowds one side.
//! - Second partials add two diagonal probes (+h,+k) and (−h,−k), each
//!   clipped as well; the five-point estimates use the effective step sizes
//!   recomputed at those diagonal probes, not the original axis steps.
//! - The objective is never evaluated at a position the oracle reports as
//!   colliding.

use nalgebra::{Matrix2, Vector2};
use tracing::trace;

use super::SolveError;

/// Collision predicate for a hypothetical placement of the moved object.
/// The object's identity is bound into the oracle by the caller, keeping
/// this layer decoupled from any specific world representation.
pub trait PlacementOracle {
    fn collides(&self, pos: Vector2<f64>) -> bool;
}

impl<F> PlacementOracle for F
where
    F: Fn(Vector2<f64>) -> bool,
{
    #[inline]
    fn collides(&self, pos: Vector2<f64>) -> bool {
        self(pos)
    }
}

/// Halving budget per probe direction before the step is declared
/// infeasible. 48 halvings shrink a unit step below 1e-14, well past any
/// usable magnitude.
pub const MAX_HALVINGS: u32 = 48;

/// Gradient estimate with the effective steps actually used.
#[derive(Clone, Copy, Debug)]
pub struct Gradient {
    pub grad: Vector2<f64>,
    /// Effective (h, k) after collision clipping, averaged per axis.
    pub step: Vector2<f64>,
}

/// Gradient and Hessian estimate with the effective steps actually used.
#[derive(Clone, Copy, Debug)]
pub struct Derivatives {
    pub grad: Vector2<f64>,
    /// Symmetric five-point Hessian estimate.
    pub hess: Matrix2<f64>,
    /// Effective (h, k) recomputed at the diagonal probes.
    pub step: Vector2<f64>,
}

/// Halve `step` until `pos + step` is collision-free. Returns the probe
/// position and the effective step, or `NoFeasibleStep` once the budget is
/// exhausted.
fn clip_step<O: PlacementOracle>(
    oracle: &O,
    pos: Vector2<f64>,
    mut step: Vector2<f64>,
) -> Result<(Vector2<f64>, Vector2<f64>), SolveError> {
    for halvings in 0..=MAX_HALVINGS {
        let candidate = pos + step;
        if !oracle.collides(candidate) {
            if halvings > 0 {
                trace!(sx = step.x, sy = step.y, halvings, "probe step clipped");
            }
            return Ok((candidate, step));
        }
        step /= 2.0;
    }
    Err(SolveError::NoFeasibleStep(MAX_HALVINGS))
}

/// Axis-probe evaluations shared by the gradient and Hessian estimators.
struct AxisProbes {
    f_xph: f64,
    f_xmh: f64,
    f_ypk: f64,
    f_ymk: f64,
    /// Signed effective steps: +x, −x, +y, −y.
    spx: f64,
    smx: f64,
    spy: f64,
    smy: f64,
    grad: Vector2<f64>,
}

fn probe_axes<F, O>(
    func: &mut F,
    f_center: f64,
    pos: Vector2<f64>,
    h: f64,
    k: f64,
    oracle: &O,
) -> Result<AxisProbes, SolveError>
where
    F: FnMut(f64, f64) -> f64,
    O: PlacementOracle,
{
    let (p_xph, s_xp) = clip_step(oracle, pos, Vector2::new(h, 0.0))?;
    let (p_xmh, s_xm) = clip_step(oracle, pos, Vector2::new(-h, 0.0))?;
    let (p_ypk, s_yp) = clip_step(oracle, pos, Vector2::new(0.0, k))?;
    let (p_ymk, s_ym) = clip_step(oracle, pos, Vector2::new(0.0, -k))?;

    let f_xph = func(p_xph.x, p_xph.y);
    let f_xmh = func(p_xmh.x, p_xmh.y);
    let f_ypk = func(p_ypk.x, p_ypk.y);
    let f_ymk = func(p_ymk.x, p_ymk.y);

    let (spx, smx) = (s_xp.x, s_xm.x);
    let (spy, smy) = (s_yp.y, s_ym.y);
    // Average of the forward and backward quotients, each over its own
    // effective step (smx and smy are negative).
    let df_dx = ((f_xph - f_center) / spx + (f_xmh - f_center) / smx) / 2.0;
    let df_dy = ((f_ypk - f_center) / spy + (f_ymk - f_center) / smy) / 2.0;

    Ok(AxisProbes {
        f_xph,
        f_xmh,
        f_ypk,
        f_ymk,
        spx,
        smx,
        spy,
        smy,
        grad: Vector2::new(df_dx, df_dy),
    })
}

/// First partials of `func` around `pos` via four collision-clipped axis
/// probes. `f_center` is the caller's already-computed value at `pos`; the
/// engine never re-evaluates the center.
pub fn estimate_gradient<F, O>(
    func: &mut F,
    f_center: f64,
    pos: Vector2<f64>,
    h: f64,
    k: f64,
    oracle: &O,
) -> Result<Gradient, SolveError>
where
    F: FnMut(f64, f64) -> f64,
    O: PlacementOracle,
{
    let p = probe_axes(func, f_center, pos, h, k, oracle)?;
    let step = Vector2::new((p.spx - p.smx) / 2.0, (p.spy - p.smy) / 2.0);
    Ok(Gradient { grad: p.grad, step })
}

/// Gradient plus five-point Hessian of `func` around `pos`. Two additional
/// diagonal probes supply the second differences; their recomputed effective
/// steps feed every second-derivative denominator.
pub fn estimate_derivatives<F, O>(
    func: &mut F,
    f_center: f64,
    pos: Vector2<f64>,
    h: f64,
    k: f64,
    oracle: &O,
) -> Result<Derivatives, SolveError>
where
    F: FnMut(f64, f64) -> f64,
    O: PlacementOracle,
{
    let p = probe_axes(func, f_center, pos, h, k, oracle)?;
    let eff_h = (p.spx - p.smx) / 2.0;
    let eff_k = (p.spy - p.smy) / 2.0;

    let (p_pp, s_pp) = clip_step(oracle, pos, Vector2::new(eff_h, eff_k))?;
    let (p_mm, s_mm) = clip_step(oracle, pos, Vector2::new(-eff_h, -eff_k))?;
    let f_pp = func(p_pp.x, p_pp.y);
    let f_mm = func(p_mm.x, p_mm.y);

    let hd = (s_pp.x - s_mm.x) / 2.0;
    let kd = (s_pp.y - s_mm.y) / 2.0;
    let f_xx = (p.f_xph - 2.0 * f_center + p.f_xmh) / (hd * hd);
    let f_yy = (p.f_ypk - 2.0 * f_center + p.f_ymk) / (kd * kd);
    let f_xy = (f_pp - p.f_xph - p.f_ypk + 2.0 * f_center - p.f_xmh - p.f_ymk + f_mm)
        / (2.0 * hd * kd);

    Ok(Derivatives {
        grad: p.grad,
        hess: Matrix2::new(f_xx, f_xy, f_xy, f_yy),
        step: Vector2::new(hd, kd),
    })
}
