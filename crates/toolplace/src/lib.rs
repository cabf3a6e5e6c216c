//! 2D geometry and collision-aware placement search for physics-puzzle worlds.
//!
//! Three subsystems sit around an external rigid-body engine, consumed here
//! only through narrow interfaces:
//! - `geom`: polygon area primitives and capsule-chain buffering of open
//!   polylines into physics-ready quads.
//! - `contact`: consolidation of raw begin/end contact streams into clean,
//!   time-ordered contact intervals (slop-time debouncing).
//! - `solve`: collision-clipped finite differences and a damped Newton search
//!   for placing a tool in the world.
//!
//! The physics world itself never appears in this crate. The `solve` layer
//! sees it only as two capabilities supplied by the caller: a collision
//! oracle (`solve::PlacementOracle`) and a scalar objective evaluator.

pub mod contact;
pub mod geom;
pub mod solve;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use nalgebra::{Matrix2 as Mat2, Vector2 as Vec2};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::contact::{consolidate, BeginTime, ContactEvent, ContactInterval, ContactKind};
    pub use crate::geom::{
        buffer_polyline, capsule_area, centroid, recenter, signed_area, CapsuleQuad, GeomError,
    };
    pub use crate::solve::{
        estimate_derivatives, estimate_gradient, search, Derivatives, Gradient, PlacementOracle,
        SearchCfg, SearchReport, SolveError, StepDiag,
    };
    pub use nalgebra::{Matrix2 as Mat2, Vector2 as Vec2};
}

/// Signed area of the parallelogram spanned by vectors `a` and `b` in R².
/// Positive for a→b counterclockwise, negative otherwise.
#[inline]
pub fn parallelogram_area(a: Vec2<f64>, b: Vec2<f64>) -> f64 {
    a.x * b.y - a.y * b.x
}
