//! 2D polygon primitives and capsule-chain buffering.
//!
//! Purpose
//! - Provide the small set of polygon scalars (signed area, centroid,
//!   recentering) that world/analysis code needs, plus `buffer_polyline`,
//!   which thickens an open polyline into a chain of quads suitable for
//!   physics-shape construction.
//!
//! Conventions
//! - All polygons are ordered vertex lists; `signed_area` is positive for
//!   counter-clockwise winding (standard shoelace orientation).
//! - Buffered chains are emitted so that every quad is counter-clockwise,
//!   which downstream shape builders rely on.

pub mod area;
pub mod buffer;

pub use area::{capsule_area, centroid, polygon_is_convex, recenter, signed_area, GeomError};
pub use buffer::{buffer_polyline, CapsuleQuad};
