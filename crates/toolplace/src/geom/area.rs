//! Polygon scalars: signed area, centroid, recentering, convexity.
//!
//! Pure functions over ordered vertex lists. Invalid inputs (too few
//! vertices, degenerate zero-area polygons) fail fast with `GeomError`
//! rather than returning partial results.

use nalgebra::Vector2;
use thiserror::Error;

use crate::parallelogram_area;

/// Threshold below which the summed cross terms count as zero area.
pub(crate) const AREA_EPS: f64 = 1e-18;

/// Invalid-input conditions for the geometry layer.
#[derive(Clone, Copy, Debug, Error, PartialEq)]
pub enum GeomError {
    #[error("polygon needs at least 3 vertices, got {0}")]
    TooFewVertices(usize),
    #[error("polyline needs at least 2 points, got {0}")]
    TooFewPoints(usize),
    #[error("buffer radius must be positive, got {0}")]
    NonPositiveRadius(f64),
    #[error("degenerate polygon: signed area is zero")]
    DegeneratePolygon,
}

/// Shoelace signed area of a simple polygon.
/// Positive for counter-clockwise vertex order.
pub fn signed_area(verts: &[Vector2<f64>]) -> Result<f64, GeomError> {
    if verts.len() < 3 {
        return Err(GeomError::TooFewVertices(verts.len()));
    }
    let mut area = 0.0;
    for i in 0..verts.len() {
        let v1 = verts[i];
        let v2 = verts[(i + 1) % verts.len()];
        area += parallelogram_area(v1, v2);
    }
    Ok(area / 2.0)
}

/// Area-weighted centroid via the same cross summation as `signed_area`.
/// Fails with `DegeneratePolygon` when the total signed area vanishes
/// (collinear input).
pub fn centroid(verts: &[Vector2<f64>]) -> Result<Vector2<f64>, GeomError> {
    if verts.len() < 3 {
        return Err(GeomError::TooFewVertices(verts.len()));
    }
    let mut tsum = 0.0;
    let mut vsum = Vector2::zeros();
    for i in 0..verts.len() {
        let v1 = verts[i];
        let v2 = verts[(i + 1) % verts.len()];
        let cross = parallelogram_area(v1, v2);
        tsum += cross;
        vsum += (v1 + v2) * cross;
    }
    if tsum.abs() < AREA_EPS {
        return Err(GeomError::DegeneratePolygon);
    }
    Ok(vsum / (3.0 * tsum))
}

/// Translate every vertex by the negative centroid, so the recentered
/// polygon's centroid sits at the origin.
pub fn recenter(verts: &[Vector2<f64>]) -> Result<Vec<Vector2<f64>>, GeomError> {
    let c = centroid(verts)?;
    Ok(verts.iter().map(|v| v - c).collect())
}

/// Area of one stadium-shaped buffered segment: `r (πr + 2|ab|)`.
pub fn capsule_area(a: Vector2<f64>, b: Vector2<f64>, r: f64) -> Result<f64, GeomError> {
    if r <= 0.0 {
        return Err(GeomError::NonPositiveRadius(r));
    }
    Ok(r * (std::f64::consts::PI * r + 2.0 * (b - a).norm()))
}

/// Whether every consecutive turn of the polygon has a consistent sign
/// (zero-cross turns are compatible with either winding).
pub fn polygon_is_convex(verts: &[Vector2<f64>]) -> Result<bool, GeomError> {
    if verts.len() < 3 {
        return Err(GeomError::TooFewVertices(verts.len()));
    }
    let n = verts.len();
    let mut sign = 0.0f64;
    for i in 0..n {
        let a = verts[i];
        let b = verts[(i + 1) % n];
        let c = verts[(i + 2) % n];
        let cross = parallelogram_area(b - a, c - b);
        if cross == 0.0 {
            continue;
        }
        if sign == 0.0 {
            sign = cross.signum();
        } else if cross.signum() != sign {
            return Ok(false);
        }
    }
    Ok(true)
}
