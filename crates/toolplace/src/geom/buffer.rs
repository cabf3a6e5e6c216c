//! Capsule-chain buffering of open polylines.
//!
//! Model
//! - The first and last segment get flat, axis-aligned caps: the segment's
//!   approach angle falls into one of four 90°-wide bins around the cardinal
//!   directions, and each bin fixes the perpendicular offset pair.
//! - Interior joints use an angle-bisector miter: the bisector of the
//!   incoming and outgoing segment angles is re-derived as a unit vector and
//!   its per-axis signs quantize the corner offset to (±r, ±r). This is an
//!   axis-aligned approximation of a true miter; it avoids a line
//!   intersection and accepts minor drift at extreme turn angles.
//! - After each joint, the two candidate corners are orientation-checked
//!   against the previous quad's trailing edge and swapped if needed, so the
//!   whole chain stays counter-clockwise under `signed_area`.

use nalgebra::Vector2;

use super::area::GeomError;
use crate::parallelogram_area;

/// One buffered segment of the chain, vertices in counter-clockwise
/// boundary order `(prev1, prev2, next3, next4)`. Adjacent quads share a
/// joint edge traversed in opposite directions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CapsuleQuad(pub [Vector2<f64>; 4]);

impl CapsuleQuad {
    /// Shoelace area of the quad; non-negative for well-formed chains.
    pub fn signed_area(&self) -> f64 {
        let mut area = 0.0;
        for i in 0..4 {
            area += parallelogram_area(self.0[i], self.0[(i + 1) % 4]);
        }
        area / 2.0
    }
}

/// Half-plane test: is `test` strictly left of the directed line `spt → ept`?
#[inline]
fn is_left(spt: Vector2<f64>, ept: Vector2<f64>, test: Vector2<f64>) -> bool {
    parallelogram_area(ept - spt, test - spt) > 0.0
}

/// Flat-cap offset pair for a segment angle, bucketed into four cardinal
/// bins. Returns `(left, right)` offsets relative to the travel direction,
/// ordered for counter-clockwise winding.
fn cap_offsets(ang: f64, r: f64) -> (Vector2<f64>, Vector2<f64>) {
    use std::f64::consts::FRAC_PI_4;
    let left = if (-3.0 * FRAC_PI_4..=-FRAC_PI_4).contains(&ang) {
        // Traveling downward.
        Vector2::new(r, 0.0)
    } else if (FRAC_PI_4..=3.0 * FRAC_PI_4).contains(&ang) {
        // Traveling upward.
        Vector2::new(-r, 0.0)
    } else if (-FRAC_PI_4..=FRAC_PI_4).contains(&ang) {
        // Traveling rightward.
        Vector2::new(0.0, r)
    } else {
        // Traveling leftward.
        Vector2::new(0.0, -r)
    };
    (left, -left)
}

/// Buffer an open polyline by `radius` into a chain of quads, one per
/// consecutive point pair (N points → N−1 quads).
///
/// Caps are flat and axis-aligned; interior joints are mitered as described
/// in the module docs. Self-intersecting input produces geometrically
/// invalid quads but does not fail; only precondition violations error.
pub fn buffer_polyline(
    points: &[Vector2<f64>],
    radius: f64,
) -> Result<Vec<CapsuleQuad>, GeomError> {
    use std::f64::consts::TAU;
    if points.len() < 2 {
        return Err(GeomError::TooFewPoints(points.len()));
    }
    if radius <= 0.0 {
        return Err(GeomError::NonPositiveRadius(radius));
    }

    // Start cap from the first segment's travel angle.
    let iseg = points[1] - points[0];
    let (o1, o2) = cap_offsets(iseg.y.atan2(iseg.x), radius);
    let mut prev1 = points[0] + o1;
    let mut prev2 = points[0] + o2;

    let mut quads = Vec::with_capacity(points.len() - 1);
    for i in 1..points.len() - 1 {
        let pt = points[i];
        let sm = points[i - 1] - pt;
        let sp = points[i + 1] - pt;
        let angm = sm.y.atan2(sm.x);
        let angp = sp.y.atan2(sp.x);
        // Bisect the joint angle and re-derive a unit direction.
        let angi = (angm - angp).rem_euclid(TAU);
        let angn = (angp + angi / 2.0).rem_euclid(TAU);
        let unit = Vector2::new(angn.cos(), angn.sin());
        let xdiff = if unit.x >= 0.0 { radius } else { -radius };
        let ydiff = if unit.y >= 0.0 { radius } else { -radius };
        let mut next3 = pt + Vector2::new(xdiff, ydiff);
        let mut next4 = pt - Vector2::new(xdiff, ydiff);
        // Keep the chain counter-clockwise: next4 must lie left of the
        // directed edge prev2 → next3.
        if !is_left(prev2, next3, next4) {
            std::mem::swap(&mut next3, &mut next4);
        }
        quads.push(CapsuleQuad([prev1, prev2, next3, next4]));
        prev1 = next4;
        prev2 = next3;
    }

    // End cap from the reversed final segment's angle.
    let fpt = points[points.len() - 1];
    let fseg = points[points.len() - 2] - fpt;
    let (o1, o2) = cap_offsets(fseg.y.atan2(fseg.x), radius);
    quads.push(CapsuleQuad([prev1, prev2, fpt + o1, fpt + o2]));
    Ok(quads)
}
