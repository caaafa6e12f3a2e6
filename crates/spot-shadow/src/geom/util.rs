use std::cmp::Ordering;

use super::types::Point2;
use crate::cfg::EPSILON;

#[inline]
fn perp(a: Point2, b: Point2) -> f64 {
    a.x * b.y - a.y * b.x
}

/// Arithmetic mean of the vertices (origin for an empty slice).
pub fn centroid(poly: &[Point2]) -> Point2 {
    if poly.is_empty() {
        return Point2::zeros();
    }
    let sum = poly.iter().fold(Point2::zeros(), |acc, p| acc + p);
    sum / poly.len() as f64
}

/// Signed area (shoelace). Positive for counterclockwise order.
pub fn signed_area(poly: &[Point2]) -> f64 {
    let n = poly.len();
    if n < 3 {
        return 0.0;
    }
    let mut twice = 0.0;
    for i in 0..n {
        twice += perp(poly[i], poly[(i + 1) % n]);
    }
    0.5 * twice
}

#[inline]
pub fn is_clockwise(poly: &[Point2]) -> bool {
    signed_area(poly) < 0.0
}

/// Reverse in place unless already clockwise. Zero-area input is left alone.
pub fn make_clockwise(poly: &mut [Point2]) {
    if signed_area(poly) > 0.0 {
        poly.reverse();
    }
}

/// Polar angle of `point` around `center`, in (-π, π].
#[inline]
pub fn angle(point: Point2, center: Point2) -> f64 {
    let d = point - center;
    d.y.atan2(d.x)
}

/// Sort vertices clockwise around `center` (decreasing polar angle).
///
/// Equal angles keep the point closer to `center` first, so the order is
/// fully determined by the input set.
pub fn sort_clockwise(poly: &mut [Point2], center: Point2) {
    poly.sort_by(|a, b| {
        let (aa, ab) = (angle(*a, center), angle(*b, center));
        match ab.partial_cmp(&aa).unwrap_or(Ordering::Equal) {
            Ordering::Equal => {
                let (da, db) = ((a - center).norm_squared(), (b - center).norm_squared());
                da.partial_cmp(&db).unwrap_or(Ordering::Equal)
            }
            o => o,
        }
    });
}

/// True if `a → b → c` bends clockwise by more than `EPSILON`.
///
/// Near-collinear triples are not turns; both the hull and the clipper rely on
/// that to drop floating-point slivers.
#[inline]
pub fn right_turn(a: Point2, b: Point2, c: Point2) -> bool {
    perp(b - a, c - b) < -EPSILON
}

/// Parameters `(t, u)` of the crossing `p1 + t (p2 − p1) = p3 + u (p4 − p3)`,
/// or `None` for (near-)parallel lines.
#[inline]
fn crossing_params(p1: Point2, p2: Point2, p3: Point2, p4: Point2) -> Option<(f64, f64)> {
    let d1 = p2 - p1;
    let d2 = p4 - p3;
    let denom = perp(d1, d2);
    if !denom.is_finite() || denom.abs() < EPSILON {
        return None;
    }
    let w = p3 - p1;
    Some((perp(w, d2) / denom, perp(w, d1) / denom))
}

#[inline]
fn within_unit(t: f64) -> bool {
    (-EPSILON..=1.0 + EPSILON).contains(&t)
}

/// Intersection of segments `p1p2` and `p3p4`.
///
/// Returns `None` for parallel segments or when the crossing of the supporting
/// lines falls outside either segment. Never extrapolates.
pub fn segment_intersection(p1: Point2, p2: Point2, p3: Point2, p4: Point2) -> Option<Point2> {
    let (t, u) = crossing_params(p1, p2, p3, p4)?;
    if within_unit(t) && within_unit(u) {
        Some(p1 + (p2 - p1) * t)
    } else {
        None
    }
}

/// Crossing of the infinite line through `a, b` with segment `s e`.
pub fn line_segment_intersection(a: Point2, b: Point2, s: Point2, e: Point2) -> Option<Point2> {
    let (_, u) = crossing_params(a, b, s, e)?;
    within_unit(u).then(|| s + (e - s) * u)
}

/// Even-odd ray-crossing test; the polygon is closed implicitly.
pub fn point_in_polygon(point: Point2, poly: &[Point2]) -> bool {
    let n = poly.len();
    if n < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let (pi, pj) = (poly[i], poly[j]);
        if (pi.y > point.y) != (pj.y > point.y) {
            let x = (pj.x - pi.x) * (point.y - pi.y) / (pj.y - pi.y) + pi.x;
            if point.x < x {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Distance from `origin` along unit direction `dir` to the boundary of `poly`.
///
/// The ray is clipped to a segment that certainly leaves the polygon; the
/// farthest edge crossing wins. `None` if the ray misses every edge.
pub fn ray_intersect_polygon(poly: &[Point2], origin: Point2, dir: Point2) -> Option<f64> {
    if poly.len() < 2 {
        return None;
    }
    let reach = poly
        .iter()
        .map(|p| (p - origin).norm())
        .fold(0.0, f64::max)
        * 2.0
        + 1.0;
    let far = origin + dir * reach;
    let n = poly.len();
    let mut best: Option<f64> = None;
    for i in 0..n {
        let (a, b) = (poly[i], poly[(i + 1) % n]);
        if let Some(hit) = segment_intersection(origin, far, a, b) {
            let d = (hit - origin).norm();
            best = Some(best.map_or(d, |cur| cur.max(d)));
        }
    }
    best
}
