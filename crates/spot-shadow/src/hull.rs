//! Convex hull builder (Andrew's monotone chain, clockwise output).
//!
//! Contract
//! - Output is a clockwise simple polygon starting at the lowest-x (then
//!   lowest-y) input point.
//! - Collinear and near-collinear boundary points are dropped (`geom::right_turn`
//!   treats |cross| < `EPSILON` as no turn).
//! - Degenerate input (≤2 distinct points, or all collinear) yields ≤2 points;
//!   callers treat that as "no area".
//! - Identical input sets give identical hulls regardless of input order.

use std::cmp::Ordering;

use crate::geom::{right_turn, Point2};

fn x_then_y(a: &Point2, b: &Point2) -> Ordering {
    match a.x.partial_cmp(&b.x).unwrap_or(Ordering::Equal) {
        Ordering::Equal => a.y.partial_cmp(&b.y).unwrap_or(Ordering::Equal),
        o => o,
    }
}

fn push_chain<'a>(chain: &mut Vec<Point2>, pts: impl Iterator<Item = &'a Point2>) {
    for p in pts {
        while chain.len() >= 2 && !right_turn(chain[chain.len() - 2], chain[chain.len() - 1], *p) {
            chain.pop();
        }
        chain.push(*p);
    }
}

/// Convex hull of an arbitrary point set, clockwise.
pub fn convex_hull(points: &[Point2]) -> Vec<Point2> {
    let mut pts: Vec<Point2> = points
        .iter()
        .copied()
        .filter(|p| p.x.is_finite() && p.y.is_finite())
        .collect();
    pts.sort_by(x_then_y);
    pts.dedup_by(|a, b| (*a - *b).norm() < 1e-12);
    if pts.len() < 3 {
        return pts;
    }
    // Upper chain left→right and lower chain right→left both bend clockwise.
    let mut upper: Vec<Point2> = Vec::with_capacity(pts.len());
    push_chain(&mut upper, pts.iter());
    let mut lower: Vec<Point2> = Vec::with_capacity(pts.len());
    push_chain(&mut lower, pts.iter().rev());
    upper.pop();
    lower.pop();
    let mut hull = upper;
    hull.extend(lower);
    hull
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::{is_clockwise, point_in_polygon};
    use nalgebra::vector;
    use proptest::prelude::*;

    /// `p` lies inside or on the clockwise convex polygon `hull`.
    fn contains_eps(hull: &[Point2], p: Point2, eps: f64) -> bool {
        let n = hull.len();
        (0..n).all(|i| {
            let a = hull[i];
            let b = hull[(i + 1) % n];
            let e = b - a;
            let w = p - a;
            e.x * w.y - e.y * w.x <= eps
        })
    }

    #[test]
    fn square_with_interior_and_edge_points() {
        let pts = vec![
            vector![0.0, 0.0],
            vector![0.5, 0.5],
            vector![1.0, 1.0],
            vector![0.5, 0.0],
            vector![1.0, 0.0],
            vector![0.0, 1.0],
        ];
        let h = convex_hull(&pts);
        assert_eq!(
            h,
            vec![
                vector![0.0, 0.0],
                vector![0.0, 1.0],
                vector![1.0, 1.0],
                vector![1.0, 0.0],
            ]
        );
        assert!(is_clockwise(&h));
        assert!(point_in_polygon(vector![0.5, 0.5], &h));
    }

    #[test]
    fn degenerate_inputs_have_no_area() {
        assert!(convex_hull(&[]).is_empty());
        assert_eq!(convex_hull(&[vector![1.0, 2.0]]).len(), 1);
        let dup = vec![vector![1.0, 1.0], vector![1.0, 1.0], vector![1.0, 1.0]];
        assert_eq!(convex_hull(&dup).len(), 1);
        let line: Vec<Point2> = (0..6).map(|i| vector![i as f64, 2.0 * i as f64]).collect();
        let h = convex_hull(&line);
        assert_eq!(h, vec![vector![0.0, 0.0], vector![5.0, 10.0]]);
    }

    #[test]
    fn input_order_does_not_matter() {
        let pts = vec![
            vector![3.0, 1.0],
            vector![-2.0, 0.5],
            vector![0.0, 4.0],
            vector![1.0, -3.0],
            vector![0.2, 0.1],
        ];
        let mut rev = pts.clone();
        rev.reverse();
        assert_eq!(convex_hull(&pts), convex_hull(&rev));
    }

    proptest! {
        #[test]
        fn hull_contains_all_points(
            raw in prop::collection::vec((-100.0f64..100.0, -100.0f64..100.0), 3..40)
        ) {
            let pts: Vec<Point2> = raw.iter().map(|&(x, y)| vector![x, y]).collect();
            let h = convex_hull(&pts);
            prop_assume!(h.len() >= 3);
            prop_assert!(is_clockwise(&h));
            for p in &pts {
                prop_assert!(contains_eps(&h, *p, 1e-6));
            }
        }

        #[test]
        fn hull_is_idempotent(
            raw in prop::collection::vec((-100.0f64..100.0, -100.0f64..100.0), 3..40)
        ) {
            let pts: Vec<Point2> = raw.iter().map(|&(x, y)| vector![x, y]).collect();
            let h = convex_hull(&pts);
            prop_assert_eq!(convex_hull(&h), h);
        }
    }
}
