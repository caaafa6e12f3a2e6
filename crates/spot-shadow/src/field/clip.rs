//! Sutherland–Hodgman clipping against convex clockwise polygons.

use crate::cfg::MERGE_EPS;
use crate::geom::{line_segment_intersection, right_turn, Point2};

/// `p` is on the interior (right) side of directed edge `a → b`, or within
/// tolerance of it.
#[inline]
fn inside(a: Point2, b: Point2, p: Point2) -> bool {
    !right_turn(b, a, p)
}

/// Replace `poly` with `poly ∩ clip`.
///
/// Pre: `clip` is convex and clockwise. `buf` is scratch space. The result may
/// have fewer than 3 vertices, meaning the intersection is empty.
pub(crate) fn clip_convex(poly: &mut Vec<Point2>, clip: &[Point2], buf: &mut Vec<Point2>) {
    let m = clip.len();
    for i in 0..m {
        if poly.is_empty() {
            break;
        }
        let (a, b) = (clip[i], clip[(i + 1) % m]);
        buf.clear();
        buf.extend_from_slice(poly);
        poly.clear();
        let mut s = buf[buf.len() - 1];
        for &e in buf.iter() {
            let (s_in, e_in) = (inside(a, b, s), inside(a, b, e));
            if s_in != e_in {
                if let Some(x) = line_segment_intersection(a, b, s, e) {
                    poly.push(x);
                }
            }
            if e_in {
                poly.push(e);
            }
            s = e;
        }
    }
    merge_close(poly);
}

/// Drop consecutive (cyclically) vertices closer than `MERGE_EPS`.
pub(crate) fn merge_close(poly: &mut Vec<Point2>) {
    poly.dedup_by(|a, b| (*a - *b).norm_squared() < MERGE_EPS);
    while poly.len() > 1 && (poly[0] - poly[poly.len() - 1]).norm_squared() < MERGE_EPS {
        poly.pop();
    }
}
