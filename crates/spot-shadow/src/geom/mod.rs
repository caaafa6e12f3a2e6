//! 2D/3D points and stateless polygon utilities.
//!
//! Conventions
//! - Polygons are plain vertex sequences, closed implicitly (last → first).
//! - "Clockwise" is measured in a y-up frame: negative signed area.
//! - All predicates use the absolute tolerance `cfg::EPSILON`.
//!
//! Code cross-refs: `hull::convex_hull`, `field::clip`

mod types;
mod util;

pub use types::{Point2, Point3};
pub use util::{
    angle, centroid, is_clockwise, line_segment_intersection, make_clockwise, point_in_polygon,
    ray_intersect_polygon, right_turn, segment_intersection, signed_area, sort_clockwise,
};
