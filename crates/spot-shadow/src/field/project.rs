use crate::cfg::EPSILON;
use crate::geom::{Point2, Point3};

/// Append the shadow of `occluder` cast from point light `light` onto the
/// horizontal plane `z = receiver_z`.
///
/// Returns `false` (leaving `out` partially written) if the light is not
/// strictly above every vertex or the plane is above any vertex. A plane
/// through a vertex (`t = 1`) is allowed and gives a hard edge there.
pub(crate) fn project_from(
    light: Point3,
    occluder: &[Point3],
    receiver_z: f64,
    out: &mut Vec<Point2>,
) -> bool {
    let origin = light.xy();
    let drop = light.z - receiver_z;
    for p in occluder {
        let rise = light.z - p.z;
        if rise <= EPSILON {
            return false;
        }
        let t = drop / rise;
        if !t.is_finite() || t < 1.0 - EPSILON {
            return false;
        }
        out.push(origin + (p.xy() - origin) * t);
    }
    true
}
