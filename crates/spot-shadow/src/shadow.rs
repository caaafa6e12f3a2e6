//! Entry points: occluder + light in, alpha-shaded triangle strip out.

use tracing::debug;

use crate::config::ShadowParams;
use crate::field::compute_field;
use crate::geom::Point3;
use crate::light::LightSource;
use crate::strip::{generate_triangle_strip, VertexBuffer};

pub use crate::field::ShadowScratch;

/// Soft shadow of `occluder` under a disk light, with default smoothing,
/// linear falloff and the receiver one unit below the occluder.
///
/// Never fails: malformed input (fewer than 3 vertices, `rays < 3`,
/// `layers < 1`, zero-size light, light not above the occluder) returns an
/// empty buffer. `strength` is clamped to [0, 1].
pub fn create_spot_shadow(
    occluder: &[Point3],
    light_center: Point3,
    light_size: f64,
    light_sample_count: usize,
    rays: usize,
    layers: usize,
    strength: f64,
) -> VertexBuffer {
    let light = LightSource::new(light_center, light_size, light_sample_count);
    let params = ShadowParams {
        rays,
        layers,
        strength,
        ..ShadowParams::default()
    };
    compute_spot_shadow(occluder, &light, &params)
}

/// Like `create_spot_shadow` with full control over the parameters.
pub fn compute_spot_shadow(
    occluder: &[Point3],
    light: &LightSource,
    params: &ShadowParams,
) -> VertexBuffer {
    let mut scratch = ShadowScratch::new();
    compute_spot_shadow_with(occluder, light, params, &mut scratch)
}

/// Like `compute_spot_shadow`, reusing caller-owned working storage. Hosts
/// that shade many occluders per frame keep one scratch per thread.
pub fn compute_spot_shadow_with(
    occluder: &[Point3],
    light: &LightSource,
    params: &ShadowParams,
    scratch: &mut ShadowScratch,
) -> VertexBuffer {
    let field = compute_field(occluder, light, params, scratch);
    let strip = generate_triangle_strip(&field);
    debug!(
        rays = field.rays(),
        layers = field.layers(),
        vertices = strip.len(),
        "spot shadow"
    );
    strip
}
