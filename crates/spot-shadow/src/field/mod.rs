//! Shadow field: umbra/penumbra ray distances and per-layer opacity.
//!
//! Steps
//! 1. Project the occluder from every light sample onto the receiving plane.
//! 2. Umbra = intersection of all projections (incremental convex clipping).
//!    If it is empty, a small stand-in core around the centred projection is
//!    used so the shadow still fades from a point of full strength.
//! 3. Penumbra = convex hull of every projected vertex.
//! 4. Cast `rays` evenly spaced rays from the umbra centroid and record the
//!    distance to each boundary.
//! 5. Smooth both distance rings, then interpolate `layers + 1` rings with
//!    opacity falling from `strength` (layer 0) to 0 (outermost layer).
//!
//! Any degenerate input or intermediate result gives an empty field.
//!
//! Code cross-refs: `geom`, `hull::convex_hull`, `strip::generate_triangle_strip`

mod clip;
mod project;

use std::f64::consts::TAU;

use nalgebra::DMatrix;
use tracing::{debug, warn};

use crate::cfg::{EPSILON, FAKE_UMBRA_SCALE};
use crate::config::{Falloff, ShadowParams};
use crate::geom::{
    centroid, make_clockwise, point_in_polygon, ray_intersect_polygon, signed_area,
    sort_clockwise, Point2, Point3,
};
use crate::hull::convex_hull;
use crate::light::LightSource;

use clip::clip_convex;
use project::project_from;

/// Ray × layer table of distances from the centroid and vertex opacity.
///
/// Invariants (non-empty field):
/// - `rays >= 3`, `layers >= 1`; tables are `rays × (layers + 1)`.
/// - Per ray, distance is non-decreasing and alpha non-increasing with layer.
/// - Layer 0 alpha is `strength`; outermost layer alpha is 0.
#[derive(Clone, Debug, PartialEq)]
pub struct ShadowField {
    centroid: Point2,
    directions: Vec<Point2>,
    distance: DMatrix<f64>,
    alpha: DMatrix<f64>,
}

impl ShadowField {
    /// The "no shadow" field.
    pub fn empty() -> Self {
        Self {
            centroid: Point2::zeros(),
            directions: Vec::new(),
            distance: DMatrix::zeros(0, 0),
            alpha: DMatrix::zeros(0, 0),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.directions.is_empty()
    }

    #[inline]
    pub fn rays(&self) -> usize {
        self.directions.len()
    }

    #[inline]
    pub fn layers(&self) -> usize {
        self.distance.ncols().saturating_sub(1)
    }

    /// Common origin of all rays.
    #[inline]
    pub fn centroid(&self) -> Point2 {
        self.centroid
    }

    /// Unit direction of ray `ray`.
    #[inline]
    pub fn direction(&self, ray: usize) -> Point2 {
        self.directions[ray]
    }

    #[inline]
    pub fn distance(&self, ray: usize, layer: usize) -> f64 {
        self.distance[(ray, layer)]
    }

    #[inline]
    pub fn alpha(&self, ray: usize, layer: usize) -> f64 {
        self.alpha[(ray, layer)]
    }

    /// Position of cell `(ray, layer)` in the receiving plane.
    #[inline]
    pub fn position(&self, ray: usize, layer: usize) -> Point2 {
        self.centroid + self.directions[ray] * self.distance[(ray, layer)]
    }
}

/// Reusable working storage for one shadow computation.
///
/// Buffers keep their capacity between calls; contents are meaningless
/// outside a call.
#[derive(Clone, Debug, Default)]
pub struct ShadowScratch {
    outlines: Vec<Point2>,
    umbra: Vec<Point2>,
    clip: Vec<Point2>,
}

impl ShadowScratch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Preallocate for an occluder of `poly_len` vertices under `samples` lights.
    /// Sizes whose bound overflows start empty.
    pub fn with_capacity(poly_len: usize, samples: usize) -> Self {
        let mut s = Self::default();
        if let Some(cap) = Self::bound(poly_len, samples) {
            s.reset(cap);
        }
        s
    }

    /// Worst-case point count `poly_len + samples × poly_len`, or `None` on overflow.
    #[inline]
    pub fn bound(poly_len: usize, samples: usize) -> Option<usize> {
        samples.checked_add(1)?.checked_mul(poly_len)
    }

    /// Smallest capacity over all buffers.
    pub fn capacity(&self) -> usize {
        self.outlines
            .capacity()
            .min(self.umbra.capacity())
            .min(self.clip.capacity())
    }

    /// Clear every buffer and try to make room for `cap` points. Growth is
    /// best effort; pushes still reallocate if the reservation failed.
    fn reset(&mut self, cap: usize) {
        for buf in [&mut self.outlines, &mut self.umbra, &mut self.clip] {
            buf.clear();
            let _ = buf.try_reserve(cap);
        }
    }
}

/// Opacity factor in [0, 1] at normalized layer position `fraction`
/// (0 = umbra, 1 = penumbra edge) on a ray whose penumbra is `delta` wide.
///
/// Non-increasing in `fraction`; 1 at 0 and 0 at 1. A ray with no penumbra
/// (`delta <= EPSILON`) is a hard edge: full opacity up to the last layer.
pub fn calculate_opacity(fraction: f64, delta: f64, falloff: Falloff) -> f64 {
    let f = fraction.clamp(0.0, 1.0);
    if delta <= EPSILON {
        return if f < 1.0 { 1.0 } else { 0.0 };
    }
    match falloff {
        Falloff::Linear => 1.0 - f,
        Falloff::Smooth => 1.0 - f * f * (3.0 - 2.0 * f),
    }
}

/// `level` passes of the circular (1, 2, 1)/4 kernel over per-ray distances.
pub fn smooth_rays(level: usize, dist: &mut [f64]) {
    let n = dist.len();
    if n < 3 {
        return;
    }
    let mut prev = vec![0.0; n];
    for _ in 0..level {
        prev.copy_from_slice(dist);
        for i in 0..n {
            dist[i] = (prev[(i + n - 1) % n] + 2.0 * prev[i] + prev[(i + 1) % n]) * 0.25;
        }
    }
}

fn occluder_is_usable(occluder: &[Point3]) -> bool {
    if occluder.len() < 3 || occluder.iter().any(|p| p.iter().any(|c| !c.is_finite())) {
        return false;
    }
    let flat: Vec<Point2> = occluder.iter().map(|p| p.xy()).collect();
    signed_area(&flat).abs() > EPSILON
}

/// Compute the shadow field, reusing `scratch` for intermediate polygons.
pub fn compute_field(
    occluder: &[Point3],
    light: &LightSource,
    params: &ShadowParams,
    scratch: &mut ShadowScratch,
) -> ShadowField {
    if params.rays < 3 || params.layers < 1 || !params.strength.is_finite() {
        debug!(
            rays = params.rays,
            layers = params.layers,
            "no shadow: bad discretization"
        );
        return ShadowField::empty();
    }
    if !light.is_usable() {
        debug!(size = light.size, samples = light.sample_count, "no shadow: unusable light");
        return ShadowField::empty();
    }
    if !occluder_is_usable(occluder) {
        debug!(vertices = occluder.len(), "no shadow: degenerate occluder");
        return ShadowField::empty();
    }

    let n = occluder.len();
    let Some(cap) = ShadowScratch::bound(n, light.sample_count) else {
        debug!(samples = light.sample_count, "no shadow: too many light samples");
        return ShadowField::empty();
    };
    let samples = light.sample_points();
    scratch.reset(cap);
    let receiver_z = params.receiver.height(occluder);

    // 1. One projected outline per light sample, each normalized clockwise.
    for s in &samples {
        if !project_from(*s, occluder, receiver_z, &mut scratch.outlines) {
            debug!(receiver_z, "no shadow: light does not occlude");
            return ShadowField::empty();
        }
    }
    for outline in scratch.outlines.chunks_mut(n) {
        make_clockwise(outline);
    }

    // 2. Umbra.
    let ShadowScratch {
        outlines,
        umbra,
        clip,
    } = scratch;
    umbra.extend_from_slice(&outlines[..n]);
    for outline in outlines.chunks(n).skip(1) {
        clip_convex(umbra, outline, clip);
        if umbra.len() < 3 {
            break;
        }
    }
    if umbra.len() < 3 || signed_area(umbra).abs() <= EPSILON {
        debug!("umbra empty, using stand-in core");
        umbra.clear();
        if !project_from(light.center, occluder, receiver_z, umbra) {
            return ShadowField::empty();
        }
        let c = centroid(umbra);
        for p in umbra.iter_mut() {
            *p = c + (*p - c) * FAKE_UMBRA_SCALE;
        }
    }
    let origin = centroid(umbra);
    sort_clockwise(umbra, origin);

    // 3. Penumbra.
    let penumbra = convex_hull(outlines);
    if penumbra.len() < 3 {
        debug!(hull = penumbra.len(), "no shadow: penumbra has no area");
        return ShadowField::empty();
    }
    if !point_in_polygon(origin, &penumbra) {
        warn!(x = origin.x, y = origin.y, "umbra centroid outside penumbra");
        return ShadowField::empty();
    }

    // 4. Ray distances.
    let rays = params.rays;
    let directions: Vec<Point2> = (0..rays)
        .map(|i| {
            let a = TAU * i as f64 / rays as f64;
            Point2::new(a.cos(), a.sin())
        })
        .collect();
    let mut inner = Vec::with_capacity(rays);
    let mut outer = Vec::with_capacity(rays);
    for (i, dir) in directions.iter().enumerate() {
        let hits = (
            ray_intersect_polygon(umbra, origin, *dir),
            ray_intersect_polygon(&penumbra, origin, *dir),
        );
        let (Some(u), Some(p)) = hits else {
            warn!(ray = i, "ray missed shadow boundary");
            return ShadowField::empty();
        };
        inner.push(u);
        outer.push(p.max(u));
    }

    // 5. Smoothing and layers.
    smooth_rays(params.smoothing, &mut inner);
    smooth_rays(params.smoothing, &mut outer);
    let layers = params.layers;
    let strength = params.strength.clamp(0.0, 1.0);
    let mut distance = DMatrix::zeros(rays, layers + 1);
    let mut alpha = DMatrix::zeros(rays, layers + 1);
    for r in 0..rays {
        let delta = outer[r] - inner[r];
        for l in 0..=layers {
            let f = l as f64 / layers as f64;
            distance[(r, l)] = if l == layers { outer[r] } else { inner[r] + f * delta };
            alpha[(r, l)] = strength * calculate_opacity(f, delta, params.falloff);
        }
    }

    ShadowField {
        centroid: origin,
        directions,
        distance,
        alpha,
    }
}

#[cfg(test)]
mod tests;
