//! Reproducible random convex occluders.
//!
//! A draw places `n` corners around a circle, perturbs each corner's angle
//! (within its own sector) and radius, optionally stretches the outline into
//! an ellipse, hulls the result and lifts it to `elevation`. The same
//! `ReplayToken` always gives the same occluder, so sweeps and failing property
//! cases can be replayed one draw at a time.

use nalgebra::vector;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::TAU;

use crate::geom::{Point2, Point3};
use crate::hull::convex_hull;

/// How many corners to draw before hulling.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VertexCount {
    Fixed(usize),
    /// Inclusive range.
    Uniform { min: usize, max: usize },
}

impl VertexCount {
    fn draw(self, rng: &mut StdRng) -> usize {
        match self {
            VertexCount::Fixed(n) => n.max(3),
            VertexCount::Uniform { min, max } => {
                let lo = min.max(3);
                rng.gen_range(lo..=max.max(lo))
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OccluderCfg {
    pub vertex_count: VertexCount,
    /// Corner angle offset, as a fraction of the sector width; kept below 0.5.
    pub angle_jitter_frac: f64,
    /// Relative radius noise: `r = base_radius · (1 ± radial_jitter)`.
    pub radial_jitter: f64,
    pub base_radius: f64,
    /// x/y stretch applied after jitter; 1 keeps the outline round.
    pub aspect: f64,
    pub random_phase: bool,
    pub elevation: f64,
}

impl Default for OccluderCfg {
    fn default() -> Self {
        Self {
            vertex_count: VertexCount::Uniform { min: 3, max: 12 },
            angle_jitter_frac: 0.3,
            radial_jitter: 0.25,
            base_radius: 1.0,
            aspect: 1.0,
            random_phase: true,
            elevation: 0.0,
        }
    }
}

/// `(seed, index)` pair naming one draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}

impl ReplayToken {
    /// Independent stream per index: splitmix64 finalizer over the combined key.
    fn rng(self) -> StdRng {
        let mut z = self
            .seed
            .wrapping_add(self.index.wrapping_add(1).wrapping_mul(0x9e37_79b9_7f4a_7c15));
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
        StdRng::seed_from_u64(z ^ (z >> 31))
    }
}

/// Symmetric noise in `[-amp, amp]`.
#[inline]
fn noise(rng: &mut StdRng, amp: f64) -> f64 {
    (2.0 * rng.gen::<f64>() - 1.0) * amp
}

/// Draw one clockwise convex occluder centred near the origin.
///
/// Jitter can make corners reflex, so the hull may have fewer vertices than
/// were drawn (never fewer than 3 for a positive radius).
pub fn draw_occluder(cfg: OccluderCfg, tok: ReplayToken) -> Vec<Point3> {
    let mut rng = tok.rng();
    let n = cfg.vertex_count.draw(&mut rng);
    let sector = TAU / n as f64;
    let wobble = cfg.angle_jitter_frac.clamp(0.0, 0.49) * sector;
    let spread = cfg.radial_jitter.max(0.0);
    let radius = cfg.base_radius.max(1e-9);
    let stretch = if cfg.aspect.is_finite() && cfg.aspect > 0.0 {
        cfg.aspect
    } else {
        1.0
    };
    let start = if cfg.random_phase {
        rng.gen_range(0.0..TAU)
    } else {
        0.0
    };

    let mut corners = Vec::with_capacity(n);
    for k in 0..n {
        let theta = start + sector * k as f64 + noise(&mut rng, wobble);
        let r = radius * (1.0 + noise(&mut rng, spread)).max(1e-6);
        corners.push(Point2::new(r * theta.cos() * stretch, r * theta.sin()));
    }
    convex_hull(&corners)
        .into_iter()
        .map(|c| vector![c.x, c.y, cfg.elevation])
        .collect()
}
