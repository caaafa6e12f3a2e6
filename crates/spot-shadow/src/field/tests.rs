use super::*;
use crate::config::Receiver;
use nalgebra::vector;
use proptest::prelude::*;

fn square(half: f64, z: f64) -> Vec<Point3> {
    vec![
        vector![-half, -half, z],
        vector![half, -half, z],
        vector![half, half, z],
        vector![-half, half, z],
    ]
}

fn params(rays: usize, layers: usize, strength: f64, smoothing: usize) -> ShadowParams {
    ShadowParams {
        rays,
        layers,
        strength,
        smoothing,
        ..ShadowParams::default()
    }
}

fn field_for(occ: &[Point3], light: &LightSource, p: &ShadowParams) -> ShadowField {
    compute_field(occ, light, p, &mut ShadowScratch::new())
}

#[test]
fn opacity_endpoints_and_monotonicity() {
    for falloff in [Falloff::Linear, Falloff::Smooth] {
        assert_eq!(calculate_opacity(0.0, 1.0, falloff), 1.0);
        assert_eq!(calculate_opacity(1.0, 1.0, falloff), 0.0);
        let mut last = f64::INFINITY;
        for k in 0..=20 {
            let o = calculate_opacity(k as f64 / 20.0, 0.5, falloff);
            assert!(o <= last);
            assert!((0.0..=1.0).contains(&o));
            last = o;
        }
    }
    // Hard edge: opaque until the outermost layer.
    assert_eq!(calculate_opacity(0.9, 0.0, Falloff::Linear), 1.0);
    assert_eq!(calculate_opacity(1.0, 0.0, Falloff::Linear), 0.0);
}

#[test]
fn smoothing_keeps_constant_rings_and_mean() {
    let mut flat = vec![2.0; 7];
    smooth_rays(3, &mut flat);
    assert!(flat.iter().all(|d| (d - 2.0).abs() < 1e-12));

    let mut bumpy = vec![1.0, 3.0, 1.0, 3.0, 1.0, 3.0];
    let mean: f64 = bumpy.iter().sum::<f64>() / 6.0;
    smooth_rays(1, &mut bumpy);
    assert!((bumpy.iter().sum::<f64>() / 6.0 - mean).abs() < 1e-12);
    assert!(bumpy.iter().all(|d| (d - 2.0).abs() < 1e-12));

    let mut untouched = vec![1.0, 5.0];
    smooth_rays(4, &mut untouched);
    assert_eq!(untouched, vec![1.0, 5.0]);
}

#[test]
fn square_under_overhead_light() {
    let light = LightSource::new(vector![0.0, 0.0, 10.0], 2.0, 8);
    let f = field_for(&square(0.5, 0.0), &light, &params(16, 3, 0.8, 0));
    assert!(!f.is_empty());
    assert_eq!((f.rays(), f.layers()), (16, 3));
    assert!(f.centroid().norm() < 1e-9);
    // Receiver 1 below: projections scale by 1.1 and shift by 0.2 at most.
    assert!((f.distance(0, 0) - 0.35).abs() < 1e-9);
    assert!((f.distance(0, 3) - 0.75).abs() < 1e-9);
    for r in 0..f.rays() {
        assert!((f.alpha(r, 0) - 0.8).abs() < 1e-12);
        assert_eq!(f.alpha(r, f.layers()), 0.0);
        for l in 0..f.layers() {
            assert!(f.alpha(r, l + 1) <= f.alpha(r, l));
            assert!(f.distance(r, l + 1) >= f.distance(r, l));
        }
        assert!(f.distance(r, 0) < f.distance(r, f.layers()));
        let dir = f.direction(r);
        let theta = std::f64::consts::TAU * r as f64 / f.rays() as f64;
        assert!((dir - Point2::new(theta.cos(), theta.sin())).norm() < 1e-12);
        let p = f.position(r, 0);
        assert!((p - (f.centroid() + dir * f.distance(r, 0))).norm() < 1e-12);
        assert!(((p - f.centroid()).norm() - f.distance(r, 0)).abs() < 1e-9);
    }
}

#[test]
fn degenerate_inputs_give_empty_field() {
    let light = LightSource::new(vector![0.0, 0.0, 10.0], 2.0, 8);
    let p = params(8, 4, 1.0, 1);
    assert!(field_for(&square(0.5, 0.0)[..2], &light, &p).is_empty());
    let flat = vec![
        vector![0.0, 0.0, 0.0],
        vector![1.0, 1.0, 0.0],
        vector![2.0, 2.0, 0.0],
    ];
    assert!(field_for(&flat, &light, &p).is_empty());
    let no_size = LightSource::new(vector![0.0, 0.0, 10.0], 0.0, 8);
    assert!(field_for(&square(0.5, 0.0), &no_size, &p).is_empty());
    let below = LightSource::new(vector![0.0, 0.0, -3.0], 2.0, 8);
    assert!(field_for(&square(0.5, 0.0), &below, &p).is_empty());
    assert!(field_for(&square(0.5, 0.0), &light, &params(2, 4, 1.0, 1)).is_empty());
    assert!(field_for(&square(0.5, 0.0), &light, &params(8, 0, 1.0, 1)).is_empty());
}

#[test]
fn wide_light_falls_back_to_stand_in_umbra() {
    // Light far wider than the occluder: no point is hidden from every sample.
    let light = LightSource::new(vector![0.0, 0.0, 2.0], 20.0, 8);
    let f = field_for(&square(0.5, 0.0), &light, &params(12, 2, 1.0, 0));
    assert!(!f.is_empty());
    for r in 0..f.rays() {
        assert!(f.distance(r, 0) < 0.1);
        assert!(f.distance(r, 0) < f.distance(r, 2));
        assert_eq!(f.alpha(r, 0), 1.0);
    }
}

#[test]
fn receiver_plane_on_occluder_gives_hard_edge() {
    let light = LightSource::new(vector![0.0, 0.0, 10.0], 2.0, 8);
    let p = ShadowParams {
        receiver: Receiver::Plane(0.0),
        ..params(8, 2, 1.0, 0)
    };
    let f = field_for(&square(0.5, 0.0), &light, &p);
    assert!(!f.is_empty());
    for r in 0..f.rays() {
        assert!((f.distance(r, 0) - f.distance(r, 2)).abs() < 1e-9);
        assert_eq!(f.alpha(r, 1), 1.0);
        assert_eq!(f.alpha(r, 2), 0.0);
    }
}

#[test]
fn scratch_reuse_matches_fresh_scratch() {
    let light = LightSource::new(vector![0.3, -0.2, 6.0], 1.0, 5);
    let p = params(24, 4, 0.6, 2);
    let mut shared = ShadowScratch::with_capacity(4, 5);
    assert_eq!(ShadowScratch::bound(4, 5), Some(24));
    assert!(shared.capacity() >= 24);
    let small = square(0.25, 0.5);
    let _ = compute_field(&square(1.0, 0.0), &light, &p, &mut shared);
    let reused = compute_field(&small, &light, &p, &mut shared);
    assert_eq!(reused, field_for(&small, &light, &p));
}

/// Convex quad with one corner on each diagonal; the diagonals cross at the
/// origin, so any positive radii give a convex outline.
fn diagonal_quad(r: [f64; 4], z: f64) -> Vec<Point3> {
    let s = std::f64::consts::FRAC_1_SQRT_2;
    vec![
        vector![-r[0] * s, -r[0] * s, z],
        vector![r[1] * s, -r[1] * s, z],
        vector![r[2] * s, r[2] * s, z],
        vector![-r[3] * s, r[3] * s, z],
    ]
}

fn assert_same_field(a: &ShadowField, b: &ShadowField) -> Result<(), TestCaseError> {
    prop_assert!(!a.is_empty());
    prop_assert_eq!((a.rays(), a.layers()), (b.rays(), b.layers()));
    prop_assert!((a.centroid() - b.centroid()).norm() < 1e-9);
    for r in 0..a.rays() {
        for l in 0..=a.layers() {
            prop_assert!((a.distance(r, l) - b.distance(r, l)).abs() < 1e-9);
            prop_assert!((a.alpha(r, l) - b.alpha(r, l)).abs() < 1e-12);
        }
    }
    Ok(())
}

#[test]
fn lopsided_quad_is_winding_independent() {
    let ccw = diagonal_quad([1.4, 0.3, 0.8, 0.6], 0.0);
    let light = LightSource::new(vector![0.4, -0.3, 7.0], 0.9, 7);
    let p = params(24, 3, 1.0, 1);
    let a = field_for(&ccw, &light, &p);
    for shift in 0..4 {
        let mut cw = ccw.clone();
        cw.reverse();
        cw.rotate_left(shift);
        let b = field_for(&cw, &light, &p);
        assert!(assert_same_field(&a, &b).is_ok(), "shift {shift}");
    }
}

proptest! {
    #[test]
    fn winding_does_not_change_the_field(
        r0 in 0.2f64..2.0,
        r1 in 0.2f64..2.0,
        r2 in 0.2f64..2.0,
        r3 in 0.2f64..2.0,
        shift in 0usize..4,
        lx in -1.0f64..1.0,
        ly in -1.0f64..1.0,
        size in 0.1f64..1.5,
        samples in 3usize..10,
    ) {
        let ccw = diagonal_quad([r0, r1, r2, r3], 0.0);
        // Reversed and rotated so the walk starts at a different vertex.
        let mut cw = ccw.clone();
        cw.reverse();
        cw.rotate_left(shift);
        let light = LightSource::new(vector![lx, ly, 8.0], size, samples);
        let p = params(16, 3, 1.0, 1);
        assert_same_field(&field_for(&ccw, &light, &p), &field_for(&cw, &light, &p))?;
    }
}
