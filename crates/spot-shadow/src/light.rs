//! Area light approximated by a regular ring of point lights.

use std::f64::consts::TAU;

use crate::geom::Point3;

/// Disk light facing down, centred at `center`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LightSource {
    pub center: Point3,
    /// Disk radius.
    pub size: f64,
    /// Number of point lights standing in for the disk.
    pub sample_count: usize,
}

impl LightSource {
    #[inline]
    pub fn new(center: Point3, size: f64, sample_count: usize) -> Self {
        Self {
            center,
            size,
            sample_count,
        }
    }

    /// True if the light can produce a soft shadow at all.
    #[inline]
    pub fn is_usable(&self) -> bool {
        self.sample_count >= 1
            && self.size.is_finite()
            && self.size > 0.0
            && self.center.iter().all(|c| c.is_finite())
    }

    /// Sample points on the disk rim, all at the centre's height.
    ///
    /// Sample `i` sits at angle `2πi/n` measured from +y toward +x, so sample 0
    /// is straight "north" of the centre.
    pub fn sample_points(&self) -> Vec<Point3> {
        let n = self.sample_count;
        (0..n)
            .map(|i| {
                let a = TAU * i as f64 / n as f64;
                Point3::new(
                    self.center.x + a.sin() * self.size,
                    self.center.y + a.cos() * self.size,
                    self.center.z,
                )
            })
            .collect()
    }
}
