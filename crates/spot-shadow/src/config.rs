//! Shadow parameters and the validated scene configuration.
//!
//! - `ShadowParams`: ray/layer discretization, strength, smoothing, falloff and
//!   receiving plane. `Default` matches what a host renderer would use.
//! - `SpotShadowConfig`: one occluder under one light, built through
//!   `SpotShadowConfigBuilder` which checks the entry-point preconditions.
//!
//! The plain `create_spot_shadow` entry never errors (bad input → empty mesh);
//! only the builder reports problems, for callers that want to know why.

use std::fmt;

use crate::geom::Point3;
use crate::light::LightSource;
use crate::shadow::compute_spot_shadow;
use crate::strip::VertexBuffer;

/// Opacity falloff from umbra (layer 0) to penumbra edge (outermost layer).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Falloff {
    #[default]
    Linear,
    /// Smoothstep: flat near both ends, steepest mid-penumbra.
    Smooth,
}

/// Where the shadow lands.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Receiver {
    /// Horizontal plane this far below the lowest occluder vertex.
    BelowOccluder(f64),
    /// Horizontal plane at this absolute height.
    Plane(f64),
}

impl Default for Receiver {
    fn default() -> Self {
        Receiver::BelowOccluder(1.0)
    }
}

impl Receiver {
    /// Height of the receiving plane for `occluder`.
    pub fn height(&self, occluder: &[Point3]) -> f64 {
        match *self {
            Receiver::BelowOccluder(gap) => {
                let low = occluder.iter().map(|p| p.z).fold(f64::INFINITY, f64::min);
                low - gap
            }
            Receiver::Plane(z) => z,
        }
    }
}

/// Discretization and shading parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShadowParams {
    /// Rays cast around the centroid (angular resolution of the outline).
    pub rays: usize,
    /// Bands between umbra and penumbra edge (radial resolution of the fade).
    pub layers: usize,
    /// Umbra opacity in [0, 1].
    pub strength: f64,
    /// Passes of the (1, 2, 1)/4 smoothing kernel over ray distances.
    pub smoothing: usize,
    pub falloff: Falloff,
    pub receiver: Receiver,
}

impl Default for ShadowParams {
    fn default() -> Self {
        Self {
            rays: 128,
            layers: 8,
            strength: 1.0,
            smoothing: 1,
            falloff: Falloff::Linear,
            receiver: Receiver::default(),
        }
    }
}

/// Rejected configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    MissingPolygon,
    TooFewVertices { got: usize },
    NonFinite { field: &'static str },
    OutOfRange { field: &'static str, reason: String },
}

impl ConfigError {
    fn range(field: &'static str, reason: impl Into<String>) -> Self {
        Self::OutOfRange {
            field,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingPolygon => write!(f, "no occluder polygon set"),
            Self::TooFewVertices { got } => {
                write!(f, "occluder needs at least 3 vertices, got {got}")
            }
            Self::NonFinite { field } => write!(f, "{field} must be finite"),
            Self::OutOfRange { field, reason } => write!(f, "{field} out of range: {reason}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// One occluder under one spot light. Immutable apart from the light's
/// horizontal position.
#[derive(Clone, Debug)]
pub struct SpotShadowConfig {
    polygon: Vec<Point3>,
    light: LightSource,
    params: ShadowParams,
}

impl SpotShadowConfig {
    pub fn builder() -> SpotShadowConfigBuilder {
        SpotShadowConfigBuilder::default()
    }

    pub fn polygon(&self) -> &[Point3] {
        &self.polygon
    }

    pub fn light(&self) -> &LightSource {
        &self.light
    }

    pub fn params(&self) -> &ShadowParams {
        &self.params
    }

    /// Move the light horizontally; its height is kept.
    pub fn set_light_coord(&mut self, x: f64, y: f64) {
        self.light.center.x = x;
        self.light.center.y = y;
    }

    /// Run the full pipeline for this scene.
    pub fn generate(&self) -> VertexBuffer {
        compute_spot_shadow(&self.polygon, &self.light, &self.params)
    }
}

/// Builder for `SpotShadowConfig`; unset fields take `ShadowParams::default()`
/// values, a light at the origin with height 0, radius 0 and 8 points.
#[derive(Clone, Debug)]
pub struct SpotShadowConfigBuilder {
    polygon: Option<Vec<Point3>>,
    light_center: Point3,
    light_radius: f64,
    light_points: usize,
    params: ShadowParams,
}

impl Default for SpotShadowConfigBuilder {
    fn default() -> Self {
        Self {
            polygon: None,
            light_center: Point3::zeros(),
            light_radius: 0.0,
            light_points: 8,
            params: ShadowParams::default(),
        }
    }
}

impl SpotShadowConfigBuilder {
    pub fn polygon(mut self, poly: Vec<Point3>) -> Self {
        self.polygon = Some(poly);
        self
    }

    pub fn light_coord(mut self, x: f64, y: f64, height: f64) -> Self {
        self.light_center = Point3::new(x, y, height);
        self
    }

    pub fn light_radius(mut self, radius: f64) -> Self {
        self.light_radius = radius;
        self
    }

    pub fn light_source_points(mut self, n: usize) -> Self {
        self.light_points = n;
        self
    }

    pub fn rays(mut self, rays: usize) -> Self {
        self.params.rays = rays;
        self
    }

    pub fn layers(mut self, layers: usize) -> Self {
        self.params.layers = layers;
        self
    }

    /// Umbra opacity, 0 to 1.
    pub fn shadow_strength(mut self, strength: f64) -> Self {
        self.params.strength = strength;
        self
    }

    pub fn smoothing(mut self, passes: usize) -> Self {
        self.params.smoothing = passes;
        self
    }

    pub fn falloff(mut self, falloff: Falloff) -> Self {
        self.params.falloff = falloff;
        self
    }

    pub fn receiver(mut self, receiver: Receiver) -> Self {
        self.params.receiver = receiver;
        self
    }

    pub fn build(self) -> Result<SpotShadowConfig, ConfigError> {
        let polygon = self.polygon.ok_or(ConfigError::MissingPolygon)?;
        if polygon.len() < 3 {
            return Err(ConfigError::TooFewVertices { got: polygon.len() });
        }
        if polygon.iter().any(|p| p.iter().any(|c| !c.is_finite())) {
            return Err(ConfigError::NonFinite { field: "polygon" });
        }
        if self.light_center.iter().any(|c| !c.is_finite()) {
            return Err(ConfigError::NonFinite {
                field: "light_coord",
            });
        }
        if !self.light_radius.is_finite() {
            return Err(ConfigError::NonFinite {
                field: "light_radius",
            });
        }
        if self.light_radius < 0.0 {
            return Err(ConfigError::range("light_radius", "must be >= 0"));
        }
        if self.light_points < 1 {
            return Err(ConfigError::range("light_source_points", "must be >= 1"));
        }
        let p = self.params;
        if p.rays < 3 {
            return Err(ConfigError::range("rays", format!("{} < 3", p.rays)));
        }
        if p.layers < 1 {
            return Err(ConfigError::range("layers", "must be >= 1"));
        }
        if !(0.0..=1.0).contains(&p.strength) {
            return Err(ConfigError::range(
                "shadow_strength",
                format!("{} not in [0, 1]", p.strength),
            ));
        }
        let receiver_value = match p.receiver {
            Receiver::BelowOccluder(v) | Receiver::Plane(v) => v,
        };
        if !receiver_value.is_finite() {
            return Err(ConfigError::NonFinite { field: "receiver" });
        }
        if let Receiver::BelowOccluder(gap) = p.receiver {
            if gap < 0.0 {
                return Err(ConfigError::range(
                    "receiver",
                    format!("gap {gap} puts the plane above the occluder"),
                ));
            }
        }
        Ok(SpotShadowConfig {
            polygon,
            light: LightSource::new(self.light_center, self.light_radius, self.light_points),
            params: p,
        })
    }
}
