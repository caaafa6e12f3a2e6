//! Spot-shadow geometry: soft shadow meshes for planar occluders under an area light.
//!
//! Pipeline
//! - `light`: approximate the area light by a ring of sample points.
//! - `field`: project the occluder from every sample, intersect (umbra) and hull
//!   (penumbra), cast rays and interpolate layered distances and opacity.
//! - `strip`: walk the ray × layer table and emit one continuous triangle strip.
//!
//! Every call is a pure function of its inputs: no global state, no I/O. Bad or
//! degenerate input yields an empty `VertexBuffer` instead of an error so one
//! broken occluder never aborts a larger scene.

pub mod cfg;
pub mod config;
pub mod field;
pub mod geom;
pub mod hull;
pub mod light;
pub mod rand;
pub mod shadow;
pub mod strip;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use config::{
    ConfigError, Falloff, Receiver, ShadowParams, SpotShadowConfig, SpotShadowConfigBuilder,
};
pub use field::ShadowField;
pub use geom::{Point2, Point3};
pub use light::LightSource;
pub use shadow::{
    compute_spot_shadow, compute_spot_shadow_with, create_spot_shadow, ShadowScratch,
};
pub use strip::{strip_len, AlphaVertex, VertexBuffer};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::config::{
        Falloff, Receiver, ShadowParams, SpotShadowConfig, SpotShadowConfigBuilder,
    };
    pub use crate::geom::{Point2, Point3};
    pub use crate::hull::convex_hull;
    pub use crate::light::LightSource;
    pub use crate::shadow::create_spot_shadow;
    pub use crate::strip::{AlphaVertex, VertexBuffer};
}
