//! Scene files and vertex tables.
//!
//! A scene is JSON:
//! ```json
//! {
//!   "occluder": [[-0.5, -0.5, 0.0], [0.5, -0.5, 0.0], [0.5, 0.5, 0.0]],
//!   "light": { "x": 0.0, "y": 0.0, "height": 10.0, "radius": 2.0, "points": 8 },
//!   "params": { "rays": 16, "layers": 3, "strength": 0.8 }
//! }
//! ```
//! Missing `params` fields take the library defaults.

use anyhow::{Context, Result};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use spot_shadow::{Falloff, Receiver, ShadowParams, SpotShadowConfig, VertexBuffer};
use std::fs::File;
use std::path::Path;

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Scene {
    pub occluder: Vec<[f64; 3]>,
    pub light: LightSpec,
    #[serde(default)]
    pub params: ParamsSpec,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct LightSpec {
    pub x: f64,
    pub y: f64,
    pub height: f64,
    pub radius: f64,
    #[serde(default = "default_points")]
    pub points: usize,
}

fn default_points() -> usize {
    8
}

#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FalloffSpec {
    Linear,
    Smooth,
}

#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum ReceiverSpec {
    BelowOccluder(f64),
    Plane(f64),
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct ParamsSpec {
    pub rays: usize,
    pub layers: usize,
    pub strength: f64,
    pub smoothing: usize,
    pub falloff: FalloffSpec,
    pub receiver: ReceiverSpec,
}

impl Default for ParamsSpec {
    fn default() -> Self {
        let d = ShadowParams::default();
        Self {
            rays: d.rays,
            layers: d.layers,
            strength: d.strength,
            smoothing: d.smoothing,
            falloff: match d.falloff {
                Falloff::Linear => FalloffSpec::Linear,
                Falloff::Smooth => FalloffSpec::Smooth,
            },
            receiver: match d.receiver {
                Receiver::BelowOccluder(g) => ReceiverSpec::BelowOccluder(g),
                Receiver::Plane(z) => ReceiverSpec::Plane(z),
            },
        }
    }
}

impl Scene {
    pub fn load(path: &Path) -> Result<Self> {
        let bytes =
            std::fs::read(path).with_context(|| format!("reading scene {}", path.display()))?;
        serde_json::from_slice(&bytes).with_context(|| format!("parsing scene {}", path.display()))
    }

    /// Validated library config for this scene.
    pub fn to_config(&self) -> Result<SpotShadowConfig> {
        let p = &self.params;
        let cfg = SpotShadowConfig::builder()
            .polygon(
                self.occluder
                    .iter()
                    .map(|&[x, y, z]| spot_shadow::Point3::new(x, y, z))
                    .collect(),
            )
            .light_coord(self.light.x, self.light.y, self.light.height)
            .light_radius(self.light.radius)
            .light_source_points(self.light.points)
            .rays(p.rays)
            .layers(p.layers)
            .shadow_strength(p.strength)
            .smoothing(p.smoothing)
            .falloff(match p.falloff {
                FalloffSpec::Linear => Falloff::Linear,
                FalloffSpec::Smooth => Falloff::Smooth,
            })
            .receiver(match p.receiver {
                ReceiverSpec::BelowOccluder(g) => Receiver::BelowOccluder(g),
                ReceiverSpec::Plane(z) => Receiver::Plane(z),
            })
            .build()
            .context("invalid scene")?;
        Ok(cfg)
    }
}

/// One row per strip vertex: `index, x, y, alpha`.
pub fn vertex_frame(strip: &VertexBuffer) -> PolarsResult<DataFrame> {
    let index: Vec<u32> = (0..strip.len() as u32).collect();
    let xs: Vec<f64> = strip.vertices.iter().map(|v| v.position.x).collect();
    let ys: Vec<f64> = strip.vertices.iter().map(|v| v.position.y).collect();
    let alpha: Vec<f64> = strip.vertices.iter().map(|v| v.alpha).collect();
    df!(
        "index" => index,
        "x" => xs,
        "y" => ys,
        "alpha" => alpha
    )
}

/// Write `df` as CSV or parquet, chosen by the extension of `out`.
pub fn write_frame(df: &mut DataFrame, out: &Path) -> Result<()> {
    let mut file = File::create(out).with_context(|| format!("creating {}", out.display()))?;
    match out.extension().and_then(|e| e.to_str()) {
        Some("parquet") => {
            ParquetWriter::new(&mut file)
                .finish(df)
                .with_context(|| format!("writing {}", out.display()))?;
        }
        _ => {
            CsvWriter::new(&mut file)
                .include_header(true)
                .finish(df)
                .with_context(|| format!("writing {}", out.display()))?;
        }
    }
    Ok(())
}

/// Write the strip as a JSON array of `{x, y, alpha}` objects.
pub fn write_json(strip: &VertexBuffer, out: &Path) -> Result<()> {
    let rows: Vec<serde_json::Value> = strip
        .vertices
        .iter()
        .map(|v| serde_json::json!({ "x": v.position.x, "y": v.position.y, "alpha": v.alpha }))
        .collect();
    std::fs::write(out, serde_json::to_vec_pretty(&rows)?)
        .with_context(|| format!("writing {}", out.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const SQUARE: &str = r#"{
        "occluder": [[-0.5, -0.5, 0.0], [0.5, -0.5, 0.0], [0.5, 0.5, 0.0], [-0.5, 0.5, 0.0]],
        "light": { "x": 0.0, "y": 0.0, "height": 10.0, "radius": 1.0, "points": 4 },
        "params": { "rays": 8, "layers": 4, "falloff": "smooth", "receiver": { "plane": -1.0 } }
    }"#;

    #[test]
    fn scene_parses_with_defaults() {
        let scene: Scene = serde_json::from_str(SQUARE).unwrap();
        assert_eq!(scene.params.rays, 8);
        assert_eq!(scene.params.falloff, FalloffSpec::Smooth);
        assert_eq!(scene.params.receiver, ReceiverSpec::Plane(-1.0));
        assert_eq!(scene.params.smoothing, ShadowParams::default().smoothing);
        let cfg = scene.to_config().unwrap();
        assert_eq!(cfg.params().receiver, Receiver::Plane(-1.0));
        assert_eq!(cfg.generate().len(), 80);
    }

    #[test]
    fn invalid_scene_is_an_error() {
        let mut scene: Scene = serde_json::from_str(SQUARE).unwrap();
        scene.occluder.truncate(2);
        assert!(scene.to_config().is_err());
    }

    #[test]
    fn frame_round_trips_through_csv() {
        let scene: Scene = serde_json::from_str(SQUARE).unwrap();
        let strip = scene.to_config().unwrap().generate();
        let mut df = vertex_frame(&strip).unwrap();
        assert_eq!(df.shape(), (80, 4));
        let dir = tempdir().unwrap();
        let out = dir.path().join("strip.csv");
        write_frame(&mut df, &out).unwrap();
        let back = CsvReadOptions::default()
            .with_has_header(true)
            .try_into_reader_with_file_path(Some(out))
            .unwrap()
            .finish()
            .unwrap();
        assert_eq!(back.shape(), (80, 4));
    }
}
