use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use polars::prelude::*;
use serde_json::json;
use spot_shadow::rand::{draw_occluder, OccluderCfg, ReplayToken};
use spot_shadow::{compute_spot_shadow_with, LightSource, Point3, ShadowParams, ShadowScratch};
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::SubscriberBuilder;

mod provenance;
mod scene;

use provenance::{write_sidecar, Payload};
use scene::{vertex_frame, write_frame, write_json, Scene};

#[derive(Parser)]
#[command(name = "spot-shadow-cli")]
#[command(about = "Generate soft spot-shadow meshes and write them as tables")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Shadow one scene; output format follows the extension (.csv, .parquet, .json)
    Shadow {
        #[arg(long)]
        scene: PathBuf,
        #[arg(long)]
        out: PathBuf,
    },
    /// Shadow `count` random convex occluders and tabulate mesh stats
    Sweep {
        #[arg(long, default_value_t = 0)]
        seed: u64,
        #[arg(long, default_value_t = 100)]
        count: u64,
        #[arg(long)]
        out: PathBuf,
    },
    /// Print a small provenance JSON block
    Report,
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Shadow { scene, out } => shadow(&scene, &out),
        Action::Sweep { seed, count, out } => sweep(seed, count, &out),
        Action::Report => report(),
    }
}

fn ensure_parent(out: &Path) -> Result<()> {
    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
    }
    Ok(())
}

fn shadow(scene_path: &Path, out: &Path) -> Result<()> {
    let scene = Scene::load(scene_path)?;
    let cfg = scene.to_config()?;
    let strip = cfg.generate();
    tracing::info!(
        scene = %scene_path.display(),
        out = %out.display(),
        vertices = strip.len(),
        triangles = strip.triangles().count(),
        "shadow"
    );
    if strip.is_empty() {
        tracing::warn!("scene casts no shadow; writing an empty table");
    }

    ensure_parent(out)?;
    if out.extension().and_then(|e| e.to_str()) == Some("json") {
        write_json(&strip, out)?;
    } else {
        let mut df = vertex_frame(&strip)?;
        write_frame(&mut df, out)?;
    }
    let payload = Payload::new(
        "shadow",
        json!({
            "scene": scene_path.to_string_lossy(),
            "scene_params": scene,
            "vertices": strip.len(),
        }),
    );
    write_sidecar(out, payload)?;
    Ok(())
}

fn sweep(seed: u64, count: u64, out: &Path) -> Result<()> {
    tracing::info!(seed, count, out = %out.display(), "sweep");
    let mut df = sweep_frame(seed, count)?;
    let empty = df
        .column("vertices")?
        .u32()?
        .into_iter()
        .filter(|v| *v == Some(0))
        .count();
    tracing::info!(rows = df.height(), empty, "sweep_done");

    ensure_parent(out)?;
    write_frame(&mut df, out)?;
    let payload = Payload::new("sweep", json!({ "seed": seed, "count": count }));
    write_sidecar(out, payload)?;
    Ok(())
}

/// One row per draw: vertex and triangle counts and the alpha range.
fn sweep_frame(seed: u64, count: u64) -> PolarsResult<DataFrame> {
    let light = LightSource::new(Point3::new(0.0, 0.0, 8.0), 0.6, 8);
    let params = ShadowParams::default();
    let cfg = OccluderCfg::default();
    let mut scratch = ShadowScratch::new();

    let mut index = Vec::new();
    let mut occluder_vertices = Vec::new();
    let mut vertices = Vec::new();
    let mut triangles = Vec::new();
    let mut alpha_min = Vec::new();
    let mut alpha_max = Vec::new();
    for i in 0..count {
        let occ = draw_occluder(cfg, ReplayToken { seed, index: i });
        let strip = compute_spot_shadow_with(&occ, &light, &params, &mut scratch);
        let alphas = strip.vertices.iter().map(|v| v.alpha);
        index.push(i);
        occluder_vertices.push(occ.len() as u32);
        vertices.push(strip.len() as u32);
        triangles.push(strip.triangles().count() as u32);
        alpha_min.push(alphas.clone().reduce(f64::min));
        alpha_max.push(alphas.reduce(f64::max));
    }
    df!(
        "index" => index,
        "occluder_vertices" => occluder_vertices,
        "vertices" => vertices,
        "triangles" => triangles,
        "alpha_min" => alpha_min,
        "alpha_max" => alpha_max
    )
}

fn report() -> Result<()> {
    let doc = provenance::document(&Payload::new("report", json!({})), &[]);
    println!("{}", serde_json::to_string_pretty(&doc)?);
    Ok(())
}
