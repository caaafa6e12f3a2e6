//! Print the strip for a unit square under a disk light.
//!
//! Usage:
//!   cargo run -p spot-shadow --example soft_square -- [rays] [layers]
//!
//! Prints one `x y alpha` line per strip vertex, then a short summary.

use nalgebra::vector;
use spot_shadow::prelude::*;

fn main() {
    let mut args = std::env::args().skip(1);
    let rays = args.next().and_then(|s| s.parse().ok()).unwrap_or(16);
    let layers = args.next().and_then(|s| s.parse().ok()).unwrap_or(3);

    let cfg = SpotShadowConfig::builder()
        .polygon(vec![
            vector![-0.5, -0.5, 0.0],
            vector![0.5, -0.5, 0.0],
            vector![0.5, 0.5, 0.0],
            vector![-0.5, 0.5, 0.0],
        ])
        .light_coord(0.0, 0.0, 10.0)
        .light_radius(2.0)
        .light_source_points(8)
        .rays(rays)
        .layers(layers)
        .shadow_strength(0.8)
        .build();
    let cfg = match cfg {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("invalid scene: {e}");
            std::process::exit(2);
        }
    };

    let strip = cfg.generate();
    for v in &strip.vertices {
        println!("{:.6} {:.6} {:.4}", v.position.x, v.position.y, v.alpha);
    }
    eprintln!(
        "rays={rays} layers={layers} vertices={} triangles={}",
        strip.len(),
        strip.triangles().count()
    );
}
