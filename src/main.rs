//! Oceanwave - headless ocean surface driver
//!
//! Runs the wave simulation at a fixed time step against an in-memory mesh,
//! then optionally exports the final surface.

mod cli;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::time::Instant;

use clap::Parser;

use cli::Args;
use oceanwave::cpu::{CpuMaterial, CpuMesh};
use oceanwave::export::{heightmap_image, write_obj};
use oceanwave::host::{Clock, FixedStepClock};
use oceanwave::ocean::OceanSystem;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = args.ocean_config()?;

    if args.print_config {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    let mut ocean = OceanSystem::new(&config, args.material_params()?)?;
    let mut clock = FixedStepClock::new(args.fps);
    clock.is_running = !args.paused;

    let mut mesh = CpuMesh::new();
    let mut material = CpuMaterial::default();
    let scale = args.scale();

    let start = Instant::now();
    for frame in 0..args.frames {
        let report = ocean.tick(clock.tick(), scale, &mut mesh, &mut material)?;
        if let Some((lo, hi)) = report.height_range {
            log::debug!(
                "Frame {}: phase {:.4}, height [{:.4}, {:.4}]",
                frame,
                report.phase,
                lo,
                hi
            );
        }
    }
    let elapsed = start.elapsed();

    println!("Ocean surface");
    println!(
        "  Grid: {}x{} ({} vertices, {} triangles)",
        ocean.resolution(),
        ocean.resolution(),
        mesh.vertex_count(),
        mesh.triangle_count()
    );
    println!("  Frames: {} ({} skipped)", args.frames, ocean.skipped_ticks());
    println!("  Final phase: {:.4}", ocean.field().global_phase());
    println!(
        "  Time: {:.2}ms ({:.3}ms/frame)",
        elapsed.as_secs_f64() * 1000.0,
        elapsed.as_secs_f64() * 1000.0 / args.frames.max(1) as f64
    );

    if let Some(path) = &args.heightmap {
        match ocean.last_published() {
            Some(buffers) => {
                heightmap_image(buffers).save(path)?;
                println!("  Heightmap: {}", path.display());
            }
            None => log::warn!("No mesh published, heightmap not written"),
        }
    }

    if let Some(path) = &args.obj {
        let mut writer = BufWriter::new(File::create(path)?);
        write_obj(&mesh, &mut writer)?;
        writer.flush()?;
        println!("  OBJ: {}", path.display());
    }

    Ok(())
}
