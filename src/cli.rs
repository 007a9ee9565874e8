//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;
use glam::Vec2;

use oceanwave::error::ParamsError;
use oceanwave::params::{MaterialParams, OceanConfig};

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "oceanwave")]
#[command(about = "Headless procedural ocean surface synthesis", long_about = None)]
pub struct Args {
    /// Ocean configuration (JSON); defaults are used when omitted
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Material parameters (JSON)
    #[arg(long, value_name = "PATH")]
    pub material: Option<PathBuf>,

    /// Override mesh resolution (vertices per side, 4-256)
    #[arg(long, value_name = "N")]
    pub resolution: Option<usize>,

    /// Override time multiplier (0.01-2.00)
    #[arg(long, value_name = "FACTOR")]
    pub time_multiplier: Option<f32>,

    /// Number of ticks to simulate
    #[arg(long, default_value_t = 120)]
    pub frames: u32,

    /// Simulated frame rate (fixed time step = 1 / fps)
    #[arg(long, default_value_t = 60)]
    pub fps: u32,

    /// Edit preview: regenerate every tick without advancing the phase
    #[arg(long)]
    pub paused: bool,

    /// Evaluate vertex heights in parallel
    #[arg(long)]
    pub parallel: bool,

    /// Transform scale along x (noise domain multiplier)
    #[arg(long, default_value_t = 1.0)]
    pub scale_x: f32,

    /// Transform scale along z (noise domain multiplier)
    #[arg(long, default_value_t = 1.0)]
    pub scale_z: f32,

    /// Write the final height field as a grayscale PNG
    #[arg(long, value_name = "PATH")]
    pub heightmap: Option<PathBuf>,

    /// Write the final mesh (with normals) as Wavefront OBJ
    #[arg(long, value_name = "PATH")]
    pub obj: Option<PathBuf>,

    /// Print the resolved configuration as JSON and exit
    #[arg(long)]
    pub print_config: bool,
}

impl Args {
    /// Resolve the ocean configuration: file (or defaults), then command-line overrides
    pub fn ocean_config(&self) -> Result<OceanConfig, ParamsError> {
        let mut config = match &self.config {
            Some(path) => OceanConfig::from_json_file(path)?,
            None => OceanConfig::default(),
        };

        if let Some(resolution) = self.resolution {
            config.mesh_resolution = resolution;
        }
        if let Some(time_multiplier) = self.time_multiplier {
            config.time_multiplier = time_multiplier;
        }
        config.parallel |= self.parallel;

        config.validate()?;
        Ok(config)
    }

    pub fn material_params(&self) -> Result<MaterialParams, ParamsError> {
        match &self.material {
            Some(path) => MaterialParams::from_json_file(path),
            None => Ok(MaterialParams::default()),
        }
    }

    pub fn scale(&self) -> Vec2 {
        Vec2::new(self.scale_x, self.scale_z)
    }
}
