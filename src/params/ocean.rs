//! Ocean wave parameters: octaves, grid resolution and time scaling.

use std::ops::RangeInclusive;
use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ParamsError};

/// Valid mesh resolutions (vertices per side)
pub const RESOLUTION_RANGE: RangeInclusive<usize> = 4..=256;

/// Valid time multipliers (phase units per elapsed second)
pub const TIME_MULTIPLIER_RANGE: RangeInclusive<f32> = 0.01..=2.0;

/// Valid noise resolutions (noise spatial frequency multiplier)
pub const NOISE_RESOLUTION_RANGE: RangeInclusive<f32> = 0.1..=10.0;

/// One contributing wave term.
///
/// Immutable once handed to a [`WaveField`](crate::ocean::WaveField); change the
/// wave shape by replacing the whole octave set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Octave {
    /// Vertical scale of this wave's contribution (scene units)
    pub amplitude: f32,

    /// Wave length in normalized grid units (practical range 0.01-10.0, never zero)
    /// Smaller = higher spatial frequency
    pub wavelength: f32,

    /// Multiplier on the global phase (propagation rate relative to other octaves)
    pub speed: f32,

    /// x gates the cosine (x-axis) term, y gates the sine (z-axis) term.
    /// Also scrolls the noise sampling domain by `phase * direction`.
    pub direction: Vec2,

    /// Scale of the coherent noise displacement
    pub noise_amount: f32,

    /// Noise spatial frequency multiplier (0.1-10.0)
    pub noise_resolution: f32,
}

impl Default for Octave {
    fn default() -> Self {
        Self {
            amplitude: 0.1,
            wavelength: 1.0,
            speed: 1.0,
            direction: Vec2::new(1.0, 1.0),
            noise_amount: 0.0,
            noise_resolution: 1.0,
        }
    }
}

impl Octave {
    /// Check this octave's fields; `index` is its position in the octave set.
    pub fn validate(&self, index: usize) -> Result<(), ConfigError> {
        let finite = [
            ("octave amplitude", self.amplitude),
            ("octave wavelength", self.wavelength),
            ("octave speed", self.speed),
            ("octave direction.x", self.direction.x),
            ("octave direction.y", self.direction.y),
            ("octave noise_amount", self.noise_amount),
            ("octave noise_resolution", self.noise_resolution),
        ];
        if let Some((field, _)) = finite.into_iter().find(|(_, v)| !v.is_finite()) {
            return Err(ConfigError::NonFinite { field });
        }

        if self.wavelength == 0.0 {
            return Err(ConfigError::ZeroWavelength { octave: index });
        }

        if !NOISE_RESOLUTION_RANGE.contains(&self.noise_resolution) {
            return Err(ConfigError::NoiseResolutionOutOfRange {
                octave: index,
                value: self.noise_resolution,
            });
        }

        Ok(())
    }
}

/// Check a whole octave set in order.
pub fn validate_octaves(octaves: &[Octave]) -> Result<(), ConfigError> {
    octaves
        .iter()
        .enumerate()
        .try_for_each(|(i, oc)| oc.validate(i))
}

/// Check a mesh resolution against [`RESOLUTION_RANGE`].
pub fn validate_resolution(resolution: usize) -> Result<(), ConfigError> {
    if RESOLUTION_RANGE.contains(&resolution) {
        Ok(())
    } else {
        Err(ConfigError::ResolutionOutOfRange(resolution))
    }
}

/// Check a time multiplier against [`TIME_MULTIPLIER_RANGE`].
pub fn validate_time_multiplier(time_multiplier: f32) -> Result<(), ConfigError> {
    if !time_multiplier.is_finite() {
        return Err(ConfigError::NonFinite {
            field: "time_multiplier",
        });
    }
    if TIME_MULTIPLIER_RANGE.contains(&time_multiplier) {
        Ok(())
    } else {
        Err(ConfigError::TimeMultiplierOutOfRange(time_multiplier))
    }
}

/// Ocean simulation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OceanConfig {
    /// Grid resolution (vertices per side, 4-256; 20 = 400 vertices)
    pub mesh_resolution: usize,

    /// Wave terms summed per vertex, in evaluation order
    pub octaves: Vec<Octave>,

    /// Elapsed seconds → phase units (0.01-2.00)
    pub time_multiplier: f32,

    /// Initial global phase
    pub global_phase: f32,

    /// Perlin noise seed
    pub noise_seed: u32,

    /// Evaluate vertex heights on the rayon thread pool
    pub parallel: bool,
}

impl Default for OceanConfig {
    fn default() -> Self {
        Self {
            mesh_resolution: 20,
            octaves: vec![
                // Long swell rolling along x
                Octave {
                    amplitude: 0.05,
                    wavelength: 1.0,
                    speed: 0.2,
                    direction: Vec2::new(1.0, 0.0),
                    noise_amount: 0.0,
                    noise_resolution: 1.0,
                },
                // Shorter cross chop with a little noise
                Octave {
                    amplitude: 0.02,
                    wavelength: 0.3,
                    speed: 0.5,
                    direction: Vec2::new(0.4, 1.0),
                    noise_amount: 0.03,
                    noise_resolution: 4.0,
                },
            ],
            time_multiplier: 1.0,
            global_phase: 0.0,
            noise_seed: 42,
            parallel: false,
        }
    }
}

impl OceanConfig {
    /// Validate every field; nothing is clamped.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_resolution(self.mesh_resolution)?;
        validate_time_multiplier(self.time_multiplier)?;
        if !self.global_phase.is_finite() {
            return Err(ConfigError::NonFinite {
                field: "global_phase",
            });
        }
        validate_octaves(&self.octaves)
    }

    /// Parse and validate a JSON configuration. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ParamsError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON configuration file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ParamsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }
}
