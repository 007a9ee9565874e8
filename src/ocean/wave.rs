//! Wave field: summed periodic octaves plus coherent noise, and the global phase.

use std::f32::consts::TAU;
use std::sync::Arc;

use crate::error::{ConfigError, DomainError};
use crate::host::FrameTick;
use crate::noise::NoiseGenerator;
use crate::params::{validate_octaves, validate_time_multiplier, OceanConfig, Octave};

/// Height function over normalized grid coordinates, with its phase state.
///
/// `height_at` only reads state, so one frozen `WaveField` can be sampled from
/// many threads. `advance_phase` is the single mutation.
#[derive(Clone, Debug)]
pub struct WaveField {
    octaves: Arc<[Octave]>,
    global_phase: f32,
    time_multiplier: f32,
    noise: NoiseGenerator,
}

impl WaveField {
    /// Build a wave field from a validated configuration
    pub fn new(config: &OceanConfig) -> Result<Self, ConfigError> {
        validate_octaves(&config.octaves)?;
        validate_time_multiplier(config.time_multiplier)?;
        if !config.global_phase.is_finite() {
            return Err(ConfigError::NonFinite {
                field: "global_phase",
            });
        }

        Ok(Self {
            octaves: config.octaves.iter().copied().collect(),
            global_phase: config.global_phase,
            time_multiplier: config.time_multiplier,
            noise: NoiseGenerator::new(config.noise_seed),
        })
    }

    pub fn octaves(&self) -> &[Octave] {
        &self.octaves
    }

    pub fn global_phase(&self) -> f32 {
        self.global_phase
    }

    pub fn time_multiplier(&self) -> f32 {
        self.time_multiplier
    }

    /// Replace the whole octave set. The old set is left untouched on error.
    pub fn set_octaves(&mut self, octaves: Vec<Octave>) -> Result<(), ConfigError> {
        validate_octaves(&octaves)?;
        self.octaves = octaves.into();
        Ok(())
    }

    pub fn set_time_multiplier(&mut self, time_multiplier: f32) -> Result<(), ConfigError> {
        validate_time_multiplier(time_multiplier)?;
        self.time_multiplier = time_multiplier;
        Ok(())
    }

    /// Height at normalized grid coordinate (x, z) in [0, 1].
    ///
    /// `scale_x`/`scale_z` stretch the noise sampling domain (host transform scale).
    /// Pure for a fixed phase: identical arguments give bit-identical results.
    pub fn height_at(
        &self,
        x: f32,
        z: f32,
        scale_x: f32,
        scale_z: f32,
    ) -> Result<f32, DomainError> {
        let phase = self.global_phase;
        let mut y = 0.0;

        for (octave, oc) in self.octaves.iter().enumerate() {
            if oc.wavelength == 0.0 {
                return Err(DomainError::ZeroWavelength { octave });
            }

            let shift = phase * oc.speed;
            y += oc.amplitude * oc.direction.x * (TAU * (shift + x) / oc.wavelength).cos();
            y += oc.amplitude * oc.direction.y * (TAU * (shift + z) / oc.wavelength).sin();

            if oc.noise_amount != 0.0 {
                let nx = scale_x * oc.noise_resolution * x + phase * oc.direction.x;
                let nz = scale_z * oc.noise_resolution * z + phase * oc.direction.y;
                y += oc.noise_amount * self.noise.sample_2d(nx, nz);
            }
        }

        if y.is_finite() {
            Ok(y)
        } else {
            Err(DomainError::NonFiniteHeight { x, z })
        }
    }

    /// Advance the global phase by `delta_s * time_multiplier`.
    ///
    /// No-op when the tick is not running. Negative or non-finite deltas are
    /// ignored so the phase never moves backwards.
    pub fn advance_phase(&mut self, tick: FrameTick) {
        if !tick.is_running {
            return;
        }
        if !tick.delta_s.is_finite() || tick.delta_s < 0.0 {
            log::warn!("Ignoring invalid frame delta {}", tick.delta_s);
            return;
        }
        self.global_phase += tick.delta_s * self.time_multiplier;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn field_with(octaves: Vec<Octave>) -> WaveField {
        let config = OceanConfig {
            octaves,
            ..OceanConfig::default()
        };
        WaveField::new(&config).unwrap()
    }

    fn cosine_octave() -> Octave {
        Octave {
            amplitude: 1.0,
            wavelength: 1.0,
            speed: 0.0,
            direction: Vec2::new(1.0, 0.0),
            noise_amount: 0.0,
            noise_resolution: 1.0,
        }
    }

    #[test]
    fn test_zero_octaves_is_flat() {
        let mut field = field_with(vec![]);
        for phase_step in 0..5 {
            for (x, z) in [(0.0, 0.0), (0.3, 0.7), (1.0, 1.0)] {
                assert_eq!(field.height_at(x, z, 1.0, 1.0), Ok(0.0));
            }
            field.advance_phase(FrameTick::running(0.37 * phase_step as f32));
        }
    }

    #[test]
    fn test_single_cosine_octave() {
        let field = field_with(vec![cosine_octave()]);

        let h0 = field.height_at(0.0, 0.0, 1.0, 1.0).unwrap();
        assert!((h0 - 1.0).abs() < 1e-6);

        let h_quarter = field.height_at(0.25, 0.0, 1.0, 1.0).unwrap();
        assert!(h_quarter.abs() < 1e-6);
    }

    #[test]
    fn test_sine_term_follows_z() {
        let field = field_with(vec![Octave {
            direction: Vec2::new(0.0, 1.0),
            ..cosine_octave()
        }]);
        let h = field.height_at(0.0, 0.25, 1.0, 1.0).unwrap();
        assert!((h - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_height_is_deterministic() {
        let mut field = WaveField::new(&OceanConfig::default()).unwrap();
        field.advance_phase(FrameTick::running(1.3));

        let a = field.height_at(0.42, 0.17, 3.0, 2.0).unwrap();
        let b = field.height_at(0.42, 0.17, 3.0, 2.0).unwrap();
        assert_eq!(a.to_bits(), b.to_bits());
    }

    #[test]
    fn test_noise_displacement_is_bounded_by_amount() {
        let field = field_with(vec![Octave {
            amplitude: 0.0,
            noise_amount: 0.5,
            noise_resolution: 3.0,
            ..cosine_octave()
        }]);
        for k in 0..50 {
            let t = k as f32 / 49.0;
            let h = field.height_at(t, 1.0 - t, 2.0, 2.0).unwrap();
            assert!((0.0..=0.5).contains(&h));
        }
    }

    #[test]
    fn test_advance_phase_running() {
        let mut field = WaveField::new(&OceanConfig {
            time_multiplier: 0.5,
            ..OceanConfig::default()
        })
        .unwrap();

        field.advance_phase(FrameTick::running(1.0));
        assert_eq!(field.global_phase(), 0.5);
    }

    #[test]
    fn test_advance_phase_paused_is_noop() {
        let mut field = WaveField::new(&OceanConfig {
            global_phase: 2.0,
            ..OceanConfig::default()
        })
        .unwrap();

        field.advance_phase(FrameTick {
            delta_s: 1.0,
            is_running: false,
        });
        assert_eq!(field.global_phase(), 2.0);
    }

    #[test]
    fn test_negative_delta_ignored() {
        let mut field = WaveField::new(&OceanConfig::default()).unwrap();
        field.advance_phase(FrameTick::running(-1.0));
        field.advance_phase(FrameTick::running(f32::NAN));
        assert_eq!(field.global_phase(), 0.0);
    }

    #[test]
    fn test_zero_wavelength_rejected_at_construction() {
        let config = OceanConfig {
            octaves: vec![Octave {
                wavelength: 0.0,
                ..cosine_octave()
            }],
            ..OceanConfig::default()
        };
        assert_eq!(
            WaveField::new(&config).unwrap_err(),
            ConfigError::ZeroWavelength { octave: 0 }
        );
    }

    #[test]
    fn test_set_octaves_keeps_old_set_on_error() {
        let mut field = field_with(vec![cosine_octave()]);
        let result = field.set_octaves(vec![Octave {
            wavelength: 0.0,
            ..cosine_octave()
        }]);
        assert!(result.is_err());
        assert_eq!(field.octaves(), &[cosine_octave()]);
    }

    #[test]
    fn test_overflowing_octave_is_domain_error() {
        let huge = Octave {
            amplitude: f32::MAX,
            ..cosine_octave()
        };
        let field = field_with(vec![huge, huge]);
        assert_eq!(
            field.height_at(0.0, 0.0, 1.0, 1.0),
            Err(DomainError::NonFiniteHeight { x: 0.0, z: 0.0 })
        );
    }
}
