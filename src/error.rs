//! Error types for configuration, per-tick height synthesis and config loading.

/// Invalid configuration, raised when a config is loaded or a synthesis call is entered.
///
/// Values are never clamped into range; callers get the offending value back.
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum ConfigError {
    /// Mesh resolution outside [4, 256] vertices per side
    #[error("mesh resolution {0} outside [4, 256]")]
    ResolutionOutOfRange(usize),

    /// Time multiplier outside [0.01, 2.00]
    #[error("time multiplier {0} outside [0.01, 2.00]")]
    TimeMultiplierOutOfRange(f32),

    /// Octave wavelength of zero (the wave argument divides by it)
    #[error("octave {octave} has zero wavelength")]
    ZeroWavelength { octave: usize },

    /// Octave noise resolution outside [0.1, 10.0]
    #[error("octave {octave} noise resolution {value} outside [0.1, 10.0]")]
    NoiseResolutionOutOfRange { octave: usize, value: f32 },

    /// NaN or infinite value in a numeric field
    #[error("{field} is not finite")]
    NonFinite { field: &'static str },

    /// Material metallic/smoothness factor outside [0, 1]
    #[error("material {field} {value} outside [0, 1]")]
    MaterialFactorOutOfRange { field: &'static str, value: f32 },
}

/// Numerically invalid height detected while evaluating the wave field.
///
/// Recoverable: the tick that hit it is skipped and the previous mesh stays published.
#[derive(Debug, Clone, Copy, thiserror::Error, PartialEq)]
pub enum DomainError {
    #[error("octave {octave} has zero wavelength")]
    ZeroWavelength { octave: usize },

    #[error("non-finite height at ({x}, {z})")]
    NonFiniteHeight { x: f32, z: f32 },
}

/// Any failure of a synthesis pass.
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum OceanError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Errors from loading an ocean configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ParamsError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Invalid(#[from] ConfigError),
}
