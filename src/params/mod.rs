//! Parameter definitions with documented ranges and semantics.
//!
//! Every range here is enforced by a `validate` method; nothing is clamped.

mod material;
mod ocean;

// Re-export all types
pub use material::{FloatSlot, MaterialParams, TextureRef, TextureSlot};
pub use ocean::{
    validate_octaves, validate_resolution, validate_time_multiplier, OceanConfig, Octave,
    NOISE_RESOLUTION_RANGE, RESOLUTION_RANGE, TIME_MULTIPLIER_RANGE,
};
