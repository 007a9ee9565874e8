//! Coherent noise for wave displacement.
//!
//! Seeded 2D Perlin noise, remapped so every sample lies in [0, 1].
//! Deterministic for a given (seed, x, y) and continuous between samples.

use noise::{NoiseFn, Perlin};

/// Noise generator for ocean surface displacement
#[derive(Clone, Debug)]
pub struct NoiseGenerator {
    perlin: Perlin,
}

impl NoiseGenerator {
    /// Create new noise generator with seed
    pub fn new(seed: u32) -> Self {
        Self {
            perlin: Perlin::new(seed),
        }
    }

    /// Sample 2D Perlin noise at position
    ///
    /// Returns value in range [0, 1] (0.5 on integer lattice points)
    pub fn sample_2d(&self, x: f32, y: f32) -> f32 {
        let raw = self.perlin.get([x as f64, y as f64]);
        ((raw + 1.0) * 0.5).clamp(0.0, 1.0) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_samples_are_bounded() {
        let noise = NoiseGenerator::new(42);
        for i in 0..64 {
            for j in 0..64 {
                let v = noise.sample_2d(i as f32 * 0.173, j as f32 * 0.291);
                assert!((0.0..=1.0).contains(&v), "sample {} out of range", v);
            }
        }
    }

    #[test]
    fn test_same_seed_same_samples() {
        let a = NoiseGenerator::new(7);
        let b = NoiseGenerator::new(7);
        assert_eq!(
            a.sample_2d(3.25, -1.5).to_bits(),
            b.sample_2d(3.25, -1.5).to_bits()
        );
    }

    #[test]
    fn test_adjacent_samples_are_close() {
        let noise = NoiseGenerator::new(42);
        let step = 1.0e-3;
        let mut prev = noise.sample_2d(0.0, 0.37);
        for k in 1..2000 {
            let v = noise.sample_2d(k as f32 * step, 0.37);
            assert!((v - prev).abs() < 0.01, "jump of {} at step {}", v - prev, k);
            prev = v;
        }
    }
}
