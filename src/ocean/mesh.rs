//! Ocean grid mesh synthesis: vertex heights, fixed triangle winding, grid UVs.

use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec3};
use rayon::prelude::*;

use super::wave::WaveField;
use crate::error::OceanError;
use crate::params::validate_resolution;

/// Vertex data for GPU upload (position + UV coordinates)
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
}

/// One complete, consistent mesh for a single tick.
///
/// Sizes are exact functions of `resolution`:
/// `resolution²` vertices and UVs, `6·(resolution−1)²` triangle indices.
#[derive(Clone, Debug, PartialEq)]
pub struct MeshBuffers {
    pub resolution: usize,
    pub vertices: Vec<Vec3>,
    pub triangles: Vec<u32>,
    pub uvs: Vec<Vec2>,
}

impl MeshBuffers {
    /// Flat index of grid point (i, j)
    #[inline]
    pub fn index(&self, i: usize, j: usize) -> usize {
        i + j * self.resolution
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len() / 3
    }

    /// Interleave positions and UVs for a vertex buffer
    pub fn interleaved(&self) -> Vec<Vertex> {
        self.vertices
            .iter()
            .zip(&self.uvs)
            .map(|(p, uv)| Vertex {
                position: p.to_array(),
                uv: uv.to_array(),
            })
            .collect()
    }

    /// (min, max) vertex height, or None for an empty mesh
    pub fn height_range(&self) -> Option<(f32, f32)> {
        self.vertices.iter().map(|v| v.y).fold(None, |acc, y| match acc {
            None => Some((y, y)),
            Some((lo, hi)) => Some((lo.min(y), hi.max(y))),
        })
    }
}

/// Triangle indices for a `resolution × resolution` grid.
///
/// Two triangles per quad, `{idx, idx+res, idx+res+1}` then `{idx, idx+res+1, idx+1}`,
/// quads visited with `i` outer and `j` inner. The winding fixes front-face orientation.
pub fn grid_triangles(resolution: usize) -> Vec<u32> {
    let quads = resolution.saturating_sub(1);
    let mut triangles = Vec::with_capacity(6 * quads * quads);
    let res = resolution as u32;

    for i in 0..quads as u32 {
        for j in 0..quads as u32 {
            let idx = i + j * res;
            triangles.extend_from_slice(&[
                idx,
                idx + res,
                idx + res + 1,
                idx,
                idx + res + 1,
                idx + 1,
            ]);
        }
    }

    triangles
}

/// Builds mesh buffers from a wave field.
#[derive(Clone, Copy, Debug, Default)]
pub struct MeshSynthesizer {
    /// Evaluate heights on the rayon thread pool
    pub parallel: bool,
}

impl MeshSynthesizer {
    pub fn new(parallel: bool) -> Self {
        Self { parallel }
    }

    /// Synthesize the full buffer triple for the field's current phase.
    ///
    /// Reads the field only; the caller advances the phase after this returns.
    /// On error nothing is produced, so a partial mesh can never be published.
    pub fn synthesize(
        &self,
        field: &WaveField,
        resolution: usize,
        scale: Vec2,
    ) -> Result<MeshBuffers, OceanError> {
        validate_resolution(resolution)?;

        let n = resolution * resolution;
        let denom = (resolution - 1) as f32;

        let sample = |idx: usize| -> Result<Vec3, OceanError> {
            let x = (idx % resolution) as f32 / denom;
            let z = (idx / resolution) as f32 / denom;
            let y = field.height_at(x, z, scale.x, scale.y)?;
            Ok(Vec3::new(x, y, z))
        };

        // collect() joins every worker before returning
        let vertices = if self.parallel {
            (0..n)
                .into_par_iter()
                .map(sample)
                .collect::<Result<Vec<_>, _>>()?
        } else {
            (0..n).map(sample).collect::<Result<Vec<_>, _>>()?
        };

        // Raw grid indices, not normalized
        let uvs = (0..n)
            .map(|idx| Vec2::new((idx % resolution) as f32, (idx / resolution) as f32))
            .collect();

        Ok(MeshBuffers {
            resolution,
            vertices,
            triangles: grid_triangles(resolution),
            uvs,
        })
    }
}
