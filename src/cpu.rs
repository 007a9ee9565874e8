//! In-memory host: a CPU mesh that derives normals/tangents, and a material
//! that records its parameters.
//!
//! Used by the headless binary and as the reference behavior for
//! `GeometryTarget` implementations backed by a real renderer.

use std::collections::HashMap;

use glam::{Vec2, Vec3, Vec4};

use crate::host::{GeometryTarget, SurfaceMaterial};
use crate::ocean::{MeshBuffers, Vertex};
use crate::params::{FloatSlot, TextureRef, TextureSlot};

/// CPU-side mesh with derived per-vertex attributes
#[derive(Clone, Debug, Default)]
pub struct CpuMesh {
    pub positions: Vec<Vec3>,
    pub uvs: Vec<Vec2>,
    pub triangles: Vec<u32>,
    /// Unit normals (empty until recalculated)
    pub normals: Vec<Vec3>,
    /// xyz = unit tangent along +u, w = bitangent sign (empty until recalculated)
    pub tangents: Vec<Vec4>,
    /// Number of meshes received
    pub uploads: u64,
}

impl CpuMesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len() / 3
    }

    /// Interleave positions and UVs for a vertex buffer
    pub fn vertices(&self) -> Vec<Vertex> {
        self.positions
            .iter()
            .zip(&self.uvs)
            .map(|(p, uv)| Vertex {
                position: p.to_array(),
                uv: uv.to_array(),
            })
            .collect()
    }

    fn triangle_corners(&self) -> impl Iterator<Item = [usize; 3]> + '_ {
        self.triangles
            .chunks_exact(3)
            .map(|t| [t[0] as usize, t[1] as usize, t[2] as usize])
    }
}

impl GeometryTarget for CpuMesh {
    fn set_buffers(&mut self, buffers: &MeshBuffers) {
        self.positions.clone_from(&buffers.vertices);
        self.uvs.clone_from(&buffers.uvs);
        self.triangles.clone_from(&buffers.triangles);
        self.normals.clear();
        self.tangents.clear();
        self.uploads += 1;
    }

    /// Area-weighted average of adjacent face normals
    fn recalculate_normals(&mut self) {
        let mut normals = vec![Vec3::ZERO; self.positions.len()];

        for [a, b, c] in self.triangle_corners() {
            let (pa, pb, pc) = (self.positions[a], self.positions[b], self.positions[c]);
            // Unnormalized cross product weights by triangle area
            let face = (pb - pa).cross(pc - pa);
            normals[a] += face;
            normals[b] += face;
            normals[c] += face;
        }

        for n in &mut normals {
            *n = n.normalize_or_zero();
        }
        self.normals = normals;
    }

    /// Per-vertex tangents from UV gradients, orthogonalized against the normal
    fn recalculate_tangents(&mut self) {
        if self.normals.len() != self.positions.len() {
            self.recalculate_normals();
        }

        let count = self.positions.len();
        let mut tan_u = vec![Vec3::ZERO; count];
        let mut tan_v = vec![Vec3::ZERO; count];

        for [a, b, c] in self.triangle_corners() {
            let e1 = self.positions[b] - self.positions[a];
            let e2 = self.positions[c] - self.positions[a];
            let d1 = self.uvs[b] - self.uvs[a];
            let d2 = self.uvs[c] - self.uvs[a];

            let det = d1.x * d2.y - d2.x * d1.y;
            if det.abs() <= f32::EPSILON {
                continue; // Degenerate UV mapping
            }
            let r = 1.0 / det;
            let sdir = (e1 * d2.y - e2 * d1.y) * r;
            let tdir = (e2 * d1.x - e1 * d2.x) * r;

            for v in [a, b, c] {
                tan_u[v] += sdir;
                tan_v[v] += tdir;
            }
        }

        self.tangents = (0..count)
            .map(|v| {
                let n = self.normals[v];
                let t = (tan_u[v] - n * n.dot(tan_u[v])).normalize_or_zero();
                let w = if n.cross(t).dot(tan_v[v]) < 0.0 {
                    -1.0
                } else {
                    1.0
                };
                t.extend(w)
            })
            .collect();
    }

    /// Reorder vertices by first use in the index buffer; unused vertices go last
    fn optimize_vertex_order(&mut self) {
        const UNSET: u32 = u32::MAX;
        let count = self.positions.len();
        let mut remap = vec![UNSET; count];
        let mut order = Vec::with_capacity(count);

        for &old in &self.triangles {
            if remap[old as usize] == UNSET {
                remap[old as usize] = order.len() as u32;
                order.push(old as usize);
            }
        }
        for old in 0..count {
            if remap[old] == UNSET {
                remap[old] = order.len() as u32;
                order.push(old);
            }
        }

        self.positions = order.iter().map(|&o| self.positions[o]).collect();
        self.uvs = order.iter().map(|&o| self.uvs[o]).collect();
        if self.normals.len() == count {
            self.normals = order.iter().map(|&o| self.normals[o]).collect();
        }
        if self.tangents.len() == count {
            self.tangents = order.iter().map(|&o| self.tangents[o]).collect();
        }
        for idx in &mut self.triangles {
            *idx = remap[*idx as usize];
        }
    }
}

/// Material that keeps the last value of every parameter
#[derive(Clone, Debug, Default)]
pub struct CpuMaterial {
    pub color: Vec4,
    pub textures: HashMap<TextureSlot, TextureRef>,
    pub floats: HashMap<FloatSlot, f32>,
    pub texture_scales: HashMap<TextureSlot, Vec2>,
    /// Number of color pushes (one per material update)
    pub updates: u64,
}

impl SurfaceMaterial for CpuMaterial {
    fn set_color(&mut self, color: Vec4) {
        self.color = color;
        self.updates += 1;
    }

    fn set_texture(&mut self, slot: TextureSlot, texture: Option<&TextureRef>) {
        match texture {
            Some(t) => {
                self.textures.insert(slot, t.clone());
            }
            None => {
                self.textures.remove(&slot);
            }
        }
    }

    fn set_float(&mut self, slot: FloatSlot, value: f32) {
        self.floats.insert(slot, value);
    }

    fn set_texture_scale(&mut self, slot: TextureSlot, scale: Vec2) {
        self.texture_scales.insert(slot, scale);
    }
}
