//! Mesh export for inspection: grayscale heightmap PNG and Wavefront OBJ.

use std::io::{self, Write};

use image::{GrayImage, Luma};

use crate::cpu::CpuMesh;
use crate::ocean::MeshBuffers;

/// Render vertex heights as a `resolution × resolution` grayscale image.
///
/// Pixel (i, j) is vertex `i + j·resolution`; heights are stretched so the
/// lowest maps to 0 and the highest to 255. A flat mesh renders mid-gray.
pub fn heightmap_image(mesh: &MeshBuffers) -> GrayImage {
    let res = mesh.resolution as u32;
    let (lo, hi) = mesh.height_range().unwrap_or((0.0, 0.0));
    let span = hi - lo;

    GrayImage::from_fn(res, res, |i, j| {
        let y = mesh.vertices[mesh.index(i as usize, j as usize)].y;
        let t = if span > 0.0 { (y - lo) / span } else { 0.5 };
        Luma([(t * 255.0).round().clamp(0.0, 255.0) as u8])
    })
}

/// Write positions, UVs, normals (when present) and faces as Wavefront OBJ
pub fn write_obj<W: Write>(mesh: &CpuMesh, out: &mut W) -> io::Result<()> {
    writeln!(
        out,
        "# ocean surface: {} vertices, {} triangles",
        mesh.vertex_count(),
        mesh.triangle_count()
    )?;

    for p in &mesh.positions {
        writeln!(out, "v {} {} {}", p.x, p.y, p.z)?;
    }
    for uv in &mesh.uvs {
        writeln!(out, "vt {} {}", uv.x, uv.y)?;
    }
    let with_normals = mesh.normals.len() == mesh.positions.len();
    if with_normals {
        for n in &mesh.normals {
            writeln!(out, "vn {} {} {}", n.x, n.y, n.z)?;
        }
    }

    // OBJ indices are 1-based
    for tri in mesh.triangles.chunks_exact(3) {
        let [a, b, c] = [tri[0] + 1, tri[1] + 1, tri[2] + 1];
        if with_normals {
            writeln!(out, "f {a}/{a}/{a} {b}/{b}/{b} {c}/{c}/{c}")?;
        } else {
            writeln!(out, "f {a}/{a} {b}/{b} {c}/{c}")?;
        }
    }

    Ok(())
}
