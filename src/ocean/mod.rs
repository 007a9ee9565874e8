//! Ocean surface simulation: wave field, mesh synthesis and the tick driver.

mod mesh;
mod system;
mod wave;

// Re-export public types
pub use mesh::{grid_triangles, MeshBuffers, MeshSynthesizer, Vertex};
pub use system::{OceanSystem, TickReport};
pub use wave::WaveField;
