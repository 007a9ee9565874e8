//! Boundary with the rendering host.
//!
//! The ocean core only produces data. Everything that touches a scene graph,
//! a GPU mesh or a material object sits behind these traits.

use std::time::Instant;

use glam::{Vec2, Vec4};

use crate::ocean::MeshBuffers;
use crate::params::{FloatSlot, TextureRef, TextureSlot};

/// Renderable mesh owned by the host
pub trait GeometryTarget {
    /// Replace the mesh contents with a complete buffer triple
    fn set_buffers(&mut self, buffers: &MeshBuffers);

    fn recalculate_normals(&mut self);

    fn recalculate_tangents(&mut self);

    /// Reorder vertices for the host's vertex cache
    fn optimize_vertex_order(&mut self);
}

/// Named-parameter material owned by the host
pub trait SurfaceMaterial {
    fn set_color(&mut self, color: Vec4);
    fn set_texture(&mut self, slot: TextureSlot, texture: Option<&TextureRef>);
    fn set_float(&mut self, slot: FloatSlot, value: f32);
    fn set_texture_scale(&mut self, slot: TextureSlot, scale: Vec2);
}

/// One frame's worth of time from the driving context
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameTick {
    /// Elapsed seconds since the previous tick
    pub delta_s: f32,

    /// Live simulation (true) or static/edit preview (false)
    pub is_running: bool,
}

impl FrameTick {
    pub fn running(delta_s: f32) -> Self {
        Self {
            delta_s,
            is_running: true,
        }
    }

    pub fn paused() -> Self {
        Self {
            delta_s: 0.0,
            is_running: false,
        }
    }
}

/// Source of per-frame time
pub trait Clock {
    fn tick(&mut self) -> FrameTick;
}

/// Constant time step (headless runs, recording, tests)
#[derive(Clone, Copy, Debug)]
pub struct FixedStepClock {
    pub step_s: f32,
    pub is_running: bool,
}

impl FixedStepClock {
    pub fn new(fps: u32) -> Self {
        Self {
            step_s: 1.0 / fps.max(1) as f32,
            is_running: true,
        }
    }
}

impl Clock for FixedStepClock {
    fn tick(&mut self) -> FrameTick {
        FrameTick {
            delta_s: self.step_s,
            is_running: self.is_running,
        }
    }
}

/// Real elapsed time between successive ticks
#[derive(Debug)]
pub struct WallClock {
    last: Instant,
    pub is_running: bool,
}

impl WallClock {
    pub fn new() -> Self {
        Self {
            last: Instant::now(),
            is_running: true,
        }
    }
}

impl Default for WallClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for WallClock {
    fn tick(&mut self) -> FrameTick {
        let now = Instant::now();
        let delta_s = (now - self.last).as_secs_f32();
        self.last = now;
        FrameTick {
            delta_s,
            is_running: self.is_running,
        }
    }
}
