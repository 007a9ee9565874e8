//! Per-tick driver: synthesize, publish, push material, advance phase.

use glam::Vec2;

use super::mesh::{MeshBuffers, MeshSynthesizer};
use super::wave::WaveField;
use crate::error::{ConfigError, OceanError};
use crate::host::{FrameTick, GeometryTarget, SurfaceMaterial};
use crate::params::{validate_resolution, MaterialParams, OceanConfig, Octave};

/// What happened during one tick
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TickReport {
    /// A new mesh reached the geometry target
    pub published: bool,

    /// Material parameters were pushed this tick
    pub material_pushed: bool,

    /// Phase every vertex of this tick was sampled at
    pub phase: f32,

    /// Phase after the tick's advance
    pub next_phase: f32,

    /// (min, max) height of the published mesh
    pub height_range: Option<(f32, f32)>,
}

/// Ocean surface: wave field, mesh synthesis and host publication
pub struct OceanSystem {
    field: WaveField,
    synth: MeshSynthesizer,
    resolution: usize,
    material: MaterialParams,
    material_dirty: bool,
    published: Option<MeshBuffers>,
    skipped_ticks: u64,
}

impl OceanSystem {
    /// Create new ocean system; every parameter is validated up front
    pub fn new(config: &OceanConfig, material: MaterialParams) -> Result<Self, ConfigError> {
        config.validate()?;
        material.validate()?;
        let field = WaveField::new(config)?;

        log::info!(
            "Ocean: {}x{} grid, {} octaves, time multiplier {}",
            config.mesh_resolution,
            config.mesh_resolution,
            config.octaves.len(),
            config.time_multiplier
        );

        Ok(Self {
            field,
            synth: MeshSynthesizer::new(config.parallel),
            resolution: config.mesh_resolution,
            material,
            material_dirty: true,
            published: None,
            skipped_ticks: 0,
        })
    }

    pub fn field(&self) -> &WaveField {
        &self.field
    }

    pub fn resolution(&self) -> usize {
        self.resolution
    }

    pub fn material(&self) -> &MaterialParams {
        &self.material
    }

    /// Last mesh handed to the geometry target
    pub fn last_published(&self) -> Option<&MeshBuffers> {
        self.published.as_ref()
    }

    /// Ticks dropped because of a domain error
    pub fn skipped_ticks(&self) -> u64 {
        self.skipped_ticks
    }

    pub fn set_resolution(&mut self, resolution: usize) -> Result<(), ConfigError> {
        validate_resolution(resolution)?;
        self.resolution = resolution;
        Ok(())
    }

    /// Replace the whole octave set
    pub fn set_octaves(&mut self, octaves: Vec<Octave>) -> Result<(), ConfigError> {
        self.field.set_octaves(octaves)
    }

    pub fn set_time_multiplier(&mut self, time_multiplier: f32) -> Result<(), ConfigError> {
        self.field.set_time_multiplier(time_multiplier)
    }

    /// Replace the material; it is pushed on the next published tick
    pub fn set_material(&mut self, material: MaterialParams) -> Result<(), ConfigError> {
        material.validate()?;
        if material != self.material {
            self.material = material;
            self.material_dirty = true;
        }
        Ok(())
    }

    /// Run one simulation tick.
    ///
    /// All vertices are sampled at the same frozen phase, the complete mesh is
    /// published, and only then is the phase advanced. A domain error skips
    /// the tick: nothing is published and the phase stays where it was.
    ///
    /// # Arguments
    /// * `tick` - Elapsed time and running flag from the clock
    /// * `scale` - Host transform scale (x, z), applied to the noise domain
    /// * `target` - Mesh receiving the buffers
    /// * `material` - Material receiving parameter updates
    pub fn tick(
        &mut self,
        tick: FrameTick,
        scale: Vec2,
        target: &mut dyn GeometryTarget,
        material: &mut dyn SurfaceMaterial,
    ) -> Result<TickReport, ConfigError> {
        let phase = self.field.global_phase();

        let mesh = match self.synth.synthesize(&self.field, self.resolution, scale) {
            Ok(mesh) => mesh,
            Err(OceanError::Config(e)) => return Err(e),
            Err(OceanError::Domain(e)) => {
                self.skipped_ticks += 1;
                log::warn!(
                    "Skipping ocean tick at phase {}: {} (keeping previous mesh)",
                    phase,
                    e
                );
                return Ok(TickReport {
                    published: false,
                    material_pushed: false,
                    phase,
                    next_phase: phase,
                    height_range: None,
                });
            }
        };

        let height_range = mesh.height_range();
        Self::publish(&mesh, target);
        self.published = Some(mesh);

        let material_pushed = self.push_material(material);

        self.field.advance_phase(tick);
        let next_phase = self.field.global_phase();

        log::debug!(
            "Ocean tick: phase {:.4} -> {:.4}, heights {:?}",
            phase,
            next_phase,
            height_range
        );

        Ok(TickReport {
            published: true,
            material_pushed,
            phase,
            next_phase,
            height_range,
        })
    }

    /// Regenerate for an edit preview. Same as a paused tick: the phase never moves.
    pub fn preview(
        &mut self,
        scale: Vec2,
        target: &mut dyn GeometryTarget,
        material: &mut dyn SurfaceMaterial,
    ) -> Result<TickReport, ConfigError> {
        self.tick(FrameTick::paused(), scale, target, material)
    }

    fn publish(mesh: &MeshBuffers, target: &mut dyn GeometryTarget) {
        target.set_buffers(mesh);
        target.recalculate_normals();
        target.recalculate_tangents();
        target.optimize_vertex_order();
    }

    fn push_material(&mut self, material: &mut dyn SurfaceMaterial) -> bool {
        if !self.material_dirty {
            return false;
        }
        self.material.apply(material);
        self.material_dirty = false;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;

    use crate::params::{FloatSlot, TextureRef, TextureSlot};

    #[derive(Default)]
    struct RecordingTarget {
        calls: Vec<&'static str>,
        buffers: Option<MeshBuffers>,
    }

    impl GeometryTarget for RecordingTarget {
        fn set_buffers(&mut self, buffers: &MeshBuffers) {
            self.calls.push("set_buffers");
            self.buffers = Some(buffers.clone());
        }
        fn recalculate_normals(&mut self) {
            self.calls.push("normals");
        }
        fn recalculate_tangents(&mut self) {
            self.calls.push("tangents");
        }
        fn optimize_vertex_order(&mut self) {
            self.calls.push("optimize");
        }
    }

    #[derive(Default)]
    struct CountingMaterial {
        colors: usize,
    }

    impl SurfaceMaterial for CountingMaterial {
        fn set_color(&mut self, _color: Vec4) {
            self.colors += 1;
        }
        fn set_texture(&mut self, _slot: TextureSlot, _texture: Option<&TextureRef>) {}
        fn set_float(&mut self, _slot: FloatSlot, _value: f32) {}
        fn set_texture_scale(&mut self, _slot: TextureSlot, _scale: Vec2) {}
    }

    fn system(time_multiplier: f32) -> OceanSystem {
        let config = OceanConfig {
            mesh_resolution: 8,
            time_multiplier,
            ..OceanConfig::default()
        };
        OceanSystem::new(&config, MaterialParams::default()).unwrap()
    }

    #[test]
    fn test_tick_publishes_then_advances() {
        let mut ocean = system(0.5);
        let mut target = RecordingTarget::default();
        let mut material = CountingMaterial::default();

        let report = ocean
            .tick(FrameTick::running(1.0), Vec2::ONE, &mut target, &mut material)
            .unwrap();

        assert!(report.published);
        assert_eq!(report.phase, 0.0);
        assert_eq!(report.next_phase, 0.5);
        assert_eq!(ocean.field().global_phase(), 0.5);
        assert_eq!(
            target.calls,
            vec!["set_buffers", "normals", "tangents", "optimize"]
        );
        assert_eq!(target.buffers.as_ref(), ocean.last_published());
    }

    #[test]
    fn test_paused_tick_keeps_phase() {
        let mut ocean = system(0.5);
        let mut target = RecordingTarget::default();
        let mut material = CountingMaterial::default();

        let tick = FrameTick {
            delta_s: 1.0,
            is_running: false,
        };
        let report = ocean
            .tick(tick, Vec2::ONE, &mut target, &mut material)
            .unwrap();

        assert!(report.published);
        assert_eq!(ocean.field().global_phase(), 0.0);
    }

    #[test]
    fn test_preview_is_stable() {
        let mut ocean = system(1.0);
        let mut target = RecordingTarget::default();
        let mut material = CountingMaterial::default();

        ocean.preview(Vec2::ONE, &mut target, &mut material).unwrap();
        let first = ocean.last_published().cloned();
        ocean.preview(Vec2::ONE, &mut target, &mut material).unwrap();

        assert_eq!(first.as_ref(), ocean.last_published());
    }

    #[test]
    fn test_material_pushed_only_on_change() {
        let mut ocean = system(1.0);
        let mut target = RecordingTarget::default();
        let mut material = CountingMaterial::default();
        let tick = FrameTick::running(0.016);

        let first = ocean
            .tick(tick, Vec2::ONE, &mut target, &mut material)
            .unwrap();
        let second = ocean
            .tick(tick, Vec2::ONE, &mut target, &mut material)
            .unwrap();
        assert!(first.material_pushed);
        assert!(!second.material_pushed);

        ocean
            .set_material(MaterialParams {
                smoothness: 0.2,
                ..MaterialParams::default()
            })
            .unwrap();
        let third = ocean
            .tick(tick, Vec2::ONE, &mut target, &mut material)
            .unwrap();
        assert!(third.material_pushed);
        assert_eq!(material.colors, 2);
    }

    #[test]
    fn test_domain_error_keeps_previous_mesh_and_phase() {
        let mut ocean = system(1.0);
        let mut target = RecordingTarget::default();
        let mut material = CountingMaterial::default();

        ocean
            .tick(FrameTick::running(0.1), Vec2::ONE, &mut target, &mut material)
            .unwrap();
        let good = ocean.last_published().cloned();
        let phase = ocean.field().global_phase();

        let huge = Octave {
            amplitude: f32::MAX,
            wavelength: 1.0,
            speed: 0.0,
            direction: Vec2::new(1.0, 0.0),
            noise_amount: 0.0,
            noise_resolution: 1.0,
        };
        ocean.set_octaves(vec![huge, huge]).unwrap();
        target.calls.clear();

        let report = ocean
            .tick(FrameTick::running(0.1), Vec2::ONE, &mut target, &mut material)
            .unwrap();

        assert!(!report.published);
        assert!(target.calls.is_empty());
        assert_eq!(ocean.last_published().cloned(), good);
        assert_eq!(ocean.field().global_phase(), phase);
        assert_eq!(ocean.skipped_ticks(), 1);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = OceanConfig {
            mesh_resolution: 3,
            ..OceanConfig::default()
        };
        assert_eq!(
            OceanSystem::new(&config, MaterialParams::default()).err(),
            Some(ConfigError::ResolutionOutOfRange(3))
        );

        let mut ocean = system(1.0);
        assert!(ocean.set_resolution(300).is_err());
        assert_eq!(ocean.resolution(), 8);
    }
}
