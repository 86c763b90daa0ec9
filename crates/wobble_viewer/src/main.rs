//! The wobble viewer: a noise-deformed icosphere with live controls.
//!
//! Scene layout follows the classic two-material setup: a worley-shaded
//! quad in the background and the deforming icosphere in front of it.
//! The control panel drives the shared [`SimParams`] block; tessellation
//! changes rebuild the sphere mesh before the next frame's draw calls.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use glam::Vec3;

use wobble_app::{App, AppContext, WobbleApp};
use wobble_core::{Camera, KeyCode, SimParams};
use wobble_gui::{CommandEffect, CommandTable, ControlPanel, PanelEvent};
use wobble_renderer::geometry::primitives;
use wobble_renderer::{
    GpuMesh, Material, MaterialDesc, MaterialParams, RenderResult, Renderer, VertexAttributes,
};

// Control and action names, shared between panel bindings, event handling
// and the command table.
const TESSELLATION: &str = "tessellation";
const MOVING_FREQUENCY: &str = "movingFrequency";
const BUMPINESS: &str = "bumpiness";
const INTENSITY: &str = "intensity";
const LOAD_SCENE: &str = "Load Scene";
const RESET: &str = "Reset";

fn assets_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../assets")
}

struct SceneMeshes {
    icosphere: GpuMesh,
    square: GpuMesh,
    cube: GpuMesh,
}

struct Materials {
    deform: Material,
    worley: Material,
}

struct Viewer {
    params: SimParams,
    /// Tessellation level the current sphere mesh was built with.
    built_tessellation: u32,
    camera: Camera,
    meshes: Option<SceneMeshes>,
    materials: Option<Materials>,
    commands: CommandTable<SimParams>,
    rebuild_requested: bool,
}

impl Viewer {
    fn new() -> Self {
        let params = SimParams::new();

        let mut commands = CommandTable::new();
        commands.register(LOAD_SCENE, |_p: &mut SimParams| CommandEffect {
            rebuild_scene: true,
        });
        commands.register(RESET, |p: &mut SimParams| {
            p.reset();
            CommandEffect::default()
        });

        Self {
            built_tessellation: params.tessellation,
            params,
            camera: Camera::new(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO),
            meshes: None,
            materials: None,
            commands,
            rebuild_requested: false,
        }
    }

    fn build_meshes(&self, renderer: &Renderer) -> SceneMeshes {
        let center = Vec3::ZERO;
        SceneMeshes {
            icosphere: renderer.upload_mesh(
                "icosphere",
                &primitives::icosphere(center, 1.0, self.params.tessellation),
            ),
            square: renderer.upload_mesh("square", &primitives::quad(center)),
            cube: renderer.upload_mesh("cube", &primitives::cube(center)),
        }
    }
}

/// Applies a named control change to the parameter block.
fn apply_control(params: &mut SimParams, name: &str, value: f32) {
    match name {
        TESSELLATION => params.set_tessellation(value.round() as u32),
        MOVING_FREQUENCY => params.moving_frequency = value,
        BUMPINESS => params.bumpiness = value,
        INTENSITY => params.intensity = value,
        other => log::warn!("change for unknown control `{other}` ignored"),
    }
}

/// Records a tessellation change, returning whether the sphere must be
/// rebuilt. `built` tracks the level of the last-built mesh, so repeated
/// frames at the same level trigger exactly one rebuild.
fn tessellation_changed(built: &mut u32, current: u32) -> bool {
    if *built != current {
        *built = current;
        true
    } else {
        false
    }
}

impl WobbleApp for Viewer {
    fn configure_panel(&mut self, panel: &mut ControlPanel) {
        panel.bind_control(TESSELLATION, 0.0, 8.0, 1.0, self.params.tessellation as f32);
        panel.bind_action(LOAD_SCENE);
        panel.bind_action(RESET);
        panel.bind_control(
            MOVING_FREQUENCY,
            0.005,
            0.05,
            0.001,
            self.params.moving_frequency,
        );
        panel.bind_control(BUMPINESS, 1.0, 10.0, 1.0, self.params.bumpiness);
        panel.bind_control(INTENSITY, 1.0, 10.0, 1.0, self.params.intensity);
    }

    fn setup(&mut self, renderer: &mut Renderer, ctx: &mut AppContext) -> anyhow::Result<()> {
        let assets = assets_dir();

        // Textures for the two materials, on fixed units 0 and 1.
        for (unit, file) in [(0, "gradient.png"), (1, "gradient2.png")] {
            let path = assets.join("textures").join(file);
            let image = wobble_assets::load_rgba8(&path)
                .with_context(|| format!("loading texture for unit {unit}"))?;
            renderer.register_texture(unit, file, image.width, image.height, &image.pixels);
        }

        let shader = |file: &str| -> anyhow::Result<String> {
            wobble_assets::load_string(assets.join("shaders").join(file))
                .with_context(|| format!("loading shader `{file}`"))
        };

        let deform = renderer.create_material(&MaterialDesc {
            name: "deform",
            vertex_source: &shader("deform.vert.wgsl")?,
            fragment_source: &shader("deform.frag.wgsl")?,
            declared: MaterialParams::all(),
            required_attributes: VertexAttributes::BASE,
            texture_unit: Some(0),
        })?;
        let worley = renderer.create_material(&MaterialDesc {
            name: "worley",
            vertex_source: &shader("worley.vert.wgsl")?,
            fragment_source: &shader("worley.frag.wgsl")?,
            declared: MaterialParams::TIME,
            required_attributes: VertexAttributes::all(),
            texture_unit: Some(1),
        })?;
        self.materials = Some(Materials { deform, worley });

        let meshes = self.build_meshes(renderer);
        log::info!(
            "scene loaded: sphere {} tris, square {} tris, cube {} tris",
            meshes.icosphere.index_count() / 3,
            meshes.square.index_count() / 3,
            meshes.cube.index_count() / 3,
        );
        self.meshes = Some(meshes);

        self.camera.set_aspect_ratio(ctx.aspect());
        self.camera.update_projection_matrix();
        Ok(())
    }

    fn update(&mut self, ctx: &mut AppContext) {
        if ctx.input.is_key_pressed(KeyCode::Escape) {
            ctx.request_exit();
            return;
        }

        for event in ctx.panel_events {
            match event {
                PanelEvent::Control { name, value } => {
                    apply_control(&mut self.params, name, *value);
                }
                PanelEvent::Action(name) => {
                    if let Some(effect) = self.commands.dispatch(name, &mut self.params) {
                        if effect.rebuild_scene {
                            self.rebuild_requested = true;
                        }
                        // reflect whatever the command did back into the UI
                        ctx.panel
                            .set_value(MOVING_FREQUENCY, self.params.moving_frequency);
                        ctx.panel.set_value(BUMPINESS, self.params.bumpiness);
                        ctx.panel.set_value(INTENSITY, self.params.intensity);
                    }
                }
            }
        }

        self.params.advance_frame();
    }

    fn draw_scene(
        &mut self,
        renderer: &mut Renderer,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        _ctx: &mut AppContext,
    ) -> RenderResult<()> {
        // Synchronous rebuilds before any draw call. A big subdivision jump
        // stalls this frame; known latency spike, accepted for a live tool.
        if self.rebuild_requested {
            self.rebuild_requested = false;
            self.built_tessellation = self.params.tessellation;
            self.meshes = Some(self.build_meshes(renderer));
            log::info!("scene rebuilt at tessellation {}", self.built_tessellation);
        } else if tessellation_changed(&mut self.built_tessellation, self.params.tessellation) {
            if let Some(meshes) = &mut self.meshes {
                // replacing the handle drops the old GPU buffers
                meshes.icosphere = renderer.upload_mesh(
                    "icosphere",
                    &primitives::icosphere(Vec3::ZERO, 1.0, self.built_tessellation),
                );
                log::info!("icosphere rebuilt at tessellation {}", self.built_tessellation);
            }
        }

        let (Some(meshes), Some(materials)) = (&self.meshes, &mut self.materials) else {
            return Ok(());
        };

        materials.worley.set_time(self.params.time);
        materials.deform.set_time(self.params.time);
        materials.deform.set_frequency(self.params.moving_frequency);
        materials.deform.set_bumpiness(self.params.bumpiness);
        materials.deform.set_intensity(self.params.intensity);

        renderer.render(
            encoder,
            view,
            &mut self.camera,
            &mut materials.worley,
            &[&meshes.square],
        )?;
        renderer.render(
            encoder,
            view,
            &mut self.camera,
            &mut materials.deform,
            &[&meshes.icosphere],
        )?;
        Ok(())
    }

    fn on_resize(&mut self, new_size: (u32, u32), _ctx: &mut AppContext) {
        let (w, h) = new_size;
        if h > 0 {
            self.camera.set_aspect_ratio(w as f32 / h as f32);
            self.camera.update_projection_matrix();
        }
    }
}

fn main() -> anyhow::Result<()> {
    wobble_app::init_logging()?;
    App::new(Viewer::new())
        .with_title("Wobble")
        .with_size(1280, 720)
        .run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use wobble_core::params::{DEFAULT_BUMPINESS, DEFAULT_FREQUENCY, DEFAULT_INTENSITY};

    #[test]
    fn controls_map_onto_params() {
        let mut p = SimParams::new();
        apply_control(&mut p, TESSELLATION, 7.0);
        apply_control(&mut p, MOVING_FREQUENCY, 0.02);
        apply_control(&mut p, BUMPINESS, 8.0);
        apply_control(&mut p, INTENSITY, 4.0);
        assert_eq!(p.tessellation, 7);
        assert_eq!(p.moving_frequency, 0.02);
        assert_eq!(p.bumpiness, 8.0);
        assert_eq!(p.intensity, 4.0);

        // unknown names change nothing
        let before = p;
        apply_control(&mut p, "volume", 11.0);
        assert_eq!(p, before);
    }

    #[test]
    fn one_rebuild_per_tessellation_change() {
        let mut built = 5;
        assert!(tessellation_changed(&mut built, 6));
        // same level again: no further rebuilds
        assert!(!tessellation_changed(&mut built, 6));
        assert!(!tessellation_changed(&mut built, 6));
        assert!(tessellation_changed(&mut built, 2));
        assert_eq!(built, 2);
    }

    #[test]
    fn reset_command_restores_defaults_and_keeps_the_rest() {
        let viewer = Viewer::new();
        let mut p = SimParams::new();
        p.tessellation = 3;
        p.moving_frequency = 0.03;
        p.bumpiness = 9.0;
        p.intensity = 7.0;
        p.advance_frame();

        let effect = viewer.commands.dispatch(RESET, &mut p).expect("registered");
        assert!(!effect.rebuild_scene);
        assert_eq!(p.moving_frequency, DEFAULT_FREQUENCY);
        assert_eq!(p.bumpiness, DEFAULT_BUMPINESS);
        assert_eq!(p.intensity, DEFAULT_INTENSITY);
        assert_eq!(p.tessellation, 3);
        assert_eq!(p.time, 1);
    }

    #[test]
    fn load_scene_command_requests_rebuild() {
        let viewer = Viewer::new();
        let mut p = SimParams::new();
        let effect = viewer
            .commands
            .dispatch(LOAD_SCENE, &mut p)
            .expect("registered");
        assert!(effect.rebuild_scene);
        // the command itself must not touch the parameters
        assert_eq!(p, SimParams::new());
    }
}
