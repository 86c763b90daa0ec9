//! `wobble_renderer`: GPU rendering for the wobble viewer.
//!
//! | Module          | Responsibility                                      |
//! |-----------------|-----------------------------------------------------|
//! | `geometry`      | CPU mesh data, generators, GPU mesh binding         |
//! | `resources`     | Low-level buffer / texture allocation helpers       |
//! | `camera_gpu`    | Camera uniform buffer + bind group                  |
//! | `material`      | Shader-program abstraction with cached uniforms     |
//! | `pipeline`      | Shared bind-group layouts                           |
//! | `render_target` | MSAA color + depth attachments                      |
//!
//! The per-frame contract is deliberately small: `begin_frame` hands out a
//! command encoder, `clear` resets color and depth, and each `render` call
//! binds one material once and draws a list of meshes with it.

pub mod camera_gpu;
pub mod geometry;
pub mod material;
pub mod pipeline;
pub mod render_target;
pub mod resources;

pub use geometry::{GpuMesh, MeshData, VertexAttributes};
pub use material::{Material, MaterialDesc, MaterialParams};
pub use pipeline::PipelineLayouts;
pub use render_target::RenderTarget;

pub use glam;

use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;
use wobble_core::{Camera, Color};

use camera_gpu::GpuCamera;
use resources::texture::Texture2d;

/// Draw-time and startup errors.
///
/// Shader compilation failures are fatal for the affected material; the
/// other variants are usage errors: contract violations by the caller, not
/// runtime conditions to recover from.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("shader compilation failed for material `{material}`: {message}")]
    ShaderCompilation { material: String, message: String },

    #[error("mesh `{mesh}` lacks vertex attributes {missing:?} required by material `{material}`")]
    MissingAttributes {
        material: String,
        mesh: String,
        missing: VertexAttributes,
    },

    #[error("material `{material}` samples texture unit {unit}, but nothing is registered there")]
    TextureUnitUnbound { material: String, unit: u32 },
}

pub type RenderResult<T> = Result<T, RenderError>;

/// Top-level renderer: owns the render target, the shared layouts, the
/// camera uniform and the numbered texture units materials sample from.
pub struct Renderer {
    device: Arc<wgpu::Device>,
    queue: Arc<wgpu::Queue>,
    layouts: PipelineLayouts,
    render_target: RenderTarget,
    gpu_camera: GpuCamera,
    textures: HashMap<u32, Texture2d>,
    clear_color: wgpu::Color,
    format: wgpu::TextureFormat,
}

impl Renderer {
    pub fn new(
        device: Arc<wgpu::Device>,
        queue: Arc<wgpu::Queue>,
        width: u32,
        height: u32,
        format: wgpu::TextureFormat,
        sample_count: u32,
    ) -> Self {
        let layouts = PipelineLayouts::new(&device);
        let render_target = RenderTarget::new(&device, width, height, format, sample_count);
        let gpu_camera = GpuCamera::new(&device, &layouts.camera);

        Self {
            device,
            queue,
            layouts,
            render_target,
            gpu_camera,
            textures: HashMap::new(),
            clear_color: wgpu::Color {
                r: 0.2,
                g: 0.2,
                b: 0.2,
                a: 1.0,
            },
            format,
        }
    }

    pub fn set_clear_color(&mut self, color: Color) {
        self.clear_color = color.into();
    }

    // ── Resource construction ─────────────────────────────────────────────

    /// Compiles a material against this renderer's surface format and MSAA
    /// configuration.
    pub fn create_material(&self, desc: &MaterialDesc<'_>) -> RenderResult<Material> {
        Material::new(
            &self.device,
            &self.layouts,
            desc,
            self.format,
            self.render_target.sample_count(),
        )
    }

    /// Uploads CPU mesh data to GPU buffers.
    pub fn upload_mesh(&self, label: &str, data: &MeshData) -> GpuMesh {
        log::debug!(
            "uploading mesh `{label}`: {} vertices, {} triangles",
            data.vertex_count(),
            data.triangle_count()
        );
        GpuMesh::new(&self.device, label, data)
    }

    /// Registers a decoded RGBA8 image at a numbered texture unit.
    /// Replaces (and releases) any texture previously registered there.
    pub fn register_texture(&mut self, unit: u32, label: &str, width: u32, height: u32, pixels: &[u8]) {
        let tex = Texture2d::from_rgba8(
            &self.device,
            &self.queue,
            &self.layouts.texture,
            label,
            width,
            height,
            pixels,
        );
        log::info!("texture unit {unit}: `{label}` ({width}x{height})");
        self.textures.insert(unit, tex);
    }

    // ── Frame API ─────────────────────────────────────────────────────────

    /// Allocates the command encoder for the current frame.
    pub fn begin_frame(&self) -> wgpu::CommandEncoder {
        self.device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Frame Encoder"),
            })
    }

    /// Records a pass that clears color and depth. Call once per frame
    /// before any `render`.
    pub fn clear(&mut self, encoder: &mut wgpu::CommandEncoder, surface_view: &wgpu::TextureView) {
        let (color_view, resolve_target) = self.render_target.color_attachment_views(surface_view);
        let _rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Clear Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: color_view,
                resolve_target,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(self.clear_color),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: self.render_target.depth_view(),
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            occlusion_query_set: None,
            timestamp_writes: None,
        });
    }

    /// Draws `meshes` with `material`, binding the pipeline once and issuing
    /// one indexed draw per mesh.
    ///
    /// Uniform uploads happen before the pass opens: the camera is lazily
    /// recomputed and synced, then the material's cached parameter values
    /// are flushed. Fails without recording anything if a mesh lacks an
    /// attribute the material requires, or the material's texture unit has
    /// no registered texture.
    pub fn render(
        &mut self,
        encoder: &mut wgpu::CommandEncoder,
        surface_view: &wgpu::TextureView,
        camera: &mut Camera,
        material: &mut Material,
        meshes: &[&GpuMesh],
    ) -> RenderResult<()> {
        // Validate the attribute contract up front so a mismatch cannot
        // leave a half-recorded pass behind.
        for mesh in meshes {
            let missing = material.required_attributes() - mesh.attributes();
            if !missing.is_empty() {
                return Err(RenderError::MissingAttributes {
                    material: material.name().to_owned(),
                    mesh: mesh.label().to_owned(),
                    missing,
                });
            }
        }

        let texture_bind_group = match material.texture_unit() {
            Some(unit) => Some(
                self.textures
                    .get(&unit)
                    .map(|t| t.bind_group.clone())
                    .ok_or_else(|| RenderError::TextureUnitUnbound {
                        material: material.name().to_owned(),
                        unit,
                    })?,
            ),
            None => None,
        };

        // Upload phase: all writes must finish before the pass records.
        camera.update();
        self.gpu_camera.sync(&self.queue, camera);
        material.flush(&self.queue);

        let (color_view, resolve_target) = self.render_target.color_attachment_views(surface_view);
        let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some(material.name()),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: color_view,
                resolve_target,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: self.render_target.depth_view(),
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            occlusion_query_set: None,
            timestamp_writes: None,
        });

        rpass.set_pipeline(material.pipeline());
        rpass.set_bind_group(0, &*self.gpu_camera.bind_group, &[]);
        rpass.set_bind_group(1, &*material.bind_group, &[]);
        if let Some(bg) = &texture_bind_group {
            rpass.set_bind_group(2, &**bg, &[]);
        }

        for mesh in meshes {
            mesh.bind(&mut rpass, material.required_attributes());
            rpass.draw_indexed(0..mesh.index_count(), 0, 0..1);
        }

        Ok(())
    }

    /// Recreates the size-dependent attachments. The caller owns the camera
    /// and must update its aspect ratio separately.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.render_target.resize(&self.device, width, height);
    }
}
