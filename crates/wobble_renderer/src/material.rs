//! Shader-program abstraction.
//!
//! A `Material` is a compiled vertex+fragment WGSL pair plus everything the
//! renderer needs to bind it: the parameter uniform buffer, the set of
//! parameters the shader actually declares, the vertex attributes it
//! requires and an optional texture unit.
//!
//! ## Uniform policy
//! Setters only write a CPU-side cache and are legal at any time, bound or
//! not; the cache is flushed to the GPU at the start of every render call
//! that uses the material. Setting a parameter the shader does not declare
//! is a no-op, never an error, so callers can drive a uniform set across
//! materials without caring which of them consume it.

use std::borrow::Cow;
use std::sync::Arc;

use crate::geometry::vertex::{self, VertexAttributes};
use crate::pipeline::PipelineLayouts;
use crate::resources::buffer;
use crate::{RenderError, RenderResult};

bitflags::bitflags! {
    /// Parameter uniforms a material's shaders declare.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct MaterialParams: u32 {
        const TIME      = 1 << 0;
        const FREQUENCY = 1 << 1;
        const BUMPINESS = 1 << 2;
        const INTENSITY = 1 << 3;
    }
}

/// The parameter uniform block, shared by all materials. A shader that only
/// declares a prefix of the fields (e.g. worley declares just `time`) binds
/// the same buffer; wgpu only requires the buffer to be at least as large
/// as the shader's struct.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MaterialUniforms {
    pub time: i32,
    pub frequency: f32,
    pub bumpiness: f32,
    pub intensity: f32,
}

impl Default for MaterialUniforms {
    fn default() -> Self {
        Self {
            time: 0,
            frequency: 0.0,
            bumpiness: 0.0,
            intensity: 0.0,
        }
    }
}

// ── CPU-side uniform cache ────────────────────────────────────────────────────

/// Caches setter writes until the next flush; filters out parameters the
/// material never declared.
struct UniformCache {
    declared: MaterialParams,
    values: MaterialUniforms,
    dirty: bool,
}

impl UniformCache {
    fn new(declared: MaterialParams) -> Self {
        Self {
            declared,
            values: MaterialUniforms::default(),
            dirty: true,
        }
    }

    fn set_time(&mut self, time: i32) {
        if !self.declared.contains(MaterialParams::TIME) {
            log::trace!("ignoring time write: not declared");
            return;
        }
        if self.values.time != time {
            self.values.time = time;
            self.dirty = true;
        }
    }

    fn set_f32(&mut self, param: MaterialParams, value: f32) {
        if !self.declared.contains(param) {
            log::trace!("ignoring {param:?} write: not declared");
            return;
        }
        let slot = if param == MaterialParams::FREQUENCY {
            &mut self.values.frequency
        } else if param == MaterialParams::BUMPINESS {
            &mut self.values.bumpiness
        } else if param == MaterialParams::INTENSITY {
            &mut self.values.intensity
        } else {
            return;
        };
        if *slot != value {
            *slot = value;
            self.dirty = true;
        }
    }

    /// Takes the pending values if any setter changed them since last time.
    fn take_dirty(&mut self) -> Option<MaterialUniforms> {
        if self.dirty {
            self.dirty = false;
            Some(self.values)
        } else {
            None
        }
    }
}

// ── Material ──────────────────────────────────────────────────────────────────

/// Everything needed to construct a [`Material`]. Target format and sample
/// count are filled in by `Renderer::create_material`.
pub struct MaterialDesc<'a> {
    pub name: &'a str,
    pub vertex_source: &'a str,
    pub fragment_source: &'a str,
    /// Parameters the shader pair declares; all others are no-ops.
    pub declared: MaterialParams,
    /// Vertex attributes the vertex shader consumes. Drawing a mesh that
    /// lacks one of these is rejected at draw time.
    pub required_attributes: VertexAttributes,
    /// Renderer texture unit sampled by the fragment shader, if any.
    pub texture_unit: Option<u32>,
}

pub struct Material {
    name: String,
    pipeline: wgpu::RenderPipeline,
    required_attributes: VertexAttributes,
    cache: UniformCache,
    uniform_buffer: Arc<wgpu::Buffer>,
    pub(crate) bind_group: Arc<wgpu::BindGroup>,
    texture_unit: Option<u32>,
}

impl Material {
    /// Compiles and links the shader pair into a render pipeline.
    ///
    /// WGSL validation errors are captured through a wgpu error scope and
    /// surfaced as [`RenderError::ShaderCompilation`]; a broken shader
    /// cannot render, so callers treat this as fatal.
    pub fn new(
        device: &wgpu::Device,
        layouts: &PipelineLayouts,
        desc: &MaterialDesc<'_>,
        target_format: wgpu::TextureFormat,
        sample_count: u32,
    ) -> RenderResult<Self> {
        device.push_error_scope(wgpu::ErrorFilter::Validation);

        let vs = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(&format!("{} vertex", desc.name)),
            source: wgpu::ShaderSource::Wgsl(Cow::Borrowed(desc.vertex_source)),
        });
        let fs = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(&format!("{} fragment", desc.name)),
            source: wgpu::ShaderSource::Wgsl(Cow::Borrowed(desc.fragment_source)),
        });

        let mut bind_group_layouts: Vec<&wgpu::BindGroupLayout> =
            vec![&*layouts.camera, &*layouts.material];
        if desc.texture_unit.is_some() {
            bind_group_layouts.push(&*layouts.texture);
        }

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some(&format!("{} Pipeline Layout", desc.name)),
            bind_group_layouts: &bind_group_layouts,
            push_constant_ranges: &[],
        });

        let vertex_layouts = vertex::buffer_layouts(desc.required_attributes);

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(&format!("{} Render Pipeline", desc.name)),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &vs,
                entry_point: Some("vs_main"),
                buffers: &vertex_layouts,
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &fs,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: target_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: Some(wgpu::Face::Back),
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: crate::render_target::DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState {
                count: sample_count,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
            cache: None,
        });

        if let Some(err) = pollster::block_on(device.pop_error_scope()) {
            return Err(RenderError::ShaderCompilation {
                material: desc.name.to_owned(),
                message: err.to_string(),
            });
        }

        let cache = UniformCache::new(desc.declared);
        let uniform_buffer = buffer::create_uniform(
            device,
            &format!("{} Params Buffer", desc.name),
            &cache.values,
        );
        let bind_group = Arc::new(device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(&format!("{} Params Bind Group", desc.name)),
            layout: &layouts.material,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        }));

        log::info!("compiled material `{}`", desc.name);

        Ok(Self {
            name: desc.name.to_owned(),
            pipeline,
            required_attributes: desc.required_attributes,
            cache,
            uniform_buffer,
            bind_group,
            texture_unit: desc.texture_unit,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn required_attributes(&self) -> VertexAttributes {
        self.required_attributes
    }

    pub fn texture_unit(&self) -> Option<u32> {
        self.texture_unit
    }

    // ── Typed setters (cached, flushed on render) ─────────────────────────

    pub fn set_time(&mut self, time: i32) {
        self.cache.set_time(time);
    }

    pub fn set_frequency(&mut self, value: f32) {
        self.cache.set_f32(MaterialParams::FREQUENCY, value);
    }

    pub fn set_bumpiness(&mut self, value: f32) {
        self.cache.set_f32(MaterialParams::BUMPINESS, value);
    }

    pub fn set_intensity(&mut self, value: f32) {
        self.cache.set_f32(MaterialParams::INTENSITY, value);
    }

    /// Points the material's sampler at a renderer texture unit. The caller
    /// is responsible for registering a texture at that unit before drawing.
    pub fn set_texture(&mut self, unit: u32) {
        self.texture_unit = Some(unit);
    }

    /// Writes pending uniform values to the GPU. Must run before the render
    /// pass opens (buffer writes are not allowed while encoding a pass).
    pub(crate) fn flush(&mut self, queue: &wgpu::Queue) {
        if let Some(values) = self.cache.take_dirty() {
            buffer::update_uniform(queue, &self.uniform_buffer, &values);
        }
    }

    pub(crate) fn pipeline(&self) -> &wgpu::RenderPipeline {
        &self.pipeline
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn undeclared_setter_is_a_no_op() {
        let mut cache = UniformCache::new(MaterialParams::TIME);
        cache.take_dirty();

        cache.set_f32(MaterialParams::FREQUENCY, 0.5);
        cache.set_f32(MaterialParams::BUMPINESS, 2.0);
        assert!(cache.take_dirty().is_none());
        // the ignored writes must not corrupt other values either
        assert_eq!(cache.values.frequency, 0.0);
    }

    #[test]
    fn declared_setter_holds_last_value() {
        let mut cache = UniformCache::new(MaterialParams::all());
        cache.set_f32(MaterialParams::INTENSITY, 2.0);
        cache.set_f32(MaterialParams::INTENSITY, 7.0);
        let flushed = cache.take_dirty().expect("dirty after writes");
        assert_eq!(flushed.intensity, 7.0);
    }

    #[test]
    fn unchanged_value_does_not_redirty() {
        let mut cache = UniformCache::new(MaterialParams::all());
        cache.set_time(3);
        cache.take_dirty();
        cache.set_time(3);
        assert!(cache.take_dirty().is_none());
    }

    #[test]
    fn fresh_cache_flushes_defaults_once() {
        let mut cache = UniformCache::new(MaterialParams::TIME);
        assert!(cache.take_dirty().is_some());
        assert!(cache.take_dirty().is_none());
    }
}
