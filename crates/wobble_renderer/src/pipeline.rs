//! Shared `wgpu::BindGroupLayout`s.
//!
//! Every material pipeline uses the same three groups, so the layouts are
//! created once and shared via `Arc`:
//!
//! | group | contents                              | owner            |
//! |-------|---------------------------------------|------------------|
//! | 0     | camera view-projection uniform        | `GpuCamera`      |
//! | 1     | material parameter uniform            | `Material`       |
//! | 2     | gradient texture + sampler            | renderer slot    |

use std::sync::Arc;

#[derive(Clone)]
pub struct PipelineLayouts {
    pub camera: Arc<wgpu::BindGroupLayout>,
    pub material: Arc<wgpu::BindGroupLayout>,
    pub texture: Arc<wgpu::BindGroupLayout>,
}

impl PipelineLayouts {
    pub fn new(device: &wgpu::Device) -> Self {
        // Parameters are read by both stages: the deform shader displaces in
        // the vertex stage, the worley shader animates in the fragment stage.
        let uniform_entry = |binding: u32| wgpu::BindGroupLayoutEntry {
            binding,
            visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        };

        let camera = Arc::new(
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Layout: Camera"),
                entries: &[uniform_entry(0)],
            }),
        );

        let material = Arc::new(
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Layout: Material Params"),
                entries: &[uniform_entry(0)],
            }),
        );

        let texture = Arc::new(
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Layout: Material Texture"),
                entries: &[
                    wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Texture {
                            sample_type: wgpu::TextureSampleType::Float { filterable: true },
                            view_dimension: wgpu::TextureViewDimension::D2,
                            multisampled: false,
                        },
                        count: None,
                    },
                    wgpu::BindGroupLayoutEntry {
                        binding: 1,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                        count: None,
                    },
                ],
            }),
        );

        Self {
            camera,
            material,
            texture,
        }
    }
}
