//! GPU-side camera resources: the view-projection uniform buffer and its
//! bind group at group(0). Bridges the CPU `wobble_core::Camera` to the
//! pipelines.

use std::sync::Arc;

use glam::Mat4;
use wobble_core::Camera;

use crate::resources::buffer;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
}

impl CameraUniform {
    fn from_camera(camera: &Camera) -> Self {
        Self {
            view_proj: camera.view_proj().to_cols_array_2d(),
        }
    }
}

pub struct GpuCamera {
    uniform: CameraUniform,
    buffer: Arc<wgpu::Buffer>,
    pub bind_group: Arc<wgpu::BindGroup>,
}

impl GpuCamera {
    pub fn new(device: &wgpu::Device, layout: &wgpu::BindGroupLayout) -> Self {
        let uniform = CameraUniform {
            view_proj: Mat4::IDENTITY.to_cols_array_2d(),
        };
        let buffer = buffer::create_uniform(device, "Camera Uniform Buffer", &uniform);

        let bind_group = Arc::new(device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Camera Bind Group"),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
        }));

        Self {
            uniform,
            buffer,
            bind_group,
        }
    }

    /// Pushes the camera's current matrices to the GPU. Called by the
    /// renderer before each pass; skips the write when nothing changed.
    pub fn sync(&mut self, queue: &wgpu::Queue, camera: &Camera) {
        let fresh = CameraUniform::from_camera(camera);
        if fresh.view_proj != self.uniform.view_proj {
            self.uniform = fresh;
            buffer::update_uniform(queue, &self.buffer, &self.uniform);
        }
    }
}
