//! GPU-resident mesh: one vertex buffer per attribute plus the index list.

use std::sync::Arc;

use super::mesh::MeshData;
use super::vertex::VertexAttributes;
use crate::resources::buffer;

/// A mesh whose data has been uploaded to GPU buffers and is ready to draw.
///
/// Buffers are `Arc`-wrapped, so cloning a `GpuMesh` is cheap and never
/// copies GPU memory. There is no explicit free: when the last handle drops
/// (e.g. a tessellation change replaces the sphere), wgpu reclaims the
/// buffers. Re-binding after the CPU data changed means building a new
/// `GpuMesh`; the old one is not patched in place.
#[derive(Clone)]
pub struct GpuMesh {
    label: String,
    position_buffer: Arc<wgpu::Buffer>,
    normal_buffer: Arc<wgpu::Buffer>,
    uv_buffer: Option<Arc<wgpu::Buffer>>,
    index_buffer: Arc<wgpu::Buffer>,
    index_count: u32,
    attributes: VertexAttributes,
}

impl GpuMesh {
    /// Uploads `data` to fresh GPU buffers.
    ///
    /// Only the attribute arrays actually present in `data` get a buffer; a
    /// mesh without uvs will not advertise (or bind) a uv attribute.
    pub fn new(device: &wgpu::Device, label: &str, data: &MeshData) -> Self {
        debug_assert!(data.is_valid(), "mesh `{label}` violates its invariants");

        let position_buffer =
            buffer::create_vertex(device, &format!("{label} positions"), &data.positions);
        let normal_buffer =
            buffer::create_vertex(device, &format!("{label} normals"), &data.normals);
        let uv_buffer = data
            .uvs
            .as_ref()
            .map(|uvs| buffer::create_vertex(device, &format!("{label} uvs"), uvs));
        let index_buffer =
            buffer::create_index(device, &format!("{label} indices"), &data.indices);

        Self {
            label: label.to_owned(),
            position_buffer,
            normal_buffer,
            uv_buffer,
            index_buffer,
            index_count: data.indices.len() as u32,
            attributes: data.attributes(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn index_count(&self) -> u32 {
        self.index_count
    }

    /// Which attribute buffers this mesh can bind.
    pub fn attributes(&self) -> VertexAttributes {
        self.attributes
    }

    /// Binds the vertex buffers for `required` (a subset of this mesh's
    /// attributes, checked by the renderer before the pass opens) plus the
    /// index buffer. Slot order matches [`super::vertex::buffer_layouts`].
    pub(crate) fn bind(&self, rpass: &mut wgpu::RenderPass<'_>, required: VertexAttributes) {
        let mut slot = 0;
        if required.contains(VertexAttributes::POSITION) {
            rpass.set_vertex_buffer(slot, self.position_buffer.slice(..));
            slot += 1;
        }
        if required.contains(VertexAttributes::NORMAL) {
            rpass.set_vertex_buffer(slot, self.normal_buffer.slice(..));
            slot += 1;
        }
        if required.contains(VertexAttributes::UV) {
            if let Some(uvs) = &self.uv_buffer {
                rpass.set_vertex_buffer(slot, uvs.slice(..));
            }
        }
        rpass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
    }
}
