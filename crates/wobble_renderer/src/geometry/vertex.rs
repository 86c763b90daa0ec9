//! Vertex attribute sets and the matching GPU buffer layouts.
//!
//! Meshes store one array per attribute and upload each to its own vertex
//! buffer, so a pipeline only binds the attributes its shader declares.
//! Slots are assigned in the canonical POSITION, NORMAL, UV order over the
//! attributes a material requires; shader locations are fixed per attribute
//! (0 = position, 1 = normal, 2 = uv) and must match the WGSL inputs.

use std::mem::size_of;

bitflags::bitflags! {
    /// Which per-vertex attribute arrays a mesh carries, or a material
    /// requires.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct VertexAttributes: u32 {
        const POSITION = 1 << 0;
        const NORMAL   = 1 << 1;
        const UV       = 1 << 2;
    }
}

impl VertexAttributes {
    /// The attribute set every drawable mesh has.
    pub const BASE: VertexAttributes = VertexAttributes::POSITION.union(VertexAttributes::NORMAL);
}

const POSITION_ATTRS: [wgpu::VertexAttribute; 1] = [wgpu::VertexAttribute {
    format: wgpu::VertexFormat::Float32x3,
    offset: 0,
    shader_location: 0,
}];

const NORMAL_ATTRS: [wgpu::VertexAttribute; 1] = [wgpu::VertexAttribute {
    format: wgpu::VertexFormat::Float32x3,
    offset: 0,
    shader_location: 1,
}];

const UV_ATTRS: [wgpu::VertexAttribute; 1] = [wgpu::VertexAttribute {
    format: wgpu::VertexFormat::Float32x2,
    offset: 0,
    shader_location: 2,
}];

/// Returns the vertex buffer layouts for `required`, in canonical order.
/// Pass the result to `wgpu::VertexState::buffers` when building a pipeline.
pub fn buffer_layouts(required: VertexAttributes) -> Vec<wgpu::VertexBufferLayout<'static>> {
    let mut layouts = Vec::new();
    if required.contains(VertexAttributes::POSITION) {
        layouts.push(wgpu::VertexBufferLayout {
            array_stride: size_of::<[f32; 3]>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &POSITION_ATTRS,
        });
    }
    if required.contains(VertexAttributes::NORMAL) {
        layouts.push(wgpu::VertexBufferLayout {
            array_stride: size_of::<[f32; 3]>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &NORMAL_ATTRS,
        });
    }
    if required.contains(VertexAttributes::UV) {
        layouts.push(wgpu::VertexBufferLayout {
            array_stride: size_of::<[f32; 2]>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &UV_ATTRS,
        });
    }
    layouts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layouts_follow_canonical_order() {
        let layouts = buffer_layouts(VertexAttributes::all());
        assert_eq!(layouts.len(), 3);
        assert_eq!(layouts[0].attributes[0].shader_location, 0);
        assert_eq!(layouts[1].attributes[0].shader_location, 1);
        assert_eq!(layouts[2].attributes[0].shader_location, 2);
    }

    #[test]
    fn uv_layout_omitted_when_not_required() {
        let layouts = buffer_layouts(VertexAttributes::BASE);
        assert_eq!(layouts.len(), 2);
        assert!(layouts
            .iter()
            .all(|l| l.attributes[0].shader_location != 2));
    }
}
