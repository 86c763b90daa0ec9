//! CPU-side mesh data, produced by the generators in
//! [`crate::geometry::primitives`] and consumed by [`crate::geometry::GpuMesh`].

use super::vertex::VertexAttributes;

/// Pure vertex/index data with no GPU dependency.
///
/// Positions and normals are always present; uvs are optional and only
/// carried by meshes that have a meaningful parameterization (the quad).
/// A `MeshData` is immutable once generated: a tessellation change produces
/// a whole new value rather than editing in place.
#[derive(Debug, Clone)]
pub struct MeshData {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub uvs: Option<Vec<[f32; 2]>>,
    /// Triangle list, three indices per triangle, CCW when viewed from
    /// outside the surface.
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// The attribute arrays this mesh carries.
    pub fn attributes(&self) -> VertexAttributes {
        let mut attrs = VertexAttributes::BASE;
        if self.uvs.is_some() {
            attrs |= VertexAttributes::UV;
        }
        attrs
    }

    /// Checks the structural invariants: parallel attribute arrays, index
    /// count divisible by three, and every index in range.
    pub fn is_valid(&self) -> bool {
        let n = self.positions.len();
        if self.normals.len() != n {
            return false;
        }
        if let Some(uvs) = &self.uvs {
            if uvs.len() != n {
                return false;
            }
        }
        if self.indices.len() % 3 != 0 {
            return false;
        }
        self.indices.iter().all(|&i| (i as usize) < n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tri() -> MeshData {
        MeshData {
            positions: vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
            normals: vec![[0.0, 0.0, 1.0]; 3],
            uvs: None,
            indices: vec![0, 1, 2],
        }
    }

    #[test]
    fn valid_triangle() {
        let m = tri();
        assert!(m.is_valid());
        assert_eq!(m.vertex_count(), 3);
        assert_eq!(m.triangle_count(), 1);
        assert_eq!(m.attributes(), VertexAttributes::BASE);
    }

    #[test]
    fn out_of_range_index_is_invalid() {
        let mut m = tri();
        m.indices[2] = 3;
        assert!(!m.is_valid());
    }

    #[test]
    fn mismatched_normals_are_invalid() {
        let mut m = tri();
        m.normals.pop();
        assert!(!m.is_valid());
    }

    #[test]
    fn uvs_advertised_only_when_present() {
        let mut m = tri();
        m.uvs = Some(vec![[0.0, 0.0]; 3]);
        assert!(m.is_valid());
        assert!(m.attributes().contains(VertexAttributes::UV));
    }
}
