//! Unit quad in the XY plane, facing +Z.

use glam::Vec3;

use crate::geometry::MeshData;

/// Generates a 2x2 quad centred at `center`, normal +Z, with a full 0..1
/// uv parameterization. Two triangles, CCW from the front.
pub fn quad(center: Vec3) -> MeshData {
    let [cx, cy, cz] = center.to_array();

    let positions = vec![
        [cx - 1.0, cy - 1.0, cz],
        [cx + 1.0, cy - 1.0, cz],
        [cx + 1.0, cy + 1.0, cz],
        [cx - 1.0, cy + 1.0, cz],
    ];
    let normals = vec![[0.0, 0.0, 1.0]; 4];
    let uvs = vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];

    MeshData {
        positions,
        normals,
        uvs: Some(uvs),
        indices: vec![0, 1, 2, 0, 2, 3],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::VertexAttributes;

    #[test]
    fn quad_topology() {
        let m = quad(Vec3::ZERO);
        assert!(m.is_valid());
        assert_eq!(m.vertex_count(), 4);
        assert_eq!(m.triangle_count(), 2);
        assert_eq!(m.attributes(), VertexAttributes::all());
    }

    #[test]
    fn quad_is_centred() {
        let c = Vec3::new(3.0, -1.0, 2.0);
        let m = quad(c);
        let sum: Vec3 = m
            .positions
            .iter()
            .map(|p| Vec3::from_array(*p))
            .sum::<Vec3>()
            / 4.0;
        assert!((sum - c).length() < 1e-6);
    }
}
