//! Unit cube primitive.
//!
//! 24 unique vertices (4 per face, each with the face normal) and 36
//! indices. Every face is wound CCW when viewed from outside.

use glam::Vec3;

use crate::geometry::MeshData;

pub fn cube(center: Vec3) -> MeshData {
    let [cx, cy, cz] = center.to_array();
    let p = |x: f32, y: f32, z: f32| [cx + x, cy + y, cz + z];

    #[rustfmt::skip]
    let positions = vec![
        // front (z+)
        p(-1.0, -1.0,  1.0), p( 1.0, -1.0,  1.0), p( 1.0,  1.0,  1.0), p(-1.0,  1.0,  1.0),
        // back (z-)
        p( 1.0, -1.0, -1.0), p(-1.0, -1.0, -1.0), p(-1.0,  1.0, -1.0), p( 1.0,  1.0, -1.0),
        // left (x-)
        p(-1.0, -1.0, -1.0), p(-1.0, -1.0,  1.0), p(-1.0,  1.0,  1.0), p(-1.0,  1.0, -1.0),
        // right (x+)
        p( 1.0, -1.0,  1.0), p( 1.0, -1.0, -1.0), p( 1.0,  1.0, -1.0), p( 1.0,  1.0,  1.0),
        // top (y+)
        p(-1.0,  1.0,  1.0), p( 1.0,  1.0,  1.0), p( 1.0,  1.0, -1.0), p(-1.0,  1.0, -1.0),
        // bottom (y-)
        p(-1.0, -1.0, -1.0), p( 1.0, -1.0, -1.0), p( 1.0, -1.0,  1.0), p(-1.0, -1.0,  1.0),
    ];

    let face_normals: [[f32; 3]; 6] = [
        [0.0, 0.0, 1.0],
        [0.0, 0.0, -1.0],
        [-1.0, 0.0, 0.0],
        [1.0, 0.0, 0.0],
        [0.0, 1.0, 0.0],
        [0.0, -1.0, 0.0],
    ];
    let normals = face_normals
        .iter()
        .flat_map(|n| std::iter::repeat(*n).take(4))
        .collect();

    let indices = (0..6u32)
        .flat_map(|f| {
            let base = f * 4;
            [base, base + 1, base + 2, base, base + 2, base + 3]
        })
        .collect();

    MeshData {
        positions,
        normals,
        uvs: None,
        indices,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cube_topology() {
        let m = cube(Vec3::ZERO);
        assert!(m.is_valid());
        assert_eq!(m.vertex_count(), 24);
        assert_eq!(m.triangle_count(), 12);
    }

    #[test]
    fn faces_wound_ccw_with_matching_normals() {
        let m = cube(Vec3::new(2.0, 0.0, -1.0));
        for tri in m.indices.chunks_exact(3) {
            let a = Vec3::from_array(m.positions[tri[0] as usize]);
            let b = Vec3::from_array(m.positions[tri[1] as usize]);
            let c = Vec3::from_array(m.positions[tri[2] as usize]);
            let n = Vec3::from_array(m.normals[tri[0] as usize]);
            let winding = (b - a).cross(c - a);
            assert!(winding.dot(n) > 0.0, "triangle {tri:?} disagrees with its normal");
        }
    }
}
