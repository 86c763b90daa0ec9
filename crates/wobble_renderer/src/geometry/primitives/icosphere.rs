//! Icosphere generation by recursive midpoint subdivision of an icosahedron.

use std::collections::HashMap;

use glam::Vec3;

use crate::geometry::MeshData;
use wobble_core::params::MAX_TESSELLATION;

/// Generates an icosphere of the given `radius` around `center`.
///
/// Starts from the 12-vertex / 20-face regular icosahedron and applies
/// `subdivisions` rounds of midpoint subdivision, re-projecting every new
/// vertex onto the sphere. Midpoints of shared edges are deduplicated, so
/// the result is seamless: after `n` rounds the mesh has exactly
/// `20 * 4^n` triangles and `10 * 4^n + 2` vertices.
///
/// `subdivisions` above [`MAX_TESSELLATION`] is clamped (with a warning)
/// rather than rejected, so the generator stays safe even when called
/// outside the UI's slider bounds.
pub fn icosphere(center: Vec3, radius: f32, subdivisions: u32) -> MeshData {
    let subdivisions = if subdivisions > MAX_TESSELLATION {
        log::warn!(
            "icosphere subdivision level {} clamped to {}",
            subdivisions,
            MAX_TESSELLATION
        );
        MAX_TESSELLATION
    } else {
        subdivisions
    };

    // Unit icosahedron: vertices on three orthogonal golden rectangles.
    let t = (1.0 + 5.0f32.sqrt()) / 2.0;
    let base = [
        Vec3::new(-1.0, t, 0.0),
        Vec3::new(1.0, t, 0.0),
        Vec3::new(-1.0, -t, 0.0),
        Vec3::new(1.0, -t, 0.0),
        Vec3::new(0.0, -1.0, t),
        Vec3::new(0.0, 1.0, t),
        Vec3::new(0.0, -1.0, -t),
        Vec3::new(0.0, 1.0, -t),
        Vec3::new(t, 0.0, -1.0),
        Vec3::new(t, 0.0, 1.0),
        Vec3::new(-t, 0.0, -1.0),
        Vec3::new(-t, 0.0, 1.0),
    ];

    let mut positions: Vec<Vec3> = base
        .iter()
        .map(|v| v.normalize() * radius + center)
        .collect();

    // CCW when viewed from outside.
    #[rustfmt::skip]
    let mut faces: Vec<[u32; 3]> = vec![
        [0, 11, 5], [0, 5, 1], [0, 1, 7], [0, 7, 10], [0, 10, 11],
        [1, 5, 9], [5, 11, 4], [11, 10, 2], [10, 7, 6], [7, 1, 8],
        [3, 9, 4], [3, 4, 2], [3, 2, 6], [3, 6, 8], [3, 8, 9],
        [4, 9, 5], [2, 4, 11], [6, 2, 10], [8, 6, 7], [9, 8, 1],
    ];

    for _ in 0..subdivisions {
        // Shared edges between adjacent faces must produce the same midpoint
        // vertex; the cache is keyed on the unordered parent pair.
        let mut midpoints: HashMap<(u32, u32), u32> = HashMap::new();
        let mut next = Vec::with_capacity(faces.len() * 4);

        for [a, b, c] in faces {
            let ab = midpoint(&mut positions, &mut midpoints, a, b, center, radius);
            let bc = midpoint(&mut positions, &mut midpoints, b, c, center, radius);
            let ca = midpoint(&mut positions, &mut midpoints, c, a, center, radius);

            next.push([a, ab, ca]);
            next.push([b, bc, ab]);
            next.push([c, ca, bc]);
            next.push([ab, bc, ca]);
        }

        faces = next;
    }

    let normals = positions
        .iter()
        .map(|&p| ((p - center) / radius).to_array())
        .collect();

    MeshData {
        positions: positions.iter().map(|p| p.to_array()).collect(),
        normals,
        uvs: None,
        indices: faces.iter().flatten().copied().collect(),
    }
}

/// Returns the index of the midpoint of edge `(a, b)`, creating the vertex
/// (projected back onto the sphere) on first sight of the edge.
fn midpoint(
    positions: &mut Vec<Vec3>,
    cache: &mut HashMap<(u32, u32), u32>,
    a: u32,
    b: u32,
    center: Vec3,
    radius: f32,
) -> u32 {
    let key = (a.min(b), a.max(b));
    if let Some(&idx) = cache.get(&key) {
        return idx;
    }

    let mid = (positions[a as usize] + positions[b as usize]) * 0.5;
    let projected = (mid - center).normalize() * radius + center;

    let idx = positions.len() as u32;
    positions.push(projected);
    cache.insert(key, idx);
    idx
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(level: u32) -> (usize, usize) {
        let f = 20 * 4usize.pow(level);
        let v = 10 * 4usize.pow(level) + 2;
        (f, v)
    }

    #[test]
    fn triangle_and_vertex_counts_match_closed_form() {
        for level in 0..=MAX_TESSELLATION {
            let mesh = icosphere(Vec3::ZERO, 1.0, level);
            let (faces, verts) = counts(level);
            assert_eq!(mesh.triangle_count(), faces, "faces at level {level}");
            // the closed form only holds if shared-edge midpoints were
            // deduplicated
            assert_eq!(mesh.vertex_count(), verts, "vertices at level {level}");
            assert!(mesh.is_valid());
        }
    }

    #[test]
    fn vertices_lie_on_the_sphere() {
        let center = Vec3::new(1.0, -2.0, 0.5);
        let radius = 2.5;
        for level in 0..=4 {
            let mesh = icosphere(center, radius, level);
            for p in &mesh.positions {
                let d = (Vec3::from_array(*p) - center).length();
                assert!(
                    (d - radius).abs() < 1e-4,
                    "vertex at distance {d} from center at level {level}"
                );
            }
        }
    }

    #[test]
    fn normals_point_radially_outward() {
        let center = Vec3::new(0.0, 3.0, 0.0);
        let mesh = icosphere(center, 1.5, 2);
        for (p, n) in mesh.positions.iter().zip(&mesh.normals) {
            let radial = (Vec3::from_array(*p) - center).normalize();
            let normal = Vec3::from_array(*n);
            assert!((normal.length() - 1.0).abs() < 1e-4);
            assert!(radial.dot(normal) > 0.999);
        }
    }

    #[test]
    fn winding_is_ccw_from_outside() {
        let mesh = icosphere(Vec3::ZERO, 1.0, 3);
        for tri in mesh.indices.chunks_exact(3) {
            let a = Vec3::from_array(mesh.positions[tri[0] as usize]);
            let b = Vec3::from_array(mesh.positions[tri[1] as usize]);
            let c = Vec3::from_array(mesh.positions[tri[2] as usize]);
            let face_normal = (b - a).cross(c - a);
            let outward = (a + b + c) / 3.0;
            assert!(
                face_normal.dot(outward) > 0.0,
                "triangle {tri:?} wound clockwise"
            );
        }
    }

    #[test]
    fn oversized_level_is_clamped() {
        let mesh = icosphere(Vec3::ZERO, 1.0, MAX_TESSELLATION + 4);
        let (faces, _) = counts(MAX_TESSELLATION);
        assert_eq!(mesh.triangle_count(), faces);
    }
}
