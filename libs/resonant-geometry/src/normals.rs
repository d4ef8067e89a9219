//! # Normals
//!
//! Per-face and per-vertex normal computation.

use glam::DVec3;

/// Unnormalized normal of a triangle; its length is twice the triangle area.
#[inline]
pub fn triangle_double_area(a: DVec3, b: DVec3, c: DVec3) -> DVec3 {
    (b - a).cross(c - a)
}

/// Unit normal of a triangle, zero when the triangle is degenerate.
#[inline]
pub fn face_normal(a: DVec3, b: DVec3, c: DVec3) -> DVec3 {
    triangle_double_area(a, b, c).normalize_or_zero()
}

/// Area-weighted vertex normals.
///
/// Each triangle adds its unnormalized cross product to its three corners,
/// then every sum is normalized. Vertices touched by no triangle (or only by
/// degenerate ones) keep a zero normal.
pub fn area_weighted_normals(positions: &[DVec3], triangles: &[[u32; 3]]) -> Vec<DVec3> {
    let mut normals = vec![DVec3::ZERO; positions.len()];

    for tri in triangles {
        let normal = triangle_double_area(
            positions[tri[0] as usize],
            positions[tri[1] as usize],
            positions[tri[2] as usize],
        );
        for &corner in tri {
            normals[corner as usize] += normal;
        }
    }

    for normal in &mut normals {
        *normal = normal.normalize_or_zero();
    }
    normals
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_face_normal_ccw_points_up() {
        let n = face_normal(DVec3::ZERO, DVec3::X, DVec3::Y);
        assert_abs_diff_eq!(n.z, 1.0);
    }

    #[test]
    fn test_degenerate_face_normal_is_zero() {
        let n = face_normal(DVec3::ZERO, DVec3::X, DVec3::X * 2.0);
        assert_eq!(n, DVec3::ZERO);
    }

    #[test]
    fn test_shared_vertex_averages_faces() {
        // Two faces folded 90 degrees along the X axis.
        let positions = vec![DVec3::ZERO, DVec3::X, DVec3::Y, DVec3::Z];
        let triangles = vec![[0, 1, 2], [0, 3, 1]];
        let normals = area_weighted_normals(&positions, &triangles);

        let expected = DVec3::new(0.0, 1.0, 1.0).normalize();
        assert_abs_diff_eq!(normals[0].y, expected.y, epsilon = 1e-12);
        assert_abs_diff_eq!(normals[0].z, expected.z, epsilon = 1e-12);
        assert_abs_diff_eq!(normals[2].z, 1.0);
        assert_abs_diff_eq!(normals[3].y, 1.0);
    }

    #[test]
    fn test_unreferenced_vertex_keeps_zero_normal() {
        let positions = vec![DVec3::ZERO, DVec3::X, DVec3::Y, DVec3::ONE];
        let normals = area_weighted_normals(&positions, &[[0, 1, 2]]);
        assert_eq!(normals[3], DVec3::ZERO);
    }
}
