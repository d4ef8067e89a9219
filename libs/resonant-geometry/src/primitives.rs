//! # Primitives
//!
//! Closed, consistently wound spherical meshes. They are the test bed for the
//! DCEL (every edge has a twin) and a convenient stand-in for a loaded model.

use std::collections::HashMap;

use config::constants::EPSILON;
use glam::DVec3;

use crate::error::{GeometryError, GeometryResult};
use crate::mesh::TriangleMesh;

/// Icosahedron faces, counter-clockwise seen from outside.
const ICOSAHEDRON_FACES: [[u32; 3]; 20] = [
    [0, 11, 5],
    [0, 5, 1],
    [0, 1, 7],
    [0, 7, 10],
    [0, 10, 11],
    [1, 5, 9],
    [5, 11, 4],
    [11, 10, 2],
    [10, 7, 6],
    [7, 1, 8],
    [3, 9, 4],
    [3, 4, 2],
    [3, 2, 6],
    [3, 6, 8],
    [3, 8, 9],
    [4, 9, 5],
    [2, 4, 11],
    [6, 2, 10],
    [8, 6, 7],
    [9, 8, 1],
];

/// Creates a regular icosahedron (12 vertices, 20 faces, 30 edges).
///
/// # Example
///
/// ```rust
/// use resonant_geometry::primitives::icosahedron;
///
/// let mesh = icosahedron(1.0).unwrap();
/// assert_eq!(mesh.vertex_count(), 12);
/// assert_eq!(mesh.triangle_count(), 20);
/// ```
pub fn icosahedron(radius: f64) -> GeometryResult<TriangleMesh> {
    check_radius(radius)?;

    let t = (1.0 + 5.0_f64.sqrt()) / 2.0;
    let positions = [
        (-1.0, t, 0.0),
        (1.0, t, 0.0),
        (-1.0, -t, 0.0),
        (1.0, -t, 0.0),
        (0.0, -1.0, t),
        (0.0, 1.0, t),
        (0.0, -1.0, -t),
        (0.0, 1.0, -t),
        (t, 0.0, -1.0),
        (t, 0.0, 1.0),
        (-t, 0.0, -1.0),
        (-t, 0.0, 1.0),
    ]
    .into_iter()
    .map(|(x, y, z)| DVec3::new(x, y, z).normalize() * radius)
    .collect();

    TriangleMesh::new(positions, ICOSAHEDRON_FACES.to_vec())
}

/// Creates a geodesic sphere by repeatedly splitting each icosahedron face
/// into four and projecting the new vertices onto the sphere.
///
/// Vertex count is `10 * 4^n + 2` for `n` subdivisions.
pub fn icosphere(radius: f64, subdivisions: u32) -> GeometryResult<TriangleMesh> {
    let base = icosahedron(radius)?;
    let mut positions = base.positions().to_vec();
    let mut triangles = base.triangles().to_vec();

    for _ in 0..subdivisions {
        let mut midpoints: HashMap<(u32, u32), u32> = HashMap::new();
        let mut split = Vec::with_capacity(triangles.len() * 4);

        for [a, b, c] in triangles {
            let ab = midpoint(&mut positions, &mut midpoints, a, b, radius);
            let bc = midpoint(&mut positions, &mut midpoints, b, c, radius);
            let ca = midpoint(&mut positions, &mut midpoints, c, a, radius);
            split.extend_from_slice(&[[a, ab, ca], [b, bc, ab], [c, ca, bc], [ab, bc, ca]]);
        }
        triangles = split;
    }

    TriangleMesh::new(positions, triangles)
}

/// Returns the index of the projected midpoint of edge `a-b`, creating it once.
fn midpoint(
    positions: &mut Vec<DVec3>,
    midpoints: &mut HashMap<(u32, u32), u32>,
    a: u32,
    b: u32,
    radius: f64,
) -> u32 {
    let key = (a.min(b), a.max(b));
    *midpoints.entry(key).or_insert_with(|| {
        let mid = (positions[a as usize] + positions[b as usize]) * 0.5;
        positions.push(mid.normalize() * radius);
        (positions.len() - 1) as u32
    })
}

fn check_radius(radius: f64) -> GeometryResult<()> {
    if radius > EPSILON && radius.is_finite() {
        Ok(())
    } else {
        Err(GeometryError::InvalidRadius(radius))
    }
}
