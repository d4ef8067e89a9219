//! Vertex normals over the welded topology.

use glam::DVec3;
use resonant_geometry::triangle_double_area;

use crate::dcel::Dcel;
use crate::error::{DcelError, DcelResult};

impl Dcel {
    /// Area-weighted vertex normals for `positions` (one per vertex record).
    ///
    /// Face contributions are summed on canonical vertices, using the
    /// canonical vertices' positions, and every welded-away vertex receives
    /// its representative's normal. Seams split in the input buffer therefore
    /// shade as one smooth surface.
    ///
    /// # Errors
    ///
    /// [`DcelError::PositionCount`] when `positions` does not have one entry
    /// per vertex record.
    pub fn vertex_normals(&self, positions: &[DVec3]) -> DcelResult<Vec<DVec3>> {
        let mut normals = vec![DVec3::ZERO; self.vertices.len()];
        self.vertex_normals_into(positions, &mut normals)?;
        Ok(normals)
    }

    /// Like [`Dcel::vertex_normals`], writing into an existing buffer.
    pub fn vertex_normals_into(&self, positions: &[DVec3], normals: &mut [DVec3]) -> DcelResult<()> {
        let expected = self.vertices.len();
        for actual in [positions.len(), normals.len()] {
            if actual != expected {
                return Err(DcelError::PositionCount { expected, actual });
            }
        }

        normals.fill(DVec3::ZERO);
        for face in &self.faces {
            let [a, b, c] = face.vertices.map(|v| v.index());
            let weighted = triangle_double_area(positions[a], positions[b], positions[c]);
            normals[a] += weighted;
            normals[b] += weighted;
            normals[c] += weighted;
        }

        for (i, vertex) in self.vertices.iter().enumerate() {
            normals[i] = if vertex.is_canonical() {
                normals[i].normalize_or_zero()
            } else {
                // Representatives always precede their duplicates.
                normals[vertex.index.index()]
            };
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DcelOptions;
    use approx::assert_abs_diff_eq;
    use resonant_geometry::area_weighted_normals;
    use resonant_geometry::primitives::{icosahedron, icosphere};

    #[test]
    fn test_matches_plain_normals_without_welding() {
        let mesh = icosphere(1.0, 1).unwrap();
        let dcel = Dcel::new(&mesh, &DcelOptions::default()).unwrap();
        let ours = dcel.vertex_normals(mesh.positions()).unwrap();
        let plain = area_weighted_normals(mesh.positions(), mesh.triangles());
        for (a, b) in ours.iter().zip(&plain) {
            assert_abs_diff_eq!((*a - *b).length(), 0.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_sphere_normals_point_outward() {
        let mesh = icosphere(2.0, 2).unwrap();
        let dcel = Dcel::new(&mesh, &DcelOptions::default()).unwrap();
        for (n, p) in dcel.vertex_normals(mesh.positions()).unwrap().iter().zip(mesh.positions()) {
            assert!(n.dot(p.normalize()) > 0.98);
        }
    }

    #[test]
    fn test_welded_seams_share_normals() {
        let soup = icosahedron(1.0).unwrap().to_soup();
        let welded = Dcel::new(&soup, &DcelOptions::welded(1e-4)).unwrap();
        let normals = welded.vertex_normals(soup.positions()).unwrap();
        for (n, p) in normals.iter().zip(soup.positions()) {
            // Smooth normals on a regular solid point along the position.
            assert_abs_diff_eq!(n.dot(p.normalize()), 1.0, epsilon = 1e-9);
        }

        // Without welding the soup keeps flat face normals.
        let flat = Dcel::new(&soup, &DcelOptions::default()).unwrap();
        let normals = flat.vertex_normals(soup.positions()).unwrap();
        assert!(normals[0].dot(soup.positions()[0].normalize()) < 0.99);
    }

    #[test]
    fn test_position_count_mismatch() {
        let mesh = icosahedron(1.0).unwrap();
        let dcel = Dcel::new(&mesh, &DcelOptions::default()).unwrap();
        assert_eq!(
            dcel.vertex_normals(&mesh.positions()[..5]),
            Err(DcelError::PositionCount {
                expected: 12,
                actual: 5
            })
        );
    }
}
