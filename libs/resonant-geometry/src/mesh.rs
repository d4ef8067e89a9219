//! # Triangle Mesh
//!
//! Indexed triangle mesh as handed over by a model loader: one position per
//! vertex and three vertex indices per triangle.

use glam::DVec3;

use crate::error::{GeometryError, GeometryResult};

/// An indexed triangle mesh.
///
/// Positions are stored as `f64`. Export to `f32` only happens at the
/// renderer boundary via [`TriangleMesh::positions_f32`].
///
/// # Example
///
/// ```rust
/// use resonant_geometry::TriangleMesh;
///
/// let mesh = TriangleMesh::from_flat(
///     &[0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
///     &[0, 1, 2],
/// )
/// .unwrap();
/// assert_eq!(mesh.vertex_count(), 3);
/// assert_eq!(mesh.triangle_count(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriangleMesh {
    /// Vertex positions.
    positions: Vec<DVec3>,
    /// Triangle indices (3 indices per triangle).
    triangles: Vec<[u32; 3]>,
}

impl TriangleMesh {
    /// Creates a mesh from positions and triangles, checking every index.
    pub fn new(positions: Vec<DVec3>, triangles: Vec<[u32; 3]>) -> GeometryResult<Self> {
        let vertex_count = positions.len();
        for (triangle, corners) in triangles.iter().enumerate() {
            for &index in corners {
                if index as usize >= vertex_count {
                    return Err(GeometryError::IndexOutOfRange {
                        triangle,
                        index,
                        vertex_count,
                    });
                }
            }
        }
        Ok(Self {
            positions,
            triangles,
        })
    }

    /// Creates a mesh from flat `[x, y, z, ...]` and `[i0, i1, i2, ...]` buffers.
    pub fn from_flat(positions: &[f64], indices: &[u32]) -> GeometryResult<Self> {
        if positions.len() % 3 != 0 {
            return Err(GeometryError::PositionLength {
                len: positions.len(),
            });
        }
        let positions = positions
            .chunks_exact(3)
            .map(|xyz| DVec3::new(xyz[0], xyz[1], xyz[2]))
            .collect();
        Self::new(positions, Self::triangles_from_flat(indices)?)
    }

    /// Same as [`TriangleMesh::from_flat`] for `f32` render buffers.
    pub fn from_flat_f32(positions: &[f32], indices: &[u32]) -> GeometryResult<Self> {
        if positions.len() % 3 != 0 {
            return Err(GeometryError::PositionLength {
                len: positions.len(),
            });
        }
        let positions = positions
            .chunks_exact(3)
            .map(|xyz| DVec3::new(xyz[0] as f64, xyz[1] as f64, xyz[2] as f64))
            .collect();
        Self::new(positions, Self::triangles_from_flat(indices)?)
    }

    fn triangles_from_flat(indices: &[u32]) -> GeometryResult<Vec<[u32; 3]>> {
        if indices.len() % 3 != 0 {
            return Err(GeometryError::IndexLength { len: indices.len() });
        }
        Ok(indices
            .chunks_exact(3)
            .map(|tri| [tri[0], tri[1], tri[2]])
            .collect())
    }

    /// Returns the number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Returns the number of triangles.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Returns true if the mesh has no vertices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Returns the vertex positions.
    #[inline]
    pub fn positions(&self) -> &[DVec3] {
        &self.positions
    }

    /// Returns the vertex positions for in-place updates.
    ///
    /// Topology cannot be changed through this handle.
    #[inline]
    pub fn positions_mut(&mut self) -> &mut [DVec3] {
        &mut self.positions
    }

    /// Returns the triangles.
    #[inline]
    pub fn triangles(&self) -> &[[u32; 3]] {
        &self.triangles
    }

    /// Returns the position of one vertex, `None` when out of range.
    #[inline]
    pub fn position(&self, index: u32) -> Option<DVec3> {
        self.positions.get(index as usize).copied()
    }

    /// Mean of all vertex positions.
    pub fn centroid(&self) -> DVec3 {
        crate::spherical::centroid(&self.positions)
    }

    /// Computes the axis-aligned bounding box.
    ///
    /// Returns (min, max) corners of the bounding box.
    pub fn bounding_box(&self) -> (DVec3, DVec3) {
        let Some(first) = self.positions.first() else {
            return (DVec3::ZERO, DVec3::ZERO);
        };
        self.positions[1..]
            .iter()
            .fold((*first, *first), |(min, max), p| (min.min(*p), max.max(*p)))
    }

    /// Splits every triangle onto its own three vertices.
    ///
    /// This is what an OBJ import looks like before vertices are merged:
    /// corners that share a position no longer share an index.
    pub fn to_soup(&self) -> Self {
        let mut positions = Vec::with_capacity(self.triangles.len() * 3);
        let mut triangles = Vec::with_capacity(self.triangles.len());
        for tri in &self.triangles {
            let base = positions.len() as u32;
            positions.extend(tri.iter().map(|&i| self.positions[i as usize]));
            triangles.push([base, base + 1, base + 2]);
        }
        Self {
            positions,
            triangles,
        }
    }

    /// Exports vertices as f32 array for GPU.
    ///
    /// Returns flattened [x, y, z, x, y, z, ...] array.
    pub fn positions_f32(&self) -> Vec<f32> {
        flatten_f32(&self.positions)
    }

    /// Exports triangle indices as u32 array for GPU.
    pub fn indices_u32(&self) -> Vec<u32> {
        self.triangles.iter().flatten().copied().collect()
    }
}

/// Flattens vectors into an `[x, y, z, ...]` f32 buffer.
pub fn flatten_f32(vectors: &[DVec3]) -> Vec<f32> {
    let mut result = Vec::with_capacity(vectors.len() * 3);
    for v in vectors {
        result.push(v.x as f32);
        result.push(v.y as f32);
        result.push(v.z as f32);
    }
    result
}
