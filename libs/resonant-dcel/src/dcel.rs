//! # DCEL Construction
//!
//! Builds the half-edge arena from an indexed triangle mesh.
//!
//! ## Algorithm
//!
//! 1. One [`Vertex`] per input position; optional welding assigns canonical ids
//! 2. One face per triangle, owning a 3-cycle of half-edges over canonical ids
//! 3. Twin linking through a map of pending `(tail, head)` half-edges
//! 4. Back-references: each vertex gets the first half-edge ending at it
//!
//! Topology never changes after construction.

use std::collections::{HashMap, HashSet};

use config::constants::{DEFAULT_MERGE_THRESHOLD, DEGENERATE_AREA_EPSILON};
use resonant_geometry::{triangle_double_area, TriangleMesh};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{DcelError, DcelResult, TopologyError, TopologyResult};
use crate::types::{Face, FaceId, HalfEdge, HalfEdgeId, Vertex, VertexId};
use crate::weld::weld_vertices;

// =============================================================================
// OPTIONS AND DIAGNOSTICS
// =============================================================================

/// Build options.
///
/// # Example
///
/// ```rust
/// use resonant_dcel::DcelOptions;
///
/// let options: DcelOptions = serde_json::from_str(r#"{"merge_threshold": 0.0001}"#).unwrap();
/// assert_eq!(options.merge_threshold, Some(1e-4));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DcelOptions {
    /// Lattice size for vertex welding; `None` keeps every input vertex.
    pub merge_threshold: Option<f64>,
}

impl DcelOptions {
    /// Options with welding enabled.
    pub fn welded(threshold: f64) -> Self {
        Self {
            merge_threshold: Some(threshold),
        }
    }

    /// Welding with [`DEFAULT_MERGE_THRESHOLD`], the usual choice for
    /// triangle soup.
    pub fn welded_default() -> Self {
        Self::welded(DEFAULT_MERGE_THRESHOLD)
    }
}

/// What the build found besides the topology itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildDiagnostics {
    /// Input vertices merged into another one.
    pub welded_vertices: usize,
    /// Half-edges left without a twin on an open surface.
    pub boundary_half_edges: usize,
    /// Half-edges repeating an already registered direction; left unlinked.
    pub non_manifold_edges: usize,
    /// Faces with (near) zero area.
    pub degenerate_faces: Vec<FaceId>,
    /// Canonical vertices referenced by no face.
    pub isolated_vertices: usize,
}

impl BuildDiagnostics {
    /// True when the mesh is a clean closed manifold.
    pub fn is_clean(&self) -> bool {
        self.boundary_half_edges == 0
            && self.non_manifold_edges == 0
            && self.degenerate_faces.is_empty()
            && self.isolated_vertices == 0
    }
}

// =============================================================================
// DCEL
// =============================================================================

/// Doubly connected edge list over a triangle mesh.
///
/// # Example
///
/// ```rust
/// use resonant_dcel::{Dcel, DcelOptions};
/// use resonant_geometry::primitives::icosahedron;
///
/// let dcel = Dcel::new(&icosahedron(1.0).unwrap(), &DcelOptions::default()).unwrap();
/// assert!(dcel.is_closed());
/// assert_eq!(dcel.edge_count(), 30);
/// assert_eq!(dcel.euler_characteristic(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct Dcel {
    pub(crate) vertices: Vec<Vertex>,
    pub(crate) half_edges: Vec<HalfEdge>,
    pub(crate) faces: Vec<Face>,
    diagnostics: BuildDiagnostics,
}

impl Dcel {
    /// Builds the DCEL of `mesh`.
    ///
    /// # Errors
    ///
    /// - [`DcelError::InvalidThreshold`] for a non-positive merge threshold
    /// - [`DcelError::NonFinitePosition`] for NaN/infinite input
    /// - [`DcelError::CollapsedFace`] when welding merges corners of a face
    pub fn new(mesh: &TriangleMesh, options: &DcelOptions) -> DcelResult<Self> {
        let positions = mesh.positions();

        if let Some((i, _)) = positions.iter().enumerate().find(|(_, p)| !p.is_finite()) {
            return Err(DcelError::NonFinitePosition {
                vertex: VertexId(i as u32),
            });
        }

        let canonical = match options.merge_threshold {
            Some(t) if t > 0.0 && t.is_finite() => weld_vertices(positions, t),
            Some(t) => return Err(DcelError::InvalidThreshold(t)),
            None => (0..positions.len() as u32).map(VertexId).collect(),
        };

        let mut diagnostics = BuildDiagnostics::default();

        let mut vertices: Vec<Vertex> = positions
            .iter()
            .zip(&canonical)
            .enumerate()
            .map(|(i, (&position, &index))| Vertex {
                position,
                index,
                original_index: VertexId(i as u32),
                half_edge: None,
            })
            .collect();
        diagnostics.welded_vertices = vertices.iter().filter(|v| !v.is_canonical()).count();
        if diagnostics.welded_vertices > 0 {
            debug!(
                welded = diagnostics.welded_vertices,
                threshold = ?options.merge_threshold,
                "Welded vertices"
            );
        }

        // Faces and their half-edge cycles
        let mut faces = Vec::with_capacity(mesh.triangle_count());
        let mut half_edges = Vec::with_capacity(mesh.triangle_count() * 3);
        for (f, tri) in mesh.triangles().iter().enumerate() {
            let face = FaceId(f as u32);
            let corners = tri.map(|i| canonical[i as usize]);
            let [a, b, c] = corners;
            if a == b || b == c || c == a {
                return Err(DcelError::CollapsedFace {
                    face,
                    vertices: corners,
                });
            }

            let area = triangle_double_area(
                positions[a.index()],
                positions[b.index()],
                positions[c.index()],
            )
            .length();
            if area < DEGENERATE_AREA_EPSILON {
                diagnostics.degenerate_faces.push(face);
            }

            for corner in 0..3u32 {
                half_edges.push(HalfEdge {
                    tail: corners[corner as usize],
                    head: corners[((corner + 1) % 3) as usize],
                    next: face.half_edge(corner + 1),
                    twin: None,
                    face,
                });
            }
            faces.push(Face {
                vertices: corners,
                half_edge: face.half_edge(0),
                index: face,
            });
        }

        // Twin linking
        let mut pending: HashMap<(VertexId, VertexId), HalfEdgeId> = HashMap::new();
        let mut registered: HashSet<(VertexId, VertexId)> = HashSet::new();
        for h in 0..half_edges.len() {
            let id = HalfEdgeId(h as u32);
            let HalfEdge { tail, head, .. } = half_edges[h];

            if !registered.insert((tail, head)) {
                diagnostics.non_manifold_edges += 1;
                warn!(half_edge = %id, %tail, %head, "Repeated directed edge left unlinked");
                continue;
            }
            match pending.remove(&(head, tail)) {
                Some(twin) => {
                    half_edges[h].twin = Some(twin);
                    half_edges[twin.index()].twin = Some(id);
                }
                None => {
                    pending.insert((tail, head), id);
                }
            }
        }
        diagnostics.boundary_half_edges = pending.len();

        // Vertex back-references
        for h in 0..half_edges.len() {
            let HalfEdge { head, twin, .. } = half_edges[h];
            let vertex = &mut vertices[head.index()];
            if vertex.half_edge.is_none() {
                vertex.half_edge = Some(HalfEdgeId(h as u32));
            }
            if let Some(twin) = twin {
                let twin_head = half_edges[twin.index()].head;
                let vertex = &mut vertices[twin_head.index()];
                if vertex.half_edge.is_none() {
                    vertex.half_edge = Some(twin);
                }
            }
        }

        diagnostics.isolated_vertices = vertices
            .iter()
            .filter(|v| v.is_canonical() && v.half_edge.is_none())
            .count();

        if diagnostics.boundary_half_edges > 0 {
            warn!(count = diagnostics.boundary_half_edges, "Mesh has boundary half-edges");
        }
        if !diagnostics.degenerate_faces.is_empty() {
            warn!(count = diagnostics.degenerate_faces.len(), "Mesh has zero-area faces");
        }
        if diagnostics.isolated_vertices > 0 {
            warn!(count = diagnostics.isolated_vertices, "Mesh has isolated vertices");
        }

        info!(
            vertices = vertices.len(),
            faces = faces.len(),
            half_edges = half_edges.len(),
            "Built DCEL"
        );

        Ok(Self {
            vertices,
            half_edges,
            faces,
            diagnostics,
        })
    }

    // =========================================================================
    // ACCESSORS
    // =========================================================================

    /// Number of vertex records (input positions, welded or not).
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of faces.
    #[inline]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Number of half-edges (three per face).
    #[inline]
    pub fn half_edge_count(&self) -> usize {
        self.half_edges.len()
    }

    /// All vertex records, indexed by original index.
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// All half-edges.
    pub fn half_edges(&self) -> &[HalfEdge] {
        &self.half_edges
    }

    /// All faces.
    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// Build diagnostics.
    pub fn diagnostics(&self) -> &BuildDiagnostics {
        &self.diagnostics
    }

    /// Vertex record for any original index.
    pub fn vertex(&self, id: VertexId) -> TopologyResult<&Vertex> {
        self.vertices
            .get(id.index())
            .ok_or(TopologyError::UnknownVertex { vertex: id })
    }

    /// Half-edge record.
    pub fn half_edge(&self, id: HalfEdgeId) -> TopologyResult<&HalfEdge> {
        self.half_edges
            .get(id.index())
            .ok_or(TopologyError::UnknownHalfEdge { half_edge: id })
    }

    /// Face record.
    pub fn face(&self, id: FaceId) -> TopologyResult<&Face> {
        self.faces
            .get(id.index())
            .ok_or(TopologyError::UnknownFace { face: id })
    }

    /// Canonical vertex of `id` after welding.
    pub fn canonical(&self, id: VertexId) -> TopologyResult<VertexId> {
        self.vertex(id).map(|v| v.index)
    }

    /// Successor of `id` in its face.
    pub fn next(&self, id: HalfEdgeId) -> TopologyResult<HalfEdgeId> {
        self.half_edge(id).map(|h| h.next)
    }

    /// Predecessor of `id` in its face (`next.next` on a triangle).
    pub fn prev(&self, id: HalfEdgeId) -> TopologyResult<HalfEdgeId> {
        let next = self.next(id)?;
        self.next(next)
    }

    /// Twin of `id`; [`TopologyError::Boundary`] when it has none.
    pub fn twin(&self, id: HalfEdgeId) -> TopologyResult<HalfEdgeId> {
        self.half_edge(id)?
            .twin
            .ok_or(TopologyError::Boundary { half_edge: id })
    }

    /// Canonical corners of a face.
    pub fn face_vertices(&self, id: FaceId) -> TopologyResult<[VertexId; 3]> {
        self.face(id).map(|f| f.vertices)
    }

    /// True when every half-edge has a twin.
    pub fn is_closed(&self) -> bool {
        self.half_edges.iter().all(|h| h.twin.is_some())
    }

    /// Number of undirected edges: twin pairs count once, unpaired half-edges
    /// once each.
    pub fn edge_count(&self) -> usize {
        let unpaired = self.half_edges.iter().filter(|h| h.twin.is_none()).count();
        (self.half_edges.len() - unpaired) / 2 + unpaired
    }

    /// `V − E + F` over the canonical, non-isolated vertices.
    pub fn euler_characteristic(&self) -> i64 {
        let v = self
            .vertices
            .iter()
            .filter(|v| v.is_canonical() && v.half_edge.is_some())
            .count() as i64;
        v - self.edge_count() as i64 + self.faces.len() as i64
    }

    // =========================================================================
    // VALIDATION
    // =========================================================================

    /// Verifies the structural invariants:
    ///
    /// - `next.next.next == h`, all three in the same face
    /// - `next.tail == head`
    /// - `twin.twin == h`, with reversed endpoints
    /// - every vertex back-reference ends at that vertex
    pub fn check_invariants(&self) -> TopologyResult<()> {
        for (i, he) in self.half_edges.iter().enumerate() {
            let id = HalfEdgeId(i as u32);
            let inconsistent = |reason| TopologyError::Inconsistent { half_edge: id, reason };

            let next = self.half_edge(he.next)?;
            if next.tail != he.head {
                return Err(inconsistent("next does not start at head"));
            }
            if next.face != he.face || id.face() != he.face {
                return Err(inconsistent("cycle leaves its face"));
            }
            let third = self.half_edge(next.next)?;
            if third.next != id {
                return Err(inconsistent("face cycle is not a triangle"));
            }

            if let Some(t) = he.twin {
                let twin = self.half_edge(t)?;
                if twin.twin != Some(id) {
                    return Err(inconsistent("twin is not symmetric"));
                }
                if twin.tail != he.head || twin.head != he.tail {
                    return Err(inconsistent("twin endpoints are not reversed"));
                }
            }
        }

        for (i, vertex) in self.vertices.iter().enumerate() {
            if let Some(h) = vertex.half_edge {
                if self.half_edge(h)?.head != VertexId(i as u32) {
                    return Err(TopologyError::Inconsistent {
                        half_edge: h,
                        reason: "vertex back-reference does not end at the vertex",
                    });
                }
            }
        }

        Ok(())
    }

    /// First half-edge ending at `v` (resolved to its canonical vertex).
    pub(crate) fn incoming(&self, v: VertexId) -> TopologyResult<(VertexId, HalfEdgeId)> {
        let canonical = self.canonical(v)?;
        let half_edge = self.vertices[canonical.index()]
            .half_edge
            .ok_or(TopologyError::IsolatedVertex { vertex: canonical })?;
        Ok((canonical, half_edge))
    }
}
