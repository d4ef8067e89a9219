//! # Adjacency Queries
//!
//! Face and vertex neighbourhoods walked through the half-edge links.
//!
//! ## Vertex fans
//!
//! The outgoing half-edges of `v` are visited by rotating with
//! `h → twin(h).next`. On a closed mesh the rotation returns to its start.
//! When it runs into a boundary half-edge the fan is completed the other way
//! with `h → twin(prev(h))`, and the last incoming half-edge (which has no
//! twin) contributes the neighbour across the open side.
//!
//! Non-manifold vertices (two fans meeting at one point) only report the fan
//! containing the vertex's back-reference.

use std::collections::HashSet;

use tracing::warn;

use crate::dcel::Dcel;
use crate::error::TopologyResult;
use crate::types::{FaceId, HalfEdge, HalfEdgeId, VertexId};

/// Outgoing half-edges of a vertex, in rotation order.
#[derive(Debug, Clone, Default)]
struct Fan {
    outgoing: Vec<HalfEdgeId>,
    /// Incoming boundary half-edge closing an open fan.
    trailing: Option<HalfEdgeId>,
}

impl Dcel {
    #[inline]
    fn he(&self, id: HalfEdgeId) -> &HalfEdge {
        &self.half_edges[id.index()]
    }

    #[inline]
    fn prev_of(&self, id: HalfEdgeId) -> HalfEdgeId {
        self.he(self.he(id).next).next
    }

    /// The three half-edges of a face, in cycle order.
    pub fn face_half_edges(&self, face: FaceId) -> TopologyResult<[HalfEdgeId; 3]> {
        let first = self.face(face)?.half_edge;
        let second = self.he(first).next;
        Ok([first, second, self.he(second).next])
    }

    /// Visits the half-edges of `face` once each, in cycle order.
    ///
    /// # Example
    ///
    /// ```rust
    /// use resonant_dcel::{Dcel, DcelOptions, FaceId};
    /// use resonant_geometry::primitives::icosahedron;
    ///
    /// let dcel = Dcel::new(&icosahedron(1.0).unwrap(), &DcelOptions::default()).unwrap();
    /// let mut count = 0;
    /// dcel.for_edges(FaceId(0), |_, _| count += 1).unwrap();
    /// assert_eq!(count, 3);
    /// ```
    pub fn for_edges<F>(&self, face: FaceId, mut visit: F) -> TopologyResult<()>
    where
        F: FnMut(HalfEdgeId, &HalfEdge),
    {
        let start = self.face(face)?.half_edge;
        let mut h = start;
        loop {
            let he = self.he(h);
            visit(h, he);
            h = he.next;
            if h == start {
                return Ok(());
            }
        }
    }

    /// Visits the face across each edge of `face`.
    ///
    /// All three twins are checked before the first visit, so a boundary face
    /// yields [`TopologyError::Boundary`](crate::TopologyError::Boundary)
    /// without partial output.
    pub fn for_adjacent_faces<F>(&self, face: FaceId, mut visit: F) -> TopologyResult<()>
    where
        F: FnMut(FaceId),
    {
        let edges = self.face_half_edges(face)?;
        let mut adjacent = [FaceId::default(); 3];
        for (slot, h) in adjacent.iter_mut().zip(edges) {
            *slot = self.he(self.twin(h)?).face;
        }
        for f in adjacent {
            visit(f);
        }
        Ok(())
    }

    fn fan(&self, v: VertexId) -> TopologyResult<Fan> {
        let (canonical, incoming) = self.incoming(v)?;
        let start = self.he(incoming).next;

        let mut seen = HashSet::from([start]);
        let mut outgoing = Vec::new();
        let mut h = start;
        let open = loop {
            outgoing.push(h);
            let Some(twin) = self.he(h).twin else {
                break true;
            };
            h = self.he(twin).next;
            if h == start {
                break false;
            }
            if !seen.insert(h) {
                warn!(vertex = %canonical, half_edge = %h, "Fan walk revisited a half-edge");
                break false;
            }
        };

        if !open {
            return Ok(Fan {
                outgoing,
                trailing: None,
            });
        }

        let mut backward = Vec::new();
        let mut trailing = None;
        let mut h = start;
        loop {
            let prev = self.prev_of(h);
            match self.he(prev).twin {
                Some(twin) => {
                    if !seen.insert(twin) {
                        warn!(vertex = %canonical, half_edge = %twin, "Fan walk revisited a half-edge");
                        break;
                    }
                    backward.push(twin);
                    h = twin;
                }
                None => {
                    trailing = Some(prev);
                    break;
                }
            }
        }

        backward.reverse();
        backward.extend(outgoing);
        Ok(Fan {
            outgoing: backward,
            trailing,
        })
    }

    /// Half-edges leaving `v`, in rotation order, without duplicates.
    ///
    /// `v` may be any original index; welded vertices resolve to their
    /// canonical vertex.
    ///
    /// # Errors
    ///
    /// [`TopologyError::UnknownVertex`](crate::TopologyError::UnknownVertex)
    /// or [`TopologyError::IsolatedVertex`](crate::TopologyError::IsolatedVertex).
    pub fn outgoing_half_edges(&self, v: VertexId) -> TopologyResult<Vec<HalfEdgeId>> {
        self.fan(v).map(|fan| fan.outgoing)
    }

    /// Immediate neighbours of `v` (canonical ids), excluding `v` itself.
    pub fn vertices_on_vertex(&self, v: VertexId) -> TopologyResult<Vec<VertexId>> {
        let fan = self.fan(v)?;
        let mut neighbours = Vec::with_capacity(fan.outgoing.len() + 1);
        if let Some(trailing) = fan.trailing {
            neighbours.push(self.he(trailing).tail);
        }
        neighbours.extend(fan.outgoing.iter().map(|&h| self.he(h).head));
        Ok(neighbours)
    }

    /// Faces incident to `v`.
    pub fn one_ring_faces_on_vertex(&self, v: VertexId) -> TopologyResult<Vec<FaceId>> {
        let fan = self.fan(v)?;
        Ok(fan.outgoing.iter().map(|&h| self.he(h).face).collect())
    }

    /// Heuristic `n`-hop face neighbourhood of `v`.
    ///
    /// Hop 1 is the one-ring of `v`. Every further hop takes the most recently
    /// discovered face, pivots on its first corner and adds that vertex's
    /// one-ring. One pivot per hop means the result is a subset
    /// of [`Dcel::n_ring_faces`] and usually misses faces for `n > 1`.
    pub fn n_neighbor_faces_on_vertex(&self, v: VertexId, n: usize) -> TopologyResult<Vec<FaceId>> {
        let mut neighbours = Vec::new();
        if n == 0 {
            return Ok(neighbours);
        }

        let mut seen = HashSet::new();
        let mut pending = Vec::new();
        let mut ring = self.one_ring_faces_on_vertex(v)?;
        for hop in 1..=n {
            for face in ring {
                if seen.insert(face) {
                    neighbours.push(face);
                    pending.push(face);
                }
            }
            if hop == n {
                break;
            }
            let Some(face) = pending.pop() else {
                break;
            };
            let pivot = self.faces[face.index()].vertices[0];
            ring = self.one_ring_faces_on_vertex(pivot)?;
        }

        Ok(neighbours)
    }

    /// Breadth-first `n`-ring: every face reachable from `v` through at most
    /// `n` vertex-sharing steps, in discovery order.
    pub fn n_ring_faces(&self, v: VertexId, n: usize) -> TopologyResult<Vec<FaceId>> {
        let origin = self.canonical(v)?;
        let mut faces = Vec::new();
        let mut seen_faces = HashSet::new();
        let mut seen_vertices = HashSet::from([origin]);
        let mut frontier = vec![origin];

        for _ in 0..n {
            let mut next = Vec::new();
            for u in frontier {
                for face in self.one_ring_faces_on_vertex(u)? {
                    if !seen_faces.insert(face) {
                        continue;
                    }
                    faces.push(face);
                    for w in self.faces[face.index()].vertices {
                        if seen_vertices.insert(w) {
                            next.push(w);
                        }
                    }
                }
            }
            if next.is_empty() {
                break;
            }
            frontier = next;
        }

        Ok(faces)
    }
}
