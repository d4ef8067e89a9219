use std::collections::{BTreeSet, HashSet};

use glam::DVec3;
use resonant_dcel::{Dcel, DcelOptions, TopologyError, VertexId};
use resonant_geometry::primitives::icosphere;
use resonant_geometry::TriangleMesh;

/// `n × n` quads in the XY plane, two triangles each.
fn grid(n: u32) -> TriangleMesh {
    let mut positions = Vec::new();
    for y in 0..=n {
        for x in 0..=n {
            positions.push(DVec3::new(x as f64, y as f64, 0.0));
        }
    }
    let at = |x: u32, y: u32| y * (n + 1) + x;
    let mut triangles = Vec::new();
    for y in 0..n {
        for x in 0..n {
            triangles.push([at(x, y), at(x + 1, y), at(x + 1, y + 1)]);
            triangles.push([at(x, y), at(x + 1, y + 1), at(x, y + 1)]);
        }
    }
    TriangleMesh::new(positions, triangles).unwrap()
}

/// Neighbour sets computed straight from the triangle list.
fn brute_force_neighbours(mesh: &TriangleMesh) -> Vec<BTreeSet<u32>> {
    let mut sets = vec![BTreeSet::new(); mesh.vertex_count()];
    for &[a, b, c] in mesh.triangles() {
        for (u, v) in [(a, b), (b, c), (c, a)] {
            sets[u as usize].insert(v);
            sets[v as usize].insert(u);
        }
    }
    sets
}

#[test]
fn icospheres_are_closed_genus_zero() {
    for subdivisions in 0..=3 {
        let dcel = Dcel::new(&icosphere(1.0, subdivisions).unwrap(), &DcelOptions::default()).unwrap();
        assert!(dcel.is_closed());
        assert!(dcel.diagnostics().is_clean());
        assert_eq!(dcel.euler_characteristic(), 2);
        dcel.check_invariants().unwrap();
    }
}

#[test]
fn closed_fans_match_triangle_list() {
    let mesh = icosphere(1.0, 2).unwrap();
    let dcel = Dcel::new(&mesh, &DcelOptions::default()).unwrap();
    let expected = brute_force_neighbours(&mesh);

    for (v, expected) in expected.iter().enumerate() {
        let neighbours = dcel.vertices_on_vertex(VertexId(v as u32)).unwrap();
        let got: BTreeSet<u32> = neighbours.iter().map(|n| n.0).collect();
        assert_eq!(got.len(), neighbours.len(), "duplicate neighbour at v{v}");
        assert_eq!(&got, expected, "v{v}");

        let faces = dcel.one_ring_faces_on_vertex(VertexId(v as u32)).unwrap();
        let incident = mesh.triangles().iter().filter(|t| t.contains(&(v as u32))).count();
        assert_eq!(faces.len(), incident);
    }
}

#[test]
fn open_grid_fans_include_boundary_neighbours() {
    let mesh = grid(4);
    let dcel = Dcel::new(&mesh, &DcelOptions::default()).unwrap();
    assert_eq!(dcel.diagnostics().boundary_half_edges, 16);
    assert_eq!(dcel.euler_characteristic(), 1);
    dcel.check_invariants().unwrap();

    for (v, expected) in brute_force_neighbours(&mesh).iter().enumerate() {
        let got: BTreeSet<u32> = dcel
            .vertices_on_vertex(VertexId(v as u32))
            .unwrap()
            .into_iter()
            .map(|n| n.0)
            .collect();
        assert_eq!(&got, expected, "v{v}");
    }
}

#[test]
fn welded_soup_reproduces_indexed_topology() {
    let mesh = icosphere(1.0, 2).unwrap();
    let soup = mesh.to_soup();
    let dcel = Dcel::new(&soup, &DcelOptions::welded(1e-6)).unwrap();
    assert!(dcel.is_closed());
    assert_eq!(dcel.euler_characteristic(), 2);
    assert_eq!(
        dcel.diagnostics().welded_vertices,
        soup.vertex_count() - mesh.vertex_count()
    );

    let canonical: HashSet<VertexId> = dcel.vertices().iter().map(|v| v.index).collect();
    assert_eq!(canonical.len(), mesh.vertex_count());
}

#[test]
fn boundary_adjacency_is_distinct_from_unknown_ids() {
    let dcel = Dcel::new(&grid(1), &DcelOptions::default()).unwrap();
    let boundary = dcel.for_adjacent_faces(resonant_dcel::FaceId(0), |_| {});
    assert!(matches!(boundary, Err(TopologyError::Boundary { .. })));

    let unknown = dcel.for_adjacent_faces(resonant_dcel::FaceId(9), |_| {});
    assert!(matches!(unknown, Err(TopologyError::UnknownFace { .. })));
}
