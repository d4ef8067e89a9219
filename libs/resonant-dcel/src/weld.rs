//! # Vertex Welding
//!
//! Collapses near-coincident input positions onto one canonical vertex.
//!
//! Each coordinate is divided by the threshold and truncated toward zero;
//! positions falling in the same lattice cell merge into the first one seen.
//! This is a spatial hash, not a distance test:
//!
//! - two points closer than the threshold but on opposite sides of a cell
//!   boundary stay distinct
//! - the cells adjacent to zero on each axis are twice as wide, since
//!   truncation maps `(-t, t)` onto cell 0

use std::collections::HashMap;

use glam::DVec3;

use crate::types::VertexId;

/// Integer lattice cell of a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct CellKey {
    x: i64,
    y: i64,
    z: i64,
}

impl CellKey {
    fn from_position(pos: DVec3, threshold: f64) -> Self {
        Self {
            x: (pos.x / threshold).trunc() as i64,
            y: (pos.y / threshold).trunc() as i64,
            z: (pos.z / threshold).trunc() as i64,
        }
    }
}

/// Canonical vertex for every input position.
///
/// `threshold` must be positive; the caller validates it.
///
/// # Example
///
/// ```rust
/// use glam::DVec3;
/// use resonant_dcel::{weld_vertices, VertexId};
///
/// let positions = [DVec3::ZERO, DVec3::X, DVec3::splat(1e-6)];
/// let canonical = weld_vertices(&positions, 1e-4);
/// assert_eq!(canonical, vec![VertexId(0), VertexId(1), VertexId(0)]);
/// ```
pub fn weld_vertices(positions: &[DVec3], threshold: f64) -> Vec<VertexId> {
    let mut cells: HashMap<CellKey, VertexId> = HashMap::with_capacity(positions.len());

    positions
        .iter()
        .enumerate()
        .map(|(i, &pos)| {
            let id = VertexId(i as u32);
            *cells
                .entry(CellKey::from_position(pos, threshold))
                .or_insert(id)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weld_pair(a: f64, b: f64, threshold: f64) -> bool {
        let canonical = weld_vertices(&[DVec3::new(a, 0.0, 0.0), DVec3::new(b, 0.0, 0.0)], threshold);
        canonical[1] == VertexId(0)
    }

    #[test]
    fn test_close_pair_in_same_cell_merges() {
        assert!(weld_pair(0.1, 0.3, 0.5));
        assert!(weld_pair(1.05, 1.45, 0.5));
    }

    #[test]
    fn test_pair_farther_than_threshold_stays_distinct() {
        assert!(!weld_pair(0.1, 0.7, 0.5));
    }

    #[test]
    fn test_pair_exactly_threshold_apart_stays_distinct() {
        // 1.0 / 0.5 = 2 and 1.5 / 0.5 = 3: adjacent cells.
        assert!(!weld_pair(1.0, 1.5, 0.5));
    }

    #[test]
    fn test_pair_straddling_cell_boundary_stays_distinct() {
        assert!(!weld_pair(0.49, 0.51, 0.5));
    }

    #[test]
    fn test_truncation_widens_cell_around_zero() {
        assert!(weld_pair(-0.4, 0.4, 0.5));
    }

    #[test]
    fn test_first_seen_wins() {
        let positions = [
            DVec3::new(5.0, 5.0, 5.0),
            DVec3::new(0.01, 0.0, 0.0),
            DVec3::new(0.02, 0.0, 0.0),
            DVec3::new(0.03, 0.0, 0.0),
        ];
        let canonical = weld_vertices(&positions, 0.1);
        assert_eq!(
            canonical,
            vec![VertexId(0), VertexId(1), VertexId(1), VertexId(1)]
        );
    }
}
