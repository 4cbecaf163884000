//! Periodic lattice generators: square, triangular and honeycomb.
//!
//! Node `(column, row)` on an `L×L` grid has id `row·L + column`. All
//! coordinates wrap around both axes.

use crate::{Result, topology::Topology};

use super::link_once;

struct PeriodicGrid {
    side: usize,
}

impl PeriodicGrid {
    fn new(side: usize) -> Self {
        Self { side }
    }

    fn node_count(&self) -> usize {
        self.side * self.side
    }

    /// Id of the node reached by moving `(dc, dr)` from `(column, row)`.
    fn offset(&self, column: usize, row: usize, dc: isize, dr: isize) -> usize {
        let side = self.side as isize;
        let target_column = (column as isize + dc).rem_euclid(side) as usize;
        let target_row = (row as isize + dr).rem_euclid(side) as usize;
        target_row * self.side + target_column
    }

    fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.side).flat_map(move |row| (0..self.side).map(move |column| (column, row)))
    }
}

/// Builds an `side × side` periodic square lattice.
///
/// Each node links left, top, right and bottom.
///
/// # Errors
/// Propagates [`crate::GenerationError::Topology`] from invalid edges.
///
/// # Examples
/// ```
/// use netmetrics_core::generators::square_lattice;
///
/// let lattice = square_lattice(3)?;
/// assert_eq!(lattice.node_count(), 9);
/// assert!((0..9).all(|node| lattice.degree(node) == 4));
/// # Ok::<(), netmetrics_core::GenerationError>(())
/// ```
pub fn square_lattice(side: usize) -> Result<Topology> {
    let grid = PeriodicGrid::new(side);
    let mut topology = Topology::with_nodes(grid.node_count());
    for (column, row) in grid.cells() {
        let node = grid.offset(column, row, 0, 0);
        for (dc, dr) in [(-1, 0), (0, -1), (1, 0), (0, 1)] {
            link_once(&mut topology, node, grid.offset(column, row, dc, dr))?;
        }
    }
    Ok(topology)
}

/// Builds an `side × side` periodic triangular lattice.
///
/// Each node links left, right, top and bottom, plus the two diagonal
/// neighbours `(column - s, row ± 1)` where the shift `s` is `+1` on even rows
/// and `-1` on odd rows. With an even side every node has degree six.
///
/// # Errors
/// Propagates [`crate::GenerationError::Topology`] from invalid edges.
pub fn triangular_lattice(side: usize) -> Result<Topology> {
    let grid = PeriodicGrid::new(side);
    let mut topology = Topology::with_nodes(grid.node_count());
    for (column, row) in grid.cells() {
        let node = grid.offset(column, row, 0, 0);
        let shift: isize = if row % 2 == 0 { 1 } else { -1 };
        for (dc, dr) in [(-1, 0), (1, 0), (0, -1), (0, 1), (-shift, -1), (-shift, 1)] {
            link_once(&mut topology, node, grid.offset(column, row, dc, dr))?;
        }
    }
    Ok(topology)
}

/// Builds an `side × side` periodic honeycomb lattice.
///
/// Each node links left and right plus one vertical neighbour. The vertical
/// direction alternates between bottom and top from node to node and flips
/// again at the end of every row, so with an even side every node has degree
/// three.
///
/// # Errors
/// Propagates [`crate::GenerationError::Topology`] from invalid edges.
pub fn honeycomb(side: usize) -> Result<Topology> {
    let grid = PeriodicGrid::new(side);
    let mut topology = Topology::with_nodes(grid.node_count());
    let mut link_bottom = true;
    for row in 0..side {
        for column in 0..side {
            let node = grid.offset(column, row, 0, 0);
            let vertical = if link_bottom { 1 } else { -1 };
            for (dc, dr) in [(-1, 0), (1, 0), (0, vertical)] {
                link_once(&mut topology, node, grid.offset(column, row, dc, dr))?;
            }
            link_bottom = !link_bottom;
        }
        link_bottom = !link_bottom;
    }
    Ok(topology)
}
