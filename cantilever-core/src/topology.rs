//! Lattice connectivity for an `nx` x `ny` grid of nodes.
//!
//! Node `(i, j)` (column `i` along x, row `j` along y) lives at index
//! `i * ny + j`. Edges come in three runs: horizontal, vertical, then one
//! diagonal per cell, from `(i+1, j)` to `(i, j+1)`. Only that one diagonal is
//! used, so the lattice resists shear but is not isotropic.

/// Triangles and springs of a rectangular grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topology {
    nx: usize,
    ny: usize,
    pub triangles: Vec<[usize; 3]>,
    pub edges: Vec<[usize; 2]>,
}

impl Topology {
    /// Build the mesh for `nx >= 2`, `ny >= 2`. Smaller grids are not
    /// meaningful; [`crate::SimConfig::validate`] rejects them.
    pub fn build(nx: usize, ny: usize) -> Self {
        let mut topology = Self {
            nx,
            ny,
            triangles: Vec::with_capacity(Self::triangle_count(nx, ny)),
            edges: Vec::with_capacity(Self::edge_count(nx, ny)),
        };

        // Two triangles per cell, ids (i * (ny - 1) + j) * 2 and that + 1
        for i in 0..nx - 1 {
            for j in 0..ny - 1 {
                topology.triangles.push([
                    topology.index(i, j),
                    topology.index(i + 1, j),
                    topology.index(i, j + 1),
                ]);
                topology.triangles.push([
                    topology.index(i, j + 1),
                    topology.index(i + 1, j + 1),
                    topology.index(i + 1, j),
                ]);
            }
        }

        // Horizontal
        for i in 0..nx - 1 {
            for j in 0..ny {
                topology
                    .edges
                    .push([topology.index(i, j), topology.index(i + 1, j)]);
            }
        }

        // Vertical
        for i in 0..nx {
            for j in 0..ny - 1 {
                topology
                    .edges
                    .push([topology.index(i, j), topology.index(i, j + 1)]);
            }
        }

        // Diagonal
        for i in 0..nx - 1 {
            for j in 0..ny - 1 {
                topology
                    .edges
                    .push([topology.index(i + 1, j), topology.index(i, j + 1)]);
            }
        }

        topology
    }

    /// `(nx-1)*ny + nx*(ny-1) + (nx-1)*(ny-1)`
    pub fn edge_count(nx: usize, ny: usize) -> usize {
        (nx - 1) * ny + nx * (ny - 1) + (nx - 1) * (ny - 1)
    }

    pub fn triangle_count(nx: usize, ny: usize) -> usize {
        2 * (nx - 1) * (ny - 1)
    }

    pub fn nx(&self) -> usize {
        self.nx
    }

    pub fn ny(&self) -> usize {
        self.ny
    }

    pub fn node_count(&self) -> usize {
        self.nx * self.ny
    }

    /// Arena index of node `(i, j)`.
    pub fn index(&self, i: usize, j: usize) -> usize {
        ij_to_index(i, j, self.ny)
    }

    /// Grid coordinates of an arena index.
    pub fn coords(&self, index: usize) -> (usize, usize) {
        index_to_ij(index, self.ny)
    }

    /// Indices of the nodes held by the wall (column 0).
    pub fn wall_nodes(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.ny).map(move |j| self.index(0, j))
    }
}

pub fn ij_to_index(i: usize, j: usize, ny: usize) -> usize {
    i * ny + j
}

pub fn index_to_ij(index: usize, ny: usize) -> (usize, usize) {
    (index / ny, index % ny)
}
