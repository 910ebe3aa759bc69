//! Lattice construction tests

use cantilever_core::topology::{index_to_ij, ij_to_index};
use cantilever_core::{SimConfig, Simulation, Topology};

#[test]
fn test_counts_for_many_grids() {
    for nx in 2..=12 {
        for ny in 2..=9 {
            let topology = Topology::build(nx, ny);
            assert_eq!(
                topology.edges.len(),
                (nx - 1) * ny + nx * (ny - 1) + (nx - 1) * (ny - 1),
                "edge count for {}x{}",
                nx,
                ny
            );
            assert_eq!(topology.triangles.len(), 2 * (nx - 1) * (ny - 1));
            assert_eq!(topology.node_count(), nx * ny);
        }
    }
}

#[test]
fn test_default_cantilever_sizes() {
    let sim = Simulation::new(SimConfig::default()).unwrap();
    // 19*4 + 20*3 + 19*3
    assert_eq!(sim.topology().edges.len(), 193);
    assert_eq!(sim.topology().triangles.len(), 114);
    assert_eq!(sim.positions().len(), 80);
    assert_eq!(sim.rest_lengths().len(), 193);
}

#[test]
fn test_build_is_deterministic() {
    assert_eq!(Topology::build(7, 5), Topology::build(7, 5));
}

#[test]
fn test_triangle_winding() {
    let (nx, ny) = (3, 3);
    let topology = Topology::build(nx, ny);
    let (i, j) = (1, 0);
    let tid = (i * (ny - 1) + j) * 2;
    assert_eq!(
        topology.triangles[tid],
        [ij_to_index(1, 0, ny), ij_to_index(2, 0, ny), ij_to_index(1, 1, ny)]
    );
    assert_eq!(
        topology.triangles[tid + 1],
        [ij_to_index(1, 1, ny), ij_to_index(2, 1, ny), ij_to_index(2, 0, ny)]
    );
}

#[test]
fn test_one_diagonal_per_cell() {
    let (nx, ny) = (5, 4);
    let topology = Topology::build(nx, ny);
    let diagonals = &topology.edges[(nx - 1) * ny + nx * (ny - 1)..];
    assert_eq!(diagonals.len(), (nx - 1) * (ny - 1));
    for [a, b] in diagonals {
        let (ia, ja) = index_to_ij(*a, ny);
        let (ib, jb) = index_to_ij(*b, ny);
        // Always from the lower-right corner of the cell to its upper-left
        assert_eq!(ia, ib + 1);
        assert_eq!(jb, ja + 1);
    }
}

#[test]
fn test_rest_lengths_by_edge_kind() {
    let sim = Simulation::new(SimConfig::new().with_grid(4, 3)).unwrap();
    let dx = sim.config().dx;
    let straight = 3 * 3 + 4 * 2;
    for (e, rest) in sim.rest_lengths().iter().enumerate() {
        let expected = if e < straight { dx } else { dx * 2f32.sqrt() };
        assert!((rest - expected).abs() < 1e-6, "edge {} rest {}", e, rest);
    }
}
