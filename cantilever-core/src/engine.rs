use glam::Vec2;
use rayon::prelude::*;

use crate::config::Backend;

/// Point masses joined by linear springs.
///
/// Node state is kept as parallel arrays indexed by node id; springs refer
/// to nodes by index. Every node shares one mass and every spring shares one
/// stiffness, so neither is stored per element.
#[derive(Debug, Clone)]
pub struct SpringSystem {
    pub positions: Vec<Vec2>,
    pub velocities: Vec<Vec2>,
    /// Gradient of the elastic energy per node, rebuilt by [`Self::compute_gradient`].
    pub gradient: Vec<Vec2>,
    pub edges: Vec<[usize; 2]>,
    pub rest_lengths: Vec<f32>,
    /// One node-sized gradient buffer per edge chunk for the parallel backend
    partials: Vec<Vec<Vec2>>,
}

impl SpringSystem {
    /// Create a system at rest, taking every rest length from the given
    /// positions.
    pub fn new(positions: Vec<Vec2>, edges: Vec<[usize; 2]>) -> Self {
        let n = positions.len();
        let n_edges = edges.len();
        let chunks = rayon::current_num_threads().max(1);
        let mut system = Self {
            positions,
            velocities: vec![Vec2::ZERO; n],
            gradient: vec![Vec2::ZERO; n],
            edges,
            rest_lengths: vec![0.0; n_edges],
            partials: vec![vec![Vec2::ZERO; n]; chunks],
        };
        system.init_rest_lengths();
        system
    }

    pub fn node_count(&self) -> usize {
        self.positions.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Set every rest length to the current distance between its endpoints.
    pub fn init_rest_lengths(&mut self) {
        let positions = &self.positions;
        for (rest, [a, b]) in self.rest_lengths.iter_mut().zip(&self.edges) {
            *rest = (positions[*a] - positions[*b]).length();
        }
    }

    /// Current length of edge `e`.
    pub fn edge_length(&self, e: usize) -> f32 {
        let [a, b] = self.edges[e];
        (self.positions[a] - self.positions[b]).length()
    }

    /// Recompute `gradient` from the current positions.
    ///
    /// `U = sum_e (k / l0) * (l - l0)^2 / 2`
    pub fn compute_gradient(&mut self, stiffness: f32, backend: Backend) {
        match backend {
            Backend::Serial => self.compute_gradient_serial(stiffness),
            Backend::Parallel => self.compute_gradient_parallel(stiffness),
        }
    }

    fn compute_gradient_serial(&mut self, stiffness: f32) {
        self.gradient.fill(Vec2::ZERO);

        for ([a, b], l0) in self.edges.iter().zip(&self.rest_lengths) {
            let g = spring_gradient(self.positions[*a] - self.positions[*b], *l0, stiffness);
            self.gradient[*a] += g;
            self.gradient[*b] -= g;
        }
    }

    /// Each edge chunk accumulates into its own buffer, then every node sums
    /// its slot across the buffers, so edges sharing a node never write
    /// concurrently. No buffer is allocated here.
    fn compute_gradient_parallel(&mut self, stiffness: f32) {
        let chunk = self.edges.len().div_ceil(self.partials.len()).max(1);
        let positions = &self.positions;

        self.partials
            .par_iter_mut()
            .zip(self.edges.par_chunks(chunk))
            .zip(self.rest_lengths.par_chunks(chunk))
            .for_each(|((partial, edges), rest_lengths)| {
                partial.fill(Vec2::ZERO);
                for ([a, b], l0) in edges.iter().zip(rest_lengths) {
                    let g = spring_gradient(positions[*a] - positions[*b], *l0, stiffness);
                    partial[*a] += g;
                    partial[*b] -= g;
                }
            });

        let partials = &self.partials;
        self.gradient
            .par_iter_mut()
            .enumerate()
            .for_each(|(i, g)| *g = partials.iter().map(|partial| partial[i]).sum());
    }

    /// Elastic potential energy stored in the springs.
    pub fn elastic_energy(&self, stiffness: f32) -> f32 {
        (0..self.edges.len())
            .map(|e| {
                let l0 = self.rest_lengths[e];
                let stretch = self.edge_length(e) - l0;
                0.5 * (stiffness / l0) * stretch * stretch
            })
            .sum()
    }

    pub fn kinetic_energy(&self, mass: f32) -> f32 {
        self.velocities
            .iter()
            .map(|v| 0.5 * mass * v.length_squared())
            .sum()
    }

    /// Gravitational potential relative to `y = 0`.
    pub fn gravitational_energy(&self, mass: f32, gravity: f32) -> f32 {
        self.positions.iter().map(|x| mass * gravity * x.y).sum()
    }

    /// First node whose position or velocity is NaN or infinite.
    pub fn first_non_finite(&self) -> Option<usize> {
        self.positions
            .iter()
            .zip(&self.velocities)
            .position(|(x, v)| !x.is_finite() || !v.is_finite())
    }
}

/// Gradient on the first endpoint of a spring with offset `r = x_a - x_b`.
/// The second endpoint receives the negation.
fn spring_gradient(r: Vec2, l0: f32, stiffness: f32) -> Vec2 {
    debug_assert!(l0 > 0.0, "spring with zero rest length");
    let l = r.length();
    // Hooke stiffness scales inversely with rest length
    let k = stiffness / l0;
    k * (l - l0) * r / l
}
