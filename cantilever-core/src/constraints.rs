//! Velocity damping and positional constraints applied after each
//! integration substep, in the order damping, pick, wall, left clamp.

use glam::Vec2;

use crate::engine::SpringSystem;

/// Scale all velocities by `exp(-dh * decay)`.
pub fn apply_damping(system: &mut SpringSystem, dh: f32, decay: f32) {
    let factor = (-dh * decay).exp();
    for v in &mut system.velocities {
        *v *= factor;
    }
}

/// Snap every node strictly inside `radius` of `cursor` onto it and stop it.
/// Returns how many nodes were caught.
pub fn apply_pick(system: &mut SpringSystem, cursor: Vec2, radius: f32) -> usize {
    let mut caught = 0;
    for (x, v) in system.positions.iter_mut().zip(system.velocities.iter_mut()) {
        if (*x - cursor).length() < radius {
            *x = cursor;
            *v = Vec2::ZERO;
            caught += 1;
        }
    }
    caught
}

/// Pin `nodes` to their rest pose `(init_x, init_y + j * dx)` with zero
/// velocity, where `j` is the position of the node in `nodes`.
pub fn apply_wall(
    system: &mut SpringSystem,
    nodes: impl IntoIterator<Item = usize>,
    init_x: f32,
    init_y: f32,
    dx: f32,
) {
    for (j, node) in nodes.into_iter().enumerate() {
        system.velocities[node] = Vec2::ZERO;
        system.positions[node] = Vec2::new(init_x, init_y + j as f32 * dx);
    }
}

/// Keep every node at or right of the wall line. Only x is touched.
pub fn apply_left_clamp(system: &mut SpringSystem, wall_x: f32) {
    for (x, v) in system.positions.iter_mut().zip(system.velocities.iter_mut()) {
        if x.x < wall_x {
            x.x = wall_x;
            v.x = 0.0;
        }
    }
}
