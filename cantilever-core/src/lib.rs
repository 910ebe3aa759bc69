//! Mass-spring cantilever simulation.
//!
//! A rectangular lattice of point masses joined by linear springs, pinned
//! along its left column to a wall and stepped under gravity with many small
//! substeps per frame. Presentation is left to callers: they feed a
//! [`FrameInput`] to [`Simulation::advance`] and draw the [`FrameView`].

pub mod config;
pub mod constraints;
pub mod diagnostics;
pub mod engine;
pub mod integrator;
pub mod runtime;
pub mod topology;

pub use config::{Backend, SimConfig};
pub use diagnostics::{format_sim_error, SimError};
pub use engine::SpringSystem;
pub use integrator::Integrator;
pub use runtime::{
    grid_positions, Command, EnergySummary, FrameInput, FrameView, PickCircle, Simulation,
    StiffnessChange,
};
pub use topology::Topology;
