//! Faults reported by the simulation.
//!
//! The core is a closed numerical loop, so the only recoverable errors are
//! bad configuration, selecting an integrator that does not exist yet, and
//! numerical blow-up detected after a substep.

use thiserror::Error;

/// Simulation fault
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    #[error("grid must be at least 2x2, got {nx}x{ny}")]
    InvalidGrid { nx: usize, ny: usize },

    #[error("invalid parameter '{name}': {value}")]
    InvalidParameter { name: &'static str, value: f32 },

    #[error("{feature} is not implemented")]
    Unimplemented { feature: &'static str },

    #[error("node {node} became non-finite at substep {substep}")]
    NonFinite { node: usize, substep: u64 },
}

impl SimError {
    /// Whether the fault leaves the state unusable until a reset.
    pub fn is_numerical(&self) -> bool {
        matches!(self, Self::NonFinite { .. })
    }
}

/// Format a runtime fault for display
pub fn format_sim_error(error: &SimError) -> String {
    if error.is_numerical() {
        format!("Simulation diverged: {} (press R to reset)", error)
    } else {
        format!("Simulation error: {}", error)
    }
}
