//! Simulation constants and the configuration builder.
//!
//! The constants describe the default cantilever: a 20x4 lattice hung from a
//! wall at `x = 0.1`, stepped at 60 Hz with 100 substeps per frame.

use crate::diagnostics::SimError;
use crate::integrator::Integrator;

/// Grid columns (along x).
pub const N_X: usize = 20;
/// Grid rows (along y).
pub const N_Y: usize = 4;
/// Cell spacing.
pub const DX: f32 = 1.0 / 32.0;
/// Lower-left corner of the lattice, also the wall line `x = INIT_X`.
pub const INIT_X: f32 = 0.1;
pub const INIT_Y: f32 = 0.6;
/// Simulated time per visible frame (seconds).
pub const FRAME_DT: f32 = 16.7e-3;
/// Substeps per frame.
pub const SUBSTEPS: usize = 100;
/// Initial Young's-modulus-like stiffness shared by all springs.
pub const STIFFNESS: f32 = 3e4;
/// Factor applied by one stiffness increase/decrease.
pub const STIFFNESS_FACTOR: f32 = 1.1;
/// Lowest stiffness reachable through repeated decreases.
pub const MIN_STIFFNESS: f32 = 1.0;
pub const MASS: f32 = 1.0;
pub const GRAVITY: f32 = 9.8;
/// Exponential velocity decay rate used when damping is enabled.
pub const DAMPING_DECAY: f32 = 5.0;
/// Radius of the pick circle around the cursor.
pub const PICK_RADIUS: f32 = DX / 2.0;

/// How per-edge and per-node work is dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Backend {
    #[default]
    Serial,
    /// Rayon worker pool, gradients combined by a reduction pass.
    Parallel,
}

/// Full set of parameters for a [`crate::Simulation`].
///
/// # Builder Pattern
/// ```
/// use cantilever_core::config::{Backend, SimConfig};
///
/// let config = SimConfig::new()
///     .with_grid(10, 3)
///     .with_stiffness(1e4)
///     .with_backend(Backend::Parallel);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SimConfig {
    pub nx: usize,
    pub ny: usize,
    pub dx: f32,
    pub init_x: f32,
    pub init_y: f32,
    /// Frame duration `h`.
    pub frame_dt: f32,
    /// Substeps per frame; each advances `frame_dt / substeps`.
    pub substeps: usize,
    pub stiffness: f32,
    pub stiffness_factor: f32,
    pub min_stiffness: f32,
    pub mass: f32,
    /// Gravity magnitude, applied along -y.
    pub gravity: f32,
    pub damping_decay: f32,
    /// Explicit pick radius. When unset, half a cell; see [`Self::pick_radius()`].
    pub pick_radius: Option<f32>,
    pub integrator: Integrator,
    pub backend: Backend,
}

impl SimConfig {
    /// Create a config holding the default constants.
    pub fn new() -> Self {
        Self {
            nx: N_X,
            ny: N_Y,
            dx: DX,
            init_x: INIT_X,
            init_y: INIT_Y,
            frame_dt: FRAME_DT,
            substeps: SUBSTEPS,
            stiffness: STIFFNESS,
            stiffness_factor: STIFFNESS_FACTOR,
            min_stiffness: MIN_STIFFNESS,
            mass: MASS,
            gravity: GRAVITY,
            damping_decay: DAMPING_DECAY,
            pick_radius: None,
            integrator: Integrator::default(),
            backend: Backend::default(),
        }
    }

    pub fn with_grid(mut self, nx: usize, ny: usize) -> Self {
        self.nx = nx;
        self.ny = ny;
        self
    }

    /// Set the cell spacing. A pick radius left unset follows as half a cell.
    pub fn with_spacing(mut self, dx: f32) -> Self {
        self.dx = dx;
        self
    }

    pub fn with_origin(mut self, init_x: f32, init_y: f32) -> Self {
        self.init_x = init_x;
        self.init_y = init_y;
        self
    }

    pub fn with_frame_dt(mut self, frame_dt: f32) -> Self {
        self.frame_dt = frame_dt;
        self
    }

    pub fn with_substeps(mut self, substeps: usize) -> Self {
        self.substeps = substeps;
        self
    }

    pub fn with_stiffness(mut self, stiffness: f32) -> Self {
        self.stiffness = stiffness;
        self
    }

    pub fn with_min_stiffness(mut self, min_stiffness: f32) -> Self {
        self.min_stiffness = min_stiffness;
        self
    }

    pub fn with_mass(mut self, mass: f32) -> Self {
        self.mass = mass;
        self
    }

    pub fn with_gravity(mut self, gravity: f32) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn with_damping_decay(mut self, damping_decay: f32) -> Self {
        self.damping_decay = damping_decay;
        self
    }

    /// Fix the pick radius regardless of the spacing.
    pub fn with_pick_radius(mut self, pick_radius: f32) -> Self {
        self.pick_radius = Some(pick_radius);
        self
    }

    pub fn with_integrator(mut self, integrator: Integrator) -> Self {
        self.integrator = integrator;
        self
    }

    pub fn with_backend(mut self, backend: Backend) -> Self {
        self.backend = backend;
        self
    }

    /// Substep size `dh = h / substeps`.
    pub fn substep_dt(&self) -> f32 {
        self.frame_dt / self.substeps as f32
    }

    /// Radius of the pick circle: the explicit value, or `dx / 2`.
    pub fn pick_radius(&self) -> f32 {
        self.pick_radius.unwrap_or(self.dx / 2.0)
    }

    /// Check the parameters a simulation cannot run without.
    pub fn validate(&self) -> Result<(), SimError> {
        if self.nx < 2 || self.ny < 2 {
            return Err(SimError::InvalidGrid {
                nx: self.nx,
                ny: self.ny,
            });
        }
        if self.substeps == 0 {
            return Err(SimError::InvalidParameter {
                name: "substeps",
                value: 0.0,
            });
        }

        let positive = [
            ("dx", self.dx),
            ("stiffness", self.stiffness),
            ("stiffness_factor", self.stiffness_factor),
            ("min_stiffness", self.min_stiffness),
            ("mass", self.mass),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(SimError::InvalidParameter { name, value });
            }
        }

        // A zero-length frame is allowed and leaves the state untouched.
        let non_negative = [
            ("frame_dt", self.frame_dt),
            ("gravity", self.gravity),
            ("damping_decay", self.damping_decay),
            ("pick_radius", self.pick_radius()),
        ];
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(SimError::InvalidParameter { name, value });
            }
        }

        Ok(())
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self::new()
    }
}
