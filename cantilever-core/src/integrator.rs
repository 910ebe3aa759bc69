use glam::Vec2;
use rayon::prelude::*;

use crate::config::Backend;
use crate::diagnostics::SimError;
use crate::engine::SpringSystem;

/// Time-integration scheme, fixed at configuration time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Integrator {
    /// Position from the old velocity, then velocity. Gains energy on stiff
    /// springs; kept for comparison.
    ExplicitEuler,
    /// Velocity first, then position from the updated velocity.
    #[default]
    SymplecticEuler,
    /// Reserved. Selecting it reports [`SimError::Unimplemented`].
    ImplicitEuler,
}

impl Integrator {
    pub fn name(&self) -> &'static str {
        match self {
            Self::ExplicitEuler => "explicit Euler",
            Self::SymplecticEuler => "symplectic Euler",
            Self::ImplicitEuler => "implicit Euler",
        }
    }

    /// Advance positions and velocities by `dh` from the current `gradient`.
    ///
    /// Acceleration is `-grad / mass - (0, gravity)`.
    pub fn integrate(
        &self,
        system: &mut SpringSystem,
        dh: f32,
        mass: f32,
        gravity: f32,
        backend: Backend,
    ) -> Result<(), SimError> {
        let update: fn(&mut Vec2, &mut Vec2, Vec2, f32) = match self {
            Self::ExplicitEuler => |x: &mut Vec2, v: &mut Vec2, acc: Vec2, dh: f32| {
                *x += dh * *v;
                *v += dh * acc;
            },
            Self::SymplecticEuler => |x: &mut Vec2, v: &mut Vec2, acc: Vec2, dh: f32| {
                *v += dh * acc;
                *x += dh * *v;
            },
            Self::ImplicitEuler => {
                return Err(SimError::Unimplemented {
                    feature: "implicit Euler integration",
                })
            }
        };

        let g = Vec2::new(0.0, gravity);
        let SpringSystem {
            positions,
            velocities,
            gradient,
            ..
        } = system;

        match backend {
            Backend::Serial => {
                for ((x, v), grad) in positions
                    .iter_mut()
                    .zip(velocities.iter_mut())
                    .zip(gradient.iter())
                {
                    update(x, v, -*grad / mass - g, dh);
                }
            }
            Backend::Parallel => {
                positions
                    .par_iter_mut()
                    .zip(velocities.par_iter_mut())
                    .zip(gradient.par_iter())
                    .for_each(|((x, v), grad)| update(x, v, -*grad / mass - g, dh));
            }
        }

        Ok(())
    }
}

impl std::fmt::Display for Integrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
