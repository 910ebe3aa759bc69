use crate::config::SimConfig;
use crate::constraints::{apply_damping, apply_left_clamp, apply_pick, apply_wall};
use crate::diagnostics::SimError;
use crate::engine::SpringSystem;
use crate::topology::Topology;
use glam::Vec2;

/// Discrete key effect sampled by the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Reset,
    IncreaseStiffness,
    DecreaseStiffness,
    TogglePause,
    ToggleDamping,
    /// Run one frame's worth of substeps even while paused
    RunOnce,
}

/// Everything the presentation layer observed during one frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameInput {
    pub commands: Vec<Command>,
    /// World-space pointer position while the pick button is held
    pub pointer: Option<Vec2>,
}

impl FrameInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_command(mut self, command: Command) -> Self {
        self.commands.push(command);
        self
    }

    pub fn with_pointer(mut self, pointer: Vec2) -> Self {
        self.pointer = Some(pointer);
        self
    }
}

/// Direction of a stiffness change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StiffnessChange {
    Increase,
    Decrease,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickCircle {
    pub center: Vec2,
    pub radius: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EnergySummary {
    pub elastic: f32,
    pub kinetic: f32,
    pub gravitational: f32,
}

impl EnergySummary {
    pub fn total(&self) -> f32 {
        self.elastic + self.kinetic + self.gravitational
    }
}

/// Per-frame snapshot handed to the presentation layer
#[derive(Debug, Clone, PartialEq)]
pub struct FrameView<'a> {
    pub positions: &'a [Vec2],
    pub edges: &'a [[usize; 2]],
    /// The wall is the vertical line `x = wall_x`
    pub wall_x: f32,
    pub pick: Option<PickCircle>,
    pub stiffness: f32,
    pub damping: bool,
    pub paused: bool,
    pub energy: EnergySummary,
}

/// The cantilever: lattice state plus the interaction parameters that the
/// presentation layer adjusts between frames
#[derive(Debug, Clone)]
pub struct Simulation {
    config: SimConfig,
    topology: Topology,
    system: SpringSystem,
    stiffness: f32,
    damping: bool,
    paused: bool,
    pick: Option<Vec2>,
    substep: u64,
}

impl Simulation {
    /// Build the lattice, place the nodes, and fix the rest lengths.
    pub fn new(config: SimConfig) -> Result<Self, SimError> {
        config.validate()?;

        let topology = Topology::build(config.nx, config.ny);
        let positions = grid_positions(&config);
        let system = SpringSystem::new(positions, topology.edges.clone());

        ftlog::info!(
            "Built {}x{} cantilever: {} nodes, {} springs, {} triangles, {}",
            config.nx,
            config.ny,
            system.node_count(),
            system.edge_count(),
            topology.triangles.len(),
            config.integrator
        );

        Ok(Self {
            stiffness: config.stiffness,
            config,
            topology,
            system,
            damping: false,
            paused: true,
            pick: None,
            substep: 0,
        })
    }

    /// Put every node back on the grid with zero velocity and restore the
    /// configured stiffness. Rest lengths are kept.
    pub fn reset(&mut self) {
        self.system.positions = grid_positions(&self.config);
        self.system.velocities.fill(Vec2::ZERO);
        self.stiffness = self.config.stiffness;
        self.substep = 0;
        ftlog::info!("Reset cantilever to rest pose");
    }

    /// Adopt the current shape as the rest shape.
    pub fn relax(&mut self) {
        self.system.init_rest_lengths();
        ftlog::info!("Rest lengths recomputed from current positions");
    }

    /// Scale stiffness by the configured factor. Decreases stop at
    /// `min_stiffness`.
    pub fn set_stiffness(&mut self, change: StiffnessChange) {
        let factor = self.config.stiffness_factor;
        let scaled = match change {
            StiffnessChange::Increase => self.stiffness * factor,
            StiffnessChange::Decrease => self.stiffness / factor,
        };
        if scaled < self.config.min_stiffness {
            ftlog::warn!(
                "Stiffness {} below floor, clamped to {}",
                scaled,
                self.config.min_stiffness
            );
        }
        self.stiffness = scaled.max(self.config.min_stiffness);
        ftlog::debug!("Stiffness set to {}", self.stiffness);
    }

    pub fn set_damping(&mut self, enabled: bool) {
        self.damping = enabled;
    }

    pub fn toggle_damping(&mut self) {
        self.damping = !self.damping;
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    /// Hold nodes near `cursor` while `active`.
    pub fn set_pick(&mut self, active: bool, cursor: Vec2) {
        self.pick = active.then_some(cursor);
    }

    /// One substep: gradient, integration, then damping and constraints.
    pub fn step(&mut self) -> Result<(), SimError> {
        let config = &self.config;
        let dh = config.substep_dt();

        self.system.compute_gradient(self.stiffness, config.backend);
        config
            .integrator
            .integrate(&mut self.system, dh, config.mass, config.gravity, config.backend)?;

        if self.damping {
            apply_damping(&mut self.system, dh, config.damping_decay);
        }
        if let Some(cursor) = self.pick {
            apply_pick(&mut self.system, cursor, config.pick_radius());
        }
        apply_wall(
            &mut self.system,
            self.topology.wall_nodes(),
            config.init_x,
            config.init_y,
            config.dx,
        );
        apply_left_clamp(&mut self.system, config.init_x);

        self.substep += 1;

        if let Some(node) = self.system.first_non_finite() {
            ftlog::error!("Node {} non-finite after substep {}", node, self.substep);
            return Err(SimError::NonFinite {
                node,
                substep: self.substep,
            });
        }
        Ok(())
    }

    /// Run all substeps of one frame.
    pub fn step_frame(&mut self) -> Result<(), SimError> {
        for _ in 0..self.config.substeps {
            self.step()?;
        }
        Ok(())
    }

    /// Apply one frame of input, then advance a frame unless paused.
    ///
    /// The pick is released first, so key commands such as `RunOnce` run
    /// unconstrained; commands run in the order received, and the pointer,
    /// if held, then becomes the pick for this frame's substeps.
    pub fn advance(&mut self, input: &FrameInput) -> Result<(), SimError> {
        self.pick = None;

        for command in &input.commands {
            match command {
                Command::Reset => self.reset(),
                Command::IncreaseStiffness => self.set_stiffness(StiffnessChange::Increase),
                Command::DecreaseStiffness => self.set_stiffness(StiffnessChange::Decrease),
                Command::TogglePause => self.toggle_pause(),
                Command::ToggleDamping => self.toggle_damping(),
                Command::RunOnce => self.step_frame()?,
            }
        }

        if let Some(cursor) = input.pointer {
            self.set_pick(true, cursor);
        }

        if !self.paused {
            self.step_frame()?;
        }
        Ok(())
    }

    pub fn view(&self) -> FrameView<'_> {
        FrameView {
            positions: &self.system.positions,
            edges: &self.system.edges,
            wall_x: self.config.init_x,
            pick: self.pick.map(|center| PickCircle {
                center,
                radius: self.config.pick_radius(),
            }),
            stiffness: self.stiffness,
            damping: self.damping,
            paused: self.paused,
            energy: self.energy(),
        }
    }

    pub fn energy(&self) -> EnergySummary {
        EnergySummary {
            elastic: self.system.elastic_energy(self.stiffness),
            kinetic: self.system.kinetic_energy(self.config.mass),
            gravitational: self
                .system
                .gravitational_energy(self.config.mass, self.config.gravity),
        }
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    pub fn system(&self) -> &SpringSystem {
        &self.system
    }

    /// Direct access for tests and tools that need to perturb the state.
    pub fn system_mut(&mut self) -> &mut SpringSystem {
        &mut self.system
    }

    pub fn positions(&self) -> &[Vec2] {
        &self.system.positions
    }

    pub fn velocities(&self) -> &[Vec2] {
        &self.system.velocities
    }

    pub fn rest_lengths(&self) -> &[f32] {
        &self.system.rest_lengths
    }

    /// Position of node `(i, j)`.
    pub fn position_at(&self, i: usize, j: usize) -> Vec2 {
        self.system.positions[self.topology.index(i, j)]
    }

    pub fn stiffness(&self) -> f32 {
        self.stiffness
    }

    pub fn damping(&self) -> bool {
        self.damping
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn pick(&self) -> Option<Vec2> {
        self.pick
    }

    /// Substeps run since construction or the last reset.
    pub fn substep_count(&self) -> u64 {
        self.substep
    }
}

/// Node `(i, j)` at `(init_x + i * dx, init_y + j * dx)`, indexed `i * ny + j`.
pub fn grid_positions(config: &SimConfig) -> Vec<Vec2> {
    let mut positions = Vec::with_capacity(config.nx * config.ny);
    for i in 0..config.nx {
        for j in 0..config.ny {
            positions.push(Vec2::new(
                config.init_x + i as f32 * config.dx,
                config.init_y + j as f32 * config.dx,
            ));
        }
    }
    positions
}
