//! Determinism tests - the same inputs produce identical states

use cantilever_core::tests::test_helpers::build_simulation;
use cantilever_core::{Backend, Command, FrameInput, SimConfig, Simulation};
use glam::Vec2;

fn scripted_run(config: SimConfig) -> Simulation {
    let mut sim = build_simulation(config);
    let tip = sim.position_at(19, 0);
    sim.advance(&FrameInput::new().with_command(Command::TogglePause))
        .unwrap();
    for frame in 0..30 {
        let mut input = FrameInput::new();
        if frame == 5 {
            input = input.with_command(Command::ToggleDamping);
        }
        if (10..15).contains(&frame) {
            input = input.with_pointer(tip + Vec2::new(0.0, 0.002 * (frame - 9) as f32));
        }
        sim.advance(&input).unwrap();
    }
    sim
}

#[test]
fn test_serial_runs_identical() {
    let a = scripted_run(SimConfig::default());
    let b = scripted_run(SimConfig::default());
    assert_eq!(a.positions(), b.positions());
    assert_eq!(a.velocities(), b.velocities());
}

#[test]
fn test_parallel_tracks_serial() {
    let serial = scripted_run(SimConfig::default());
    let parallel = scripted_run(SimConfig::default().with_backend(Backend::Parallel));
    for (s, p) in serial.positions().iter().zip(parallel.positions()) {
        assert!((*s - *p).length() < 1e-3, "{:?} vs {:?}", s, p);
    }
}
