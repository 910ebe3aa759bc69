//! Gradient accumulation and rest-length tests

use cantilever_core::tests::test_helpers::{
    approx_eq_vec2, build_simulation, stretched_pair, weightless_config,
};
use cantilever_core::{Backend, SimConfig, Simulation};
use glam::Vec2;

#[test]
fn test_rest_lengths_match_initial_distances() {
    let sim = build_simulation(SimConfig::default());
    let system = sim.system();
    for (e, [a, b]) in system.edges.iter().enumerate() {
        assert_eq!(
            system.rest_lengths[e],
            (system.positions[*a] - system.positions[*b]).length()
        );
    }
}

#[test]
fn test_gradient_zero_at_rest_pose() {
    let sim = build_simulation(SimConfig::default());
    let mut system = sim.system().clone();
    system.compute_gradient(sim.stiffness(), Backend::Serial);
    assert!(system.gradient.iter().all(|g| *g == Vec2::ZERO));

    system.compute_gradient(sim.stiffness(), Backend::Parallel);
    assert!(system.gradient.iter().all(|g| *g == Vec2::ZERO));
}

#[test]
fn test_rest_pose_unchanged_without_gravity() {
    for frame_dt in [0.0, 16.7e-3] {
        let mut sim = build_simulation(weightless_config().with_frame_dt(frame_dt));
        let before = sim.positions().to_vec();
        sim.step_frame().unwrap();
        assert_eq!(sim.positions(), &before[..]);
        assert!(sim.velocities().iter().all(|v| *v == Vec2::ZERO));
    }
}

#[test]
fn test_gradient_matches_hooke() {
    // k_e = 3e4 / 0.5 = 6e4, stretch 0.1 -> |g| = 6e3
    let mut system = stretched_pair(0.5, 0.1);
    system.compute_gradient(3e4, Backend::Serial);
    assert!(approx_eq_vec2(system.gradient[0], Vec2::new(-6e3, 0.0), 1e-1));
    assert!(approx_eq_vec2(system.gradient[1], Vec2::new(6e3, 0.0), 1e-1));
}

#[test]
fn test_gradient_sums_to_zero() {
    let mut sim = build_simulation(SimConfig::default());
    for (k, x) in sim.system_mut().positions.iter_mut().enumerate() {
        x.y += 0.002 * (k % 5) as f32;
        x.x -= 0.001 * (k % 3) as f32;
    }
    let mut system = sim.system().clone();
    system.compute_gradient(sim.stiffness(), Backend::Serial);
    let total: Vec2 = system.gradient.iter().copied().sum();
    let scale: f32 = system.gradient.iter().map(|g| g.length()).sum();
    assert!(total.length() <= 1e-4 * scale.max(1.0));
}

#[test]
fn test_parallel_gradient_matches_serial() {
    let mut sim = Simulation::new(SimConfig::default()).unwrap();
    for (k, x) in sim.system_mut().positions.iter_mut().enumerate() {
        x.y -= 0.003 * (k as f32).sin();
    }

    let mut serial = sim.system().clone();
    let mut parallel = sim.system().clone();
    serial.compute_gradient(sim.stiffness(), Backend::Serial);
    parallel.compute_gradient(sim.stiffness(), Backend::Parallel);

    // Summation order differs between backends
    let scale = serial.gradient.iter().map(|g| g.length()).fold(1.0f32, f32::max);
    for (s, p) in serial.gradient.iter().zip(&parallel.gradient) {
        assert!(approx_eq_vec2(*s, *p, 1e-5 * scale));
    }
}

#[test]
fn test_stiffness_scales_gradient_linearly() {
    let mut soft = stretched_pair(1.0, 0.2);
    let mut stiff = soft.clone();
    soft.compute_gradient(100.0, Backend::Serial);
    stiff.compute_gradient(200.0, Backend::Serial);
    assert!(approx_eq_vec2(stiff.gradient[0], 2.0 * soft.gradient[0], 1e-4));
}
