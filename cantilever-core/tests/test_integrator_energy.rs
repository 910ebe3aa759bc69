//! Stability of the integration schemes on a single stiff spring

use cantilever_core::config::{DX, FRAME_DT, STIFFNESS, SUBSTEPS};
use cantilever_core::tests::test_helpers::{energy_trace, stretched_pair};
use cantilever_core::Integrator;

const STEPS: usize = 10_000;

fn dh() -> f32 {
    FRAME_DT / SUBSTEPS as f32
}

#[test]
fn test_symplectic_energy_bounded() {
    let mut system = stretched_pair(DX, 0.5 * DX);
    let e0 = system.elastic_energy(STIFFNESS);
    let trace = energy_trace(&mut system, Integrator::SymplecticEuler, STIFFNESS, dh(), STEPS);

    assert!(trace.iter().all(|e| e.is_finite()));
    let max = trace.iter().copied().fold(0.0f32, f32::max);
    assert!(max < 1.5 * e0, "energy grew from {} to {}", e0, max);

    // Still oscillating at the end, not damped out
    let tail_max = trace[STEPS - 200..].iter().copied().fold(0.0f32, f32::max);
    assert!(tail_max > 0.5 * e0);
}

#[test]
fn test_explicit_energy_diverges() {
    let mut system = stretched_pair(DX, 0.5 * DX);
    let e0 = system.elastic_energy(STIFFNESS);
    let trace = energy_trace(&mut system, Integrator::ExplicitEuler, STIFFNESS, dh(), STEPS);

    // Grows every step before the nodes first pass through each other
    assert!(trace[0] > e0);
    assert!(trace[..20].windows(2).all(|w| w[1] > w[0]));

    assert!(
        trace.iter().any(|e| !e.is_finite() || *e > 1e3 * e0),
        "explicit Euler should blow up at this step size"
    );
}

#[test]
fn test_symplectic_spring_oscillates_about_rest() {
    let mut system = stretched_pair(DX, 0.5 * DX);
    let rest = system.rest_lengths[0];
    let mut shortest = f32::MAX;
    let mut longest = 0.0f32;
    for _ in 0..200 {
        energy_trace(&mut system, Integrator::SymplecticEuler, STIFFNESS, dh(), 1);
        let l = system.edge_length(0);
        shortest = shortest.min(l);
        longest = longest.max(l);
    }
    assert!(shortest < rest && longest > rest);
}
