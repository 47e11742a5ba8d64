//! Fixed-step time integrators for the orbital system
//!
//! Provides semi-implicit Euler and velocity-Verlet, both driven by a
//! [`PairInteraction`], plus the shared per-step bookkeeping: re-centering
//! on the primary body, trajectory sampling and energy tracking

use super::engine::Engine;
use super::forces::{accumulate_accels, pair_potential, PairInteraction};
use super::states::{Body, NVec3};
use super::trajectory::Trajectory;
use crate::configuration::config::IntegratorConfig;

/// Advance all bodies by one step using semi-implicit Euler
/// Velocities are kicked first and the updated velocity drives the position
/// update. First order; energy drifts over long runs.
pub fn euler_step<L: PairInteraction + ?Sized>(bodies: &mut [Body], law: &L, dt: f64) {
    let n = bodies.len();
    if n == 0 { // no bodies, return
        return;
    }

    // a_n from x_n, computed for every body before anything moves
    let mut a = vec![NVec3::zeros(); n];
    accumulate_accels(law, bodies, &mut a);

    // v_n+1 = v_n + dt * a_n
    // x_n+1 = x_n + dt * v_n+1
    for (b, a) in bodies.iter_mut().zip(a.iter()) {
        b.v += dt * *a;
        b.x += dt * b.v;
    }
}

/// Advance all bodies by one step using velocity-Verlet
/// Uses two force evaluations per step: one at x_n and one at x_n+1
pub fn verlet_step<L: PairInteraction + ?Sized>(bodies: &mut [Body], law: &L, dt: f64) {
    let n = bodies.len();
    if n == 0 { // no bodies, return
        return;
    }

    let half_dt2 = 0.5 * dt * dt;

    // a_old[i] holds a_n for body i at the current positions
    let mut a_old = vec![NVec3::zeros(); n];
    accumulate_accels(law, bodies, &mut a_old);

    // x_n+1 = x_n + dt v_n + (1/2 dt^2) a_n
    for (b, a) in bodies.iter_mut().zip(a_old.iter()) {
        b.x += dt * b.v + half_dt2 * *a;
    }

    // Fresh pass at x_n+1; a_old is stale now
    let mut a_new = vec![NVec3::zeros(); n];
    accumulate_accels(law, bodies, &mut a_new);

    // v_n+1 = v_n + (1/2 dt) (a_n + a_n+1)
    for ((b, a0), a1) in bodies.iter_mut().zip(a_old.iter()).zip(a_new.iter()) {
        b.v += 0.5 * dt * (*a0 + *a1);
    }
}

/// Shift every position so the primary (first) body sits at the origin.
/// Velocities are untouched.
pub fn recenter(bodies: &mut [Body]) {
    let Some(primary) = bodies.first() else {
        return;
    };
    let offset = -primary.x;
    for b in bodies.iter_mut() {
        b.x += offset;
    }
}

/// Total mechanical energy: kinetic energy minus the binding energy of each
/// unordered pair (binding = -U = G m_i m_j / d)
pub fn total_energy<L: PairInteraction + ?Sized>(law: &L, bodies: &[Body]) -> f64 {
    let kinetic: f64 = bodies.iter().map(Body::kinetic_energy).sum();
    let binding = -pair_potential(law, bodies);
    kinetic - binding
}

/// One full integration step: advance with the engine's scheme, re-center,
/// append a sample per body and, when tracking, the total energy
pub fn integrate_step<L: PairInteraction + ?Sized>(
    engine: &Engine,
    law: &L,
    bodies: &mut [Body],
    dt: f64,
    trajectory: &mut Trajectory,
    energy: Option<&mut Vec<f64>>,
) {
    match engine.integrator {
        IntegratorConfig::Euler => euler_step(bodies, law, dt),
        IntegratorConfig::Verlet => verlet_step(bodies, law, dt),
    }

    recenter(bodies);
    trajectory.record(bodies);

    if let Some(trace) = energy {
        trace.push(total_energy(law, bodies));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::forces::NewtonianGravity;
    use crate::simulation::states::Rgb;

    fn body(name: &str, m: f64, x: [f64; 3], v: [f64; 3]) -> Body {
        Body::new(name, m, x.into(), v.into(), 0.0, Rgb::default())
    }

    #[test]
    fn euler_uses_updated_velocity() {
        // two unit masses, G = 1, one unit apart: a = 1 toward each other
        let law = NewtonianGravity { G: 1.0 };
        let mut bodies = vec![
            body("a", 1.0, [0.0, 0.0, 0.0], [0.0, 0.0, 0.0]),
            body("b", 1.0, [1.0, 0.0, 0.0], [0.0, 0.0, 0.0]),
        ];
        euler_step(&mut bodies, &law, 0.1);

        // v = 0.1, x = 0 + 0.1 * 0.1
        assert!((bodies[0].v.x - 0.1).abs() < 1e-15);
        assert!((bodies[0].x.x - 0.01).abs() < 1e-15);
        assert!((bodies[1].x.x - 0.99).abs() < 1e-15);
    }

    #[test]
    fn verlet_uses_fresh_forces_for_velocity() {
        let law = NewtonianGravity { G: 1.0 };
        let mut bodies = vec![
            body("a", 1.0, [0.0, 0.0, 0.0], [0.0, 0.0, 0.0]),
            body("b", 1.0, [1.0, 0.0, 0.0], [0.0, 0.0, 0.0]),
        ];
        let dt = 0.1;
        verlet_step(&mut bodies, &law, dt);

        // x_a = 0.5 a dt^2 = 0.005, separation 0.99
        assert!((bodies[0].x.x - 0.005).abs() < 1e-15);
        let a_new = 1.0 / (0.99 * 0.99);
        let expected_v = 0.5 * dt * (1.0 + a_new);
        assert!((bodies[0].v.x - expected_v).abs() < 1e-14, "v = {}", bodies[0].v.x);
    }

    #[test]
    fn recenter_pins_primary_to_origin() {
        let mut bodies = vec![
            body("p", 1.0, [0.3, -1.7, 2.2], [1.0, 0.0, 0.0]),
            body("q", 1.0, [1.3, -1.7, 2.2], [0.0, 0.0, 0.0]),
        ];
        recenter(&mut bodies);
        assert_eq!(bodies[0].x, NVec3::zeros());
        assert!((bodies[1].x - NVec3::new(1.0, 0.0, 0.0)).norm() < 1e-15);
        assert_eq!(bodies[0].v, NVec3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn energy_is_kinetic_plus_pair_potential() {
        let law = NewtonianGravity { G: 1.0 };
        let bodies = vec![
            body("a", 2.0, [0.0, 0.0, 0.0], [1.0, 0.0, 0.0]),
            body("b", 3.0, [0.0, 2.0, 0.0], [0.0, 0.0, 2.0]),
        ];
        // KE = 1 + 6, U = -6 / 2
        assert!((total_energy(&law, &bodies) - 4.0).abs() < 1e-15);
    }
}
