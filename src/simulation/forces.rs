//! Pairwise force evaluation for the n-body engine
//!
//! Defines the [`PairInteraction`] seam the integrator is written against and
//! the direct Newtonian gravity law (no softening: callers guarantee that no
//! two bodies share a position)

use crate::simulation::states::{Body, NVec3};

/// Gravitational constant in SI units (N m^2 / kg^2)
pub const G: f64 = 6.674e-11;

/// A conservative interaction between two bodies
pub trait PairInteraction {
    /// Force that `a` experiences due to `b`
    fn force(&self, a: &Body, b: &Body) -> NVec3;

    /// Potential energy of the pair (negative for attraction)
    fn potential_energy(&self, a: &Body, b: &Body) -> f64;
}

/// Direct Newtonian gravity, F = G m_a m_b / d^2 along the line of centers
#[allow(non_snake_case)]
#[derive(Debug, Clone, Copy)]
pub struct NewtonianGravity {
    pub G: f64, // gravitational constant
}

impl Default for NewtonianGravity {
    fn default() -> Self {
        Self { G }
    }
}

impl PairInteraction for NewtonianGravity {
    fn force(&self, a: &Body, b: &Body) -> NVec3 {
        // r points from a to b, so a is pulled along +r
        let r = b.x - a.x;
        let d2 = r.norm_squared();
        let d = d2.sqrt();

        // mass product first: force(a, b) == -force(b, a) bit for bit
        let magnitude = self.G * (a.mass() * b.mass()) / d2;

        (magnitude / d) * r
    }

    fn potential_energy(&self, a: &Body, b: &Body) -> f64 {
        let d = (b.x - a.x).norm();
        -self.G * (a.mass() * b.mass()) / d
    }
}

/// Net force on every body in `bodies`
/// - `out[i]` is overwritten with the sum of `force(i, j)` over all `j != i`
///
/// Each unordered pair is evaluated once and applied with opposite signs.
/// `bodies` is only read, so every entry of `out` comes from the same snapshot.
pub fn accumulate_forces<L: PairInteraction + ?Sized>(law: &L, bodies: &[Body], out: &mut [NVec3]) {
    debug_assert_eq!(bodies.len(), out.len());

    // Zero buffer
    for f in out.iter_mut() {
        *f = NVec3::zeros();
    }

    let n = bodies.len();
    for i in 0..n {
        for j in (i + 1)..n {
            let f = law.force(&bodies[i], &bodies[j]);
            out[i] += f;
            out[j] -= f;
        }
    }
}

/// Net acceleration (force / mass) on every body, written into `out`
pub fn accumulate_accels<L: PairInteraction + ?Sized>(law: &L, bodies: &[Body], out: &mut [NVec3]) {
    accumulate_forces(law, bodies, out);
    for (a, b) in out.iter_mut().zip(bodies) {
        *a /= b.mass();
    }
}

/// Sum of the potential energy over each unordered pair exactly once
pub fn pair_potential<L: PairInteraction + ?Sized>(law: &L, bodies: &[Body]) -> f64 {
    let mut u = 0.0;
    for (i, bi) in bodies.iter().enumerate() {
        for bj in &bodies[i + 1..] {
            u += law.potential_energy(bi, bj);
        }
    }
    u
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::states::Rgb;

    fn at(name: &str, m: f64, x: [f64; 3]) -> Body {
        Body::new(name, m, x.into(), NVec3::zeros(), 0.0, Rgb::default())
    }

    #[test]
    fn magnitude_follows_newton() {
        let law = NewtonianGravity::default();
        let a = at("a", 2.0e3, [0.0, 0.0, 0.0]);
        let b = at("b", 5.0e3, [0.0, 10.0, 0.0]);

        let f = law.force(&a, &b);
        let expected = G * 2.0e3 * 5.0e3 / 100.0;
        assert!((f.norm() - expected).abs() <= 1e-12 * expected);
        assert!(f.y > 0.0 && f.x == 0.0 && f.z == 0.0, "force should point toward b: {:?}", f);

        let u = law.potential_energy(&a, &b);
        assert!((u + G * 2.0e3 * 5.0e3 / 10.0).abs() < 1e-18);
    }

    #[test]
    fn accumulated_forces_cancel() {
        let law = NewtonianGravity { G: 1.0 };
        let bodies = vec![
            at("a", 1.0, [0.0, 0.0, 0.0]),
            at("b", 2.0, [1.0, 0.0, 0.0]),
            at("c", 3.0, [0.0, 2.0, 1.0]),
        ];
        let mut out = vec![NVec3::zeros(); 3];
        accumulate_forces(&law, &bodies, &mut out);

        let net: NVec3 = out.iter().sum();
        assert!(net.norm() < 1e-12, "net force not zero: {:?}", net);
    }

    #[test]
    fn lone_body_feels_nothing() {
        let law = NewtonianGravity::default();
        let bodies = vec![at("solo", 1.0, [3.0, 4.0, 5.0])];
        let mut out = vec![NVec3::new(1.0, 1.0, 1.0)];
        accumulate_accels(&law, &bodies, &mut out);
        assert_eq!(out[0], NVec3::zeros());
        assert_eq!(pair_potential(&law, &bodies), 0.0);
    }
}
