//! Core state types for the orbital simulation.
//!
//! - `Body`    one celestial object: fixed identity plus mutable kinematics
//! - `BodySet` ordered collection of bodies with a name lookup table
//!
//! Positions and velocities are `NVec3` (SI units: m, m/s).

use std::collections::HashMap;

use nalgebra::Vector3;

use super::error::{Degeneracy, SimulationError};

pub type NVec3 = Vector3<f64>;

/// Display color of a body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb(pub u8, pub u8, pub u8);

#[derive(Debug, Clone)]
pub struct Body {
    pub x: NVec3, // position
    pub v: NVec3, // velocity
    name: String,
    m: f64,      // mass
    radius: f64, // display only
    color: Rgb,  // display only
}

impl Body {
    /// Plain field storage, no checks. `BodySet::validate` owns the invariants.
    pub fn new(name: impl Into<String>, m: f64, x: NVec3, v: NVec3, radius: f64, color: Rgb) -> Self {
        Self {
            x,
            v,
            name: name.into(),
            m,
            radius,
            color,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mass(&self) -> f64 {
        self.m
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn color(&self) -> Rgb {
        self.color
    }

    /// 1/2 m |v|^2
    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.m * self.v.norm_squared()
    }
}

/// Bodies in insertion order. The first body is the primary that the
/// integrator keeps at the origin.
#[derive(Debug, Clone, Default)]
pub struct BodySet {
    bodies: Vec<Body>,
    index: HashMap<String, usize>,
}

impl BodySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a body. Names are unique keys.
    pub fn insert(&mut self, body: Body) -> Result<usize, SimulationError> {
        if self.index.contains_key(body.name()) {
            return Err(SimulationError::DuplicateBody(body.name().to_string()));
        }
        let i = self.bodies.len();
        self.index.insert(body.name().to_string(), i);
        self.bodies.push(body);
        Ok(i)
    }

    /// Builder form of [`BodySet::insert`]
    pub fn with(mut self, body: Body) -> Result<Self, SimulationError> {
        self.insert(body)?;
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn primary(&self) -> Option<&Body> {
        self.bodies.first()
    }

    pub fn get(&self, name: &str) -> Option<&Body> {
        self.index.get(name).map(|&i| &self.bodies[i])
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Body> {
        match self.index.get(name) {
            Some(&i) => Some(&mut self.bodies[i]),
            None => None,
        }
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn as_slice(&self) -> &[Body] {
        &self.bodies
    }

    /// Kinematic state is mutable through the slice; the name table is not.
    pub fn as_mut_slice(&mut self) -> &mut [Body] {
        &mut self.bodies
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Body> {
        self.bodies.iter()
    }

    /// Check the invariants the force law depends on: strictly positive
    /// finite masses, finite kinematic state, and pairwise distinct positions.
    pub fn validate(&self) -> Result<(), Degeneracy> {
        for b in &self.bodies {
            if !b.m.is_finite() || b.m <= 0.0 {
                return Err(Degeneracy::NonPositiveMass {
                    name: b.name.clone(),
                    mass: b.m,
                });
            }
            if !is_finite(&b.x) || !is_finite(&b.v) {
                return Err(Degeneracy::NonFiniteState {
                    name: b.name.clone(),
                });
            }
        }

        for (i, bi) in self.bodies.iter().enumerate() {
            for bj in &self.bodies[i + 1..] {
                if bi.x == bj.x {
                    return Err(Degeneracy::CoincidentBodies {
                        first: bi.name.clone(),
                        second: bj.name.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a BodySet {
    type Item = &'a Body;
    type IntoIter = std::slice::Iter<'a, Body>;

    fn into_iter(self) -> Self::IntoIter {
        self.bodies.iter()
    }
}

pub(crate) fn is_finite(v: &NVec3) -> bool {
    v.iter().all(|c| c.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(name: &str, m: f64, x: [f64; 3]) -> Body {
        Body::new(name, m, x.into(), NVec3::zeros(), 1.0, Rgb(255, 255, 255))
    }

    #[test]
    fn insertion_order_decides_primary() {
        let set = BodySet::new()
            .with(body("sun", 2.0e30, [0.0, 0.0, 0.0]))
            .and_then(|s| s.with(body("earth", 6.0e24, [1.5e11, 0.0, 0.0])))
            .unwrap();

        assert_eq!(set.primary().unwrap().name(), "sun");
        assert_eq!(set.index_of("earth"), Some(1));
        assert_eq!(set.get("earth").unwrap().mass(), 6.0e24);
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let mut set = BodySet::new();
        set.insert(body("a", 1.0, [0.0, 0.0, 0.0])).unwrap();
        let err = set.insert(body("a", 1.0, [1.0, 0.0, 0.0])).unwrap_err();
        assert_eq!(err, SimulationError::DuplicateBody("a".into()));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn validate_catches_coincident_and_massless_bodies() {
        let mut set = BodySet::new();
        set.insert(body("a", 1.0, [1.0, 2.0, 3.0])).unwrap();
        set.insert(body("b", 1.0, [1.0, 2.0, 3.0])).unwrap();
        assert!(matches!(set.validate(), Err(Degeneracy::CoincidentBodies { .. })));

        let mut set = BodySet::new();
        set.insert(body("a", 0.0, [0.0, 0.0, 0.0])).unwrap();
        assert!(matches!(set.validate(), Err(Degeneracy::NonPositiveMass { .. })));

        let mut set = BodySet::new();
        set.insert(body("a", f64::NAN, [0.0, 0.0, 0.0])).unwrap();
        assert!(matches!(set.validate(), Err(Degeneracy::NonPositiveMass { .. })));
    }
}
