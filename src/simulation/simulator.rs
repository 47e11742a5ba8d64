//! Simulation driver
//!
//! Owns the body set together with the trajectory and energy buffers of a
//! run, and steps the integrator a requested number of times.

use tracing::{debug, info, warn};

use super::engine::Engine;
use super::error::{Degeneracy, SimulationError};
use super::forces::{NewtonianGravity, PairInteraction};
use super::integrator::{integrate_step, total_energy};
use super::params::whole_steps;
use super::states::{is_finite, BodySet};
use super::trajectory::{History, Trajectory};

/// Upper bound on samples per track reserved up front; longer runs grow
/// the buffers as they go
const RESERVE_CHUNK: usize = 1 << 16;

#[derive(Debug, Clone)]
pub struct Simulation<L = NewtonianGravity> {
    bodies: BodySet,
    engine: Engine,
    law: L,
    trajectory: Trajectory,
    energy: Option<Vec<f64>>,
    t: f64, // simulated time advanced so far
}

impl Simulation<NewtonianGravity> {
    /// Simulation under Newtonian gravity with the SI gravitational constant
    pub fn new(bodies: BodySet, engine: Engine) -> Result<Self, SimulationError> {
        Self::with_law(bodies, engine, NewtonianGravity::default())
    }
}

impl<L: PairInteraction> Simulation<L> {
    /// Rejects a degenerate body set up front, before any step is taken
    pub fn with_law(bodies: BodySet, engine: Engine, law: L) -> Result<Self, SimulationError> {
        bodies.validate()?;

        let trajectory = Trajectory::for_bodies(&bodies);
        let energy = engine.track_energy.then(Vec::new);

        Ok(Self {
            bodies,
            engine,
            law,
            trajectory,
            energy,
            t: 0.0,
        })
    }

    /// Run `floor(total_time / dt)` steps and return how many were taken.
    /// A trailing partial step is not simulated.
    pub fn run(&mut self, total_time: f64, dt: f64) -> Result<usize, SimulationError> {
        check_step(total_time, dt)?;

        let steps = whole_steps(total_time, dt);
        let covered = steps as f64 * dt;
        if covered < total_time {
            warn!(
                total_time,
                dt,
                dropped = total_time - covered,
                "total time is not a multiple of dt, dropping the partial step"
            );
        }

        self.run_steps(steps, dt)
    }

    /// Run exactly `steps` steps of size `dt`.
    ///
    /// Either every step completes and the results are committed, or an
    /// error is returned and bodies, trajectory, energy trace and elapsed
    /// time are left as they were.
    pub fn run_steps(&mut self, steps: usize, dt: f64) -> Result<usize, SimulationError> {
        check_step(0.0, dt)?;
        self.bodies.validate()?;

        debug!(
            steps,
            dt,
            bodies = self.bodies.len(),
            integrator = ?self.engine.integrator,
            track_energy = self.engine.track_energy,
            "starting run"
        );

        let recorded = self.trajectory.len();
        self.trajectory.reserve(steps.min(RESERVE_CHUNK));

        let mut working = self.bodies.as_slice().to_vec();
        for step in 0..steps {
            integrate_step(
                &self.engine,
                &self.law,
                &mut working,
                dt,
                &mut self.trajectory,
                self.energy.as_mut(),
            );

            if let Some(b) = working.iter().find(|b| !is_finite(&b.x) || !is_finite(&b.v)) {
                let err = Degeneracy::Diverged {
                    name: b.name().to_string(),
                    step,
                };
                self.rollback(recorded);
                return Err(err.into());
            }
        }

        self.bodies.as_mut_slice().clone_from_slice(&working);
        self.t += steps as f64 * dt;

        info!(steps, elapsed = self.t, "run complete");
        Ok(steps)
    }

    fn rollback(&mut self, recorded: usize) {
        self.trajectory.truncate(recorded);
        if let Some(trace) = self.energy.as_mut() {
            trace.truncate(recorded);
        }
    }

    /// Total energy of the current state, whether or not tracking is on
    pub fn total_energy(&self) -> f64 {
        total_energy(&self.law, self.bodies.as_slice())
    }

    pub fn bodies(&self) -> &BodySet {
        &self.bodies
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn elapsed(&self) -> f64 {
        self.t
    }

    pub fn trajectory(&self) -> &Trajectory {
        &self.trajectory
    }

    /// Energy after each step, `None` when tracking is disabled
    pub fn energy(&self) -> Option<&[f64]> {
        self.energy.as_deref()
    }

    pub fn into_history(self) -> History {
        History {
            trajectory: self.trajectory,
            energy: self.energy,
        }
    }
}

fn check_step(total_time: f64, dt: f64) -> Result<(), SimulationError> {
    let dt_ok = dt > 0.0 && dt.is_finite();
    let total_ok = total_time >= 0.0 && total_time.is_finite();
    if dt_ok && total_ok {
        Ok(())
    } else {
        Err(SimulationError::InvalidStep { dt, total_time })
    }
}
