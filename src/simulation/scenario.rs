//! Build fully-initialized simulation scenarios from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces the runtime bundle
//! containing:
//! - run parameters (`Parameters`)
//! - a validated `Simulation` holding the bodies at t = 0 and the engine
//!   settings (`Simulation::engine`)

use tracing::debug;

use crate::configuration::config::{ConfigError, ScenarioConfig};
use crate::simulation::engine::Engine;
use crate::simulation::params::Parameters;
use crate::simulation::simulator::Simulation;
use crate::simulation::states::{Body, BodySet, NVec3};

/// Runtime bundle constructed from a [`ScenarioConfig`]
#[derive(Debug, Clone)]
pub struct Scenario {
    pub parameters: Parameters,
    pub simulation: Simulation,
}

impl Scenario {
    pub fn build_scenario(cfg: ScenarioConfig) -> Result<Self, ConfigError> {
        // Bodies: map `BodyConfig` -> runtime `Body`, keeping document order
        let mut bodies = BodySet::new();
        for (name, bc) in cfg.celestial_bodies.0 {
            let color = bc.color.to_rgb()?;
            bodies.insert(Body::new(
                name,
                bc.mass,
                NVec3::from(bc.position),
                NVec3::from(bc.velocity),
                bc.radius,
                color,
            ))?;
        }

        // Engine (runtime) from SimulationConfig
        let s_cfg = cfg.simulation;
        let engine = Engine::new(s_cfg.integrator).with_energy_tracking(s_cfg.track_energy);

        let parameters = Parameters {
            duration: s_cfg.duration,
            timestep: s_cfg.timestep,
            animation_duration: cfg.animation.duration,
        };

        debug!(bodies = bodies.len(), ?engine, ?parameters, "scenario built");

        let simulation = Simulation::new(bodies, engine)?;

        Ok(Self {
            parameters,
            simulation,
        })
    }

    /// Run the configured duration at the configured timestep
    pub fn run(&mut self) -> Result<usize, ConfigError> {
        let steps = self
            .simulation
            .run(self.parameters.duration, self.parameters.timestep)?;
        Ok(steps)
    }
}
