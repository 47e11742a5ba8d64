pub mod simulation;
pub mod configuration;
#[cfg(feature = "viewer")]
pub mod visualization;

pub use simulation::states::{Body, BodySet, NVec3, Rgb};
pub use simulation::error::{Degeneracy, SimulationError};
pub use simulation::forces::{accumulate_forces, NewtonianGravity, PairInteraction, G};
pub use simulation::integrator::{euler_step, verlet_step, recenter, total_energy, integrate_step};
pub use simulation::trajectory::{History, Sample, Track, Trajectory};
pub use simulation::engine::Engine;
pub use simulation::params::Parameters;
pub use simulation::simulator::Simulation;
pub use simulation::scenario::Scenario;
pub use configuration::config::{ConfigError, IntegratorConfig, ScenarioConfig, BodyConfig, SimulationConfig, AnimationConfig};
#[cfg(feature = "viewer")]
pub use visualization::replay::run_replay;
