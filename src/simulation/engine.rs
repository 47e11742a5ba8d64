//! High-level runtime engine settings
//!
//! Selects the integration scheme and whether the total energy is
//! recorded after every step

use crate::configuration::config::IntegratorConfig;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Engine {
    pub integrator: IntegratorConfig, // euler or verlet
    pub track_energy: bool,           // append total energy after each step
}

impl Engine {
    pub fn new(integrator: IntegratorConfig) -> Self {
        Self {
            integrator,
            track_energy: false,
        }
    }

    pub fn with_energy_tracking(mut self, on: bool) -> Self {
        self.track_energy = on;
        self
    }
}
