//! Configuration types for loading simulation scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! scenario. A scenario consists of:
//!
//! - [`BodyTable`]         – the named bodies, in document order
//! - [`SimulationConfig`]  – duration, timestep, integrator, energy tracking
//! - [`AnimationConfig`]   – replay length
//! - [`ScenarioConfig`]    – top-level wrapper used to load a scenario from YAML
//!
//! # YAML format
//!
//! ```yaml
//! celestial_bodies:
//!   Earth:                      # first body is the primary, kept at the origin
//!     mass: 5.972e24
//!     position: [0.0, 0.0, 0.0]
//!     velocity: [0.0, 0.0, 0.0]
//!     radius: 6.371e6
//!     color: "(0, 102, 255)"    # or [0, 102, 255]
//!   Moon:
//!     mass: 7.342e22
//!     position: [3.844e8, 0.0, 0.0]
//!     velocity: [0.0, 1022.0, 0.0]
//!     radius: 1.737e6
//!     color: "(200, 200, 200)"
//!
//! simulation:                   # optional
//!   duration: 2592000           # seconds, default 86400
//!   timestep: 600               # seconds, default 600
//!   integrator: "verlet"        # or "euler", default verlet
//!   track_energy: true          # default false
//!
//! animation:                    # optional
//!   duration: 15                # seconds, default 15
//! ```
//!
//! The engine then maps this configuration into its runtime [`crate::Scenario`].

use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::str::FromStr;

use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use thiserror::Error;

use crate::simulation::error::SimulationError;
use crate::simulation::states::Rgb;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read scenario file: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed scenario: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid color `{0}`, expected \"(r, g, b)\" with components 0-255")]
    InvalidColor(String),

    #[error(transparent)]
    Simulation(#[from] SimulationError),
}

/// Which integrator the engine uses
/// `integrator: "euler"` or `integrator: "verlet"`
#[derive(Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IntegratorConfig {
    #[serde(rename = "euler")] // Semi-implicit Euler. First order, cheap, energy drifts
    Euler,

    #[default]
    #[serde(rename = "verlet")] // Velocity Verlet. Second order, time-reversible, bounded energy error
    Verlet,
}

impl FromStr for IntegratorConfig {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "euler" => Ok(Self::Euler),
            "verlet" => Ok(Self::Verlet),
            other => Err(format!("unknown integrator `{other}` (expected euler or verlet)")),
        }
    }
}

/// Body color as written in the scenario: either `"(r, g, b)"` or `[r, g, b]`
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum ColorConfig {
    Triple([u8; 3]),
    Text(String),
}

impl ColorConfig {
    pub fn to_rgb(&self) -> Result<Rgb, ConfigError> {
        match self {
            ColorConfig::Triple([r, g, b]) => Ok(Rgb(*r, *g, *b)),
            ColorConfig::Text(s) => parse_color(s),
        }
    }
}

/// Parse `"(r, g, b)"`; the parentheses are optional
pub fn parse_color(s: &str) -> Result<Rgb, ConfigError> {
    let invalid = || ConfigError::InvalidColor(s.to_string());

    let inner = s.trim().trim_start_matches('(').trim_end_matches(')');
    let parts = inner
        .split(',')
        .map(|p| p.trim().parse::<u8>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| invalid())?;

    match parts.as_slice() {
        [r, g, b] => Ok(Rgb(*r, *g, *b)),
        _ => Err(invalid()),
    }
}

/// Configuration for a single body's initial state
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct BodyConfig {
    pub mass: f64,          // kg
    pub position: [f64; 3], // m
    pub velocity: [f64; 3], // m/s
    pub radius: f64,        // m, display only
    pub color: ColorConfig, // display only
}

/// Named bodies in the order they appear in the document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BodyTable(pub Vec<(String, BodyConfig)>);

impl<'de> Deserialize<'de> for BodyTable {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct TableVisitor;

        impl<'de> Visitor<'de> for TableVisitor {
            type Value = BodyTable;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a mapping of body names to body definitions")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries: Vec<(String, BodyConfig)> = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((name, body)) = map.next_entry::<String, BodyConfig>()? {
                    if entries.iter().any(|(n, _)| *n == name) {
                        return Err(de::Error::custom(format!("duplicate body name `{name}`")));
                    }
                    entries.push((name, body));
                }
                Ok(BodyTable(entries))
            }
        }

        deserializer.deserialize_map(TableVisitor)
    }
}

/// Simulated-time settings
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SimulationConfig {
    pub duration: f64,                // total simulated seconds
    pub timestep: f64,                // dt in seconds
    pub integrator: IntegratorConfig, // time integrator
    pub track_energy: bool,           // record total energy after each step
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            duration: 86_400.0, // one day
            timestep: 600.0,    // ten minutes
            integrator: IntegratorConfig::default(),
            track_energy: false,
        }
    }
}

/// Replay settings
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AnimationConfig {
    pub duration: f64, // real seconds the replay should last
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self { duration: 15.0 }
    }
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ScenarioConfig {
    pub celestial_bodies: BodyTable, // bodies in document order, first is the primary
    #[serde(default)]
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub animation: AnimationConfig,
}

impl ScenarioConfig {
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(s)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        Ok(serde_yaml::from_reader(reader)?)
    }
}
