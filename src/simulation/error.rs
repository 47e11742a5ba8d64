//! Error types raised by the simulation core

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum SimulationError {
    /// The body set breaks an invariant of the force law.
    #[error("degenerate configuration: {0}")]
    DegenerateConfiguration(#[from] Degeneracy),

    #[error("invalid step: dt = {dt}, total time = {total_time} (need dt > 0 and total time >= 0)")]
    InvalidStep { dt: f64, total_time: f64 },

    #[error("duplicate body name `{0}`")]
    DuplicateBody(String),
}

#[derive(Debug, Error, PartialEq)]
pub enum Degeneracy {
    #[error("body `{name}` has non-positive mass {mass}")]
    NonPositiveMass { name: String, mass: f64 },

    #[error("bodies `{first}` and `{second}` occupy the same position")]
    CoincidentBodies { first: String, second: String },

    #[error("body `{name}` has a non-finite position or velocity")]
    NonFiniteState { name: String },

    #[error("body `{name}` diverged to a non-finite state at step {step}")]
    Diverged { name: String, step: usize },
}
