//! Run parameters for a scenario
//!
//! `Parameters` holds the timing settings read from configuration:
//! - simulated duration and fixed step size (seconds of simulated time),
//! - wall-clock duration of the replay animation

#[derive(Debug, Clone, PartialEq)]
pub struct Parameters {
    pub duration: f64,           // total simulated time
    pub timestep: f64,           // step size dt
    pub animation_duration: f64, // replay length in real seconds
}

impl Parameters {
    /// Number of whole steps that fit in `duration`; a trailing partial
    /// step is dropped
    pub fn steps(&self) -> usize {
        whole_steps(self.duration, self.timestep)
    }
}

pub(crate) fn whole_steps(total_time: f64, dt: f64) -> usize {
    (total_time / dt).floor() as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_trailing_step_is_dropped() {
        assert_eq!(whole_steps(3600.0, 600.0), 6);
        assert_eq!(whole_steps(3650.0, 600.0), 6);
        assert_eq!(whole_steps(599.0, 600.0), 0);
        assert_eq!(whole_steps(0.0, 600.0), 0);
    }
}
