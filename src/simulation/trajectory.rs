//! Recorded history of a run
//!
//! The integrator appends one [`Sample`] per body per completed step; the
//! engine never reads these buffers back. Renderers and analysis code do.

use std::collections::HashMap;

use super::states::{Body, BodySet, NVec3, Rgb};

/// Snapshot of one body after a completed, re-centered step
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub x: NVec3,
    pub radius: f64,
    pub color: Rgb,
}

impl From<&Body> for Sample {
    fn from(b: &Body) -> Self {
        Self {
            x: b.x,
            radius: b.radius(),
            color: b.color(),
        }
    }
}

/// Samples of a single body, oldest first
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    pub name: String,
    pub samples: Vec<Sample>,
}

/// Per-body tracks in body-set order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Trajectory {
    tracks: Vec<Track>,
    index: HashMap<String, usize>, // name -> track, same as the body set's
}

impl Trajectory {
    /// Empty tracks, one per body, in the same order as `bodies`
    pub fn for_bodies(bodies: &BodySet) -> Self {
        Self {
            tracks: bodies
                .iter()
                .map(|b| Track {
                    name: b.name().to_string(),
                    samples: Vec::new(),
                })
                .collect(),
            index: bodies
                .iter()
                .enumerate()
                .map(|(i, b)| (b.name().to_string(), i))
                .collect(),
        }
    }

    /// Append the current state of every body. Track `i` belongs to body `i`.
    pub(crate) fn record(&mut self, bodies: &[Body]) {
        debug_assert_eq!(bodies.len(), self.tracks.len());
        for (track, b) in self.tracks.iter_mut().zip(bodies) {
            track.samples.push(Sample::from(b));
        }
    }

    pub(crate) fn reserve(&mut self, additional: usize) {
        for track in &mut self.tracks {
            track.samples.reserve(additional);
        }
    }

    pub(crate) fn truncate(&mut self, len: usize) {
        for track in &mut self.tracks {
            track.samples.truncate(len);
        }
    }

    pub fn get(&self, name: &str) -> Option<&[Sample]> {
        self.index
            .get(name)
            .map(|&i| self.tracks[i].samples.as_slice())
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Sample])> {
        self.tracks.iter().map(|t| (t.name.as_str(), t.samples.as_slice()))
    }

    /// Samples per body (all bodies are recorded together, so tracks have
    /// equal length)
    pub fn len(&self) -> usize {
        self.tracks.first().map_or(0, |t| t.samples.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn body_count(&self) -> usize {
        self.tracks.len()
    }

    /// Largest radius over every recorded sample, 0 when nothing is recorded
    pub fn max_radius(&self) -> f64 {
        self.tracks
            .iter()
            .flat_map(|t| t.samples.iter())
            .map(|s| s.radius)
            .fold(0.0, f64::max)
    }

    /// Largest |x| or |y| over every recorded sample
    pub fn extent(&self) -> f64 {
        self.tracks
            .iter()
            .flat_map(|t| t.samples.iter())
            .map(|s| s.x.x.abs().max(s.x.y.abs()))
            .fold(0.0, f64::max)
    }
}

/// Everything a run produced, handed over by [`crate::Simulation::into_history`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct History {
    pub trajectory: Trajectory,
    /// Total energy after each step; `None` when tracking was disabled
    pub energy: Option<Vec<f64>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracks_grow_together() {
        let bodies = BodySet::new()
            .with(Body::new("a", 1.0, NVec3::zeros(), NVec3::zeros(), 2.0, Rgb(1, 2, 3)))
            .and_then(|s| s.with(Body::new("b", 1.0, NVec3::new(-7.0, 3.0, 0.0), NVec3::zeros(), 5.0, Rgb(4, 5, 6))))
            .unwrap();

        let mut traj = Trajectory::for_bodies(&bodies);
        assert!(traj.is_empty());

        traj.record(bodies.as_slice());
        traj.record(bodies.as_slice());

        assert_eq!(traj.len(), 2);
        assert_eq!(traj.get("b").unwrap()[1].color, Rgb(4, 5, 6));
        assert_eq!(traj.max_radius(), 5.0);
        assert_eq!(traj.extent(), 7.0);

        traj.truncate(1);
        assert_eq!(traj.len(), 1);
        assert!(traj.get("missing").is_none());
        assert_eq!(traj.get("a").unwrap()[0].radius, 2.0);
    }
}
