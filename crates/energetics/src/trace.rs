//! Engine output: per-sample speeds and times, plus summary scalars.

use serde::Serialize;

use crate::profile::HeightProfile;

/// Speeds and elapsed times at each sample of a profile.
///
/// Only the engine builds traces, so `velocities[0] == 0`, `times[0] == 0`,
/// times never decrease, and both sequences have one entry per sample.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KinematicTrace {
    velocities: Vec<f64>,
    times: Vec<f64>,
}

impl KinematicTrace {
    pub(crate) fn new(velocities: Vec<f64>, times: Vec<f64>) -> Self {
        debug_assert_eq!(velocities.len(), times.len());
        Self { velocities, times }
    }

    /// Speed magnitude at each sample.
    #[inline]
    pub fn velocities(&self) -> &[f64] {
        &self.velocities
    }

    /// Elapsed time at each sample.
    #[inline]
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// Number of samples.
    #[inline]
    pub fn len(&self) -> usize {
        self.velocities.len()
    }

    /// Returns true if the trace has no samples.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.velocities.is_empty()
    }
}

/// One row of a result set, as handed to reporters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Sample {
    /// Horizontal position.
    pub position: u32,
    /// Height above the datum.
    pub elevation: f64,
    /// Speed magnitude.
    pub velocity: f64,
    /// Elapsed time since release.
    pub time: f64,
}

/// A profile, its trace and the summary scalars derived from them.
///
/// Created once per engine run and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultSet {
    profile: HeightProfile,
    trace: KinematicTrace,
    max_speed: f64,
    final_speed: f64,
    total_time: f64,
}

impl ResultSet {
    pub(crate) fn new(profile: HeightProfile, trace: KinematicTrace) -> Self {
        let velocities = trace.velocities();
        let max_speed = velocities.iter().copied().fold(0.0, f64::max);
        let final_speed = velocities.last().copied().unwrap_or(0.0);
        let total_time = trace.times().last().copied().unwrap_or(0.0);
        Self {
            profile,
            trace,
            max_speed,
            final_speed,
            total_time,
        }
    }

    /// Name of the underlying profile.
    pub fn name(&self) -> &str {
        self.profile.name()
    }

    /// The profile this result was computed from.
    pub fn profile(&self) -> &HeightProfile {
        &self.profile
    }

    /// The computed trace.
    pub fn trace(&self) -> &KinematicTrace {
        &self.trace
    }

    /// Sample positions.
    pub fn positions(&self) -> &[u32] {
        self.profile.positions()
    }

    /// Sample elevations.
    pub fn elevations(&self) -> &[f64] {
        self.profile.elevations()
    }

    /// Speed at each sample.
    pub fn velocities(&self) -> &[f64] {
        self.trace.velocities()
    }

    /// Elapsed time at each sample.
    pub fn times(&self) -> &[f64] {
        self.trace.times()
    }

    /// Highest speed reached anywhere on the profile.
    pub fn max_speed(&self) -> f64 {
        self.max_speed
    }

    /// Speed at the last sample.
    pub fn final_speed(&self) -> f64 {
        self.final_speed
    }

    /// Time to reach the last sample.
    pub fn total_time(&self) -> f64 {
        self.total_time
    }

    /// Iterates over the samples in position order.
    pub fn samples(&self) -> impl Iterator<Item = Sample> + '_ {
        self.positions()
            .iter()
            .zip(self.elevations())
            .zip(self.velocities().iter().zip(self.times()))
            .map(|((&position, &elevation), (&velocity, &time))| Sample {
                position,
                elevation,
                velocity,
                time,
            })
    }

    /// Kinetic plus potential energy at each sample.
    pub fn mechanical_energy(&self, mass: f64, gravity: f64) -> Vec<f64> {
        self.velocities()
            .iter()
            .zip(self.elevations())
            .map(|(v, h)| 0.5 * mass * v * v + mass * gravity * h)
            .collect()
    }

    /// Largest deviation of the total energy from its initial value,
    /// relative to that initial value.
    ///
    /// Returns the absolute deviation when the initial energy is zero.
    pub fn max_energy_drift(&self, mass: f64, gravity: f64) -> f64 {
        let energy = self.mechanical_energy(mass, gravity);
        let initial = energy[0];
        let scale = if initial == 0.0 { 1.0 } else { initial.abs() };
        energy
            .iter()
            .map(|e| (e - initial).abs() / scale)
            .fold(0.0, f64::max)
    }

    /// Returns true if both results finish within `tolerance` of each
    /// other's speed.
    pub fn final_speeds_match(&self, other: &ResultSet, tolerance: f64) -> bool {
        (self.final_speed - other.final_speed).abs() <= tolerance
    }

    /// Compares this result with another run.
    pub fn compare<'a>(&'a self, other: &'a ResultSet) -> PathComparison<'a> {
        let faster = if self.total_time <= other.total_time {
            self.name()
        } else {
            other.name()
        };
        PathComparison {
            faster,
            time_gap: (self.total_time - other.total_time).abs(),
            final_speed_gap: (self.final_speed - other.final_speed).abs(),
            max_speed_gap: (self.max_speed - other.max_speed).abs(),
        }
    }
}

/// How two runs differ in their summary scalars.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PathComparison<'a> {
    /// Name of the profile that finishes first (the first one on a tie).
    pub faster: &'a str,
    /// Absolute difference in total time.
    pub time_gap: f64,
    /// Absolute difference in final speed.
    pub final_speed_gap: f64,
    /// Absolute difference in maximum speed.
    pub max_speed_gap: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(name: &str, elevations: Vec<f64>, velocities: Vec<f64>, times: Vec<f64>) -> ResultSet {
        let profile = HeightProfile::new(name, elevations).unwrap();
        ResultSet::new(profile, KinematicTrace::new(velocities, times))
    }

    #[test]
    fn test_summary_scalars() {
        let r = result(
            "r",
            vec![2.0, 0.0, 1.0],
            vec![0.0, 3.0, 2.0],
            vec![0.0, 0.5, 0.9],
        );
        assert_eq!(r.max_speed(), 3.0);
        assert_eq!(r.final_speed(), 2.0);
        assert_eq!(r.total_time(), 0.9);
        assert_eq!(r.name(), "r");
    }

    #[test]
    fn test_samples_rows() {
        let r = result("r", vec![1.0, 0.0], vec![0.0, 4.0], vec![0.0, 0.5]);
        let rows: Vec<Sample> = r.samples().collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(
            rows[1],
            Sample {
                position: 1,
                elevation: 0.0,
                velocity: 4.0,
                time: 0.5
            }
        );
    }

    #[test]
    fn test_energy_drift_zero_for_consistent_trace() {
        // v = sqrt(2 * 10 * 0.8) = 4
        let r = result("r", vec![0.8, 0.0], vec![0.0, 4.0], vec![0.0, 0.5]);
        assert!(r.max_energy_drift(1.0, 10.0) < 1e-12);
    }

    #[test]
    fn test_compare() {
        let a = result("a", vec![1.0, 0.0], vec![0.0, 4.0], vec![0.0, 0.5]);
        let b = result("b", vec![1.0, 0.0], vec![0.0, 4.0], vec![0.0, 0.7]);
        let cmp = a.compare(&b);
        assert_eq!(cmp.faster, "a");
        assert!((cmp.time_gap - 0.2).abs() < 1e-12);
        assert_eq!(cmp.final_speed_gap, 0.0);
        assert!(a.final_speeds_match(&b, 1e-12));
    }
}
