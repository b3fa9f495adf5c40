//! Energy-conserving kinematics along a height profile.
//!
//! The engine works in two passes over a profile:
//!
//! 1. **Velocities**: at each step the kinetic energy gained equals the
//!    potential energy lost, so `v[i]² = v[i-1]² - 2·g·(h[i] - h[i-1])`.
//! 2. **Times**: each unit segment is crossed at the mean of its endpoint
//!    speeds, which is exact for constant acceleration within the segment.
//!
//! # Example
//!
//! ```rust
//! use energetics::{EnergyKinematicsEngine, ProfileStore};
//!
//! let store = ProfileStore::canonical();
//! let engine = EnergyKinematicsEngine::default();
//!
//! let red = engine.run(store.get_profile("red").unwrap()).unwrap();
//! let blue = engine.run(store.get_profile("blue").unwrap()).unwrap();
//!
//! // Same start and end heights, same final speed.
//! assert!(red.final_speeds_match(&blue, 1e-9));
//! assert!((red.max_speed() - (2.0_f64 * 9.8 * 4.0).sqrt()).abs() < 1e-9);
//! ```

use rayon::prelude::*;
use tracing::{debug, debug_span, trace, warn};

use crate::error::{Error, Result};
use crate::profile::HeightProfile;
use crate::store::ProfileStore;
use crate::trace::{KinematicTrace, ResultSet};

/// Mass of the sliding ball, in kilograms.
pub const DEFAULT_MASS: f64 = 1.0;

/// Gravitational acceleration, in m/s².
pub const STANDARD_GRAVITY: f64 = 9.8;

/// Relative band around zero inside which a radicand is rounding noise and
/// the speed is exactly zero.
///
/// A profile that climbs back to exactly its starting height ends with a
/// radicand of zero in exact arithmetic, but a few ulps either side of zero
/// in floating point. Below the band is an energy deficit.
pub const RADICAND_TOLERANCE: f64 = 1e-9;

/// Turns height profiles into speed and time traces.
///
/// The engine holds only the physical constants; every operation is a pure
/// function of its inputs, so one engine may serve any number of profiles
/// from any number of threads.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnergyKinematicsEngine {
    mass: f64,
    gravity: f64,
}

impl Default for EnergyKinematicsEngine {
    fn default() -> Self {
        Self {
            mass: DEFAULT_MASS,
            gravity: STANDARD_GRAVITY,
        }
    }
}

impl EnergyKinematicsEngine {
    /// Creates an engine for the given mass and gravitational acceleration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] unless both values are finite and
    /// strictly positive.
    pub fn new(mass: f64, gravity: f64) -> Result<Self> {
        if !mass.is_finite() || mass <= 0.0 {
            return Err(Error::InvalidParameter(format!(
                "mass must be positive, got {mass}"
            )));
        }
        if !gravity.is_finite() || gravity <= 0.0 {
            return Err(Error::InvalidParameter(format!(
                "gravity must be positive, got {gravity}"
            )));
        }
        Ok(Self { mass, gravity })
    }

    /// Returns the mass.
    #[inline]
    pub const fn mass(&self) -> f64 {
        self.mass
    }

    /// Returns the gravitational acceleration.
    #[inline]
    pub const fn gravity(&self) -> f64 {
        self.gravity
    }

    /// Potential energy at each sample.
    pub fn potential_energy(&self, profile: &HeightProfile) -> Vec<f64> {
        profile
            .elevations()
            .iter()
            .map(|h| self.mass * self.gravity * h)
            .collect()
    }

    /// Computes the speed at each sample, starting from rest.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EnergyDeficit`] at the first sample the mass can't
    /// reach with the energy it carries.
    ///
    /// # Example
    ///
    /// ```rust
    /// use energetics::{EnergyKinematicsEngine, Error, HeightProfile};
    ///
    /// let engine = EnergyKinematicsEngine::new(1.0, 10.0).unwrap();
    ///
    /// let drop = HeightProfile::new("drop", vec![5.0, 0.0]).unwrap();
    /// assert_eq!(engine.compute_velocities(&drop).unwrap(), vec![0.0, 10.0]);
    ///
    /// let wall = HeightProfile::new("wall", vec![0.0, 1.0]).unwrap();
    /// assert!(matches!(
    ///     engine.compute_velocities(&wall),
    ///     Err(Error::EnergyDeficit { index: 1, .. })
    /// ));
    /// ```
    pub fn compute_velocities(&self, profile: &HeightProfile) -> Result<Vec<f64>> {
        let potential = self.potential_energy(profile);
        let mut velocities = Vec::with_capacity(potential.len());
        velocities.push(0.0);

        potential
            .windows(2)
            .enumerate()
            .try_fold(0.0_f64, |v_prev, (step, pe)| {
                let index = step + 1;
                let delta_kinetic = -(pe[1] - pe[0]);
                let gain = 2.0 * delta_kinetic / self.mass;
                let radicand = v_prev * v_prev + gain;

                let noise = RADICAND_TOLERANCE * (v_prev * v_prev + gain.abs());
                let v = if radicand.abs() <= noise {
                    if radicand != 0.0 {
                        trace!(index, radicand, "Clamped rounding noise to rest");
                    }
                    0.0
                } else if radicand > 0.0 {
                    radicand.sqrt()
                } else {
                    return Err(Error::EnergyDeficit { index, radicand });
                };

                velocities.push(v);
                Ok(v)
            })?;

        Ok(velocities)
    }

    /// Integrates elapsed time over each segment using the mean of its
    /// endpoint speeds.
    ///
    /// # Errors
    ///
    /// - [`Error::LengthMismatch`] if the slices differ in length
    /// - [`Error::NonIncreasingPositions`] if a position doesn't advance
    /// - [`Error::NegativeVelocity`] if a speed is negative or NaN
    /// - [`Error::StationaryDeadlock`] if both ends of a segment are at rest
    ///
    /// # Example
    ///
    /// ```rust
    /// use energetics::EnergyKinematicsEngine;
    ///
    /// let times = EnergyKinematicsEngine::compute_times(&[0, 1, 2], &[0.0, 2.0, 2.0]).unwrap();
    /// assert_eq!(times, vec![0.0, 1.0, 1.5]);
    /// ```
    pub fn compute_times(positions: &[u32], velocities: &[f64]) -> Result<Vec<f64>> {
        if positions.len() != velocities.len() {
            return Err(Error::LengthMismatch {
                positions: positions.len(),
                velocities: velocities.len(),
            });
        }
        if let Some(index) = velocities.iter().position(|v| v.is_nan() || *v < 0.0) {
            return Err(Error::NegativeVelocity { index });
        }
        if velocities.is_empty() {
            return Ok(Vec::new());
        }

        let mut times = Vec::with_capacity(velocities.len());
        times.push(0.0);

        positions
            .windows(2)
            .zip(velocities.windows(2))
            .enumerate()
            .try_fold(0.0_f64, |t_prev, (step, (x, v))| {
                let index = step + 1;
                if x[1] <= x[0] {
                    return Err(Error::NonIncreasingPositions { index });
                }
                let speed_sum = v[0] + v[1];
                if speed_sum <= 0.0 {
                    return Err(Error::StationaryDeadlock { index });
                }
                let distance = f64::from(x[1] - x[0]);
                let t = t_prev + 2.0 * distance / speed_sum;
                times.push(t);
                Ok(t)
            })?;

        Ok(times)
    }

    /// Computes the full result for one profile.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`compute_velocities`](Self::compute_velocities)
    /// or [`compute_times`](Self::compute_times). No partial result is
    /// returned.
    pub fn run(&self, profile: &HeightProfile) -> Result<ResultSet> {
        let span = debug_span!("run", profile = profile.name(), samples = profile.len());
        let _guard = span.enter();

        let velocities = self.compute_velocities(profile)?;
        let times = Self::compute_times(profile.positions(), &velocities)?;
        let result = ResultSet::new(profile.clone(), KinematicTrace::new(velocities, times));

        debug!(
            max_speed = result.max_speed(),
            final_speed = result.final_speed(),
            total_time = result.total_time(),
            "Profile run complete"
        );
        Ok(result)
    }

    /// Runs every profile in the store independently and in parallel.
    ///
    /// Results come back in name order. A failing profile reports its own
    /// error and leaves the others untouched.
    pub fn run_all(&self, store: &ProfileStore) -> Vec<(String, Result<ResultSet>)> {
        let profiles: Vec<&HeightProfile> = store.iter().collect();
        profiles
            .par_iter()
            .map(|profile| {
                let result = self.run(profile);
                if let Err(ref e) = result {
                    warn!(profile = profile.name(), error = %e, "Profile run failed");
                }
                (profile.name().to_string(), result)
            })
            .collect()
    }
}
