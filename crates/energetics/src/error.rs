//! Error types for profile loading and kinematic computation.

use thiserror::Error;

/// Errors produced while loading profiles or computing their traces.
///
/// Every failure is fatal to the profile run that produced it. Nothing is
/// retried: the computation is deterministic, so the same input reproduces
/// the same error.
///
/// # Recovery
///
/// | Variant | Typical fix |
/// |---------|-------------|
/// | [`NotFound`](Error::NotFound) | Check the profile name against the store |
/// | [`EnergyDeficit`](Error::EnergyDeficit) | Lower the climb or start higher |
/// | [`StationaryDeadlock`](Error::StationaryDeadlock) | Avoid flat runs at zero speed |
/// | [`InvalidParameter`](Error::InvalidParameter) | Use finite, positive mass and gravity |
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// No profile with this name is loaded.
    #[error("profile not found: {0:?}")]
    NotFound(String),

    /// The mass would need negative kinetic energy to reach this sample.
    ///
    /// Happens when the profile climbs higher than the energy carried from
    /// earlier samples allows.
    #[error("energy deficit at sample {index}: radicand {radicand} is negative")]
    EnergyDeficit {
        /// Sample index where the climb became impossible.
        index: usize,
        /// The negative value under the square root.
        radicand: f64,
    },

    /// Two consecutive samples have zero speed, so the segment takes
    /// infinite time.
    #[error("stationary deadlock at segment {index}: both endpoint speeds are zero")]
    StationaryDeadlock {
        /// Index of the segment's end sample.
        index: usize,
    },

    /// A physical constant is out of range.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// The profile has no samples.
    #[error("profile {0:?} has no samples")]
    EmptyProfile(String),

    /// An elevation is negative or not finite.
    #[error("invalid elevation {value} at sample {index}")]
    InvalidElevation {
        /// Offending sample index.
        index: usize,
        /// Offending value.
        value: f64,
    },

    /// Positions and velocities differ in length.
    #[error("length mismatch: {positions} positions, {velocities} velocities")]
    LengthMismatch {
        /// Number of positions.
        positions: usize,
        /// Number of velocities.
        velocities: usize,
    },

    /// Positions must be strictly increasing.
    #[error("position at sample {index} does not increase")]
    NonIncreasingPositions {
        /// Offending sample index.
        index: usize,
    },

    /// Speeds are magnitudes and can't be negative. NaN speeds are
    /// rejected under this variant too.
    #[error("negative or NaN velocity at sample {index}")]
    NegativeVelocity {
        /// Offending sample index.
        index: usize,
    },

    /// A profile document could not be parsed.
    #[error("invalid profile document: {0}")]
    ProfileDocument(String),
}

/// A specialized [`Result`] type for energetics operations.
pub type Result<T> = std::result::Result<T, Error>;
