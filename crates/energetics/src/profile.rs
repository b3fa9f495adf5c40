//! Height profiles: elevation samples at unit-spaced positions.
//!
//! # Example
//!
//! ```rust
//! use energetics::HeightProfile;
//!
//! let ramp = HeightProfile::new("ramp", vec![4.0, 2.0, 0.0, 3.0]).unwrap();
//! assert_eq!(ramp.positions(), &[0, 1, 2, 3]);
//! assert_eq!(ramp.start_elevation(), 4.0);
//! assert_eq!(ramp.end_elevation(), 3.0);
//! ```

use serde::Serialize;

use crate::error::{Error, Result};

/// A named, immutable sequence of elevations sampled at positions
/// `0, 1, …, N-1`.
///
/// Elevations are heights above a common datum and are never negative.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeightProfile {
    name: String,
    positions: Vec<u32>,
    elevations: Vec<f64>,
}

impl HeightProfile {
    /// Creates a profile from elevation samples.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyProfile`] if `elevations` is empty and
    /// [`Error::InvalidElevation`] if any sample is negative or not finite.
    ///
    /// # Example
    ///
    /// ```rust
    /// use energetics::{Error, HeightProfile};
    ///
    /// assert!(HeightProfile::new("ok", vec![1.0, 0.0]).is_ok());
    /// assert!(matches!(
    ///     HeightProfile::new("bad", vec![1.0, -0.5]),
    ///     Err(Error::InvalidElevation { index: 1, .. })
    /// ));
    /// ```
    pub fn new(name: impl Into<String>, elevations: Vec<f64>) -> Result<Self> {
        let name = name.into();
        if elevations.is_empty() {
            return Err(Error::EmptyProfile(name));
        }
        if let Some((index, &value)) = elevations
            .iter()
            .enumerate()
            .find(|(_, h)| !h.is_finite() || **h < 0.0)
        {
            return Err(Error::InvalidElevation { index, value });
        }

        let len = u32::try_from(elevations.len()).map_err(|_| {
            Error::InvalidParameter(format!("profile {name:?} has too many samples"))
        })?;

        Ok(Self {
            name,
            positions: (0..len).collect(),
            elevations,
        })
    }

    /// Builds a profile from compile-time data known to be valid.
    pub(crate) fn from_literal<const N: usize>(name: &str, elevations: &[f64; N]) -> Self {
        debug_assert!(N > 0 && elevations.iter().all(|h| h.is_finite() && *h >= 0.0));
        Self {
            name: name.to_string(),
            positions: (0..N as u32).collect(),
            elevations: elevations.to_vec(),
        }
    }

    /// Returns the profile name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the sample positions.
    #[inline]
    pub fn positions(&self) -> &[u32] {
        &self.positions
    }

    /// Returns the elevation samples.
    #[inline]
    pub fn elevations(&self) -> &[f64] {
        &self.elevations
    }

    /// Returns the number of samples.
    #[inline]
    pub fn len(&self) -> usize {
        self.elevations.len()
    }

    /// Always false; profiles hold at least one sample.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.elevations.is_empty()
    }

    /// Elevation at the first sample.
    #[inline]
    pub fn start_elevation(&self) -> f64 {
        self.elevations[0]
    }

    /// Elevation at the last sample.
    #[inline]
    pub fn end_elevation(&self) -> f64 {
        self.elevations[self.elevations.len() - 1]
    }

    /// Returns true if both profiles start and end at the same heights.
    ///
    /// Two such profiles finish at the same speed, whatever happens in
    /// between.
    pub fn shares_endpoints_with(&self, other: &HeightProfile, tolerance: f64) -> bool {
        (self.start_elevation() - other.start_elevation()).abs() <= tolerance
            && (self.end_elevation() - other.end_elevation()).abs() <= tolerance
    }
}
