#![forbid(unsafe_code)]
// Allow these clippy lints for physics/math code readability
#![allow(clippy::must_use_candidate)]
#![allow(clippy::suboptimal_flops)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::float_cmp)]

//! # Energetics
//!
//! Frictionless motion of a point mass along piecewise-linear height
//! profiles, derived from conservation of mechanical energy.
//!
//! Energetics provides:
//! - **ProfileStore**: named height profiles, loaded from literals or JSON/TOML
//! - **EnergyKinematicsEngine**: speed from energy balance, time from
//!   per-segment mean speed
//! - **ResultSet**: the trace plus max speed, final speed and total time
//!
//! ## Example
//!
//! ```rust
//! use energetics::{EnergyKinematicsEngine, ProfileStore};
//!
//! let store = ProfileStore::canonical();
//! let engine = EnergyKinematicsEngine::default();
//!
//! let red = engine.run(store.get_profile("red").unwrap()).unwrap();
//! println!("Maximum Speed: {:.3} m/s", red.max_speed());
//! println!("Final Speed: {:.3} m/s", red.final_speed());
//! assert!((red.final_speed() - (2.0_f64 * 9.8).sqrt()).abs() < 1e-9);
//! ```
//!
//! ## Paths that share endpoints
//!
//! Two profiles that start and end at the same heights finish at the same
//! speed. Their intermediate speeds and total times differ:
//!
//! ```rust
//! use energetics::{EnergyKinematicsEngine, ProfileStore};
//!
//! let store = ProfileStore::canonical();
//! let engine = EnergyKinematicsEngine::default();
//! let red = engine.run(store.get_profile("red").unwrap()).unwrap();
//! let blue = engine.run(store.get_profile("blue").unwrap()).unwrap();
//!
//! let cmp = red.compare(&blue);
//! assert_eq!(cmp.faster, "red");
//! assert!(cmp.final_speed_gap < 1e-9);
//! ```

mod engine;
mod error;
mod profile;
mod store;
mod trace;

pub use engine::{DEFAULT_MASS, EnergyKinematicsEngine, RADICAND_TOLERANCE, STANDARD_GRAVITY};
pub use error::{Error, Result};
pub use profile::HeightProfile;
pub use store::{BLUE_PATH, ProfileStore, RED_PATH};
pub use trace::{KinematicTrace, PathComparison, ResultSet, Sample};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::engine::{DEFAULT_MASS, EnergyKinematicsEngine, STANDARD_GRAVITY};
    pub use crate::error::{Error, Result};
    pub use crate::profile::HeightProfile;
    pub use crate::store::ProfileStore;
    pub use crate::trace::{ResultSet, Sample};
}
