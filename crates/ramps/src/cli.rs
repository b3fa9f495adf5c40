//! Command-line interface for `ramps`.
//!
//! # Examples
//!
//! ```bash
//! # Race the red and blue balls
//! ramps
//!
//! # Per-sample tables and charts
//! ramps --series --charts out/
//!
//! # Custom profiles as JSON
//! ramps --profiles ramps.toml --profile steep --format json
//!
//! # List what a profile file contains
//! ramps --profiles ramps.toml list
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use energetics::{DEFAULT_MASS, STANDARD_GRAVITY};
use serde::{Deserialize, Serialize};

/// Race balls down frictionless ramps.
///
/// Computes each ball's speed from conservation of mechanical energy and
/// its elapsed time from the mean speed across each segment.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "ramps",
    author,
    version,
    about = "Race balls down frictionless ramps",
    long_about = "Computes speed-vs-position and position-vs-time for a point mass \
                  sliding along height profiles, conserving mechanical energy."
)]
pub struct Cli {
    /// JSON or TOML file with `[[profiles]]` entries
    ///
    /// Defaults to the built-in red and blue paths
    #[arg(long, short = 'p', env = "RAMPS_PROFILES")]
    pub profiles: Option<PathBuf>,

    /// Profile to run (repeatable; all profiles if omitted)
    #[arg(long = "profile", short = 'n', value_name = "NAME")]
    pub selected: Vec<String>,

    /// Mass of the ball in kilograms
    #[arg(long, default_value_t = DEFAULT_MASS, env = "RAMPS_MASS")]
    pub mass: f64,

    /// Gravitational acceleration in m/s²
    #[arg(long, short = 'g', default_value_t = STANDARD_GRAVITY, env = "RAMPS_GRAVITY")]
    pub gravity: f64,

    /// Report format
    #[arg(long, short = 'f', value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,

    /// Include per-sample position, elevation, speed and time
    #[arg(long)]
    pub series: bool,

    /// Write the report to a file instead of stdout
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Directory for the profile, velocity and position-time SVG charts
    #[arg(long, env = "RAMPS_CHARTS")]
    pub charts: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, short = 'v', action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Optional subcommand
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available subcommands.
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// List the loaded profiles
    List,
}

/// Report output formats.
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Human-readable summary
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
    /// One row per sample
    Csv,
}

impl Cli {
    /// Parse command line arguments.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Create CLI from iterator (useful for testing).
    ///
    /// # Errors
    ///
    /// Returns an error if argument parsing fails.
    pub fn try_parse_from<I, T>(iter: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(iter)
    }
}
