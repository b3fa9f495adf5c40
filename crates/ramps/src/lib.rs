#![forbid(unsafe_code)]
// Allow pedantic lints for early-stage API ergonomics.
#![allow(clippy::nursery)]
#![allow(clippy::pedantic)]

//! # Ramps
//!
//! Races balls down frictionless ramps and reports how fast and how soon
//! each one arrives.
//!
//! Ramps is the reporting side of [`energetics`]: it loads profiles, runs
//! the engine on each of them independently, and prints the summary lines,
//! per-sample tables, JSON or CSV, plus optional SVG charts.
//!
//! ## Quick start (library)
//!
//! ```rust
//! use ramps::{Config, execute};
//!
//! let config = Config::default();
//! let outcome = execute(&config).unwrap();
//! assert!(outcome.report.contains("Final Speed: 4.427 m/s"));
//! assert_eq!(outcome.failed, 0);
//! ```
//!
//! ## CLI usage
//!
//! ```bash
//! ramps
//! ramps --series
//! ramps --profiles ramps.toml --profile steep -f json
//! ramps --charts out/
//! ramps list
//! ```

pub mod chart;
pub mod cli;
pub mod config;
pub mod logging;
pub mod report;

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use energetics::{EnergyKinematicsEngine, ProfileStore, ResultSet};
use tracing::{debug, info};

pub use cli::{Cli, Command, ReportFormat};
pub use config::{Config, ConfigError, ProfileFormat};

/// What a run produced.
#[derive(Debug, Clone)]
pub struct Outcome {
    /// Rendered report.
    pub report: String,
    /// Number of profiles that ran to completion.
    pub succeeded: usize,
    /// Number of profiles whose run failed.
    pub failed: usize,
    /// Chart files written, if charts were requested.
    pub charts: Vec<PathBuf>,
}

/// Loads the configured profile store.
///
/// # Errors
///
/// Returns an error if the profile file can't be read or parsed.
pub fn load_store(config: &Config) -> Result<ProfileStore> {
    let Some(ref path) = config.profiles_file else {
        debug!("Using built-in profiles");
        return Ok(ProfileStore::canonical());
    };

    let input = fs::read_to_string(path)
        .with_context(|| format!("failed to read profiles file {}", path.display()))?;
    let store = match config.profile_format() {
        Some(ProfileFormat::Json) => ProfileStore::from_json_str(&input),
        Some(ProfileFormat::Toml) => ProfileStore::from_toml_str(&input),
        None => return Err(ConfigError::UnsupportedProfileFormat(path.clone()).into()),
    }
    .with_context(|| format!("failed to load profiles from {}", path.display()))?;

    info!(path = %path.display(), profiles = store.len(), "Loaded profiles");
    Ok(store)
}

/// Narrows the store to the selected profile names.
///
/// # Errors
///
/// Returns an error naming the first profile that isn't loaded.
pub fn select(store: ProfileStore, names: &[String]) -> Result<ProfileStore> {
    if names.is_empty() {
        return Ok(store);
    }
    let profiles = names
        .iter()
        .map(|name| store.get_profile(name).cloned())
        .collect::<energetics::Result<Vec<_>>>()?;
    Ok(ProfileStore::from_profiles(profiles))
}

/// Runs every selected profile and renders the report.
///
/// Profile failures are counted in the outcome rather than returned, so
/// the other profiles still get reported.
///
/// # Errors
///
/// Returns an error for invalid configuration, unreadable or unknown
/// profiles, or output that can't be rendered or written.
pub fn execute(config: &Config) -> Result<Outcome> {
    config.validate()?;
    debug!(config = %config.to_diagnostic_string(), "Resolved configuration");

    let store = select(load_store(config)?, &config.selected)?;
    let engine = EnergyKinematicsEngine::new(config.mass, config.gravity)?;
    let runs = engine.run_all(&store);

    let succeeded: Vec<&ResultSet> = runs.iter().filter_map(|(_, r)| r.as_ref().ok()).collect();
    let failed = runs.len() - succeeded.len();

    let charts = match config.charts_dir {
        Some(ref dir) => chart::write_all(dir, &succeeded)?,
        None => Vec::new(),
    };

    let report = report::render(&runs, config)?;
    if let Some(ref path) = config.output {
        fs::write(path, &report)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        info!(path = %path.display(), "Report written");
    }

    Ok(Outcome {
        report,
        succeeded: succeeded.len(),
        failed,
        charts,
    })
}

/// Lists the loaded profiles, one per line with sample count and end
/// heights.
///
/// # Errors
///
/// Returns an error if the profile store can't be loaded.
pub fn list(config: &Config) -> Result<String> {
    config.validate()?;
    let store = load_store(config)?;
    Ok(store
        .iter()
        .map(|p| {
            format!(
                "{}\t{} samples\t{} -> {}\n",
                p.name(),
                p.len(),
                p.start_elevation(),
                p.end_elevation()
            )
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn execute_default_config() {
        let outcome = execute(&Config::default()).unwrap();
        assert_eq!(outcome.succeeded, 2);
        assert_eq!(outcome.failed, 0);
        assert!(outcome.charts.is_empty());
        assert!(outcome.report.contains("== blue =="));
        assert!(outcome.report.contains("== red =="));
    }

    #[test]
    fn select_unknown_profile() {
        let err = select(ProfileStore::canonical(), &["green".to_string()]).unwrap_err();
        assert!(err.to_string().contains("green"));
    }

    #[test]
    fn select_subset() {
        let store = select(ProfileStore::canonical(), &["red".to_string()]).unwrap();
        assert_eq!(store.names().collect::<Vec<_>>(), vec!["red"]);
    }

    #[test]
    fn list_builtin_profiles() {
        let listing = list(&Config::default()).unwrap();
        assert_eq!(listing, "blue\t18 samples\t4 -> 3\nred\t18 samples\t4 -> 3\n");
    }

    #[test]
    fn execute_writes_output_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.txt");
        let config = Config {
            output: Some(path.clone()),
            ..Config::default()
        };
        let outcome = execute(&config).unwrap();
        assert_eq!(fs::read_to_string(path).unwrap(), outcome.report);
    }
}
