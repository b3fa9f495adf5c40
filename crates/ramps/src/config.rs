//! Runtime configuration for `ramps`.
//!
//! [`Config`] holds every runtime option after CLI and environment
//! resolution, so tests can build one directly without parsing arguments.

use std::path::{Path, PathBuf};

use energetics::{DEFAULT_MASS, STANDARD_GRAVITY};
use serde::{Deserialize, Serialize};

use crate::cli::{Cli, ReportFormat};

/// Runtime configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Profile document to load; `None` uses the built-in red and blue paths.
    pub profiles_file: Option<PathBuf>,

    /// Profiles to run; empty runs every loaded profile.
    pub selected: Vec<String>,

    /// Mass of the ball in kilograms.
    pub mass: f64,

    /// Gravitational acceleration in m/s².
    pub gravity: f64,

    /// Report format.
    pub format: ReportFormat,

    /// Whether to include per-sample rows in text and JSON reports.
    pub series: bool,

    /// Report destination; `None` writes to stdout.
    pub output: Option<PathBuf>,

    /// Directory for SVG charts; `None` skips charts.
    pub charts_dir: Option<PathBuf>,

    /// Log verbosity level (0=warn, 1=info, 2=debug, 3+=trace).
    pub verbosity: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            profiles_file: None,
            selected: Vec::new(),
            mass: DEFAULT_MASS,
            gravity: STANDARD_GRAVITY,
            format: ReportFormat::Text,
            series: false,
            output: None,
            charts_dir: None,
            verbosity: 0,
        }
    }
}

/// Kind of profile document, from its file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileFormat {
    /// `.json`
    Json,
    /// `.toml`
    Toml,
}

impl ProfileFormat {
    /// Detects the format from a path's extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(Self::Json),
            "toml" => Some(Self::Toml),
            _ => None,
        }
    }
}

impl Config {
    /// Create a new config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create config from CLI arguments.
    #[must_use]
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            profiles_file: cli.profiles.clone(),
            selected: cli.selected.clone(),
            mass: cli.mass,
            gravity: cli.gravity,
            format: cli.format,
            series: cli.series,
            output: cli.output.clone(),
            charts_dir: cli.charts.clone(),
            verbosity: cli.verbose,
        }
    }

    /// Format of the configured profile document, if any.
    pub fn profile_format(&self) -> Option<ProfileFormat> {
        self.profiles_file.as_deref().and_then(ProfileFormat::from_path)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(ref path) = self.profiles_file {
            if !path.exists() {
                return Err(ConfigError::ProfilesFileNotFound(path.clone()));
            }
            if ProfileFormat::from_path(path).is_none() {
                return Err(ConfigError::UnsupportedProfileFormat(path.clone()));
            }
        }

        if !self.mass.is_finite() || self.mass <= 0.0 {
            return Err(ConfigError::InvalidMass(self.mass));
        }
        if !self.gravity.is_finite() || self.gravity <= 0.0 {
            return Err(ConfigError::InvalidGravity(self.gravity));
        }

        if let Some(ref dir) = self.charts_dir {
            if dir.exists() && !dir.is_dir() {
                return Err(ConfigError::ChartsNotDirectory(dir.clone()));
            }
        }

        Ok(())
    }

    /// Export configuration as a diagnostic string.
    #[must_use]
    pub fn to_diagnostic_string(&self) -> String {
        let mut lines = Vec::new();

        match self.profiles_file {
            Some(ref path) => lines.push(format!("Profiles: {}", path.display())),
            None => lines.push("Profiles: built-in".to_string()),
        }
        if !self.selected.is_empty() {
            lines.push(format!("Selected: {}", self.selected.join(", ")));
        }
        lines.push(format!("Mass: {} kg", self.mass));
        lines.push(format!("Gravity: {} m/s^2", self.gravity));
        lines.push(format!("Format: {:?}", self.format));
        lines.push(format!("Series: {}", self.series));
        if let Some(ref dir) = self.charts_dir {
            lines.push(format!("Charts: {}", dir.display()));
        }
        lines.push(format!("Verbosity: {}", self.verbosity));

        lines.join("\n")
    }
}

/// Configuration error.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// Profiles file not found.
    #[error("Profiles file not found: {0}")]
    ProfilesFileNotFound(PathBuf),

    /// Profiles file is neither JSON nor TOML.
    #[error("Unsupported profiles file (expected .json or .toml): {0}")]
    UnsupportedProfileFormat(PathBuf),

    /// Mass is not a positive number.
    #[error("Mass must be positive, got {0}")]
    InvalidMass(f64),

    /// Gravity is not a positive number.
    #[error("Gravity must be positive, got {0}")]
    InvalidGravity(f64),

    /// Charts path exists but is a file.
    #[error("Charts path is not a directory: {0}")]
    ChartsNotDirectory(PathBuf),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_default() {
        let config = Config::default();
        assert!(config.profiles_file.is_none());
        assert!(config.selected.is_empty());
        assert!((config.mass - 1.0).abs() < f64::EPSILON);
        assert!((config.gravity - 9.8).abs() < f64::EPSILON);
        assert_eq!(config.format, ReportFormat::Text);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn config_from_cli() {
        let cli = Cli::try_parse_from([
            "ramps", "--mass", "2", "--gravity", "1.62", "-f", "json", "--series", "-v",
        ])
        .unwrap();
        let config = Config::from_cli(&cli);
        assert!((config.mass - 2.0).abs() < f64::EPSILON);
        assert!((config.gravity - 1.62).abs() < f64::EPSILON);
        assert_eq!(config.format, ReportFormat::Json);
        assert!(config.series);
        assert_eq!(config.verbosity, 1);
    }

    #[test]
    fn validate_rejects_bad_constants() {
        let config = Config {
            mass: 0.0,
            ..Config::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::InvalidMass(0.0)));

        let config = Config {
            gravity: -1.0,
            ..Config::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::InvalidGravity(-1.0)));
    }

    #[test]
    fn validate_missing_profiles_file() {
        let config = Config {
            profiles_file: Some(PathBuf::from("/nonexistent/ramps.toml")),
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ProfilesFileNotFound(_))
        ));
    }

    #[test]
    fn profile_format_from_extension() {
        assert_eq!(
            ProfileFormat::from_path(Path::new("a.JSON")),
            Some(ProfileFormat::Json)
        );
        assert_eq!(
            ProfileFormat::from_path(Path::new("dir/a.toml")),
            Some(ProfileFormat::Toml)
        );
        assert_eq!(ProfileFormat::from_path(Path::new("a.yaml")), None);
        assert_eq!(ProfileFormat::from_path(Path::new("noext")), None);
    }

    #[test]
    fn diagnostic_string() {
        let config = Config {
            selected: vec!["red".to_string()],
            ..Config::default()
        };
        let diag = config.to_diagnostic_string();
        assert!(diag.contains("Profiles: built-in"));
        assert!(diag.contains("Selected: red"));
        assert!(diag.contains("Gravity: 9.8"));
    }
}
