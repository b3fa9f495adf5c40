//! Report rendering: text summary, JSON, and per-sample CSV.

use std::fmt::Write as _;

use anyhow::{Context, Result};
use energetics::{PathComparison, ResultSet, Sample};
use serde::Serialize;

use crate::cli::ReportFormat;
use crate::config::Config;

/// Outcome of running one named profile.
pub type Run = (String, energetics::Result<ResultSet>);

/// Renders all runs in the configured format.
///
/// # Errors
///
/// Returns an error if JSON or CSV serialization fails.
pub fn render(runs: &[Run], config: &Config) -> Result<String> {
    match config.format {
        ReportFormat::Text => Ok(render_text(runs, config.series)),
        ReportFormat::Json => render_json(runs, config),
        ReportFormat::Csv => render_csv(runs),
    }
}

/// Compares the two runs when exactly two succeeded.
pub fn comparison(runs: &[Run]) -> Option<PathComparison<'_>> {
    let ok: Vec<&ResultSet> = runs.iter().filter_map(|(_, r)| r.as_ref().ok()).collect();
    match ok.as_slice() {
        [a, b] => Some(a.compare(b)),
        _ => None,
    }
}

/// Human-readable summary, one block per profile.
pub fn render_text(runs: &[Run], series: bool) -> String {
    let mut out = String::new();

    for (name, result) in runs {
        let _ = writeln!(out, "== {name} ==");
        match result {
            Ok(r) => {
                let _ = writeln!(out, "Maximum Speed: {:.3} m/s", r.max_speed());
                let _ = writeln!(out, "Final Speed: {:.3} m/s", r.final_speed());
                let _ = writeln!(
                    out,
                    "Time taken by the ball going on the {name} path: {}",
                    r.total_time()
                );
                if series {
                    out.push_str(&render_series(r));
                }
            }
            Err(e) => {
                let _ = writeln!(out, "Error: {e}");
            }
        }
        out.push('\n');
    }

    if let Some(cmp) = comparison(runs) {
        let _ = writeln!(out, "== comparison ==");
        let _ = writeln!(
            out,
            "Final speeds differ by {:.3} m/s; maximum speeds by {:.3} m/s",
            cmp.final_speed_gap, cmp.max_speed_gap
        );
        let _ = writeln!(
            out,
            "First to finish: {} ({:.3} s ahead)",
            cmp.faster, cmp.time_gap
        );
    }

    out
}

fn render_series(result: &ResultSet) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>8}  {:>10}  {:>12}  {:>10}",
        "position", "elevation", "speed (m/s)", "time (s)"
    );
    for s in result.samples() {
        let _ = writeln!(
            out,
            "{:>8}  {:>10.3}  {:>12.3}  {:>10.3}",
            s.position, s.elevation, s.velocity, s.time
        );
    }
    out
}

#[derive(Serialize)]
struct JsonReport<'a> {
    mass: f64,
    gravity: f64,
    runs: Vec<JsonRun<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    comparison: Option<PathComparison<'a>>,
}

#[derive(Serialize)]
struct JsonRun<'a> {
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<Summary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    samples: Option<Vec<Sample>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Serialize)]
struct Summary {
    max_speed: f64,
    final_speed: f64,
    total_time: f64,
    max_energy_drift: f64,
}

fn render_json(runs: &[Run], config: &Config) -> Result<String> {
    let runs_json = runs
        .iter()
        .map(|(name, result)| match result {
            Ok(r) => JsonRun {
                name,
                summary: Some(Summary {
                    max_speed: r.max_speed(),
                    final_speed: r.final_speed(),
                    total_time: r.total_time(),
                    max_energy_drift: r.max_energy_drift(config.mass, config.gravity),
                }),
                samples: config.series.then(|| r.samples().collect()),
                error: None,
            },
            Err(e) => JsonRun {
                name,
                summary: None,
                samples: None,
                error: Some(e.to_string()),
            },
        })
        .collect();

    let report = JsonReport {
        mass: config.mass,
        gravity: config.gravity,
        runs: runs_json,
        comparison: comparison(runs),
    };
    serde_json::to_string_pretty(&report).context("failed to serialize JSON report")
}

#[derive(Serialize)]
struct CsvRow<'a> {
    profile: &'a str,
    position: u32,
    elevation: f64,
    velocity: f64,
    time: f64,
}

fn render_csv(runs: &[Run]) -> Result<String> {
    let mut out = Vec::new();
    {
        let mut writer = csv::Writer::from_writer(&mut out);
        for (name, result) in runs {
            let Ok(r) = result else { continue };
            for s in r.samples() {
                writer.serialize(CsvRow {
                    profile: name,
                    position: s.position,
                    elevation: s.elevation,
                    velocity: s.velocity,
                    time: s.time,
                })?;
            }
        }
        writer.flush()?;
    }
    String::from_utf8(out).context("CSV output is not UTF-8")
}

#[cfg(test)]
mod tests {
    use super::*;
    use energetics::{EnergyKinematicsEngine, HeightProfile, ProfileStore};

    fn canonical_runs() -> Vec<Run> {
        EnergyKinematicsEngine::default().run_all(&ProfileStore::canonical())
    }

    #[test]
    fn text_report_prints_summary_lines() {
        let text = render_text(&canonical_runs(), false);
        assert!(text.contains("== red =="));
        assert!(text.contains("Maximum Speed: 8.854 m/s"));
        assert!(text.contains("Final Speed: 4.427 m/s"));
        assert!(text.contains("Time taken by the ball going on the red path: 2.296"));
        assert!(text.contains("Time taken by the ball going on the blue path: 3.877"));
        assert!(text.contains("First to finish: red"));
        assert!(!text.contains("position"));
    }

    #[test]
    fn text_report_with_series() {
        let text = render_text(&canonical_runs(), true);
        assert!(text.contains("speed (m/s)"));
        assert!(text.contains("6.261"));
    }

    #[test]
    fn text_report_shows_errors() {
        let store = ProfileStore::new()
            .with_profile(HeightProfile::new("flat", vec![1.0, 1.0]).unwrap());
        let runs = EnergyKinematicsEngine::default().run_all(&store);
        let text = render_text(&runs, false);
        assert!(text.contains("== flat =="));
        assert!(text.contains("Error: stationary deadlock"));
        assert!(!text.contains("comparison"));
    }

    #[test]
    fn json_report_structure() {
        let config = Config {
            format: ReportFormat::Json,
            series: true,
            ..Config::default()
        };
        let json = render(&canonical_runs(), &config).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["runs"].as_array().unwrap().len(), 2);
        assert_eq!(value["runs"][0]["name"], "blue");
        assert_eq!(value["runs"][1]["samples"].as_array().unwrap().len(), 18);
        assert_eq!(value["comparison"]["faster"], "red");
        let final_speed = value["runs"][1]["summary"]["final_speed"].as_f64().unwrap();
        assert!((final_speed - 4.427).abs() < 1e-3);
    }

    #[test]
    fn json_report_without_series_omits_samples() {
        let config = Config {
            format: ReportFormat::Json,
            ..Config::default()
        };
        let json = render(&canonical_runs(), &config).unwrap();
        assert!(!json.contains("samples"));
    }

    #[test]
    fn csv_report_rows() {
        let csv = render_csv(&canonical_runs()).unwrap();
        let mut lines = csv.lines();
        assert_eq!(
            lines.next(),
            Some("profile,position,elevation,velocity,time")
        );
        assert_eq!(lines.count(), 36);
        assert!(csv.contains("\nred,0,4.0,0.0,0.0\n"));
    }

    #[test]
    fn comparison_needs_two_successes() {
        let runs = canonical_runs();
        assert!(comparison(&runs).is_some());
        assert!(comparison(&runs[..1]).is_none());
    }
}
