//! SVG charts of profiles, speeds and arrival times.
//!
//! Three charts, one line per profile:
//! - `profiles.svg`: elevation against position
//! - `velocity.svg`: speed against position
//! - `position_time.svg`: position against elapsed time

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use energetics::ResultSet;
use plotters::prelude::*;
use tracing::info;

/// File name of the elevation chart.
pub const PROFILES_CHART: &str = "profiles.svg";
/// File name of the speed chart.
pub const VELOCITY_CHART: &str = "velocity.svg";
/// File name of the position-time chart.
pub const POSITION_TIME_CHART: &str = "position_time.svg";

const CHART_SIZE: (u32, u32) = (960, 600);

/// Line colors; red and blue come first to match the classic two-ramp picture.
const PALETTE: [RGBColor; 6] = [
    RGBColor(220, 30, 30),
    RGBColor(30, 90, 220),
    RGBColor(34, 139, 34),
    RGBColor(200, 0, 100),
    RGBColor(255, 140, 0),
    RGBColor(90, 90, 90),
];

struct Series<'a> {
    label: &'a str,
    points: Vec<(f64, f64)>,
}

/// Picks a color for a profile, keeping red and blue paths in their own
/// colors.
fn color_for(index: usize, name: &str) -> RGBColor {
    match name {
        "red" => PALETTE[0],
        "blue" => PALETTE[1],
        _ => PALETTE[index % PALETTE.len()],
    }
}

/// Writes all three charts into `dir`, creating it if needed.
///
/// # Errors
///
/// Returns an error if the directory can't be created or a chart fails to
/// render.
pub fn write_all(dir: &Path, results: &[&ResultSet]) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)
        .with_context(|| format!("failed to create charts directory {}", dir.display()))?;

    let profiles: Vec<Series> = results
        .iter()
        .map(|r| Series {
            label: r.name(),
            points: r
                .positions()
                .iter()
                .map(|&x| f64::from(x))
                .zip(r.elevations().iter().copied())
                .collect(),
        })
        .collect();
    let velocities: Vec<Series> = results
        .iter()
        .map(|r| Series {
            label: r.name(),
            points: r
                .positions()
                .iter()
                .map(|&x| f64::from(x))
                .zip(r.velocities().iter().copied())
                .collect(),
        })
        .collect();
    let arrivals: Vec<Series> = results
        .iter()
        .map(|r| Series {
            label: r.name(),
            points: r
                .times()
                .iter()
                .copied()
                .zip(r.positions().iter().map(|&x| f64::from(x)))
                .collect(),
        })
        .collect();

    let charts = [
        (PROFILES_CHART, "Height Profiles", "position (m)", "height (m)", &profiles),
        (VELOCITY_CHART, "Velocity-Position Graph", "position (m)", "speed (m/s)", &velocities),
        (POSITION_TIME_CHART, "Position-Time Graph", "time (s)", "position (m)", &arrivals),
    ];

    let mut written = Vec::with_capacity(charts.len());
    for (file, title, x_desc, y_desc, series) in charts {
        let path = dir.join(file);
        draw_chart(&path, title, x_desc, y_desc, series)
            .with_context(|| format!("failed to draw {}", path.display()))?;
        info!(chart = %path.display(), "Chart written");
        written.push(path);
    }
    Ok(written)
}

fn draw_chart(path: &Path, title: &str, x_desc: &str, y_desc: &str, series: &[Series]) -> Result<()> {
    let (x_max, y_max) = series
        .iter()
        .flat_map(|s| s.points.iter())
        .fold((1.0_f64, 1.0_f64), |(xm, ym), &(x, y)| (xm.max(x), ym.max(y)));

    let root = SVGBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(|e| anyhow!("{e}"))?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 24))
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(0.0..x_max * 1.05, 0.0..y_max * 1.1)
        .map_err(|e| anyhow!("{e}"))?;

    chart
        .configure_mesh()
        .x_desc(x_desc)
        .y_desc(y_desc)
        .draw()
        .map_err(|e| anyhow!("{e}"))?;

    for (index, s) in series.iter().enumerate() {
        let color = color_for(index, s.label);
        chart
            .draw_series(LineSeries::new(s.points.iter().copied(), &color))
            .map_err(|e| anyhow!("{e}"))?
            .label(s.label)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
        chart
            .draw_series(
                s.points
                    .iter()
                    .map(|&(x, y)| Circle::new((x, y), 3, color.filled())),
            )
            .map_err(|e| anyhow!("{e}"))?;
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(|e| anyhow!("{e}"))?;

    root.present().map_err(|e| anyhow!("{e}"))?;
    Ok(())
}
