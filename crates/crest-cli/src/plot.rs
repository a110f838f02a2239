use crate::error::{CliError, Result};
use crestpost::engine::measure::MeasurementSeries;
use plotters::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const PLOT_SIZE: (u32, u32) = (800, 600);
const MARKER_RADIUS: i32 = 4;

/// Draws a scatter plot of `series` (conformer index vs. value) as
/// `<plot_stem>.svg` inside `dir` and returns the written path.
pub fn plot_series(series: &MeasurementSeries, dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(format!("{}.svg", series.coordinate.plot_stem()));
    debug!("Plotting {} point(s) to {:?}", series.values.len(), path);

    draw_scatter(series, &path).map_err(|e| CliError::Plot {
        path: path.clone(),
        message: e.to_string(),
    })?;
    info!("Saved plot {:?}", path);
    Ok(path)
}

fn draw_scatter(
    series: &MeasurementSeries,
    path: &Path,
) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let root = SVGBackend::new(path, PLOT_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let x_max = series.values.len().max(1) as f64 - 0.5;
    let (y_min, y_max) = value_range(series);

    let mut chart = ChartBuilder::on(&root)
        .caption(series.coordinate.label(), ("sans-serif", 22))
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(70)
        .build_cartesian_2d(-0.5f64..x_max, y_min..y_max)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc("Conformer")
        .y_desc(format!("Value ({})", series.coordinate.unit()))
        .draw()?;

    chart.draw_series(
        series
            .values
            .iter()
            .enumerate()
            .map(|(i, &v)| Circle::new((i as f64, v), MARKER_RADIUS, BLUE.filled())),
    )?;

    root.present()?;
    Ok(())
}

/// Y-axis range with a margin, widened when every value is identical.
fn value_range(series: &MeasurementSeries) -> (f64, f64) {
    match (series.min(), series.max()) {
        (Some(min), Some(max)) if max > min => {
            let pad = (max - min) * 0.05;
            (min - pad, max + pad)
        }
        (Some(v), _) => (v - 1.0, v + 1.0),
        _ => (0.0, 1.0),
    }
}
