use super::{conformer_limit, load_ensemble};
use crate::core::models::ensemble::Ensemble;
use crate::engine::config::MeasurementConfig;
use crate::engine::error::EngineError;
use crate::engine::measure::{InternalCoordinate, MeasurementSeries};
use crate::engine::progress::{Progress, ProgressReporter};
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// A measured internal coordinate together with the table it was written to.
#[derive(Debug, Clone, PartialEq)]
pub struct MeasurementOutput {
    pub series: MeasurementSeries,
    pub path: PathBuf,
}

#[instrument(skip_all, name = "measure_workflow")]
pub fn run(
    config: &MeasurementConfig,
    reporter: &ProgressReporter,
) -> Result<Vec<MeasurementOutput>, EngineError> {
    let ensemble = reporter.phase("Reading ensemble", || load_ensemble(&config.input_path))?;
    let limit = conformer_limit(&ensemble, config.max_conformers);

    let series = measure_all(&ensemble, &config.measurements, limit, reporter)?;
    fs::create_dir_all(&config.output_dir)?;
    let outputs = write_tables(series, &config.output_dir)?;
    info!("Wrote {} measurement table(s).", outputs.len());
    Ok(outputs)
}

/// Measures every coordinate on the first `limit` conformers without touching the disk.
pub(crate) fn measure_all(
    ensemble: &Ensemble,
    coordinates: &[InternalCoordinate],
    limit: usize,
    reporter: &ProgressReporter,
) -> Result<Vec<MeasurementSeries>, EngineError> {
    if coordinates.is_empty() {
        return Ok(Vec::new());
    }
    reporter.report(Progress::PhaseStart {
        name: "Measuring internal coordinates",
    });
    reporter.report(Progress::TaskStart {
        total_steps: coordinates.len() as u64,
    });

    let mut all_series = Vec::with_capacity(coordinates.len());
    for &coordinate in coordinates {
        let series = MeasurementSeries::measure_ensemble(coordinate, ensemble, limit)?;
        if let (Some(min), Some(max), Some(mean)) = (series.min(), series.max(), series.mean()) {
            reporter.report(Progress::Message(format!(
                "{}: min {:.4}, max {:.4}, mean {:.4} {}",
                coordinate,
                min,
                max,
                mean,
                coordinate.unit()
            )));
        }
        all_series.push(series);
        reporter.report(Progress::TaskIncrement);
    }

    reporter.report(Progress::TaskFinish);
    reporter.report(Progress::PhaseFinish);
    Ok(all_series)
}

/// Writes one `<file_stem>.txt` table per series into `output_dir`.
pub(crate) fn write_tables(
    all_series: Vec<MeasurementSeries>,
    output_dir: &Path,
) -> Result<Vec<MeasurementOutput>, EngineError> {
    all_series
        .into_iter()
        .map(|series| {
            let path = output_dir.join(format!("{}.txt", series.coordinate.file_stem()));
            debug!(
                "Writing {} value(s) of {} to {:?}",
                series.values.len(),
                series.coordinate,
                path
            );
            series.write_to(BufWriter::new(File::create(&path)?))?;
            Ok(MeasurementOutput { series, path })
        })
        .collect()
}
