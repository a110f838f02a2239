use super::measure::{MeasurementOutput, measure_all, write_tables};
use super::{conformer_limit, load_ensemble};
use crate::core::io::gaussian::GaussianInput;
use crate::engine::config::ConversionConfig;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use std::fs;
use std::path::PathBuf;
use tracing::{debug, info, instrument};

#[derive(Debug, Clone)]
pub struct ConversionSummary {
    /// Number of conformers found in the input ensemble.
    pub conformers_in_ensemble: usize,
    /// Gaussian input files written, in conformer order.
    pub input_files: Vec<PathBuf>,
    pub measurements: Vec<MeasurementOutput>,
}

#[instrument(skip_all, name = "convert_workflow")]
pub fn run(
    config: &ConversionConfig,
    reporter: &ProgressReporter,
) -> Result<ConversionSummary, EngineError> {
    let ensemble = reporter.phase("Reading ensemble", || load_ensemble(&config.input_path))?;

    if config.output_dir.exists() {
        return Err(EngineError::OutputExists(config.output_dir.clone()));
    }
    let limit = conformer_limit(&ensemble, config.max_conformers);

    // Bad atom indices must fail before the output directory exists.
    let series = measure_all(&ensemble, &config.measurements, limit, reporter)?;

    fs::create_dir_all(&config.output_dir)?;
    let output_dir = std::path::absolute(&config.output_dir)?;
    info!(
        "Writing Gaussian inputs for {} of {} conformer(s) to {:?}",
        limit,
        ensemble.len(),
        output_dir
    );

    reporter.report(Progress::PhaseStart {
        name: "Writing Gaussian inputs",
    });
    reporter.report(Progress::TaskStart {
        total_steps: limit as u64,
    });
    let mut input_files = Vec::with_capacity(limit);
    for (i, conformer) in ensemble.conformers[..limit].iter().enumerate() {
        let stem = format!("{}_{}", config.file_prefix, i + 1);
        let checkpoint = config
            .checkpoint
            .then(|| output_dir.join(format!("{}.chk", stem)));
        let link0 = config.link0.with_checkpoint(checkpoint);

        let path = config.output_dir.join(format!("{}.com", stem));
        debug!("Writing {:?}", path);
        GaussianInput::write_to_path(&link0, &config.template, conformer, &path)?;
        input_files.push(path);
        reporter.report(Progress::TaskIncrement);
    }
    reporter.report(Progress::TaskFinish);
    reporter.report(Progress::PhaseFinish);

    let measurements = write_tables(series, &config.output_dir)?;

    Ok(ConversionSummary {
        conformers_in_ensemble: ensemble.len(),
        input_files,
        measurements,
    })
}
