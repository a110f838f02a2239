use super::load_ensemble;
use crate::engine::config::RmsdConfig;
use crate::engine::error::EngineError;
use crate::engine::progress::ProgressReporter;
use crate::engine::rmsd::RmsdReport;
use std::fs::File;
use std::io::{BufWriter, Write};
use tracing::{info, instrument};

#[instrument(skip_all, name = "rmsd_workflow")]
pub fn run(config: &RmsdConfig, reporter: &ProgressReporter) -> Result<RmsdReport, EngineError> {
    let ensemble = reporter.phase("Reading ensemble", || load_ensemble(&config.input_path))?;

    let report = reporter.phase("Computing RMSD", || RmsdReport::compute(&ensemble, config))?;
    info!(
        "Computed RMSD of {} conformer(s) against conformer {} using the {} method.",
        report.values.len(),
        report.reference,
        report.method
    );

    let mut writer = BufWriter::new(File::create(&config.output_path)?);
    report.write_to(&mut writer)?;
    writer.flush()?;
    info!("RMSD values and classification written to {:?}", config.output_path);
    Ok(report)
}
