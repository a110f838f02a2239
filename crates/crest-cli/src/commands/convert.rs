use super::measure::report_measurements;
use crate::cli::ConvertArgs;
use crate::config::builder;
use crate::config::file::FileConfig;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use crestpost::engine::progress::ProgressReporter;
use crestpost::workflows;
use tracing::info;

pub fn run(args: ConvertArgs, file_config: &FileConfig, show_progress: bool) -> Result<()> {
    let app_config = builder::build_convert_config(&args, file_config)?;
    let core_config = &app_config.core_config;
    info!(
        "Gaussian resources: %mem={} %nprocshared={} (checkpoint: {})",
        core_config.link0.memory, core_config.link0.nprocshared, core_config.checkpoint
    );

    let progress_handler = CliProgressHandler::new(show_progress);
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    println!("Converting {} ...", core_config.input_path.display());
    let summary = workflows::convert::run(core_config, &reporter)?;

    println!(
        "✓ Wrote {} of {} Gaussian input file(s) to: {}",
        summary.input_files.len(),
        summary.conformers_in_ensemble,
        core_config.output_dir.display()
    );
    report_measurements(&summary.measurements, &app_config.plot)
}
