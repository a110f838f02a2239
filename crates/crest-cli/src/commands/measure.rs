use crate::cli::MeasureArgs;
use crate::config::builder;
use crate::config::models::PlotOptions;
use crate::error::Result;
use crate::plot;
use crate::utils::progress::CliProgressHandler;
use crestpost::engine::progress::ProgressReporter;
use crestpost::workflows;
use crestpost::workflows::measure::MeasurementOutput;
use tracing::info;

pub fn run(args: MeasureArgs, show_progress: bool) -> Result<()> {
    let app_config = builder::build_measure_config(&args)?;

    let progress_handler = CliProgressHandler::new(show_progress);
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    info!("Invoking the measurement workflow...");
    let outputs = workflows::measure::run(&app_config.core_config, &reporter)?;

    report_measurements(&outputs, &app_config.plot)
}

/// Prints where each table went and draws the plots unless disabled.
pub(crate) fn report_measurements(outputs: &[MeasurementOutput], plot: &PlotOptions) -> Result<()> {
    for output in outputs {
        println!(
            "✓ {} ({} conformer(s)) written to: {}",
            output.series.coordinate.label(),
            output.series.values.len(),
            output.path.display()
        );
        if plot.enabled {
            let plot_path = plot::plot_series(&output.series, &plot.directory)?;
            println!("  Plot saved to: {}", plot_path.display());
        }
    }
    Ok(())
}
