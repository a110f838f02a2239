use crate::cli::RmsdArgs;
use crate::config::builder;
use crate::config::file::FileConfig;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use crestpost::engine::progress::ProgressReporter;
use crestpost::workflows;
use tracing::info;

pub fn run(args: RmsdArgs, file_config: &FileConfig, show_progress: bool) -> Result<()> {
    let config = builder::build_rmsd_config(&args, file_config)?;

    let progress_handler = CliProgressHandler::new(show_progress);
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    info!("Invoking the RMSD workflow...");
    let report = workflows::rmsd::run(&config, &reporter)?;

    for (label, members) in &report.categories {
        println!("  {:<18} {} conformer(s)", label, members.len());
    }
    println!(
        "✓ RMSD of {} conformer(s) against conformer {} ({}) written to: {}",
        report.values.len(),
        report.reference,
        report.method,
        config.output_path.display()
    );
    Ok(())
}
