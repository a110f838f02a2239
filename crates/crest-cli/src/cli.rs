use crate::utils::parser;
use clap::{Args, Parser, Subcommand};
use crestpost::engine::rmsd::RmsdMethod;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "Tony Kan",
    version,
    about = "crestpost - Post-processing for CREST conformer ensembles: Gaussian 16 input generation, internal coordinate analysis and RMSD.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of threads for parallel computation.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,

    /// Path to a configuration file in TOML format.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S gaussian.nprocshared=16
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", global = true)]
    pub set_values: Vec<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write one Gaussian 16 input file per conformer of an ensemble.
    Convert(ConvertArgs),
    /// Measure bond lengths, angles or dihedrals across an ensemble and plot them.
    Measure(MeasureArgs),
    /// Compute the RMSD of every conformer against a reference conformer.
    Rmsd(RmsdArgs),
}

/// Internal coordinates to track, given as 1-based atom indices.
#[derive(Args, Debug, Clone, Default)]
pub struct MeasurementArgs {
    /// Bond length between two atoms.
    #[arg(short = 'l', long = "length", num_args = 2, value_names = ["I", "J"])]
    pub length: Option<Vec<usize>>,

    /// Bond angle at the middle atom.
    #[arg(short = 'a', long = "angle", num_args = 3, value_names = ["I", "J", "K"])]
    pub angle: Option<Vec<usize>>,

    /// Dihedral angle along I-J-K-L.
    #[arg(short = 'd', long = "dihedral", num_args = 4, value_names = ["I", "J", "K", "L"])]
    pub dihedral: Option<Vec<usize>>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct PlotArgs {
    /// Do not draw scatter plots of the measured coordinates.
    #[arg(long)]
    pub no_plot: bool,

    /// Directory receiving the SVG plots. Defaults to the current directory.
    #[arg(long, value_name = "DIR")]
    pub plot_dir: Option<PathBuf>,
}

/// Arguments for the `convert` subcommand.
#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Multi-frame XYZ file produced by CREST.
    #[arg(short, long, default_value = "crest_conformers.xyz", value_name = "PATH")]
    pub input: PathBuf,

    /// Directory to create for the generated input files. Must not exist yet.
    #[arg(short, long, default_value = "crest_conformers", value_name = "DIR")]
    pub output: PathBuf,

    /// Gaussian keyword template. Defaults to `input.txt` in the working directory
    /// when present, otherwise to a B3LYP-D3(BJ)/def2-SVP opt+freq job.
    #[arg(short, long, value_name = "PATH")]
    pub template: Option<PathBuf>,

    /// Convert only the first N conformers.
    #[arg(short, long, value_name = "N")]
    pub num_conformers: Option<usize>,

    /// Number of processors (%nprocshared).
    #[arg(short, long, value_name = "NUM")]
    pub cores: Option<usize>,

    /// Memory (%mem). A bare number is taken as GB, e.g. `48` or `4000MB`.
    #[arg(short, long, value_name = "SIZE", value_parser = parser::parse_memory)]
    pub memory: Option<String>,

    /// Save a checkpoint file next to each input file.
    #[arg(long)]
    pub chk: bool,

    #[command(flatten)]
    pub measurements: MeasurementArgs,

    #[command(flatten)]
    pub plot: PlotArgs,
}

/// Arguments for the `measure` subcommand.
#[derive(Args, Debug)]
pub struct MeasureArgs {
    /// Multi-frame XYZ file produced by CREST.
    #[arg(short, long, default_value = "crest_conformers.xyz", value_name = "PATH")]
    pub input: PathBuf,

    /// Directory receiving the measurement tables.
    #[arg(short, long, default_value = ".", value_name = "DIR")]
    pub output: PathBuf,

    /// Measure only the first N conformers.
    #[arg(short, long, value_name = "N")]
    pub num_conformers: Option<usize>,

    #[command(flatten)]
    pub measurements: MeasurementArgs,

    #[command(flatten)]
    pub plot: PlotArgs,
}

/// Arguments for the `rmsd` subcommand.
#[derive(Args, Debug)]
pub struct RmsdArgs {
    /// Multi-frame XYZ file produced by CREST.
    #[arg(short, long, default_value = "crest_conformers.xyz", value_name = "PATH")]
    pub input: PathBuf,

    /// Report file for RMSD values and classification.
    #[arg(short, long, default_value = "rmsd_output.txt", value_name = "PATH")]
    pub output: PathBuf,

    /// 1-based index of the reference conformer (the lowest-energy one is 1).
    #[arg(short, long, value_name = "N")]
    pub reference: Option<usize>,

    /// Alignment before computing RMSD: kabsch, first-atom or none.
    #[arg(long, value_name = "METHOD", value_parser = parser::parse_rmsd_method)]
    pub method: Option<RmsdMethod>,

    /// Ascending classification thresholds in Angstroms, comma separated.
    #[arg(long, value_name = "LIST", value_delimiter = ',')]
    pub thresholds: Option<Vec<f64>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn convert_accepts_full_flag_set() {
        let cli = Cli::parse_from([
            "crestpost", "convert", "-n", "5", "-c", "16", "-m", "32", "--chk", "-l", "1", "2",
            "-a", "1", "2", "3", "-d", "1", "2", "3", "4",
        ]);
        let Commands::Convert(args) = cli.command else {
            panic!("expected convert");
        };
        assert_eq!(args.input, PathBuf::from("crest_conformers.xyz"));
        assert_eq!(args.output, PathBuf::from("crest_conformers"));
        assert_eq!(args.num_conformers, Some(5));
        assert_eq!(args.cores, Some(16));
        assert_eq!(args.memory.as_deref(), Some("32GB"));
        assert!(args.chk);
        assert_eq!(args.measurements.length, Some(vec![1, 2]));
        assert_eq!(args.measurements.angle, Some(vec![1, 2, 3]));
        assert_eq!(args.measurements.dihedral, Some(vec![1, 2, 3, 4]));
    }

    #[test]
    fn rmsd_parses_method_and_thresholds() {
        let cli = Cli::parse_from([
            "crestpost",
            "rmsd",
            "--method",
            "first-atom",
            "--thresholds",
            "0.25,0.75",
            "-r",
            "3",
        ]);
        let Commands::Rmsd(args) = cli.command else {
            panic!("expected rmsd");
        };
        assert_eq!(args.method, Some(RmsdMethod::FirstAtom));
        assert_eq!(args.thresholds, Some(vec![0.25, 0.75]));
        assert_eq!(args.reference, Some(3));
        assert_eq!(args.output, PathBuf::from("rmsd_output.txt"));
    }

    #[test]
    fn global_flags_are_accepted_after_subcommand() {
        let cli = Cli::parse_from([
            "crestpost",
            "measure",
            "-l",
            "1",
            "2",
            "-vv",
            "-S",
            "gaussian.nprocshared=8",
        ]);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.set_values, vec!["gaussian.nprocshared=8".to_string()]);
    }

    #[test]
    fn length_requires_two_indices() {
        let result = Cli::try_parse_from(["crestpost", "measure", "-l", "1"]);
        assert!(result.is_err());
    }
}
