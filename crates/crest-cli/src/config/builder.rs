use super::defaults::DefaultsConfig;
use super::file::FileConfig;
use super::models::{ConvertAppConfig, MeasureAppConfig, PlotOptions};
use crate::cli::{ConvertArgs, MeasureArgs, MeasurementArgs, PlotArgs, RmsdArgs};
use crate::error::{CliError, Result};
use crate::utils::parser;
use crestpost::core::io::gaussian::{Link0, RouteTemplate};
use crestpost::engine::config::{
    ConversionConfigBuilder, MeasurementConfigBuilder, RmsdConfig, RmsdConfigBuilder,
};
use crestpost::engine::error::EngineError;
use crestpost::engine::measure::InternalCoordinate;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Reads the optional TOML file and applies the `--set` overrides on top of it.
pub fn load_file_config(path: Option<&Path>, set_values: &[String]) -> Result<FileConfig> {
    let file_config = match path {
        Some(path) => FileConfig::from_file(path)?,
        None => FileConfig::default(),
    };
    apply_set_values(file_config, set_values)
}

pub fn build_convert_config(args: &ConvertArgs, file_config: &FileConfig) -> Result<ConvertAppConfig> {
    let defaults = DefaultsConfig::default();
    let gaussian = file_config.gaussian.clone().unwrap_or_default();

    let nprocshared = args
        .cores
        .or(gaussian.nprocshared)
        .unwrap_or(defaults.nprocshared);
    if nprocshared == 0 {
        return Err(CliError::Argument(
            "The number of processors must be at least 1.".to_string(),
        ));
    }

    let memory = match (&args.memory, gaussian.memory.as_deref()) {
        (Some(memory), _) => memory.clone(),
        (None, Some(raw)) => parser::parse_memory(raw).map_err(|e| CliError::Config(e.to_string()))?,
        (None, None) => defaults.memory.clone(),
    };

    let checkpoint = args.chk || gaussian.checkpoint.unwrap_or(defaults.checkpoint);
    let template = resolve_template(
        args.template.as_deref().or(gaussian.template.as_deref()),
        &defaults.template,
    )?;
    let measurements = measurements_from_args(&args.measurements)?;

    let core_config = ConversionConfigBuilder::new()
        .input_path(args.input.clone())
        .output_dir(args.output.clone())
        .file_prefix(gaussian.file_prefix.unwrap_or_else(|| defaults.file_prefix.clone()))
        .link0(Link0 {
            memory,
            nprocshared,
            checkpoint: None,
        })
        .checkpoint(checkpoint)
        .template(template)
        .max_conformers(args.num_conformers)
        .measurements(measurements)
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;

    Ok(ConvertAppConfig {
        core_config,
        plot: plot_options(&args.plot, &defaults),
    })
}

pub fn build_measure_config(args: &MeasureArgs) -> Result<MeasureAppConfig> {
    let defaults = DefaultsConfig::default();
    let measurements = measurements_from_args(&args.measurements)?;
    if measurements.is_empty() {
        return Err(CliError::Argument(
            "Nothing to measure: pass at least one of -l, -a or -d.".to_string(),
        ));
    }

    let core_config = MeasurementConfigBuilder::new()
        .input_path(args.input.clone())
        .output_dir(args.output.clone())
        .measurements(measurements)
        .max_conformers(args.num_conformers)
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;

    Ok(MeasureAppConfig {
        core_config,
        plot: plot_options(&args.plot, &defaults),
    })
}

pub fn build_rmsd_config(args: &RmsdArgs, file_config: &FileConfig) -> Result<RmsdConfig> {
    let defaults = DefaultsConfig::default();
    let rmsd = file_config.rmsd.clone().unwrap_or_default();

    RmsdConfigBuilder::new()
        .input_path(args.input.clone())
        .output_path(args.output.clone())
        .reference_index(
            args.reference
                .or(rmsd.reference)
                .unwrap_or(defaults.rmsd_reference),
        )
        .method(args.method.or(rmsd.method).unwrap_or(defaults.rmsd_method))
        .thresholds(
            args.thresholds
                .clone()
                .or(rmsd.thresholds)
                .unwrap_or(defaults.rmsd_thresholds),
        )
        .build()
        .map_err(|e| CliError::Config(e.to_string()))
}

fn measurements_from_args(args: &MeasurementArgs) -> Result<Vec<InternalCoordinate>> {
    parser::parse_measurements(
        args.length.as_deref(),
        args.angle.as_deref(),
        args.dihedral.as_deref(),
    )
    .map_err(|e| CliError::Argument(e.to_string()))
}

fn plot_options(args: &PlotArgs, defaults: &DefaultsConfig) -> PlotOptions {
    PlotOptions {
        enabled: !args.no_plot,
        directory: args
            .plot_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(&defaults.plot_dir)),
    }
}

/// An explicitly requested template must exist; the implicit `input.txt` is optional.
fn resolve_template(explicit: Option<&Path>, fallback: &str) -> Result<RouteTemplate> {
    let template = match explicit {
        Some(path) => {
            debug!("Loading Gaussian template from {:?}", path);
            RouteTemplate::load(path)
        }
        None => {
            debug!("Looking for optional Gaussian template {:?}", fallback);
            RouteTemplate::load_or_default(Path::new(fallback))
        }
    };
    template.map_err(|e| CliError::Engine(EngineError::from(e)))
}

fn apply_set_values(mut config: FileConfig, set_values: &[String]) -> Result<FileConfig> {
    if set_values.is_empty() {
        return Ok(config);
    }
    for kv_pair in set_values {
        let Some((key, value_str)) = kv_pair.split_once('=') else {
            return Err(CliError::Config(format!(
                "Invalid --set format: '{}'. Expected KEY=VALUE.",
                kv_pair
            )));
        };
        let key = key.trim();
        let value_str = value_str.trim();
        debug!("Applying override {} = {}", key, value_str);

        match key {
            "gaussian.nprocshared" => {
                config.gaussian.get_or_insert_with(Default::default).nprocshared =
                    Some(value_str.parse().map_err(|_| {
                        CliError::Config(format!("Invalid integer value for {}: {}", key, value_str))
                    })?);
            }
            "gaussian.memory" => {
                config.gaussian.get_or_insert_with(Default::default).memory =
                    Some(value_str.to_string());
            }
            "gaussian.checkpoint" => {
                config.gaussian.get_or_insert_with(Default::default).checkpoint =
                    Some(value_str.parse().map_err(|_| {
                        CliError::Config(format!("Invalid boolean value for {}: {}", key, value_str))
                    })?);
            }
            "gaussian.template" => {
                config.gaussian.get_or_insert_with(Default::default).template =
                    Some(PathBuf::from(value_str));
            }
            "gaussian.file-prefix" => {
                config.gaussian.get_or_insert_with(Default::default).file_prefix =
                    Some(value_str.to_string());
            }
            "rmsd.method" => {
                config.rmsd.get_or_insert_with(Default::default).method =
                    Some(parser::parse_rmsd_method(value_str).map_err(CliError::Config)?);
            }
            "rmsd.reference" => {
                config.rmsd.get_or_insert_with(Default::default).reference =
                    Some(value_str.parse().map_err(|_| {
                        CliError::Config(format!("Invalid integer value for {}: {}", key, value_str))
                    })?);
            }
            "rmsd.thresholds" => {
                config.rmsd.get_or_insert_with(Default::default).thresholds =
                    Some(parser::parse_thresholds(value_str).map_err(CliError::Config)?);
            }
            _ => {
                return Err(CliError::Config(format!(
                    "Unsupported configuration key for --set: '{}'",
                    key
                )));
            }
        }
    }
    Ok(config)
}
