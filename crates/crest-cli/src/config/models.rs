use crestpost::engine::config::{ConversionConfig, MeasurementConfig};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub struct PlotOptions {
    pub enabled: bool,
    pub directory: PathBuf,
}

pub struct ConvertAppConfig {
    pub core_config: ConversionConfig,
    pub plot: PlotOptions,
}

pub struct MeasureAppConfig {
    pub core_config: MeasurementConfig,
    pub plot: PlotOptions,
}
