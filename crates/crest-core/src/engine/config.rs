use super::measure::InternalCoordinate;
use super::rmsd::{RmsdClassifier, RmsdMethod};
use crate::core::io::gaussian::{Link0, RouteTemplate};
use std::path::PathBuf;
use thiserror::Error;

pub const DEFAULT_FILE_PREFIX: &str = "crest_conformers";

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
    #[error("Invalid RMSD thresholds: {0}")]
    InvalidThresholds(String),
    #[error("Invalid RMSD method '{0}'. Expected 'kabsch', 'first-atom' or 'none'.")]
    InvalidMethod(String),
    #[error("Invalid reference conformer index {0}; indices start at 1")]
    InvalidReference(usize),
}

/// Settings for turning an ensemble into one Gaussian input file per conformer.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionConfig {
    pub input_path: PathBuf,
    pub output_dir: PathBuf,
    pub file_prefix: String,
    pub link0: Link0,
    /// Write a `%chk` line pointing next to each generated input file.
    pub checkpoint: bool,
    pub template: RouteTemplate,
    /// Convert only the first N conformers; `None` converts all of them.
    pub max_conformers: Option<usize>,
    pub measurements: Vec<InternalCoordinate>,
}

#[derive(Default)]
pub struct ConversionConfigBuilder {
    input_path: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    file_prefix: Option<String>,
    link0: Option<Link0>,
    checkpoint: bool,
    template: Option<RouteTemplate>,
    max_conformers: Option<usize>,
    measurements: Vec<InternalCoordinate>,
}

impl ConversionConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input_path(mut self, path: PathBuf) -> Self {
        self.input_path = Some(path);
        self
    }
    pub fn output_dir(mut self, path: PathBuf) -> Self {
        self.output_dir = Some(path);
        self
    }
    pub fn file_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.file_prefix = Some(prefix.into());
        self
    }
    pub fn link0(mut self, link0: Link0) -> Self {
        self.link0 = Some(link0);
        self
    }
    pub fn checkpoint(mut self, enabled: bool) -> Self {
        self.checkpoint = enabled;
        self
    }
    pub fn template(mut self, template: RouteTemplate) -> Self {
        self.template = Some(template);
        self
    }
    pub fn max_conformers(mut self, n: Option<usize>) -> Self {
        self.max_conformers = n;
        self
    }
    pub fn measurements(mut self, measurements: Vec<InternalCoordinate>) -> Self {
        self.measurements = measurements;
        self
    }

    pub fn build(self) -> Result<ConversionConfig, ConfigError> {
        Ok(ConversionConfig {
            input_path: self
                .input_path
                .ok_or(ConfigError::MissingParameter("input_path"))?,
            output_dir: self
                .output_dir
                .ok_or(ConfigError::MissingParameter("output_dir"))?,
            file_prefix: self
                .file_prefix
                .unwrap_or_else(|| DEFAULT_FILE_PREFIX.to_string()),
            link0: self.link0.unwrap_or_default(),
            checkpoint: self.checkpoint,
            template: self.template.unwrap_or_default(),
            max_conformers: self.max_conformers,
            measurements: self.measurements,
        })
    }
}

/// Settings for measuring internal coordinates without writing Gaussian inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct MeasurementConfig {
    pub input_path: PathBuf,
    pub output_dir: PathBuf,
    pub measurements: Vec<InternalCoordinate>,
    pub max_conformers: Option<usize>,
}

#[derive(Default)]
pub struct MeasurementConfigBuilder {
    input_path: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    measurements: Vec<InternalCoordinate>,
    max_conformers: Option<usize>,
}

impl MeasurementConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input_path(mut self, path: PathBuf) -> Self {
        self.input_path = Some(path);
        self
    }
    pub fn output_dir(mut self, path: PathBuf) -> Self {
        self.output_dir = Some(path);
        self
    }
    pub fn measurements(mut self, measurements: Vec<InternalCoordinate>) -> Self {
        self.measurements = measurements;
        self
    }
    pub fn max_conformers(mut self, n: Option<usize>) -> Self {
        self.max_conformers = n;
        self
    }

    pub fn build(self) -> Result<MeasurementConfig, ConfigError> {
        if self.measurements.is_empty() {
            return Err(ConfigError::MissingParameter("measurements"));
        }
        Ok(MeasurementConfig {
            input_path: self
                .input_path
                .ok_or(ConfigError::MissingParameter("input_path"))?,
            output_dir: self
                .output_dir
                .ok_or(ConfigError::MissingParameter("output_dir"))?,
            measurements: self.measurements,
            max_conformers: self.max_conformers,
        })
    }
}

/// Settings for the RMSD analysis against a reference conformer.
#[derive(Debug, Clone, PartialEq)]
pub struct RmsdConfig {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    /// 1-based index of the reference conformer.
    pub reference_index: usize,
    pub method: RmsdMethod,
    pub classifier: RmsdClassifier,
}

#[derive(Default)]
pub struct RmsdConfigBuilder {
    input_path: Option<PathBuf>,
    output_path: Option<PathBuf>,
    reference_index: Option<usize>,
    method: Option<RmsdMethod>,
    thresholds: Option<Vec<f64>>,
}

impl RmsdConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input_path(mut self, path: PathBuf) -> Self {
        self.input_path = Some(path);
        self
    }
    pub fn output_path(mut self, path: PathBuf) -> Self {
        self.output_path = Some(path);
        self
    }
    pub fn reference_index(mut self, index: usize) -> Self {
        self.reference_index = Some(index);
        self
    }
    pub fn method(mut self, method: RmsdMethod) -> Self {
        self.method = Some(method);
        self
    }
    pub fn thresholds(mut self, thresholds: Vec<f64>) -> Self {
        self.thresholds = Some(thresholds);
        self
    }

    pub fn build(self) -> Result<RmsdConfig, ConfigError> {
        let reference_index = self.reference_index.unwrap_or(1);
        if reference_index == 0 {
            return Err(ConfigError::InvalidReference(reference_index));
        }
        let classifier = match self.thresholds {
            Some(t) => RmsdClassifier::new(t)?,
            None => RmsdClassifier::default(),
        };
        Ok(RmsdConfig {
            input_path: self
                .input_path
                .ok_or(ConfigError::MissingParameter("input_path"))?,
            output_path: self
                .output_path
                .ok_or(ConfigError::MissingParameter("output_path"))?,
            reference_index,
            method: self.method.unwrap_or_default(),
            classifier,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversion_builder_fills_defaults() {
        let config = ConversionConfigBuilder::new()
            .input_path("crest_conformers.xyz".into())
            .output_dir("out".into())
            .build()
            .unwrap();
        assert_eq!(config.file_prefix, DEFAULT_FILE_PREFIX);
        assert_eq!(config.link0, Link0::default());
        assert_eq!(config.template, RouteTemplate::default());
        assert!(!config.checkpoint);
        assert!(config.max_conformers.is_none());
        assert!(config.measurements.is_empty());
    }

    #[test]
    fn conversion_builder_requires_paths() {
        let err = ConversionConfigBuilder::new()
            .output_dir("out".into())
            .build()
            .unwrap_err();
        assert_eq!(err, ConfigError::MissingParameter("input_path"));
    }

    #[test]
    fn measurement_builder_requires_at_least_one_coordinate() {
        let err = MeasurementConfigBuilder::new()
            .input_path("a.xyz".into())
            .output_dir("out".into())
            .build()
            .unwrap_err();
        assert_eq!(err, ConfigError::MissingParameter("measurements"));
    }

    #[test]
    fn rmsd_builder_validates_reference_and_thresholds() {
        let base = || {
            RmsdConfigBuilder::new()
                .input_path("a.xyz".into())
                .output_path("rmsd_output.txt".into())
        };
        let config = base().build().unwrap();
        assert_eq!(config.reference_index, 1);
        assert_eq!(config.method, RmsdMethod::Kabsch);
        assert_eq!(config.classifier, RmsdClassifier::default());

        assert_eq!(
            base().reference_index(0).build().unwrap_err(),
            ConfigError::InvalidReference(0)
        );
        assert!(matches!(
            base().thresholds(vec![2.0, 1.0]).build(),
            Err(ConfigError::InvalidThresholds(_))
        ));
    }
}
