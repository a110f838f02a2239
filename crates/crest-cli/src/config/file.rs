use crate::error::{CliError, Result};
use crestpost::engine::rmsd::RmsdMethod;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileGaussianConfig {
    pub nprocshared: Option<usize>,
    pub memory: Option<String>,
    pub checkpoint: Option<bool>,
    pub template: Option<PathBuf>,
    pub file_prefix: Option<String>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileRmsdConfig {
    pub method: Option<RmsdMethod>,
    pub thresholds: Option<Vec<f64>>,
    pub reference: Option<usize>,
}

/// Optional settings read from a `--config` TOML file.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub gaussian: Option<FileGaussianConfig>,
    pub rmsd: Option<FileRmsdConfig>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    pub fn from_toml(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn full_file_is_parsed() {
        let config = FileConfig::from_toml(
            r#"
[gaussian]
nprocshared = 16
memory = "32GB"
checkpoint = true
template = "route.txt"
file-prefix = "mol"

[rmsd]
method = "first-atom"
thresholds = [0.25, 0.5]
reference = 2
"#,
        )
        .unwrap();

        let gaussian = config.gaussian.unwrap();
        assert_eq!(gaussian.nprocshared, Some(16));
        assert_eq!(gaussian.memory.as_deref(), Some("32GB"));
        assert_eq!(gaussian.checkpoint, Some(true));
        assert_eq!(gaussian.template, Some(PathBuf::from("route.txt")));
        assert_eq!(gaussian.file_prefix.as_deref(), Some("mol"));

        let rmsd = config.rmsd.unwrap();
        assert_eq!(rmsd.method, Some(RmsdMethod::FirstAtom));
        assert_eq!(rmsd.thresholds, Some(vec![0.25, 0.5]));
        assert_eq!(rmsd.reference, Some(2));
    }

    #[test]
    fn empty_file_yields_defaults() {
        assert_eq!(FileConfig::from_toml("").unwrap(), FileConfig::default());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(FileConfig::from_toml("[gaussian]\ncores = 4\n").is_err());
        assert!(FileConfig::from_toml("[orca]\n").is_err());
    }

    #[test]
    fn parse_failure_reports_the_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "[rmsd]\nmethod = \"quaternion\"\n").unwrap();

        match FileConfig::from_file(&path) {
            Err(CliError::FileParsing { path: p, .. }) => assert_eq!(p, path),
            other => panic!("expected FileParsing error, got {:?}", other),
        }
    }
}
