use crestpost::engine::config::DEFAULT_FILE_PREFIX;
use crestpost::engine::rmsd::{DEFAULT_THRESHOLDS, RmsdMethod};

pub struct DefaultsConfig {
    pub nprocshared: usize,
    pub memory: String,
    pub checkpoint: bool,
    pub template: String,
    pub file_prefix: String,
    pub plot_dir: String,
    pub rmsd_method: RmsdMethod,
    pub rmsd_thresholds: Vec<f64>,
    pub rmsd_reference: usize,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            nprocshared: 24,
            memory: "48GB".to_string(),
            checkpoint: false,
            template: "input.txt".to_string(),
            file_prefix: DEFAULT_FILE_PREFIX.to_string(),
            plot_dir: ".".to_string(),
            rmsd_method: RmsdMethod::Kabsch,
            rmsd_thresholds: DEFAULT_THRESHOLDS.to_vec(),
            rmsd_reference: 1,
        }
    }
}
