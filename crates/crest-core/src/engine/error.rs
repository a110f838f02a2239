use super::config::ConfigError;
use crate::core::io::gaussian::GaussianError;
use crate::core::io::xyz::XyzError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Failed to read ensemble: {0}")]
    Xyz(#[from] XyzError),

    #[error("Failed to write Gaussian input: {0}")]
    Gaussian(#[from] GaussianError),

    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to write table: {0}")]
    Csv(#[from] csv::Error),

    #[error("Ensemble contains no conformers")]
    EmptyEnsemble,

    #[error(
        "Atom index {index} is out of range for conformer {conformer} ({atom_count} atoms; indices start at 1)"
    )]
    AtomIndexOutOfRange {
        conformer: usize,
        index: usize,
        atom_count: usize,
    },

    #[error("Degenerate geometry for {coordinate} in conformer {conformer}")]
    DegenerateGeometry { conformer: usize, coordinate: String },

    #[error("Conformer {conformer} has {found} atoms, but the reference has {expected}")]
    AtomCountMismatch {
        conformer: usize,
        expected: usize,
        found: usize,
    },

    #[error("Reference conformer {index} does not exist (ensemble has {len} conformers)")]
    ReferenceOutOfRange { index: usize, len: usize },

    #[error("Output location already exists: {}", .0.display())]
    OutputExists(PathBuf),
}
