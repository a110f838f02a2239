//! # Workflows Module
//!
//! High-level procedures that take a configuration from [`crate::engine::config`],
//! read an ensemble from disk, run the engine and write the results.
//!
//! - **Conversion** ([`convert`]) - One Gaussian 16 input file per conformer, plus
//!   optional internal-coordinate tables
//! - **Measurement** ([`measure`]) - Internal-coordinate tables only
//! - **RMSD** ([`rmsd`]) - RMSD of each conformer to a reference, with classification
//!
//! Every workflow reports its phases through a
//! [`ProgressReporter`](crate::engine::progress::ProgressReporter).

pub mod convert;
pub mod measure;
pub mod rmsd;

use crate::core::io::traits::EnsembleFile;
use crate::core::io::xyz::XyzFile;
use crate::core::models::ensemble::Ensemble;
use crate::engine::error::EngineError;
use std::path::Path;
use tracing::{info, warn};

pub(crate) fn load_ensemble(path: &Path) -> Result<Ensemble, EngineError> {
    info!("Reading ensemble from {:?}", path);
    let ensemble = XyzFile::read_from_path(path)?;
    if ensemble.is_empty() {
        return Err(EngineError::EmptyEnsemble);
    }
    if !ensemble.is_uniform() {
        warn!(
            "Conformers in {:?} do not share the same element sequence; per-atom analyses may be meaningless.",
            path
        );
    }
    info!(
        "Loaded {} conformer(s) with {} atom(s) each.",
        ensemble.len(),
        ensemble.atom_count()
    );
    Ok(ensemble)
}

/// Number of conformers to process when at most `requested` are wanted.
pub(crate) fn conformer_limit(ensemble: &Ensemble, requested: Option<usize>) -> usize {
    match requested {
        Some(n) if n > ensemble.len() => {
            warn!(
                "Requested {} conformers but the ensemble only has {}; processing all of them.",
                n,
                ensemble.len()
            );
            ensemble.len()
        }
        Some(n) => n,
        None => ensemble.len(),
    }
}
