//! # crestpost Core Library
//!
//! Post-processing toolkit for conformer ensembles produced by CREST.
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer architecture so that file handling, numerics and
//! end-to-end procedures stay independent of each other.
//!
//! - **[`core`]: The Foundation.** Stateless data models (`Ensemble`, `Conformer`), file
//!   formats (multi-frame XYZ, Gaussian 16 input) and pure geometry routines (distances,
//!   angles, dihedrals, Kabsch superposition).
//!
//! - **[`engine`]: The Logic Core.** Configuration builders, error types, progress
//!   reporting, internal-coordinate measurement across an ensemble and RMSD
//!   computation with classification.
//!
//! - **[`workflows`]: The Public API.** Complete procedures (`convert`, `measure`,
//!   `rmsd`) that read an ensemble, run the engine and write the results to disk.

pub mod core;
pub mod engine;
pub mod workflows;
