//! # Engine Module
//!
//! The analysis layer between the stateless [`crate::core`] types and the
//! end-to-end [`crate::workflows`].
//!
//! - [`config`] - Validated configuration objects built through builders
//! - [`error`] - The [`error::EngineError`] type shared by all engine operations
//! - [`progress`] - Callback-based progress reporting for user interfaces
//! - [`measure`] - Bond lengths, bond angles and dihedrals across an ensemble
//! - [`rmsd`] - RMSD against a reference conformer and its classification
//!
//! Per-conformer work is independent, so both [`measure`] and [`rmsd`] evaluate
//! conformers on the rayon thread pool while preserving ensemble order.

pub mod config;
pub mod error;
pub mod measure;
pub mod progress;
pub mod rmsd;
