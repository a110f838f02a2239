//! Provides input/output functionality for the file formats used around CREST.
//!
//! Ensembles are read from and written to multi-frame XYZ files through the
//! [`traits::EnsembleFile`] interface. Gaussian 16 input files are write-only and
//! are assembled from a conformer, a Link 0 section and a keyword template.

pub mod gaussian;
pub mod traits;
pub mod xyz;
