//! # Core Module
//!
//! Fundamental building blocks for working with conformer ensembles.
//!
//! - **Molecular Representation** ([`models`]) - Atoms, conformers and ensembles
//! - **Element Data** ([`elements`]) - Element symbol and atomic number lookup
//! - **File I/O** ([`io`]) - Multi-frame XYZ files and Gaussian 16 input files
//! - **Geometry** ([`utils`]) - Internal coordinates, superposition and RMSD

pub mod elements;
pub mod io;
pub mod models;
pub mod utils;
