//! Data structures describing a conformer ensemble.
//!
//! An [`ensemble::Ensemble`] is an ordered list of [`conformer::Conformer`]s, each of
//! which is an ordered list of [`atom::Atom`]s. Ordering is significant throughout:
//! conformer and atom positions are the identifiers used by every analysis.

pub mod atom;
pub mod conformer;
pub mod ensemble;
