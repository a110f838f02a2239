pub mod convert;
pub mod measure;
pub mod rmsd;
