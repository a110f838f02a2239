use crate::core::models::ensemble::Ensemble;
use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Defines the interface for reading and writing conformer ensemble files.
///
/// Implementors handle format-specific parsing and serialization; the path-based
/// helpers wrap them in buffered file handles.
pub trait EnsembleFile {
    /// The error type for I/O operations.
    type Error: Error + From<io::Error>;

    /// Reads an ensemble from a buffered reader.
    ///
    /// # Errors
    ///
    /// Returns an error if parsing fails or I/O operations encounter issues.
    fn read_from(reader: &mut impl BufRead) -> Result<Ensemble, Self::Error>;

    /// Writes an ensemble to a writer.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write_to(ensemble: &Ensemble, writer: &mut impl Write) -> Result<(), Self::Error>;

    /// Reads an ensemble from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or parsing fails.
    fn read_from_path<P: AsRef<Path>>(path: P) -> Result<Ensemble, Self::Error> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_from(&mut reader)
    }

    /// Writes an ensemble to a file path, replacing any existing file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or writing fails.
    fn write_to_path<P: AsRef<Path>>(ensemble: &Ensemble, path: P) -> Result<(), Self::Error> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        Self::write_to(ensemble, &mut writer)?;
        writer.flush()?;
        Ok(())
    }
}
