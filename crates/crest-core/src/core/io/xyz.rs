use crate::core::elements;
use crate::core::io::traits::EnsembleFile;
use crate::core::models::atom::Atom;
use crate::core::models::conformer::Conformer;
use crate::core::models::ensemble::Ensemble;
use nalgebra::Point3;
use std::io::{self, BufRead, Write};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum XyzError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse { line: usize, kind: XyzParseErrorKind },
    #[error("Frame {frame} is truncated: expected {expected} atom lines, found {found}")]
    TruncatedFrame {
        frame: usize,
        expected: usize,
        found: usize,
    },
    #[error("File contains no XYZ frames")]
    Empty,
}

#[derive(Debug, Error, PartialEq)]
pub enum XyzParseErrorKind {
    #[error("Invalid atom count (value: '{0}')")]
    InvalidAtomCount(String),
    #[error("Invalid {axis} coordinate (value: '{value}')")]
    InvalidCoordinate { axis: char, value: String },
    #[error("Atom line requires an element and three coordinates")]
    MissingField,
    #[error("Unknown element '{0}'")]
    UnknownElement(String),
}

/// Multi-frame XYZ file, the ensemble format written by CREST (`crest_conformers.xyz`).
pub struct XyzFile;

struct LineCursor<L> {
    lines: L,
    line_num: usize,
}

impl<L: Iterator<Item = io::Result<String>>> LineCursor<L> {
    fn next_line(&mut self) -> Result<Option<String>, XyzError> {
        match self.lines.next() {
            Some(line) => {
                self.line_num += 1;
                Ok(Some(line?))
            }
            None => Ok(None),
        }
    }

    fn next_non_blank(&mut self) -> Result<Option<String>, XyzError> {
        while let Some(line) = self.next_line()? {
            if !line.trim().is_empty() {
                return Ok(Some(line));
            }
        }
        Ok(None)
    }
}

fn parse_atom_line(line: &str, line_num: usize) -> Result<Atom, XyzError> {
    let parse_error = |kind| XyzError::Parse {
        line: line_num,
        kind,
    };
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.len() < 4 {
        return Err(parse_error(XyzParseErrorKind::MissingField));
    }
    let element = elements::normalize_symbol(parts[0])
        .ok_or_else(|| parse_error(XyzParseErrorKind::UnknownElement(parts[0].to_string())))?;

    let mut coords = [0.0f64; 3];
    for (i, axis) in ['x', 'y', 'z'].into_iter().enumerate() {
        let raw = parts[i + 1];
        coords[i] = raw
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| {
                parse_error(XyzParseErrorKind::InvalidCoordinate {
                    axis,
                    value: raw.to_string(),
                })
            })?;
    }
    Ok(Atom::new(
        element,
        Point3::new(coords[0], coords[1], coords[2]),
    ))
}

impl EnsembleFile for XyzFile {
    type Error = XyzError;

    fn read_from(reader: &mut impl BufRead) -> Result<Ensemble, Self::Error> {
        let mut cursor = LineCursor {
            lines: reader.lines(),
            line_num: 0,
        };
        let mut conformers = Vec::new();

        while let Some(count_line) = cursor.next_non_blank()? {
            let frame = conformers.len() + 1;
            let count_str = count_line.trim();
            let expected: usize = match count_str.parse() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(XyzError::Parse {
                        line: cursor.line_num,
                        kind: XyzParseErrorKind::InvalidAtomCount(count_str.to_string()),
                    });
                }
            };

            let comment = cursor.next_line()?.ok_or(XyzError::TruncatedFrame {
                frame,
                expected,
                found: 0,
            })?;

            let mut atoms = Vec::with_capacity(expected);
            while atoms.len() < expected {
                let line = cursor.next_line()?.ok_or(XyzError::TruncatedFrame {
                    frame,
                    expected,
                    found: atoms.len(),
                })?;
                atoms.push(parse_atom_line(&line, cursor.line_num)?);
            }

            conformers.push(Conformer::new(comment.trim(), atoms));
        }

        if conformers.is_empty() {
            return Err(XyzError::Empty);
        }
        Ok(Ensemble::new(conformers))
    }

    fn write_to(ensemble: &Ensemble, writer: &mut impl Write) -> Result<(), Self::Error> {
        for conformer in ensemble {
            writeln!(writer, "{}", conformer.atom_count())?;
            writeln!(writer, "{}", conformer.comment)?;
            for atom in &conformer.atoms {
                writeln!(writer, "{}", format_atom_line(atom))?;
            }
        }
        Ok(())
    }
}

/// Formats an atom as an `Element x y z` line shared by XYZ and Gaussian output.
pub fn format_atom_line(atom: &Atom) -> String {
    format!(
        "{:<2} {:>16.10} {:>16.10} {:>16.10}",
        atom.element, atom.position.x, atom.position.y, atom.position.z
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const TWO_FRAMES: &str = "\
3
  -5.07054321
O    0.000000   0.000000   0.000000
H    0.960000   0.000000   0.000000
H   -0.240000   0.930000   0.000000
3
  -5.06912345
o    0.000000   0.000000   0.000000
1    0.950000   0.100000   0.000000
H   -0.250000   0.920000   0.050000

";

    fn read(text: &str) -> Result<Ensemble, XyzError> {
        XyzFile::read_from(&mut Cursor::new(text))
    }

    #[test]
    fn reads_all_frames_of_a_crest_ensemble() {
        let ensemble = read(TWO_FRAMES).unwrap();
        assert_eq!(ensemble.len(), 2);
        assert_eq!(ensemble.atom_count(), 3);
        assert_eq!(ensemble.get(0).unwrap().energy(), Some(-5.07054321));
        assert_eq!(ensemble.get(1).unwrap().atoms[2].position.z, 0.05);
    }

    #[test]
    fn normalizes_element_case_and_atomic_numbers() {
        let ensemble = read(TWO_FRAMES).unwrap();
        let second = ensemble.get(1).unwrap();
        assert_eq!(second.atoms[0].element, "O");
        assert_eq!(second.atoms[1].element, "H");
        assert!(ensemble.is_uniform());
    }

    #[test]
    fn extra_columns_after_coordinates_are_ignored() {
        let ensemble = read("1\n\nC 1.0 2.0 3.0 0.123 extra\n").unwrap();
        let atom = &ensemble.get(0).unwrap().atoms[0];
        assert_eq!(atom.position, Point3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn truncated_frame_reports_found_atom_lines() {
        let err = read("3\ncomment\nC 0 0 0\nH 1 0 0\n").unwrap_err();
        assert!(matches!(
            err,
            XyzError::TruncatedFrame {
                frame: 1,
                expected: 3,
                found: 2
            }
        ));
    }

    #[test]
    fn invalid_atom_count_reports_line_number() {
        let err = read("1\n\nC 0 0 0\nabc\n").unwrap_err();
        match err {
            XyzError::Parse { line, kind } => {
                assert_eq!(line, 4);
                assert_eq!(kind, XyzParseErrorKind::InvalidAtomCount("abc".into()));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn invalid_coordinate_names_the_axis() {
        let err = read("1\n\nC 0.0 zero 0.0\n").unwrap_err();
        match err {
            XyzError::Parse { line, kind } => {
                assert_eq!(line, 3);
                assert_eq!(
                    kind,
                    XyzParseErrorKind::InvalidCoordinate {
                        axis: 'y',
                        value: "zero".into()
                    }
                );
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn non_finite_coordinates_are_rejected() {
        let err = read("2\n\nC nan 0 0\nH 0 0 0\n").unwrap_err();
        assert!(matches!(
            err,
            XyzError::Parse {
                line: 3,
                kind: XyzParseErrorKind::InvalidCoordinate { axis: 'x', .. }
            }
        ));

        let err = read("2\n\nC 0 0 0\nH 0 0 inf\n").unwrap_err();
        match err {
            XyzError::Parse { line, kind } => {
                assert_eq!(line, 4);
                assert_eq!(
                    kind,
                    XyzParseErrorKind::InvalidCoordinate {
                        axis: 'z',
                        value: "inf".into()
                    }
                );
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn unknown_element_and_short_lines_are_rejected() {
        assert!(matches!(
            read("1\n\nQq 0 0 0\n").unwrap_err(),
            XyzError::Parse {
                kind: XyzParseErrorKind::UnknownElement(_),
                ..
            }
        ));
        assert!(matches!(
            read("1\n\nC 0 0\n").unwrap_err(),
            XyzError::Parse {
                kind: XyzParseErrorKind::MissingField,
                ..
            }
        ));
    }

    #[test]
    fn blank_input_is_an_empty_file_error() {
        assert!(matches!(read("\n\n").unwrap_err(), XyzError::Empty));
        assert!(matches!(read("0\n\n").unwrap_err(), XyzError::Parse { .. }));
    }

    #[test]
    fn written_file_can_be_read_back() {
        let ensemble = read(TWO_FRAMES).unwrap();
        let mut buffer = Vec::new();
        XyzFile::write_to(&ensemble, &mut buffer).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        assert!(text.starts_with("3\n-5.07054321\nO      0.0000000000     0.0000000000     0.0000000000\n"));
        assert_eq!(read(&text).unwrap(), ensemble);
    }

    #[test]
    fn path_helpers_use_the_file_system() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ensemble.xyz");
        std::fs::write(&path, TWO_FRAMES).unwrap();

        let ensemble = XyzFile::read_from_path(&path).unwrap();
        let copy = dir.path().join("copy.xyz");
        XyzFile::write_to_path(&ensemble, &copy).unwrap();
        assert_eq!(XyzFile::read_from_path(&copy).unwrap(), ensemble);

        let missing = XyzFile::read_from_path(dir.path().join("missing.xyz"));
        assert!(matches!(missing, Err(XyzError::Io(_))));
    }
}
