use super::error::EngineError;
use crate::core::models::conformer::Conformer;
use crate::core::models::ensemble::Ensemble;
use crate::core::utils::geometry;
use nalgebra::Point3;
use rayon::prelude::*;
use std::fmt;
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CoordinateKind {
    Distance,
    Angle,
    Dihedral,
}

/// An internal coordinate defined by 1-based atom indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InternalCoordinate {
    Distance([usize; 2]),
    Angle([usize; 3]),
    Dihedral([usize; 4]),
}

impl InternalCoordinate {
    pub fn kind(&self) -> CoordinateKind {
        match self {
            Self::Distance(_) => CoordinateKind::Distance,
            Self::Angle(_) => CoordinateKind::Angle,
            Self::Dihedral(_) => CoordinateKind::Dihedral,
        }
    }

    pub fn atoms(&self) -> &[usize] {
        match self {
            Self::Distance(a) => a,
            Self::Angle(a) => a,
            Self::Dihedral(a) => a,
        }
    }

    /// Human readable title, used for plot captions.
    pub fn label(&self) -> String {
        let (prefix, preposition) = match self.kind() {
            CoordinateKind::Distance => ("Bond length changes", "between"),
            CoordinateKind::Angle => ("Angle changes", "among"),
            CoordinateKind::Dihedral => ("Dihedral changes", "among"),
        };
        format!("{} {} {}", prefix, preposition, join_atoms(self.atoms(), ", ", " and "))
    }

    /// Stem of the text file holding the per-conformer values.
    pub fn file_stem(&self) -> &'static str {
        match self.kind() {
            CoordinateKind::Distance => "bond_length",
            CoordinateKind::Angle => "angle",
            CoordinateKind::Dihedral => "dihedral",
        }
    }

    /// Stem of the plot file, e.g. `Bond_1and2` or `Dihedral_1_2_3and4`.
    pub fn plot_stem(&self) -> String {
        let prefix = match self.kind() {
            CoordinateKind::Distance => "Bond",
            CoordinateKind::Angle => "Angle",
            CoordinateKind::Dihedral => "Dihedral",
        };
        format!("{}_{}", prefix, join_atoms(self.atoms(), "_", "and"))
    }

    pub fn unit(&self) -> &'static str {
        match self.kind() {
            CoordinateKind::Distance => "Å",
            CoordinateKind::Angle | CoordinateKind::Dihedral => "°",
        }
    }

    /// Evaluates the coordinate on one conformer.
    ///
    /// `conformer_number` is the 1-based position of the conformer in its ensemble
    /// and is only used for error reporting.
    pub fn measure(
        &self,
        conformer: &Conformer,
        conformer_number: usize,
    ) -> Result<f64, EngineError> {
        let mut points: Vec<Point3<f64>> = Vec::with_capacity(4);
        for &index in self.atoms() {
            let atom = conformer
                .atom(index)
                .ok_or(EngineError::AtomIndexOutOfRange {
                    conformer: conformer_number,
                    index,
                    atom_count: conformer.atom_count(),
                })?;
            points.push(atom.position);
        }

        let value = match self.kind() {
            CoordinateKind::Distance => Some(geometry::distance(&points[0], &points[1])),
            CoordinateKind::Angle => geometry::bond_angle(&points[0], &points[1], &points[2]),
            CoordinateKind::Dihedral => {
                geometry::dihedral(&points[0], &points[1], &points[2], &points[3])
            }
        };
        value.ok_or_else(|| EngineError::DegenerateGeometry {
            conformer: conformer_number,
            coordinate: self.to_string(),
        })
    }
}

impl fmt::Display for InternalCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self.kind() {
            CoordinateKind::Distance => "distance",
            CoordinateKind::Angle => "angle",
            CoordinateKind::Dihedral => "dihedral",
        };
        let atoms: Vec<String> = self.atoms().iter().map(|a| a.to_string()).collect();
        write!(f, "{}({})", name, atoms.join("-"))
    }
}

fn join_atoms(atoms: &[usize], sep: &str, last_sep: &str) -> String {
    let names: Vec<String> = atoms.iter().map(|a| a.to_string()).collect();
    match names.split_last() {
        Some((last, rest)) if !rest.is_empty() => {
            format!("{}{}{}", rest.join(sep), last_sep, last)
        }
        _ => names.concat(),
    }
}

/// Values of one internal coordinate for consecutive conformers of an ensemble.
#[derive(Debug, Clone, PartialEq)]
pub struct MeasurementSeries {
    pub coordinate: InternalCoordinate,
    /// One value per conformer, in ensemble order.
    pub values: Vec<f64>,
}

impl MeasurementSeries {
    /// Measures `coordinate` on the first `limit` conformers of `ensemble`.
    pub fn measure_ensemble(
        coordinate: InternalCoordinate,
        ensemble: &Ensemble,
        limit: usize,
    ) -> Result<Self, EngineError> {
        let count = limit.min(ensemble.len());
        let values = ensemble.conformers[..count]
            .par_iter()
            .enumerate()
            .map(|(i, conformer)| coordinate.measure(conformer, i + 1))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { coordinate, values })
    }

    pub fn min(&self) -> Option<f64> {
        self.values.iter().copied().reduce(f64::min)
    }

    pub fn max(&self) -> Option<f64> {
        self.values.iter().copied().reduce(f64::max)
    }

    pub fn mean(&self) -> Option<f64> {
        if self.values.is_empty() {
            return None;
        }
        Some(self.values.iter().sum::<f64>() / self.values.len() as f64)
    }

    /// Writes tab-separated `conformer<TAB>value` rows, conformers numbered from 1.
    pub fn write_to(&self, writer: impl Write) -> Result<(), EngineError> {
        let mut wtr = csv::WriterBuilder::new()
            .delimiter(b'\t')
            .has_headers(false)
            .from_writer(writer);
        for (i, value) in self.values.iter().enumerate() {
            wtr.write_record([(i + 1).to_string(), format!("{:.4}", value)])?;
        }
        wtr.flush()?;
        Ok(())
    }
}
