use super::config::{ConfigError, RmsdConfig};
use super::error::EngineError;
use crate::core::models::ensemble::Ensemble;
use crate::core::utils::geometry;
use nalgebra::Point3;
use rayon::prelude::*;
use serde::Deserialize;
use std::fmt;
use std::io::Write;
use std::str::FromStr;

/// How two conformers are brought into a common frame before the RMSD is taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RmsdMethod {
    /// Optimal rigid-body superposition (Kabsch).
    #[default]
    Kabsch,
    /// Translate each conformer so that its first atom sits at the origin.
    FirstAtom,
    /// Raw coordinates, no alignment.
    None,
}

impl FromStr for RmsdMethod {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "kabsch" => Ok(Self::Kabsch),
            "first-atom" | "first_atom" => Ok(Self::FirstAtom),
            "none" => Ok(Self::None),
            other => Err(ConfigError::InvalidMethod(other.to_string())),
        }
    }
}

impl fmt::Display for RmsdMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Kabsch => "kabsch",
            Self::FirstAtom => "first-atom",
            Self::None => "none",
        };
        f.write_str(name)
    }
}

pub const DEFAULT_THRESHOLDS: [f64; 3] = [0.5, 1.0, 2.0];

/// Sorts RMSD values into ranges bounded by ascending thresholds.
///
/// Thresholds `[t0, t1, ..., tn]` define the bins `< t0`, `[t0, t1)`, ...,
/// `>= tn`.
#[derive(Debug, Clone, PartialEq)]
pub struct RmsdClassifier {
    thresholds: Vec<f64>,
}

impl Default for RmsdClassifier {
    fn default() -> Self {
        Self {
            thresholds: DEFAULT_THRESHOLDS.to_vec(),
        }
    }
}

impl RmsdClassifier {
    pub fn new(thresholds: Vec<f64>) -> Result<Self, ConfigError> {
        if thresholds.is_empty() {
            return Err(ConfigError::InvalidThresholds(
                "at least one threshold is required".to_string(),
            ));
        }
        if thresholds.iter().any(|t| !t.is_finite() || *t < 0.0) {
            return Err(ConfigError::InvalidThresholds(
                "thresholds must be finite and non-negative".to_string(),
            ));
        }
        if thresholds.windows(2).any(|w| w[0] >= w[1]) {
            return Err(ConfigError::InvalidThresholds(
                "thresholds must be strictly increasing".to_string(),
            ));
        }
        Ok(Self { thresholds })
    }

    pub fn thresholds(&self) -> &[f64] {
        &self.thresholds
    }

    /// Index of the bin `value` falls into.
    pub fn bin(&self, value: f64) -> usize {
        self.thresholds
            .iter()
            .position(|&t| value < t)
            .unwrap_or(self.thresholds.len())
    }

    pub fn labels(&self) -> Vec<String> {
        let t = &self.thresholds;
        let mut labels = Vec::with_capacity(t.len() + 1);
        labels.push(format!("Smaller Than {}", format_threshold(t[0])));
        for w in t.windows(2) {
            labels.push(format!(
                "{} To {}",
                format_threshold(w[0]),
                format_threshold(w[1])
            ));
        }
        labels.push(format!("Above {}", format_threshold(t[t.len() - 1])));
        labels
    }

    /// Groups 1-based conformer numbers by bin.
    pub fn classify(&self, values: &[f64]) -> Vec<(String, Vec<usize>)> {
        let mut categories: Vec<(String, Vec<usize>)> = self
            .labels()
            .into_iter()
            .map(|label| (label, Vec::new()))
            .collect();
        for (i, &value) in values.iter().enumerate() {
            categories[self.bin(value)].1.push(i + 1);
        }
        categories
    }
}

fn format_threshold(t: f64) -> String {
    let short = format!("{:.1}", t);
    if short.parse::<f64>().is_ok_and(|v| v == t) {
        short
    } else {
        t.to_string()
    }
}

/// RMSD of every conformer against a reference conformer, with classification.
#[derive(Debug, Clone, PartialEq)]
pub struct RmsdReport {
    /// 1-based index of the reference conformer.
    pub reference: usize,
    pub method: RmsdMethod,
    /// RMSD in Angstroms, one per conformer in ensemble order.
    pub values: Vec<f64>,
    pub categories: Vec<(String, Vec<usize>)>,
}

impl RmsdReport {
    pub fn compute(ensemble: &Ensemble, config: &RmsdConfig) -> Result<Self, EngineError> {
        if ensemble.is_empty() {
            return Err(EngineError::EmptyEnsemble);
        }
        let reference = config
            .reference_index
            .checked_sub(1)
            .and_then(|i| ensemble.get(i))
            .ok_or(EngineError::ReferenceOutOfRange {
                index: config.reference_index,
                len: ensemble.len(),
            })?;
        let reference_points = prepare(&reference.positions(), config.method);
        let expected = reference.atom_count();

        let values = ensemble
            .conformers
            .par_iter()
            .enumerate()
            .map(|(i, conformer)| {
                if conformer.atom_count() != expected {
                    return Err(EngineError::AtomCountMismatch {
                        conformer: i + 1,
                        expected,
                        found: conformer.atom_count(),
                    });
                }
                let points = prepare(&conformer.positions(), config.method);
                let rmsd = match config.method {
                    RmsdMethod::Kabsch => geometry::aligned_rmsd(&reference_points, &points),
                    RmsdMethod::FirstAtom | RmsdMethod::None => {
                        geometry::calculate_rmsd(&reference_points, &points)
                    }
                };
                rmsd.filter(|v| v.is_finite())
                    .ok_or_else(|| EngineError::DegenerateGeometry {
                        conformer: i + 1,
                        coordinate: format!("RMSD ({})", config.method),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let categories = config.classifier.classify(&values);
        Ok(Self {
            reference: config.reference_index,
            method: config.method,
            values,
            categories,
        })
    }

    pub fn write_to(&self, writer: &mut impl Write) -> std::io::Result<()> {
        writeln!(writer, "RMSD Values and Classification:")?;
        for (i, rmsd) in self.values.iter().enumerate() {
            writeln!(writer, "Conformer {}: RMSD = {:.4} Å", i + 1, rmsd)?;
        }
        writeln!(writer)?;
        writeln!(writer, "Classification:")?;
        for (label, members) in &self.categories {
            let members: Vec<String> = members.iter().map(|m| m.to_string()).collect();
            writeln!(writer, "{}: {}", label, members.join(", "))?;
        }
        Ok(())
    }
}

fn prepare(points: &[Point3<f64>], method: RmsdMethod) -> Vec<Point3<f64>> {
    match method {
        RmsdMethod::FirstAtom => {
            geometry::translate_to_anchor(points, 0).unwrap_or_else(|| points.to_vec())
        }
        RmsdMethod::Kabsch | RmsdMethod::None => points.to_vec(),
    }
}
