use crestpost::engine::measure::InternalCoordinate;
use crestpost::engine::rmsd::RmsdMethod;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error(
        "Invalid memory specification '{0}'. Expected a positive integer with an optional unit (e.g., '48', '48GB', '4000MB')."
    )]
    InvalidMemory(String),

    #[error("Unknown memory unit '{unit}' in '{value}'. Expected one of KB, MB, GB, TB, KW, MW, GW, TW.")]
    UnknownMemoryUnit { unit: String, value: String },

    #[error("Atom indices start at 1; got 0 in {kind} specification.")]
    ZeroAtomIndex { kind: &'static str },

    #[error("A {kind} needs {expected} atom indices, got {found}.")]
    WrongIndexCount {
        kind: &'static str,
        expected: usize,
        found: usize,
    },
}

const MEMORY_UNITS: [&str; 8] = ["KB", "MB", "GB", "TB", "KW", "MW", "GW", "TW"];

/// Normalizes a `%mem` value. A bare number means gigabytes.
pub fn parse_memory(raw: &str) -> Result<String, ParseError> {
    let value = raw.trim();
    let split = value
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(value.len());
    let (number, unit) = value.split_at(split);

    let amount: u64 = number
        .parse()
        .map_err(|_| ParseError::InvalidMemory(raw.to_string()))?;
    if amount == 0 {
        return Err(ParseError::InvalidMemory(raw.to_string()));
    }

    let unit = if unit.trim().is_empty() {
        "GB".to_string()
    } else {
        unit.trim().to_ascii_uppercase()
    };
    if !MEMORY_UNITS.contains(&unit.as_str()) {
        return Err(ParseError::UnknownMemoryUnit {
            unit,
            value: raw.to_string(),
        });
    }
    Ok(format!("{}{}", amount, unit))
}

pub fn parse_rmsd_method(raw: &str) -> Result<RmsdMethod, String> {
    raw.parse::<RmsdMethod>().map_err(|e| e.to_string())
}

pub fn parse_thresholds(raw: &str) -> Result<Vec<f64>, String> {
    raw.split(',')
        .map(|part| {
            part.trim()
                .parse::<f64>()
                .map_err(|_| format!("Invalid threshold '{}'", part.trim()))
        })
        .collect()
}

fn checked_indices<const N: usize>(
    kind: &'static str,
    indices: &[usize],
) -> Result<[usize; N], ParseError> {
    let array: [usize; N] = indices
        .try_into()
        .map_err(|_| ParseError::WrongIndexCount {
            kind,
            expected: N,
            found: indices.len(),
        })?;
    if array.contains(&0) {
        return Err(ParseError::ZeroAtomIndex { kind });
    }
    Ok(array)
}

/// Builds the internal coordinates requested on the command line, in the order
/// length, angle, dihedral.
pub fn parse_measurements(
    length: Option<&[usize]>,
    angle: Option<&[usize]>,
    dihedral: Option<&[usize]>,
) -> Result<Vec<InternalCoordinate>, ParseError> {
    let mut coordinates = Vec::new();
    if let Some(indices) = length {
        coordinates.push(InternalCoordinate::Distance(checked_indices(
            "bond length",
            indices,
        )?));
    }
    if let Some(indices) = angle {
        coordinates.push(InternalCoordinate::Angle(checked_indices("angle", indices)?));
    }
    if let Some(indices) = dihedral {
        coordinates.push(InternalCoordinate::Dihedral(checked_indices(
            "dihedral", indices,
        )?));
    }
    Ok(coordinates)
}
