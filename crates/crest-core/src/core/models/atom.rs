use nalgebra::Point3;

/// A single atom of a conformer.
///
/// The element is stored as its canonical symbol (e.g. `"C"`, `"Cl"`); the position
/// is given in Angstroms.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// Canonical element symbol.
    pub element: String,
    /// Cartesian coordinates in Angstroms.
    pub position: Point3<f64>,
}

impl Atom {
    pub fn new(element: &str, position: Point3<f64>) -> Self {
        Self {
            element: element.to_string(),
            position,
        }
    }
}
