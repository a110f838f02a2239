use super::atom::Atom;
use nalgebra::Point3;

/// One geometric variant of a molecule within an ensemble.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Conformer {
    /// The comment line of the XYZ frame. CREST stores the energy (Hartree) here.
    pub comment: String,
    /// Atoms in file order.
    pub atoms: Vec<Atom>,
}

impl Conformer {
    pub fn new(comment: impl Into<String>, atoms: Vec<Atom>) -> Self {
        Self {
            comment: comment.into(),
            atoms,
        }
    }

    /// Parses the leading token of the comment line as an energy.
    pub fn energy(&self) -> Option<f64> {
        self.comment.split_whitespace().next()?.parse().ok()
    }

    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    /// Looks up an atom by its 1-based index.
    pub fn atom(&self, index: usize) -> Option<&Atom> {
        self.atoms.get(index.checked_sub(1)?)
    }

    pub fn positions(&self) -> Vec<Point3<f64>> {
        self.atoms.iter().map(|a| a.position).collect()
    }

    pub fn elements(&self) -> impl Iterator<Item = &str> {
        self.atoms.iter().map(|a| a.element.as_str())
    }
}
