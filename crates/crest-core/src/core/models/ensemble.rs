use super::conformer::Conformer;

/// An ordered collection of conformers of the same molecule.
///
/// The first conformer of a CREST ensemble is the lowest in energy, which is why it
/// serves as the default reference for RMSD analysis.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Ensemble {
    pub conformers: Vec<Conformer>,
}

impl Ensemble {
    pub fn new(conformers: Vec<Conformer>) -> Self {
        Self { conformers }
    }

    pub fn len(&self) -> usize {
        self.conformers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conformers.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Conformer> {
        self.conformers.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Conformer> {
        self.conformers.get(index)
    }

    /// Number of atoms in the first conformer, or zero for an empty ensemble.
    pub fn atom_count(&self) -> usize {
        self.conformers.first().map_or(0, Conformer::atom_count)
    }

    /// Returns `true` if all conformers share the element sequence of the first one.
    pub fn is_uniform(&self) -> bool {
        let Some(first) = self.conformers.first() else {
            return true;
        };
        self.conformers[1..].iter().all(|c| {
            c.atom_count() == first.atom_count() && c.elements().eq(first.elements())
        })
    }
}

impl<'a> IntoIterator for &'a Ensemble {
    type Item = &'a Conformer;
    type IntoIter = std::slice::Iter<'a, Conformer>;

    fn into_iter(self) -> Self::IntoIter {
        self.conformers.iter()
    }
}
