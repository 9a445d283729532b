use nalgebra::Vector3;

use crate::{
    atom::Atom,
    periodic_table::{ElementError, ElementType},
};

/// Represents a molecule
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Molecule {
    pub(crate) atoms: Vec<Atom>,
}

impl Molecule {
    pub fn new(atoms: Vec<Atom>) -> Self {
        Self { atoms }
    }

    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    /// Nuclear positions converted to Ångström, the unit surface samplers work in.
    pub fn positions_angstrom(&self) -> Vec<Vector3<f64>> {
        self.atoms.iter().map(Atom::position_angstrom).collect()
    }

    /// Resolves every atomic number against the periodic table. Fails on the
    /// first atom without an entry.
    pub fn elements(&self) -> Result<Vec<ElementType>, ElementError> {
        self.atoms.iter().map(Atom::element_type).collect()
    }
}
