use nalgebra::Vector3;

use crate::periodic_table::{ElementError, ElementType};

/// Length of one Bohr radius in Ångström.
pub const BOHR_TO_ANGSTROM: f64 = 0.529177249;

/// Represents an atom read from a calculation log.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Atom {
    /// Position in Bohr.
    pub(crate) position: Vector3<f64>,
    pub(crate) atomic_number: u32,
}

impl Atom {
    pub fn new(atomic_number: u32, position: Vector3<f64>) -> Self {
        Self {
            position,
            atomic_number,
        }
    }

    /// Returns the charge of this nucleus
    pub fn atomic_number(&self) -> u32 {
        self.atomic_number
    }

    /// Position in Bohr
    pub fn position(&self) -> &Vector3<f64> {
        &self.position
    }

    pub fn position_angstrom(&self) -> Vector3<f64> {
        self.position * BOHR_TO_ANGSTROM
    }

    pub fn element_type(&self) -> Result<ElementType, ElementError> {
        ElementType::try_from(self.atomic_number)
    }
}
