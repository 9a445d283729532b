use serde::{Deserialize, Serialize};

use super::Spin;

/// One molecular orbital as printed in an `[MO]` block.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MolecularOrbital {
    pub spin: Spin,
    /// Orbital energy, in the units the program printed
    pub energy: f64,
    pub occupation: f64,
    /// Expansion coefficients over the basis functions, in file order
    pub coefficients: Vec<f64>,
}
