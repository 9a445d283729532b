mod mo;
mod orbital_set;

pub use mo::MolecularOrbital;
pub use orbital_set::{OrbitalSet, SpinChannel, WavefunctionError};

use serde::{Deserialize, Serialize};

/// Spin channel of an unrestricted calculation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Spin {
    /// by convention, spin up
    Alpha,
    /// by convention, spin down
    Beta,
}

impl Spin {
    /// Parses the value of a `Spin=` header line.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.eq_ignore_ascii_case("alpha") {
            Some(Self::Alpha)
        } else if value.eq_ignore_ascii_case("beta") {
            Some(Self::Beta)
        } else {
            None
        }
    }
}

impl std::fmt::Display for Spin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Alpha => "alpha",
            Self::Beta => "beta",
        })
    }
}
