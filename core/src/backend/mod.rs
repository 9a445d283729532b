//! The two numeric capabilities the descriptor needs: evaluating orbitals at
//! points and sampling a molecular surface. Native implementations live in
//! [`gaussian`] and [`surface`]; any other backend can be plugged in through
//! the traits.

pub mod gaussian;
pub mod surface;

use nalgebra::{DMatrix, Vector3};

use crate::{basis::Basis, periodic_table::ElementType, wavefunction::SpinChannel};

pub type DefaultEvaluator = gaussian::GaussianEvaluator;
pub type DefaultSampler = surface::VdwSurface;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EvaluationError {
    #[error("orbital coefficients span {orbital_rows} basis functions, but the basis has {n_basis}")]
    BasisMismatch { orbital_rows: usize, n_basis: usize },

    #[error("orbital {index} requested, but only {n_orbitals} orbitals are available")]
    OrbitalOutOfRange { index: usize, n_orbitals: usize },

    #[error("backend returned a {found:?} amplitude matrix, expected {expected:?}")]
    Shape {
        expected: (usize, usize),
        found: (usize, usize),
    },
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SurfaceError {
    #[error("no van der Waals radius is tabulated for {0}")]
    MissingRadius(ElementType),

    #[error("got {positions} atom positions but {elements} elements")]
    LengthMismatch { positions: usize, elements: usize },

    #[error("invalid surface parameter: {0}")]
    InvalidParameter(String),
}

pub trait OrbitalEvaluator {
    /// Amplitudes of the selected `orbitals` of `channel` at `points` (Bohr),
    /// shaped (points x orbitals).
    fn evaluate_orbitals(
        &self,
        basis: &Basis,
        channel: &SpinChannel,
        points: &[Vector3<f64>],
        orbitals: &[usize],
    ) -> Result<DMatrix<f64>, EvaluationError>;
}

pub trait SurfaceSampler {
    /// Points on the molecular surface, given atom positions in Ångström.
    /// Returned points are in Ångström as well.
    fn surface_points(
        &self,
        positions: &[Vector3<f64>],
        elements: &[ElementType],
    ) -> Result<Vec<Vector3<f64>>, SurfaceError>;
}
