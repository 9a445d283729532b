mod weights;

pub use weights::energy_weights;

use std::{error::Error, fs::File, path::Path};

use nalgebra::{DMatrix, Vector3};
use serde::{Serialize, Serializer};

use crate::{
    atom::BOHR_TO_ANGSTROM,
    backend::{EvaluationError, OrbitalEvaluator, SurfaceSampler},
    molden::MoldenFile,
};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DescriptorError {
    #[error("smoothing width must be finite and positive, got {0}")]
    InvalidSmoothingWidth(f64),

    #[error("energy grid contains a non-finite value at position {0}")]
    NonFiniteEnergy(usize),
}

/// Electronic structure sampled on the molecular surface: one row per surface
/// point, one column per grid energy.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Descriptor {
    /// surface points, in Ångström
    pub points: Vec<Vector3<f64>>,
    pub energy_grid: Vec<f64>,
    #[serde(serialize_with = "serialize_rows")]
    pub values: DMatrix<f64>,
}

impl Descriptor {
    /// Samples the orbitals of a parsed Molden block on the molecular surface
    /// and contracts the squared amplitudes with the energy weights of both
    /// spin channels.
    pub fn compute(
        molden: &MoldenFile,
        energy_grid: &[f64],
        smoothing_width: f64,
        evaluator: &impl OrbitalEvaluator,
        sampler: &impl SurfaceSampler,
    ) -> Result<Self, crate::Error> {
        if !(smoothing_width.is_finite() && smoothing_width > 0.0) {
            return Err(DescriptorError::InvalidSmoothingWidth(smoothing_width).into());
        }
        if let Some(position) = energy_grid.iter().position(|e| !e.is_finite()) {
            return Err(DescriptorError::NonFiniteEnergy(position).into());
        }

        let basis = molden.basis()?;
        let orbitals = molden.orbital_set()?;

        let molecule = molden.molecule();
        let elements = molecule.elements()?;
        let positions = molecule.positions_angstrom();

        let points = sampler.surface_points(&positions, &elements)?;
        log::info!("sampled {} surface points", points.len());

        let points_bohr = points
            .iter()
            .map(|point| point / BOHR_TO_ANGSTROM)
            .collect::<Vec<_>>();
        let indices = (0..orbitals.n_orbitals()).collect::<Vec<_>>();

        let expected = (points.len(), indices.len());
        let alpha = evaluator.evaluate_orbitals(&basis, orbitals.alpha(), &points_bohr, &indices)?;
        check_shape(&alpha, expected)?;
        let beta = evaluator.evaluate_orbitals(&basis, orbitals.beta(), &points_bohr, &indices)?;
        check_shape(&beta, expected)?;

        let weights_alpha =
            energy_weights(energy_grid, orbitals.alpha().energies(), smoothing_width);
        let weights_beta = energy_weights(energy_grid, orbitals.beta().energies(), smoothing_width);

        let values = alpha.map(|amplitude| amplitude * amplitude) * weights_alpha.transpose()
            + beta.map(|amplitude| amplitude * amplitude) * weights_beta.transpose();
        log::info!(
            "descriptor: {} points x {} energies",
            values.nrows(),
            values.ncols()
        );

        Ok(Self {
            points,
            energy_grid: energy_grid.to_vec(),
            values,
        })
    }

    pub fn n_points(&self) -> usize {
        self.values.nrows()
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), Box<dyn Error>> {
        Ok(serde_json::to_writer(
            File::options()
                .create(true)
                .write(true)
                .truncate(true)
                .open(path)?,
            self,
        )?)
    }
}

fn check_shape(
    amplitudes: &DMatrix<f64>,
    expected: (usize, usize),
) -> Result<(), EvaluationError> {
    match amplitudes.shape() {
        found if found == expected => Ok(()),
        found => Err(EvaluationError::Shape { expected, found }),
    }
}

fn serialize_rows<S: Serializer>(matrix: &DMatrix<f64>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(
        matrix
            .row_iter()
            .map(|row| row.iter().copied().collect::<Vec<_>>()),
    )
}
