use nalgebra::{DMatrix, Vector3};

use crate::{basis::Basis, wavefunction::SpinChannel};

use super::{EvaluationError, OrbitalEvaluator};

/// Evaluates orbitals directly from the Cartesian contracted Gaussians of the
/// basis: psi_k(r) = sum_mu C_mu,k phi_mu(r).
#[derive(Debug, Default, Clone, Copy)]
pub struct GaussianEvaluator;

impl OrbitalEvaluator for GaussianEvaluator {
    fn evaluate_orbitals(
        &self,
        basis: &Basis,
        channel: &SpinChannel,
        points: &[Vector3<f64>],
        orbitals: &[usize],
    ) -> Result<DMatrix<f64>, EvaluationError> {
        let coefficients = channel.coefficients();
        let n_basis = basis.n_basis();

        if coefficients.nrows() != n_basis {
            return Err(EvaluationError::BasisMismatch {
                orbital_rows: coefficients.nrows(),
                n_basis,
            });
        }
        if let Some(&index) = orbitals.iter().find(|&&k| k >= coefficients.ncols()) {
            return Err(EvaluationError::OrbitalOutOfRange {
                index,
                n_orbitals: coefficients.ncols(),
            });
        }

        let functions = basis.basis_functions();

        // basis function values, row-major (points x functions)
        #[cfg(feature = "rayon")]
        let values = {
            use rayon::iter::{IntoParallelRefIterator, ParallelIterator};

            points
                .par_iter()
                .flat_map_iter(|point| functions.iter().map(move |f| f.evaluate(*point)))
                .collect::<Vec<_>>()
        };

        #[cfg(not(feature = "rayon"))]
        let values = itertools::iproduct!(points, &functions)
            .map(|(point, f)| f.evaluate(*point))
            .collect::<Vec<_>>();

        let basis_values = DMatrix::from_row_slice(points.len(), functions.len(), &values);
        log::trace!(
            "evaluated {} basis functions at {} points",
            functions.len(),
            points.len()
        );

        Ok(basis_values * coefficients.select_columns(orbitals))
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use nalgebra::Vector3;

    use super::GaussianEvaluator;
    use crate::{
        atom::Atom,
        backend::{EvaluationError, OrbitalEvaluator},
        basis::{Basis, Gaussian, Primitive, Shell, ShellType},
        wavefunction::{MolecularOrbital, OrbitalSet, Spin},
    };

    fn orbital(spin: Spin, coefficients: &[f64]) -> MolecularOrbital {
        MolecularOrbital {
            spin,
            energy: 0.0,
            occupation: 1.0,
            coefficients: coefficients.to_vec(),
        }
    }

    /// one s and one p shell on a single atom at the origin
    fn basis() -> Basis {
        let primitive = [Primitive {
            exponent: 0.5,
            coefficient: 1.0,
        }];

        Basis::from_shells(
            &[Atom::new(6, Vector3::zeros())],
            &[
                Shell::with_primitives(ShellType::S, 1, primitive),
                Shell::with_primitives(ShellType::P, 1, primitive),
            ],
        )
        .unwrap()
    }

    #[test]
    fn amplitudes_are_coefficient_weighted_basis_values() {
        let basis = basis();
        let orbitals = OrbitalSet::from_orbitals(
            &[
                orbital(Spin::Alpha, &[2.0, 0.0, 0.0, 0.0]),
                orbital(Spin::Alpha, &[0.0, 0.0, 0.0, 1.0]),
            ],
            &[
                orbital(Spin::Beta, &[1.0, 0.0, 0.0, 0.0]),
                orbital(Spin::Beta, &[0.0, 1.0, 0.0, 0.0]),
            ],
        )
        .unwrap();

        let points = [Vector3::zeros(), Vector3::new(0.0, 0.0, 1.0)];
        let amplitudes = GaussianEvaluator
            .evaluate_orbitals(&basis, orbitals.alpha(), &points, &[0, 1])
            .unwrap();

        assert_eq!(amplitudes.shape(), (2, 2));

        let s_norm = Gaussian::norm(0.5, (0, 0, 0));
        let p_norm = Gaussian::norm(0.5, (0, 0, 1));
        assert_relative_eq!(amplitudes[(0, 0)], 2.0 * s_norm, epsilon = 1e-12);
        assert_relative_eq!(amplitudes[(0, 1)], 0.0, epsilon = 1e-12);
        assert_relative_eq!(amplitudes[(1, 0)], 2.0 * s_norm * (-0.5f64).exp(), epsilon = 1e-12);
        assert_relative_eq!(amplitudes[(1, 1)], p_norm * (-0.5f64).exp(), epsilon = 1e-12);

        // p_x vanishes on the z axis
        let beta = GaussianEvaluator
            .evaluate_orbitals(&basis, orbitals.beta(), &points, &[1])
            .unwrap();
        assert_relative_eq!(beta[(1, 0)], 0.0, epsilon = 1e-12);
    }

    #[test]
    fn mismatched_basis_is_rejected() {
        let orbitals = OrbitalSet::from_orbitals(
            &[orbital(Spin::Alpha, &[1.0, 0.0])],
            &[orbital(Spin::Beta, &[1.0, 0.0])],
        )
        .unwrap();

        assert_eq!(
            GaussianEvaluator.evaluate_orbitals(&basis(), orbitals.alpha(), &[], &[0]),
            Err(EvaluationError::BasisMismatch {
                orbital_rows: 2,
                n_basis: 4
            })
        );
    }

    #[test]
    fn out_of_range_orbitals_are_rejected() {
        let orbitals = OrbitalSet::from_orbitals(
            &[orbital(Spin::Alpha, &[1.0, 0.0, 0.0, 0.0])],
            &[orbital(Spin::Beta, &[1.0, 0.0, 0.0, 0.0])],
        )
        .unwrap();

        assert!(matches!(
            GaussianEvaluator.evaluate_orbitals(&basis(), orbitals.alpha(), &[], &[0, 3]),
            Err(EvaluationError::OrbitalOutOfRange { index: 3, .. })
        ));
    }
}
