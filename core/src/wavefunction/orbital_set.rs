use nalgebra::{DMatrix, DVector};

use super::{MolecularOrbital, Spin};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WavefunctionError {
    /// Only unrestricted (two channel) wavefunctions are supported.
    #[error("restricted wavefunctions are not supported: no beta orbitals were found")]
    Restricted,

    #[error("no alpha orbitals were found")]
    NoAlphaOrbitals,

    #[error("{spin} orbital {orbital} has {found} coefficients, expected {expected}")]
    CoefficientCount {
        spin: Spin,
        orbital: usize,
        expected: usize,
        found: usize,
    },
}

/// The orbitals of one spin channel, stored column-wise.
#[derive(Debug, Clone, PartialEq)]
pub struct SpinChannel {
    /// (n_basis x n_orbitals), column k holds the expansion of orbital k
    coefficients: DMatrix<f64>,
    energies: DVector<f64>,
    occupations: DVector<f64>,
}

impl SpinChannel {
    fn from_orbitals(
        spin: Spin,
        orbitals: &[MolecularOrbital],
        n_basis: usize,
    ) -> Result<Self, WavefunctionError> {
        if let Some((orbital, mo)) = orbitals
            .iter()
            .enumerate()
            .find(|(_, mo)| mo.coefficients.len() != n_basis)
        {
            return Err(WavefunctionError::CoefficientCount {
                spin,
                orbital,
                expected: n_basis,
                found: mo.coefficients.len(),
            });
        }

        let coefficients = DMatrix::from_fn(n_basis, orbitals.len(), |mu, k| {
            orbitals[k].coefficients[mu]
        });
        let energies = DVector::from_iterator(orbitals.len(), orbitals.iter().map(|mo| mo.energy));
        let occupations =
            DVector::from_iterator(orbitals.len(), orbitals.iter().map(|mo| mo.occupation));

        Ok(Self {
            coefficients,
            energies,
            occupations,
        })
    }

    pub fn coefficients(&self) -> &DMatrix<f64> {
        &self.coefficients
    }

    pub fn energies(&self) -> &DVector<f64> {
        &self.energies
    }

    pub fn occupations(&self) -> &DVector<f64> {
        &self.occupations
    }

    /// Number of electrons in this channel, from the summed occupations
    pub fn n_electrons(&self) -> usize {
        self.occupations.sum().round().max(0.0) as usize
    }
}

/// Alpha and beta orbitals of an unrestricted wavefunction, truncated to a
/// common orbital count.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitalSet {
    alpha: SpinChannel,
    beta: SpinChannel,
}

impl OrbitalSet {
    /// Builds the orbital set from parsed orbitals. Both channels are
    /// truncated to `min(n_alpha, n_beta)` orbitals, keeping file order.
    pub fn from_orbitals(
        alpha: &[MolecularOrbital],
        beta: &[MolecularOrbital],
    ) -> Result<Self, WavefunctionError> {
        if beta.is_empty() {
            return Err(WavefunctionError::Restricted);
        }
        let Some(first) = alpha.first() else {
            return Err(WavefunctionError::NoAlphaOrbitals);
        };

        let n_orbitals = alpha.len().min(beta.len());
        let n_basis = first.coefficients.len();
        log::debug!(
            "truncating to {n_orbitals} orbitals per channel ({} alpha, {} beta parsed)",
            alpha.len(),
            beta.len()
        );

        let alpha = SpinChannel::from_orbitals(Spin::Alpha, &alpha[..n_orbitals], n_basis)?;
        let beta = SpinChannel::from_orbitals(Spin::Beta, &beta[..n_orbitals], n_basis)?;
        log::debug!(
            "{} alpha and {} beta electrons",
            alpha.n_electrons(),
            beta.n_electrons()
        );

        Ok(Self { alpha, beta })
    }

    pub fn alpha(&self) -> &SpinChannel {
        &self.alpha
    }

    pub fn beta(&self) -> &SpinChannel {
        &self.beta
    }

    pub fn channel(&self, spin: Spin) -> &SpinChannel {
        match spin {
            Spin::Alpha => &self.alpha,
            Spin::Beta => &self.beta,
        }
    }

    pub fn n_orbitals(&self) -> usize {
        self.alpha.energies.len()
    }

    pub fn n_basis(&self) -> usize {
        self.alpha.coefficients.nrows()
    }
}
