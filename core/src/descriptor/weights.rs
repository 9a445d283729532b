use nalgebra::{DMatrix, DVector};

/// Soft assignment of every grid energy to the orbital energies, shaped
/// (grid x orbitals).
///
/// The raw weight is (E - e_k)^2 / (2 sigma), and every row is divided by its
/// own sum so it adds up to one. A row whose sum vanishes (every orbital
/// energy equals the grid energy) or is not finite falls back to uniform
/// weights.
pub fn energy_weights(
    energy_grid: &[f64],
    orbital_energies: &DVector<f64>,
    smoothing_width: f64,
) -> DMatrix<f64> {
    let n_orbitals = orbital_energies.len();
    let mut weights = DMatrix::from_fn(energy_grid.len(), n_orbitals, |g, k| {
        (energy_grid[g] - orbital_energies[k]).powi(2) / (2.0 * smoothing_width)
    });

    if n_orbitals == 0 {
        return weights;
    }

    for (g, mut row) in weights.row_iter_mut().enumerate() {
        let sum = row.sum();

        if sum > 0.0 && sum.is_finite() {
            row /= sum;
        } else {
            log::warn!(
                "degenerate weights at grid energy {}, using uniform weights",
                energy_grid[g]
            );
            row.fill(1.0 / n_orbitals as f64);
        }
    }

    weights
}
