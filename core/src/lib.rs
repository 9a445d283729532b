pub mod atom;
pub mod backend;
pub mod basis;
pub mod config;
pub mod descriptor;
mod error;
pub mod molden;
pub mod molecule;
pub mod periodic_table;
pub mod wavefunction;

use std::io::BufRead;

use nalgebra::DMatrix;

pub use descriptor::Descriptor;
pub use error::Error;

use backend::{DefaultEvaluator, DefaultSampler, OrbitalEvaluator, SurfaceSampler};
use molden::MoldenFile;

/// Computes the surface descriptor of a Q-Chem log with the native backends.
/// Returns a (surface points x energy grid) matrix.
pub fn compute_descriptor<R: BufRead>(
    log: R,
    energy_grid: &[f64],
    smoothing_width: f64,
) -> Result<DMatrix<f64>, Error> {
    let descriptor = compute_descriptor_with(
        log,
        energy_grid,
        smoothing_width,
        &DefaultEvaluator::default(),
        &DefaultSampler::default(),
    )?;
    Ok(descriptor.values)
}

/// Like [`compute_descriptor`], with exchangeable orbital evaluation and
/// surface sampling.
pub fn compute_descriptor_with<R: BufRead>(
    log: R,
    energy_grid: &[f64],
    smoothing_width: f64,
    evaluator: &impl OrbitalEvaluator,
    sampler: &impl SurfaceSampler,
) -> Result<Descriptor, Error> {
    let molden = MoldenFile::from_log(log)?;
    Descriptor::compute(&molden, energy_grid, smoothing_width, evaluator, sampler)
}

pub mod testing {
    //! Synthetic inputs shared by integration tests and benchmarks.
    use crate::molden::{MOLDEN_END, MOLDEN_START};

    const STO_3G_H: [(f64, f64); 3] = [
        (3.42525091, 0.15432897),
        (0.62391373, 0.53532814),
        (0.16885540, 0.44463454),
    ];

    /// A Q-Chem style log of a linear hydrogen chain with one STO-3G s shell
    /// per atom, `n_atoms` alpha orbitals and `n_beta` beta orbitals. Atoms
    /// are spaced `spacing` Ångström apart along z.
    pub fn hydrogen_chain_log(n_atoms: usize, n_beta: usize, spacing: f64) -> String {
        let mut lines = vec![
            " Welcome to Q-Chem".to_owned(),
            " SCF converged".to_owned(),
            MOLDEN_START.to_owned(),
            "[Molden Format]".to_owned(),
            "[Atoms] (Angs)".to_owned(),
        ];
        lines.extend((0..n_atoms).map(|i| {
            format!(
                "   H {:>5} {:>4} {:>12.6} {:>12.6} {:>12.6}",
                i + 1,
                1,
                0.0,
                0.0,
                i as f64 * spacing
            )
        }));

        lines.push("[GTO]".to_owned());
        for i in 0..n_atoms {
            lines.push(format!("  {} 0", i + 1));
            lines.push(" s    3 1.00".to_owned());
            lines.extend(
                STO_3G_H
                    .iter()
                    .map(|(exponent, coefficient)| format!("  {exponent:.10E}  {coefficient:.10E}")),
            );
            lines.push(String::new());
        }

        lines.push("[MO]".to_owned());
        for (spin, count) in [("Alpha", n_atoms), ("Beta", n_beta)] {
            for k in 0..count {
                let occupation = if 2 * k < n_atoms { 1.0 } else { 0.0 };
                lines.push(" Sym=     A".to_owned());
                lines.push(format!(" Ene= {:.4}", -1.0 + 0.3 * k as f64));
                lines.push(format!(" Spin= {spin}"));
                lines.push(format!(" Occup= {occupation:.6}"));
                lines.extend((0..n_atoms).map(|mu| {
                    // cosine standing waves along the chain
                    let phase =
                        std::f64::consts::PI * (k as f64) * (mu as f64 + 0.5) / n_atoms as f64;
                    format!("{:>4} {:>12.6}", mu + 1, phase.cos())
                }));
            }
        }

        lines.push(MOLDEN_END.to_owned());
        lines.push(" Total job time: 1.00s(wall)".to_owned());

        let mut log = lines.join("\n");
        log.push('\n');
        log
    }
}
