use nalgebra::Vector3;
use serde::Serialize;
use smallvec::SmallVec;

use crate::atom::Atom;

use super::{BasisFunction, ContractedGaussian, Gaussian, Shell, ShellType};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BasisError {
    #[error("shell {shell} references atom {atom}, but only {n_atoms} atoms were parsed")]
    AtomOutOfRange {
        shell: usize,
        atom: usize,
        n_atoms: usize,
    },
}

/// Flattened basis layout: per-shell metadata plus exponent and contraction
/// arrays that are sliced back into shells through `nprims`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Basis {
    /// atom centers, in Bohr
    coordinates: Vec<Vector3<f64>>,
    /// 0-based atom index of every shell
    shell_map: Vec<usize>,
    /// number of primitives of every shell
    nprims: Vec<usize>,
    shell_types: Vec<ShellType>,
    exponents: Vec<f64>,
    coefficients: Vec<f64>,
}

/// A single shell, borrowed out of a [`Basis`].
#[derive(Debug, Clone, Copy)]
pub struct ShellView<'a> {
    pub shell_type: ShellType,
    pub center: &'a Vector3<f64>,
    pub exponents: &'a [f64],
    pub coefficients: &'a [f64],
}

impl Basis {
    /// Lays out the parsed shells for evaluation. Shell atom indices are
    /// 1-based in the source and stored 0-based.
    pub fn from_shells(atoms: &[Atom], shells: &[Shell]) -> Result<Self, BasisError> {
        let n_primitives = shells.iter().map(Shell::n_primitives).sum();

        let mut shell_map = Vec::with_capacity(shells.len());
        let mut nprims = Vec::with_capacity(shells.len());
        let mut shell_types = Vec::with_capacity(shells.len());
        let mut exponents = Vec::with_capacity(n_primitives);
        let mut coefficients = Vec::with_capacity(n_primitives);

        for (index, shell) in shells.iter().enumerate() {
            let atom = shell
                .atom
                .checked_sub(1)
                .filter(|&atom| atom < atoms.len())
                .ok_or(BasisError::AtomOutOfRange {
                    shell: index,
                    atom: shell.atom,
                    n_atoms: atoms.len(),
                })?;

            shell_map.push(atom);
            nprims.push(shell.n_primitives());
            shell_types.push(shell.shell_type);
            for primitive in shell.primitives() {
                exponents.push(primitive.exponent);
                coefficients.push(primitive.coefficient);
            }
        }

        let basis = Self {
            coordinates: atoms.iter().map(|atom| atom.position).collect(),
            shell_map,
            nprims,
            shell_types,
            exponents,
            coefficients,
        };
        log::debug!(
            "basis: {} shells, {} primitives, {} functions",
            basis.n_shells(),
            basis.exponents.len(),
            basis.n_basis()
        );

        Ok(basis)
    }

    pub fn coordinates(&self) -> &[Vector3<f64>] {
        &self.coordinates
    }

    pub fn shell_map(&self) -> &[usize] {
        &self.shell_map
    }

    pub fn nprims(&self) -> &[usize] {
        &self.nprims
    }

    pub fn shell_types(&self) -> &[ShellType] {
        &self.shell_types
    }

    /// Angular momentum code of every shell, see [`ShellType::angular_code`]
    pub fn angular_codes(&self) -> Vec<i32> {
        self.shell_types.iter().map(ShellType::angular_code).collect()
    }

    pub fn exponents(&self) -> &[f64] {
        &self.exponents
    }

    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    pub fn n_shells(&self) -> usize {
        self.shell_types.len()
    }

    /// Total number of Cartesian basis functions
    pub fn n_basis(&self) -> usize {
        self.shell_types.iter().map(ShellType::n_functions).sum()
    }

    pub fn shells(&self) -> impl Iterator<Item = ShellView<'_>> {
        let offsets = self.nprims.iter().scan(0, |offset, &n| {
            let start = *offset;
            *offset += n;
            Some(start..*offset)
        });

        self.shell_types
            .iter()
            .zip(&self.shell_map)
            .zip(offsets)
            .map(|((&shell_type, &atom), range)| ShellView {
                shell_type,
                center: &self.coordinates[atom],
                exponents: &self.exponents[range.clone()],
                coefficients: &self.coefficients[range],
            })
    }

    /// Expands every shell into its normalized Cartesian basis functions, in
    /// the order molecular orbital coefficients refer to them. A combined
    /// shell that was never split shares one coefficient column.
    pub fn basis_functions(&self) -> Vec<BasisFunction> {
        let mut functions = Vec::with_capacity(self.n_basis());

        for shell in self.shells() {
            for &angular in shell.shell_type.cartesian_components() {
                let primitives = shell
                    .exponents
                    .iter()
                    .zip(shell.coefficients)
                    .map(|(&exponent, &coefficient)| Gaussian {
                        exponent,
                        coefficient: coefficient * Gaussian::norm(exponent, angular),
                        angular,
                    })
                    .collect::<SmallVec<_>>();

                functions.push(BasisFunction {
                    contracted_gaussian: ContractedGaussian(primitives),
                    position: *shell.center,
                });
            }
        }

        functions
    }
}
