mod functions;
mod set;
mod shell;

pub use functions::{BasisFunction, ContractedGaussian, Gaussian};
pub use set::{Basis, BasisError, ShellView};
pub use shell::{Primitive, Shell, ShellType};
